// Variable declaration extraction
//
// A variable line carries an optional access modifier, a name with
// optional `?`/`!` markers, then either a type annotation or an
// initializer. Structural types that open a `{` block are captured
// across lines with the bracket scanner.

use crate::extractors::lines::{LineCursor, nonempty, take_access_and_name};
use crate::model::{AccessLevel, Variable};
use crate::position::locate_from;
use crate::scanner::extract_body;

/// Raw scan result for one field-shaped line, shared with the input-field
/// extractor (a decorated field is the same line shape).
#[derive(Debug)]
pub(crate) struct FieldLine<'a> {
    pub access: AccessLevel,
    pub name: &'a str,
    /// Single-line annotation text; `None` for initializer-only fields.
    pub annotation: Option<&'a str>,
    /// Byte offset of the annotation within the line.
    pub annotation_offset: usize,
}

/// Scan one line as a field declaration. Returns `None` for anything that
/// is not one: method signatures, accessors, statements, close braces.
pub(crate) fn scan_field_line(line: &str) -> Option<FieldLine<'_>> {
    let mut cursor = LineCursor::new(line);
    if !cursor.eat_member_indent() {
        return None;
    }
    let (access, name) = take_access_and_name(&mut cursor)?;
    cursor.skip_ws();
    while matches!(cursor.peek(), Some('?') | Some('!')) {
        cursor.bump();
    }
    cursor.skip_ws();

    if cursor.eat_char(':') {
        cursor.skip_ws();
        let annotation_offset = cursor.pos();
        let annotation = cursor.take_type_text();
        if annotation.trim().is_empty() {
            return None;
        }
        return Some(FieldLine {
            access,
            name,
            annotation: Some(annotation),
            annotation_offset,
        });
    }

    if cursor.eat_char('=') && !cursor.rest().trim().is_empty() {
        return Some(FieldLine {
            access,
            name,
            annotation: None,
            annotation_offset: cursor.pos(),
        });
    }

    None
}

/// Final declared-type text for a scanned field line. An annotation that
/// opens a `{` block is re-captured from the class text so the full
/// multi-line structural type is kept verbatim.
pub(crate) fn resolve_annotation(
    field: &FieldLine<'_>,
    line_offset: usize,
    class_text: &str,
) -> Option<String> {
    let annotation = field.annotation?;
    let trimmed = annotation.trim();
    if let Some(brace_col) = annotation.find('{').filter(|_| trimmed.starts_with('{')) {
        let body = extract_body(
            class_text,
            line_offset + field.annotation_offset + brace_col,
            '{',
            '}',
            false,
        );
        return nonempty(&body.text);
    }
    nonempty(trimmed)
}

/// Initializer text: everything after the first assignment `=` with the
/// trailing `;` stripped.
pub(crate) fn scan_default_value(line: &str) -> Option<String> {
    let trimmed = line.trim().trim_end_matches(';').trim_end();
    let at = crate::extractors::lines::find_top_level_assignment(trimmed)?;
    nonempty(&trimmed[at + 1..])
}

/// Extract every variable declared at class level in `class_text`.
/// `class_start_line` is the zero-based line of the class header inside
/// the full file, used to pin positions to the right class.
pub fn extract_variables(
    class_text: &str,
    file_text: &str,
    class_start_line: usize,
) -> Vec<Variable> {
    let mut variables = Vec::new();
    let mut line_offset = 0usize;

    for (idx, raw_line) in class_text.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if let Some(field) = scan_field_line(line) {
            let declared_type = resolve_annotation(&field, line_offset, class_text);
            let default_value = scan_default_value(line);
            let position = locate_from(file_text, line, field.name, class_start_line + idx);
            variables.push(Variable {
                name: field.name.to_string(),
                access: field.access,
                declared_type,
                default_value,
                position,
            });
        }
        line_offset += raw_line.len() + 1;
    }

    variables
}
