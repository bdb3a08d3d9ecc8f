// Method declaration extraction
//
// A signature line is scanned for modifiers and the name; the parameter
// list is then re-captured with the bracket scanner so nested generics,
// parens and string defaults never break the top-level comma split.

use crate::extractors::lines::{
    LineCursor, find_top_level, find_top_level_assignment, nonempty, split_top_level,
};
use crate::model::{AccessLevel, Method, MethodParameter};
use crate::position::locate_from;
use crate::scanner::extract_body;

#[derive(Debug)]
struct MethodLine<'a> {
    access: AccessLevel,
    name: &'a str,
    /// Byte offset of the opening `(` within the line.
    paren_col: usize,
}

fn scan_method_line(line: &str) -> Option<MethodLine<'_>> {
    let mut cursor = LineCursor::new(line);
    if !cursor.eat_member_indent() {
        return None;
    }

    let tokens_start = cursor.pos();
    let mut access = cursor.take_access_level();
    cursor.skip_ws();
    while cursor.eat_keyword("static") || cursor.eat_keyword("async") {
        cursor.skip_ws();
    }
    let name = match cursor.take_identifier() {
        Some(name) => name,
        None => {
            // The modifier word was the name after all (`public()`).
            if access == AccessLevel::Unspecified {
                return None;
            }
            let mut retry = LineCursor::new(line);
            retry.advance(tokens_start);
            access = AccessLevel::Unspecified;
            cursor = retry;
            cursor.take_identifier()?
        }
    };
    cursor.skip_ws();
    if !cursor.eat_char('(') {
        return None;
    }
    Some(MethodLine {
        access,
        name,
        paren_col: cursor.pos() - 1,
    })
}

/// Parse the captured `(...)` text into an ordered parameter list.
fn parse_parameters(params_text: &str) -> Vec<MethodParameter> {
    let trimmed = params_text.trim();
    let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let inner = trimmed.strip_suffix(')').unwrap_or(trimmed);
    split_top_level(inner, ',')
        .into_iter()
        .filter_map(parse_parameter)
        .collect()
}

fn parse_parameter(segment: &str) -> Option<MethodParameter> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let (left, right) = match find_top_level(segment, ':') {
        Some(at) => (&segment[..at], Some(&segment[at + 1..])),
        None => (segment, None),
    };

    let name = first_identifier(left)?;
    let mut declared_type = None;
    let mut default_value = None;
    match right {
        Some(annotated) => match find_top_level_assignment(annotated) {
            Some(at) => {
                declared_type = nonempty(&annotated[..at]);
                default_value = nonempty(&annotated[at + 1..]);
            }
            None => declared_type = nonempty(annotated),
        },
        None => {
            if let Some(at) = find_top_level_assignment(left) {
                default_value = nonempty(&left[at + 1..]);
            }
        }
    }

    Some(MethodParameter {
        name: name.to_string(),
        declared_type,
        default_value,
    })
}

/// First identifier in `text`, skipping rest (`...`) and access markers.
fn first_identifier(text: &str) -> Option<&str> {
    let mut cursor = LineCursor::new(text);
    loop {
        if let Some(word) = cursor.take_identifier() {
            if matches!(word, "public" | "protected" | "private" | "readonly") {
                cursor.skip_ws();
                continue;
            }
            return Some(word);
        }
        cursor.bump()?;
    }
}

/// Return-type annotation from the signature text after the parameter
/// list: `: Type`, with a stray trailing `{` trimmed away.
fn scan_return_type(after_params: &str) -> Option<String> {
    let mut cursor = LineCursor::new(after_params);
    cursor.skip_ws();
    while cursor.eat_char('?') {}
    if !cursor.eat_char(':') {
        return None;
    }
    cursor.skip_ws();
    let text = cursor.take_type_text();
    nonempty(text.trim().trim_end_matches('{'))
}

/// Extract every method declared at class level in `class_text`.
pub fn extract_methods(class_text: &str, file_text: &str, class_start_line: usize) -> Vec<Method> {
    let mut methods = Vec::new();
    let mut line_offset = 0usize;

    for (idx, raw_line) in class_text.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if let Some(signature) = scan_method_line(line) {
            let params = extract_body(class_text, line_offset + signature.paren_col, '(', ')', false);
            let parameters = parse_parameters(&params.text);
            // The return annotation only lives on this line when the
            // parameter list closed on it.
            let return_type = if params.complete && !params.text.contains('\n') {
                scan_return_type(&line[signature.paren_col + params.text.len()..])
            } else {
                None
            };
            let position = locate_from(file_text, line, signature.name, class_start_line + idx);
            methods.push(Method {
                name: signature.name.to_string(),
                access: signature.access,
                parameters,
                return_type,
                position,
            });
        }
        line_offset += raw_line.len() + 1;
    }

    methods
}
