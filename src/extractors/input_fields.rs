// Input-field (decorated prop) extraction
//
// An input field is a two-line shape: a `@Prop(...)` decorator call,
// then the field declaration itself. The decorator's optional
// `{ required: ..., default: ... }` object is order-insensitive.

use crate::extractors::lines::{find_top_level, nonempty, split_top_level};
use crate::extractors::variables::{resolve_annotation, scan_field_line};
use crate::model::InputField;
use crate::position::locate_from;
use crate::scanner::extract_body;

const DECORATOR: &str = "@Prop";

#[derive(Debug, Default, PartialEq)]
struct PropOptions {
    default_value: Option<String>,
    required: Option<bool>,
}

/// Parse the decorator argument text (parens included). `None` means the
/// arguments do not look like prop options at all and the declaration is
/// not an input field.
fn parse_prop_options(args_text: &str) -> Option<PropOptions> {
    let trimmed = args_text.trim();
    let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let inner = trimmed.strip_suffix(')').unwrap_or(trimmed).trim();

    if inner.is_empty() {
        return Some(PropOptions::default());
    }
    let object = inner.strip_prefix('{')?.strip_suffix('}')?;

    let mut options = PropOptions::default();
    for pair in split_top_level(object, ',') {
        let Some(colon) = find_top_level(pair, ':') else {
            continue;
        };
        let key = pair[..colon].trim();
        let value = pair[colon + 1..].trim();
        match key {
            "default" => options.default_value = nonempty(value),
            "required" => options.required = Some(value == "true"),
            _ => {}
        }
    }
    Some(options)
}

/// Extract the decorator-marked input fields of one class.
pub fn extract_input_fields(
    class_text: &str,
    file_text: &str,
    class_start_line: usize,
) -> Vec<InputField> {
    let lines: Vec<&str> = class_text.split('\n').collect();
    let mut line_offsets = Vec::with_capacity(lines.len());
    let mut offset = 0usize;
    for raw_line in &lines {
        line_offsets.push(offset);
        offset += raw_line.len() + 1;
    }

    let mut fields = Vec::new();
    for (idx, raw_line) in lines.iter().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim_start();
        if !trimmed.starts_with(DECORATOR) {
            continue;
        }
        let indent = line.len() - trimmed.len();
        let after_name = &trimmed[DECORATOR.len()..];
        if !after_name.starts_with('(') {
            continue;
        }

        let paren_offset = line_offsets[idx] + indent + DECORATOR.len();
        let args = extract_body(class_text, paren_offset, '(', ')', false);
        if !args.complete {
            continue;
        }
        // Nothing may follow the decorator call on its closing line.
        let rest = &class_text[paren_offset + args.text.len()..];
        if !rest.split('\n').next().unwrap_or("").trim().is_empty() {
            continue;
        }
        let Some(options) = parse_prop_options(&args.text) else {
            continue;
        };

        let field_idx = idx + 1 + args.text.matches('\n').count();
        let Some(field_raw) = lines.get(field_idx) else {
            continue;
        };
        let field_line = field_raw.strip_suffix('\r').unwrap_or(field_raw);
        let Some(field) = scan_field_line(field_line) else {
            continue;
        };
        // Input fields always carry a type annotation.
        if field.annotation.is_none() {
            continue;
        }
        let declared_type = resolve_annotation(&field, line_offsets[field_idx], class_text);
        let position = locate_from(file_text, field_line, field.name, class_start_line + field_idx);

        fields.push(InputField {
            name: field.name.to_string(),
            access: field.access,
            declared_type,
            default_value: options.default_value,
            required: options.required,
            position,
        });
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccessLevel;

    #[test]
    fn test_plain_prop() {
        let class_text = "export class Grid {\n\t@Prop()\n\tpublic rows: Row[];\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "rows");
        assert_eq!(fields[0].access, AccessLevel::Public);
        assert_eq!(fields[0].declared_type.as_deref(), Some("Row[]"));
        assert_eq!(fields[0].default_value, None);
        assert_eq!(fields[0].required, None);
    }

    #[test]
    fn test_options_in_both_orders() {
        let forward = "export class A {\n\t@Prop({ required: true, default: 1 })\n\tlimit: number;\n}";
        let reversed = "export class A {\n\t@Prop({ default: 1, required: true })\n\tlimit: number;\n}";
        for class_text in [forward, reversed] {
            let fields = extract_input_fields(class_text, class_text, 0);
            assert_eq!(fields.len(), 1, "in {class_text:?}");
            assert_eq!(fields[0].default_value.as_deref(), Some("1"));
            assert_eq!(fields[0].required, Some(true));
        }
    }

    #[test]
    fn test_required_false() {
        let class_text = "export class A {\n\t@Prop({ required: false })\n\tname: string;\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert_eq!(fields[0].required, Some(false));
    }

    #[test]
    fn test_quoted_default_value() {
        let class_text = "export class A {\n\t@Prop({ default: 'abc' })\n\tname: string;\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert_eq!(fields[0].default_value.as_deref(), Some("'abc'"));
    }

    #[test]
    fn test_decorator_without_following_field_is_skipped() {
        let class_text = "export class A {\n\t@Prop()\n\tsend(): void {\n\t}\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_untyped_field_is_skipped() {
        let class_text = "export class A {\n\t@Prop()\n\tname = 'x';\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_multi_line_decorator_options() {
        let class_text =
            "export class A {\n\t@Prop({\n\t\trequired: true\n\t})\n\tname: string;\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].required, Some(true));
        assert_eq!(fields[0].position.line, 4);
    }

    #[test]
    fn test_position_is_on_field_line() {
        let class_text = "export class A {\n\t@Prop()\n\tprivate rows: Row[];\n}";
        let fields = extract_input_fields(class_text, class_text, 0);
        let position = fields[0].position;
        assert_eq!(position.line, 2);
        let line = class_text.split('\n').nth(2).unwrap();
        assert_eq!(
            &line[position.start_column as usize..position.end_column as usize],
            "rows"
        );
    }
}
