// Property (getter/setter) extraction
//
// Getters and setters are scanned independently by a shared accessor
// shape; two declarations with the same name merge into one Property.
// The getter contributes the declared type, the setter its parameter.

use crate::extractors::lines::{LineCursor, nonempty};
use crate::model::{AccessLevel, MethodParameter, Property};
use crate::position::locate_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorKind {
    Getter,
    Setter,
}

#[derive(Debug)]
struct AccessorLine<'a> {
    kind: AccessorKind,
    access: AccessLevel,
    name: &'a str,
    declared_type: Option<String>,
    setter_parameter: Option<MethodParameter>,
}

fn scan_accessor_line(line: &str) -> Option<AccessorLine<'_>> {
    let mut cursor = LineCursor::new(line);
    if !cursor.eat_member_indent() {
        return None;
    }
    let access = cursor.take_access_level();
    cursor.skip_ws();
    let kind = if cursor.eat_keyword("get") {
        AccessorKind::Getter
    } else if cursor.eat_keyword("set") {
        AccessorKind::Setter
    } else {
        return None;
    };
    if cursor.skip_ws() == 0 {
        return None;
    }
    let name = cursor.take_identifier()?;
    cursor.skip_ws();
    if !cursor.eat_char('(') {
        return None;
    }
    cursor.skip_ws();

    let mut parameter_name = None;
    let mut parameter_type = None;
    if let Some(param) = cursor.take_identifier() {
        parameter_name = Some(param);
        cursor.skip_ws();
        while cursor.eat_char('?') {}
        if cursor.eat_char(':') {
            cursor.skip_ws();
            parameter_type = nonempty(cursor.take_type_text());
        }
    }
    cursor.skip_ws();
    if !cursor.eat_char(')') {
        return None;
    }
    cursor.skip_ws();

    let declared_type = {
        while cursor.eat_char('?') {}
        if cursor.eat_char(':') {
            cursor.skip_ws();
            // Brace-opened structural return annotations degrade to their
            // first-line text here; accessors are not followed across files.
            nonempty(&cursor.take_type_text().replace(['{', '}'], ""))
        } else {
            None
        }
    };

    let setter_parameter = match (kind, parameter_name, parameter_type) {
        (AccessorKind::Setter, Some(name), Some(declared_type)) => Some(MethodParameter {
            name: name.to_string(),
            declared_type: Some(declared_type),
            default_value: None,
        }),
        _ => None,
    };

    Some(AccessorLine {
        kind,
        access,
        name,
        declared_type,
        setter_parameter,
    })
}

/// Extract the merged getter/setter properties of one class.
pub fn extract_properties(
    class_text: &str,
    file_text: &str,
    class_start_line: usize,
) -> Vec<Property> {
    let mut properties: Vec<Property> = Vec::new();

    for (idx, raw_line) in class_text.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let Some(accessor) = scan_accessor_line(line) else {
            continue;
        };

        if let Some(existing) = properties.iter_mut().find(|p| p.name == accessor.name) {
            match accessor.kind {
                AccessorKind::Setter => existing.setter_parameter = accessor.setter_parameter,
                AccessorKind::Getter => {
                    if existing.declared_type.is_none() {
                        existing.declared_type = accessor.declared_type;
                    }
                }
            }
            continue;
        }

        let position = locate_from(file_text, line, accessor.name, class_start_line + idx);
        properties.push(Property {
            name: accessor.name.to_string(),
            access: accessor.access,
            declared_type: accessor.declared_type,
            setter_parameter: accessor.setter_parameter,
            position,
        });
    }

    properties
}
