// Import statement extraction
//
// Scans import lines into their bound names and module specifier. Four
// shapes: default import, named import list, namespace (`* as X`) and a
// bare specifier. A mixed `import D, { A, B }` binds both.

use crate::extractors::lines::{LineCursor, split_top_level};
use crate::scanner::extract_body;

/// One scanned import statement, before path resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStatement {
    /// Default/namespace binding, if any.
    pub alias: Option<String>,
    /// Local bound names of the named-import list, in order.
    pub imported_names: Vec<String>,
    /// Raw module string between the quotes.
    pub specifier: String,
}

fn take_quoted(cursor: &mut LineCursor<'_>) -> Option<String> {
    let quote = match cursor.peek() {
        Some(q @ ('\'' | '"')) => q,
        _ => return None,
    };
    cursor.bump();
    let rest = cursor.rest();
    let end = rest.find(quote)?;
    let value = rest[..end].to_string();
    cursor.advance(end + quote.len_utf8());
    Some(value)
}

fn take_named_list(cursor: &mut LineCursor<'_>) -> Option<Vec<String>> {
    let body = extract_body(cursor.rest(), 0, '{', '}', false);
    if !body.complete {
        return None;
    }
    cursor.advance(body.text.len());
    let inner = body
        .text
        .trim_start_matches('{')
        .trim_end_matches('}');
    let names = split_top_level(inner, ',')
        .into_iter()
        // The last whitespace token is the locally bound name: plain
        // `A`, rebound `A as B`, type-only `type A`.
        .filter_map(|segment| segment.split_whitespace().last())
        .map(str::to_string)
        .collect();
    Some(names)
}

fn scan_import_line(line: &str) -> Option<ImportStatement> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut cursor = LineCursor::new(line);
    cursor.skip_ws();
    if !cursor.eat_keyword("import") {
        return None;
    }
    if cursor.skip_ws() == 0 {
        return None;
    }

    let mut alias = None;
    let mut imported_names = Vec::new();
    match cursor.peek()? {
        // Bare side-effect import: `import 'reflect-metadata';`
        '\'' | '"' => {
            let specifier = take_quoted(&mut cursor)?;
            return Some(ImportStatement {
                alias: None,
                imported_names,
                specifier,
            });
        }
        '*' => {
            cursor.bump();
            cursor.skip_ws();
            if !cursor.eat_keyword("as") {
                return None;
            }
            cursor.skip_ws();
            alias = Some(cursor.take_identifier()?.to_string());
        }
        '{' => {
            imported_names = take_named_list(&mut cursor)?;
        }
        _ => {
            alias = Some(cursor.take_identifier()?.to_string());
            cursor.skip_ws();
            if cursor.eat_char(',') {
                cursor.skip_ws();
                if cursor.peek() != Some('{') {
                    return None;
                }
                imported_names = take_named_list(&mut cursor)?;
            }
        }
    }

    cursor.skip_ws();
    if !cursor.eat_keyword("from") {
        return None;
    }
    cursor.skip_ws();
    let specifier = take_quoted(&mut cursor)?;
    Some(ImportStatement {
        alias,
        imported_names,
        specifier,
    })
}

/// Every import statement of `file_text`, in appearance order.
pub fn extract_imports(file_text: &str) -> Vec<ImportStatement> {
    file_text.split('\n').filter_map(scan_import_line).collect()
}
