// Class region extraction
//
// Finds exported class/interface declaration headers and captures each
// full body (signature line included) with the bracket scanner.

use crate::extractors::lines::LineCursor;
use crate::scanner::extract_body;

/// One class's raw text span and its byte offset in the file.
#[derive(Debug, Clone)]
pub struct ClassRegion {
    pub text: String,
    pub offset: usize,
    /// False when the body ran to end-of-file without closing.
    pub complete: bool,
}

fn scan_class_header(line: &str) -> Option<usize> {
    let mut cursor = LineCursor::new(line);
    cursor.skip_ws();
    let header_start = cursor.pos();
    if !cursor.eat_keyword("export") {
        return None;
    }
    cursor.skip_ws();
    if cursor.eat_keyword("default") {
        cursor.skip_ws();
    }
    if cursor.eat_keyword("abstract") {
        cursor.skip_ws();
    }
    if !(cursor.eat_keyword("class") || cursor.eat_keyword("interface")) {
        return None;
    }
    if cursor.skip_ws() == 0 {
        return None;
    }
    cursor.take_identifier()?;
    Some(header_start)
}

/// All exported class/interface regions of `file_text`, in order.
pub fn extract_class_regions(file_text: &str) -> Vec<ClassRegion> {
    let mut regions = Vec::new();
    let mut line_offset = 0usize;

    for raw_line in file_text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if let Some(col) = scan_class_header(line) {
            let offset = line_offset + col;
            let body = extract_body(file_text, offset, '{', '}', true);
            if !body.text.is_empty() {
                regions.push(ClassRegion {
                    text: body.text,
                    offset,
                    complete: body.complete,
                });
            }
        }
        line_offset += raw_line.len() + 1;
    }

    regions
}

/// Recover the declared name from a class region's signature line: the
/// identifier following the `class`/`interface` keyword.
pub fn class_name(class_text: &str) -> Option<String> {
    let line = class_text.lines().next()?;
    let mut cursor = LineCursor::new(line);
    loop {
        match cursor.take_identifier() {
            Some("class") | Some("interface") => {
                cursor.skip_ws();
                return cursor.take_identifier().map(str::to_string);
            }
            Some(_) => {}
            None => {
                cursor.bump()?;
            }
        }
    }
}
