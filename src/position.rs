// Position locator
//
// Maps a matched declaration fragment back to a concrete line/column span
// inside the full file text. Extraction works on class bodies that were
// sliced out of the file, so the original offsets are re-derived here.

use serde::{Deserialize, Serialize};

/// A resolved source position: zero-based line, start/end column of a
/// symbol occurrence. All fields are `-1` when the locator could not
/// re-find the declaration text in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: i32,
    pub start_column: i32,
    pub end_column: i32,
}

impl SourcePosition {
    pub const UNRESOLVED: SourcePosition = SourcePosition {
        line: -1,
        start_column: -1,
        end_column: -1,
    };

    pub fn is_resolved(&self) -> bool {
        self.line >= 0 && self.start_column >= 0
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

/// Find the first line of `full_text` that starts with `fragment` and
/// report the column span of the first `symbol` occurrence within it.
///
/// When two declarations produce byte-identical fragments this always
/// answers with the first; callers that know roughly where their match
/// came from should use [`locate_from`] instead.
pub fn locate(full_text: &str, fragment: &str, symbol: &str) -> SourcePosition {
    locate_from(full_text, fragment, symbol, 0)
}

/// Like [`locate`], but only considers lines at or after `hint_line`.
///
/// Extractors pass the starting line of the class body a declaration was
/// found in, which disambiguates identically-written declarations living
/// in different classes of the same file.
pub fn locate_from(
    full_text: &str,
    fragment: &str,
    symbol: &str,
    hint_line: usize,
) -> SourcePosition {
    if fragment.is_empty() {
        return SourcePosition::UNRESOLVED;
    }

    // Fragments are single lines; a multi-line fragment is matched by its
    // first line, same as a caller would see it in the file.
    let fragment = fragment.lines().next().unwrap_or(fragment);

    for (number, line) in full_text.split('\n').enumerate() {
        if number < hint_line {
            continue;
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.starts_with(fragment) {
            continue;
        }
        return match line.find(symbol) {
            Some(start) => SourcePosition {
                line: number as i32,
                start_column: start as i32,
                end_column: (start + symbol.len()) as i32,
            },
            None => SourcePosition::UNRESOLVED,
        };
    }

    SourcePosition::UNRESOLVED
}

/// Zero-based line number of byte `offset` inside `text`.
pub fn line_of_offset(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text[..offset].bytes().filter(|b| *b == b'\n').count()
}
