// Lexical scanner for balanced-region extraction
//
// A character-by-character state machine that walks raw source text and
// captures the region between a matching open/close symbol pair. String
// literals and comments are tracked so delimiters inside them never touch
// the depth counter. This is the one piece of low-level logic everything
// else (class bodies, parameter lists, structural types) is built on.

/// Scanner state. The four states are mutually exclusive: a quote inside a
/// comment opens no string, an open symbol inside a string counts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a string literal, remembering which quote opened it.
    InString(char),
    InLineComment,
    InBlockComment,
}

/// Result of a balanced-region scan.
///
/// `complete` is false when end-of-input was reached before the bracket
/// depth returned to zero; `text` then holds whatever was scanned so far.
/// Callers decide whether a partial body is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBody {
    pub text: String,
    pub complete: bool,
}

impl ExtractedBody {
    fn partial(text: &str) -> Self {
        Self {
            text: text.to_string(),
            complete: false,
        }
    }
}

/// Scan `text` from byte offset `start` and return the substring spanning
/// the first `open` symbol through its matching `close` symbol, inclusive.
///
/// With `include_prefix` set, the returned text starts at `start` instead
/// of at the first `open` symbol, which keeps a class signature line in
/// front of its body. Quotes honor `\`-escaping; `//` runs to end of line
/// and `/* */` nests nothing.
pub fn extract_body(
    text: &str,
    start: usize,
    open: char,
    close: char,
    include_prefix: bool,
) -> ExtractedBody {
    let start = start.min(text.len());
    let mut state = ScanState::Normal;
    let mut depth: i32 = 0;
    let mut found_open = false;
    // Span start: fixed at `start` when the prefix is kept, otherwise set
    // when the first open symbol shows up.
    let mut span_start: Option<usize> = include_prefix.then_some(start);
    let mut escaped = false;

    let mut chars = text[start..].char_indices().peekable();
    while let Some((rel, c)) = chars.next() {
        let at = start + rel;
        match state {
            ScanState::InString(quote) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    state = ScanState::Normal;
                }
            }
            ScanState::InLineComment => {
                if c == '\n' {
                    state = ScanState::Normal;
                }
            }
            ScanState::InBlockComment => {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal => {
                if c == '\'' || c == '"' || c == '`' {
                    state = ScanState::InString(c);
                } else if c == '/' {
                    match chars.peek() {
                        Some((_, '/')) => {
                            chars.next();
                            state = ScanState::InLineComment;
                        }
                        Some((_, '*')) => {
                            chars.next();
                            state = ScanState::InBlockComment;
                        }
                        _ => {}
                    }
                } else if c == open {
                    found_open = true;
                    depth += 1;
                    span_start.get_or_insert(at);
                } else if c == close {
                    depth -= 1;
                }
            }
        }

        if found_open && depth == 0 {
            let from = span_start.unwrap_or(at);
            return ExtractedBody {
                text: text[from..at + c.len_utf8()].to_string(),
                complete: true,
            };
        }
    }

    // Ran off the end with the region still open (or never opened).
    match span_start {
        Some(from) => ExtractedBody::partial(&text[from..]),
        None => ExtractedBody::partial(""),
    }
}

/// Remove `//` and `/* */` comments from `text`, leaving string literals
/// untouched. Used on compiler-config files that allow comments before
/// they are handed to the JSON parser.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Normal;
    let mut escaped = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            ScanState::InString(quote) => {
                out.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    state = ScanState::Normal;
                }
            }
            ScanState::InLineComment => {
                if c == '\n' {
                    out.push(c);
                    state = ScanState::Normal;
                }
            }
            ScanState::InBlockComment => {
                if c == '*' && matches!(chars.peek(), Some('/')) {
                    chars.next();
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal => {
                if c == '\'' || c == '"' || c == '`' {
                    out.push(c);
                    state = ScanState::InString(c);
                } else if c == '/' {
                    match chars.peek() {
                        Some('/') => {
                            chars.next();
                            state = ScanState::InLineComment;
                        }
                        Some('*') => {
                            chars.next();
                            state = ScanState::InBlockComment;
                        }
                        _ => out.push(c),
                    }
                } else {
                    out.push(c);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_braces() {
        let body = extract_body("class Foo { bar: string; }", 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, "{ bar: string; }");
    }

    #[test]
    fn test_include_prefix_keeps_signature() {
        let body = extract_body("class Foo { a(){} }", 0, '{', '}', true);
        assert!(body.complete);
        assert_eq!(body.text, "class Foo { a(){} }");
    }

    #[test]
    fn test_nested_depth() {
        let body = extract_body("{ a { b } c } tail", 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, "{ a { b } c }");
    }

    #[test]
    fn test_delimiters_in_strings_ignored() {
        let body = extract_body("{ let s = \"}\"; }", 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, "{ let s = \"}\"; }");
    }

    #[test]
    fn test_delimiters_in_line_comment_ignored() {
        let text = "{\n// {\nx\n}";
        let body = extract_body(text, 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, text);
    }

    #[test]
    fn test_delimiters_in_block_comment_ignored() {
        let body = extract_body("{ /* } */ x }", 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, "{ /* } */ x }");
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let body = extract_body(r#"{ let s = "a\"}"; }"#, 0, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, r#"{ let s = "a\"}"; }"#);
    }

    #[test]
    fn test_unbalanced_returns_partial() {
        let body = extract_body("{ open", 0, '{', '}', false);
        assert!(!body.complete);
        assert_eq!(body.text, "{ open");
    }

    #[test]
    fn test_no_open_symbol_yields_empty() {
        let body = extract_body("nothing here", 0, '{', '}', false);
        assert!(!body.complete);
        assert_eq!(body.text, "");
    }

    #[test]
    fn test_parameter_list_extraction() {
        let text = "send(a: Map<string, number>, b = (1 + 2)): void {";
        let body = extract_body(text, 0, '(', ')', false);
        assert!(body.complete);
        assert_eq!(body.text, "(a: Map<string, number>, b = (1 + 2))");
    }

    #[test]
    fn test_start_offset_is_honored() {
        let text = "{ first } { second }";
        let body = extract_body(text, 9, '{', '}', false);
        assert!(body.complete);
        assert_eq!(body.text, "{ second }");
    }

    #[test]
    fn test_strip_comments_preserves_strings() {
        let stripped = strip_comments("{ \"a//b\": 1, /* gone */ \"c\": 2 } // tail");
        assert_eq!(stripped, "{ \"a//b\": 1,  \"c\": 2 } ");
    }

    #[test]
    fn test_strip_comments_keeps_line_breaks() {
        let stripped = strip_comments("a // x\nb");
        assert_eq!(stripped, "a \nb");
    }
}
