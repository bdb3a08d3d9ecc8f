// Line scanning primitives
//
// Small cursor over a single line of source text. The declaration
// extractors are built from these instead of capture-group patterns, so
// every scan yields named fields and failure is an explicit `None`.

use crate::model::AccessLevel;

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Characters that may appear in a single-line type annotation: word
/// characters, array/object/generic brackets, dots, unions, spaces and
/// commas. Scanning stops at anything else (`=`, `;`, `(`, ...).
pub(crate) fn is_type_char(c: char) -> bool {
    is_identifier_char(c)
        || matches!(c, '[' | ']' | '{' | '}' | '<' | '>' | '.' | '|' | ' ' | ',')
}

#[derive(Debug, Clone)]
pub(crate) struct LineCursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Advance over `bytes` already-inspected bytes.
    pub fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.line.len());
    }

    /// Skip spaces and tabs.
    pub fn skip_ws(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consume a class-member indent: exactly one tab or up to four
    /// spaces. Lines indented deeper belong to statement bodies, not to
    /// the class level, and are rejected.
    pub fn eat_member_indent(&mut self) -> bool {
        if self.eat_char('\t') {
            return !matches!(self.peek(), Some(' ') | Some('\t'));
        }
        let mut eaten = 0;
        while eaten < 4 && self.eat_char(' ') {
            eaten += 1;
        }
        !matches!(self.peek(), Some(' ') | Some('\t'))
    }

    /// Take one identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
    pub fn take_identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_identifier_start(c) => {}
            _ => return None,
        }
        while matches!(self.peek(), Some(c) if is_identifier_char(c)) {
            self.pos += 1;
        }
        Some(&self.line[start..self.pos])
    }

    /// Consume `keyword` if it is present as a whole word.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let checkpoint = self.pos;
        match self.take_identifier() {
            Some(word) if word == keyword => true,
            _ => {
                self.pos = checkpoint;
                false
            }
        }
    }

    /// Take an optional access modifier. The cursor is only advanced when
    /// one of the three keywords is present.
    pub fn take_access_level(&mut self) -> AccessLevel {
        let checkpoint = self.pos;
        match self.take_identifier() {
            Some(word @ ("public" | "protected" | "private")) => AccessLevel::parse(word),
            _ => {
                self.pos = checkpoint;
                AccessLevel::Unspecified
            }
        }
    }

    /// Take the longest run of type-annotation characters.
    pub fn take_type_text(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_type_char(c)) {
            self.pos += c_len(self.line, self.pos);
        }
        &self.line[start..self.pos]
    }
}

fn c_len(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map(|c| c.len_utf8()).unwrap_or(1)
}

/// Access modifier followed by the declared name. Handles the corner
/// where a member is itself named `public`/`private`/`protected` (the
/// modifier word turns out to be the name).
pub(crate) fn take_access_and_name<'a>(cursor: &mut LineCursor<'a>) -> Option<(AccessLevel, &'a str)> {
    let checkpoint = cursor.pos();
    let access = cursor.take_access_level();
    if access != AccessLevel::Unspecified {
        cursor.skip_ws();
        match cursor.take_identifier() {
            Some(name) => return Some((access, name)),
            None => {
                // No name after the modifier: re-read the modifier word as
                // the name itself (`public(` is a method named "public").
                cursor_rewind(cursor, checkpoint);
                let name = cursor.take_identifier()?;
                return Some((AccessLevel::Unspecified, name));
            }
        }
    }
    let name = cursor.take_identifier()?;
    Some((AccessLevel::Unspecified, name))
}

fn cursor_rewind(cursor: &mut LineCursor<'_>, to: usize) {
    // LineCursor keeps `pos` private; this helper is the one sanctioned
    // rewind point for multi-token backtracking.
    cursor.pos = to;
}

/// Split `text` on `separator` at nesting depth zero. Parentheses,
/// brackets, braces, angle brackets and string literals all guard their
/// contents; `=>` does not close an angle bracket.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut angle_depth: i32 = 0;
    let mut in_string: Option<char> = None;
    let mut prev = '\0';
    let mut segment_start = 0;

    for (at, c) in text.char_indices() {
        if let Some(quote) = in_string {
            if c == quote && prev != '\\' {
                in_string = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => in_string = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '<' => angle_depth += 1,
                '>' if prev != '=' && angle_depth > 0 => angle_depth -= 1,
                _ if c == separator && depth == 0 && angle_depth == 0 => {
                    parts.push(&text[segment_start..at]);
                    segment_start = at + c.len_utf8();
                }
                _ => {}
            }
        }
        prev = c;
    }
    parts.push(&text[segment_start..]);
    parts
}

/// Byte index of the first `needle` at nesting depth zero, if any.
pub(crate) fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let first = split_top_level(text, needle);
    if first.len() > 1 {
        Some(first[0].len())
    } else {
        None
    }
}

/// Byte index of the first top-level assignment `=`, skipping the `=` of
/// `=>`, `==`, `<=`, `>=` and `!=` so arrow-function types survive.
pub(crate) fn find_top_level_assignment(text: &str) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut in_string: Option<char> = None;
    let mut prev = '\0';
    let mut chars = text.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        if let Some(quote) = in_string {
            if c == quote && prev != '\\' {
                in_string = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => in_string = Some(c),
                '(' | '[' | '{' | '<' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '>' if prev != '=' => depth -= 1,
                '=' if depth == 0 => {
                    let next = chars.peek().map(|(_, n)| *n);
                    if !matches!(prev, '=' | '!' | '<' | '>') && next != Some('>') && next != Some('=')
                    {
                        return Some(at);
                    }
                }
                _ => {}
            }
        }
        prev = c;
    }
    None
}

/// Trimmed, owned copy of `text` when it is non-empty after trimming.
pub(crate) fn nonempty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
