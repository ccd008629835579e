//! Parsing INI text into a [`Document`].
//!
//! The reader is line based. Every line is one of:
//!
//! - blank
//! - a comment, starting with `#` or `;`
//! - a section header, `[name]`, optionally followed by a comment
//! - an option, `key = value`, `key =` (one empty value) or a bare `key` (no values)
//!
//! Keys and values may be double-quoted to keep surrounding whitespace, and use
//! backslash escapes (`\\`, `\n`, `\r`, `\t`, `\0`, `\"`). Unknown escapes are kept as
//! written.

use crate::document::{Document, GLOBAL_SECTION};
use crate::{Error, Result};

pub(crate) fn parse(text: &str) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut doc = Document::new();
    let mut pending: Vec<&str> = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let mut cursor = Cursor::new(line, index + 1);
        cursor.skip_whitespace();

        match cursor.peek() {
            None => {}
            Some('#' | ';') => pending.push(&cursor.rest()[1..]),
            Some('[') => {
                let name = parse_section_header(&mut cursor)?;
                let section = doc.add_section(name);
                if !pending.is_empty() {
                    section.set_comment(pending.join("\n"));
                    pending.clear();
                }
            }
            Some(_) => {
                let (key, value) = parse_option(&mut cursor)?;
                let section = doc.last_section_mut();
                match value {
                    Some(value) => section.put(key.as_str(), value),
                    None => section.put_all(key.as_str(), Vec::<String>::new()),
                }
                if !pending.is_empty() {
                    section.put_comment(&key, pending.join("\n"));
                    pending.clear();
                }
            }
        }
    }

    if !pending.is_empty() && doc.is_empty() {
        doc.global_mut().set_comment(pending.join("\n"));
    }

    Ok(doc)
}

/// Character cursor over one line, tracking the byte position for column numbers.
struct Cursor<'a> {
    line: &'a str,
    position: usize,
    line_no: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str, line_no: usize) -> Self {
        Cursor {
            line,
            position: 0,
            line_no,
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn rest(&self) -> &'a str {
        &self.line[self.position..]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.line.len()
    }

    fn column(&self) -> usize {
        self.line[..self.position].chars().count() + 1
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(self.line_no, self.column(), msg)
    }

    /// Reads the character after a backslash into `out`.
    fn read_escape(&mut self, out: &mut String) {
        match self.next_char() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(ch @ ('\\' | '"' | ']')) => out.push(ch),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    /// Reads a double-quoted token; the cursor is on the opening quote.
    fn read_quoted(&mut self) -> Result<String> {
        self.next_char();
        let mut result = String::new();
        loop {
            match self.next_char() {
                Some('"') => return Ok(result),
                Some('\\') => self.read_escape(&mut result),
                Some(ch) => result.push(ch),
                None => return Err(self.error("unterminated quoted string")),
            }
        }
    }

    /// Reads an unquoted token up to `stop` (exclusive) or the end of the line, with
    /// trailing whitespace dropped.
    fn read_plain(&mut self, stop: Option<char>) -> String {
        let end = match stop {
            Some(stop) => self.rest().find(stop).map_or(self.line.len(), |i| self.position + i),
            None => self.line.len(),
        };
        let raw = self.line[self.position..end].trim_end();
        let mut inner = Cursor::new(raw, self.line_no);
        let mut result = String::with_capacity(raw.len());
        while let Some(ch) = inner.next_char() {
            match ch {
                '\\' => inner.read_escape(&mut result),
                _ => result.push(ch),
            }
        }
        self.position = end;
        result
    }
}

fn parse_section_header(cursor: &mut Cursor<'_>) -> Result<String> {
    cursor.next_char();
    let start = cursor.column();
    let mut name = String::new();

    loop {
        match cursor.next_char() {
            Some(']') => break,
            Some('\\') => cursor.read_escape(&mut name),
            Some(ch) => name.push(ch),
            None => return Err(cursor.error("unterminated section header, expected `]`")),
        }
    }

    if name.trim().is_empty() {
        return Err(Error::syntax(cursor.line_no, start, "section name cannot be empty"));
    }
    if name == GLOBAL_SECTION {
        return Err(Error::syntax(
            cursor.line_no,
            start,
            "section name `?` is reserved for the global section",
        ));
    }

    cursor.skip_whitespace();
    match cursor.peek() {
        None | Some('#' | ';') => Ok(name),
        Some(_) => Err(cursor.error("unexpected character after section header")),
    }
}

/// Parses `key`, `key =` or `key = value`. A `None` value means the key has no values.
fn parse_option(cursor: &mut Cursor<'_>) -> Result<(String, Option<String>)> {
    let key = if cursor.peek() == Some('"') {
        cursor.read_quoted()?
    } else {
        if cursor.peek() == Some('=') {
            return Err(cursor.error("missing key before `=`"));
        }
        cursor.read_plain(Some('='))
    };

    cursor.skip_whitespace();
    match cursor.next_char() {
        None => return Ok((key, None)),
        Some('=') => {}
        Some(_) => return Err(cursor.error("expected `=` after key")),
    }

    cursor.skip_whitespace();
    let value = if cursor.peek() == Some('"') {
        let value = cursor.read_quoted()?;
        cursor.skip_whitespace();
        if !cursor.at_end() {
            return Err(cursor.error("unexpected character after quoted value"));
        }
        value
    } else {
        cursor.read_plain(None)
    };

    Ok((key, Some(value)))
}
