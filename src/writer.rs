//! Rendering a [`Document`] as INI text.

use crate::document::{Document, Section};
use crate::options::Dialect;

pub(crate) fn write_document(doc: &Document, dialect: &Dialect) -> String {
    let mut output = String::with_capacity(256);

    let global = doc.global();
    if let Some(comment) = global.comment() {
        write_comment(&mut output, comment, dialect);
    }
    write_entries(&mut output, global, dialect);

    for section in doc.sections() {
        if dialect.blank_line_between_sections && !output.is_empty() {
            output.push('\n');
        }
        if let Some(comment) = section.comment() {
            write_comment(&mut output, comment, dialect);
        }
        output.push('[');
        write_section_name(&mut output, section.name());
        output.push_str("]\n");
        write_entries(&mut output, section, dialect);
    }

    output
}

fn write_entries(output: &mut String, section: &Section, dialect: &Dialect) {
    for (key, entry) in section.entries() {
        if let Some(comment) = entry.comment() {
            write_comment(output, comment, dialect);
        }
        if entry.values().is_empty() {
            // empty option: the key alone, no `=`
            write_token(output, key, needs_quotes_key(key));
            output.push('\n');
            continue;
        }
        for value in entry.values() {
            write_token(output, key, needs_quotes_key(key));
            output.push_str(" = ");
            write_token(output, value, needs_quotes_value(value));
            output.push('\n');
        }
    }
}

fn write_comment(output: &mut String, comment: &str, dialect: &Dialect) {
    for line in comment.split('\n') {
        output.push(dialect.comment_marker.as_char());
        output.push_str(line.strip_suffix('\r').unwrap_or(line));
        output.push('\n');
    }
}

fn write_section_name(output: &mut String, name: &str) {
    for ch in name.chars() {
        match ch {
            ']' => output.push_str("\\]"),
            _ => push_escaped(output, ch),
        }
    }
}

#[inline]
fn needs_quotes_value(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.starts_with('"')
}

#[inline]
fn needs_quotes_key(s: &str) -> bool {
    s.is_empty()
        || needs_quotes_value(s)
        || s.contains('=')
        || s.starts_with(['[', '#', ';'])
}

fn write_token(output: &mut String, s: &str, quoted: bool) {
    if quoted {
        output.push('"');
    }
    for ch in s.chars() {
        match ch {
            '"' if quoted => output.push_str("\\\""),
            _ => push_escaped(output, ch),
        }
    }
    if quoted {
        output.push('"');
    }
}

#[inline]
fn push_escaped(output: &mut String, ch: char) {
    match ch {
        '\\' => output.push_str("\\\\"),
        '\n' => output.push_str("\\n"),
        '\r' => output.push_str("\\r"),
        '\t' => output.push_str("\\t"),
        '\0' => output.push_str("\\0"),
        _ => output.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CommentMarker;

    #[test]
    fn test_layout() {
        let mut doc = Document::new();
        doc.global_mut().set_comment("top");
        doc.global_mut().put("a", "1");
        doc.global_mut().put_comment("a", "about a");
        let section = doc.add_section("s");
        section.set_comment("about s");
        section.put("b", "2");

        assert_eq!(
            write_document(&doc, &Dialect::default()),
            "#top\n#about a\na = 1\n\n#about s\n[s]\nb = 2\n"
        );
    }

    #[test]
    fn test_empty_option_and_empty_string() {
        let mut doc = Document::new();
        doc.global_mut().put_all("tags", Vec::<String>::new());
        doc.global_mut().put("name", "");

        assert_eq!(write_document(&doc, &Dialect::default()), "tags\nname = \n");
    }

    #[test]
    fn test_repeated_key_and_empty_section() {
        let mut doc = Document::new();
        doc.global_mut().put_all("dog", ["rex", "fido"]);
        doc.add_section("cat");

        assert_eq!(
            write_document(&doc, &Dialect::compact()),
            "dog = rex\ndog = fido\n[cat]\n"
        );
    }

    #[test]
    fn test_escaping() {
        let mut doc = Document::new();
        doc.global_mut().put("text", "line1\nline2\\");
        doc.global_mut().put("padded", " x ");
        doc.global_mut().put("quote", "\"hi\"");
        doc.global_mut().put("a=b", "c");
        doc.global_mut().put("#k", "v");

        assert_eq!(
            write_document(&doc, &Dialect::default()),
            "text = line1\\nline2\\\\\n\
             padded = \" x \"\n\
             quote = \"\\\"hi\\\"\"\n\
             \"a=b\" = c\n\
             \"#k\" = v\n"
        );
    }

    #[test]
    fn test_multiline_comment_and_marker() {
        let mut doc = Document::new();
        doc.global_mut().set_comment("one\ntwo");
        let dialect = Dialect::new().with_comment_marker(CommentMarker::Semicolon);

        assert_eq!(write_document(&doc, &dialect), ";one\n;two\n");
    }
}
