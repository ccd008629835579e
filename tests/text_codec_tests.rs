use serde_inibean::{CommentMarker, Dialect, Document, Error};

#[test]
fn test_parse_and_render_are_stable() {
    let text = "#top\n\
                name = demo\n\
                tag = a\n\
                tag = b\n\
                empty\n\
                blank = \n\
                \n\
                #first dog\n\
                [dog]\n\
                name = rex\n\
                \n\
                [dog]\n";

    let doc: Document = text.parse().unwrap();
    assert_eq!(doc.to_string(), text);

    let again = Document::parse(&doc.to_string()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn test_escapes_round_trip() {
    let mut doc = Document::new();
    let global = doc.global_mut();
    global.put("multi", "line one\nline two\r\n");
    global.put("tabbed", "\tindented");
    global.put("nul", "a\0b");
    global.put("quoted", "\"already quoted\"");
    global.put("back", "C:\\temp\\");
    global.put(" spaced key ", "v");
    global.put("", "empty key");
    global.put("[not a section", "v");
    global.put(";not a comment", "v");
    doc.add_section("odd ] name").put("k", "v");

    let text = doc.to_string();
    println!("Escaped:\n{}", text);
    assert!(text.contains("multi = \"line one\\nline two\\r\\n\"\n"));
    assert!(text.contains("back = C:\\\\temp\\\\\n"));
    assert!(text.contains("[odd \\] name]\n"));

    let back = Document::parse(&text).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_hand_written_input() {
    let text = "; generated by hand\r\n\
                \u{20}\u{20}host   =   example.org   \r\n\
                path = C:\\Program Files\\app\r\n\
                [paths] # trailing comment\r\n\
                logs=/var/log\r\n";

    let doc = Document::parse(text).unwrap();
    assert_eq!(doc.global().get("host"), Some("example.org"));
    assert_eq!(doc.global().get("path"), Some("C:\\Program Files\\app"));
    assert_eq!(doc.global().key_comment("host"), Some(" generated by hand"));
    assert_eq!(doc.get_all("paths")[0].get("logs"), Some("/var/log"));
}

#[test]
fn test_syntax_error_positions() {
    match Document::parse("a = 1\nb = 2\n[broken\n") {
        Err(Error::Syntax { line, col, msg }) => {
            assert_eq!(line, 3);
            assert_eq!(col, 8);
            assert!(msg.contains("unterminated"));
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }

    match Document::parse("ok = 1\n  = value\n") {
        Err(Error::Syntax { line, col, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(col, 3);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_dialect_options() {
    let mut doc = Document::new();
    doc.global_mut().set_comment("settings");
    doc.global_mut().put("a", "1");
    doc.add_section("s").put("b", "2");
    doc.add_section("t");

    assert_eq!(
        doc.to_ini_string(&Dialect::default()),
        "#settings\na = 1\n\n[s]\nb = 2\n\n[t]\n"
    );
    assert_eq!(
        doc.to_ini_string(
            &Dialect::new()
                .with_blank_line_between_sections(false)
                .with_comment_marker(CommentMarker::Semicolon)
        ),
        ";settings\na = 1\n[s]\nb = 2\n[t]\n"
    );
}
