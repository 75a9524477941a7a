use classforge_core::keywords::{self, KeywordCategory, KeywordId};
use classforge_syntax::{Key, Value, parse_literal, parse_literal_prefix};

#[test]
fn every_literal_keyword_parses_in_any_case() {
    for info in keywords::KEYWORDS.iter().filter(|k| k.category == KeywordCategory::Literal) {
        let source = match info.id {
            KeywordId::Array => "array()".to_string(),
            _ => info.canonical.to_string(),
        };
        assert!(parse_literal(&source).is_ok(), "literal keyword not parseable: {}", info.canonical);
        assert!(
            parse_literal(&source.to_ascii_uppercase()).is_ok(),
            "uppercase literal keyword not parseable: {}",
            info.canonical
        );
    }
}

#[test]
fn non_literal_keywords_are_rejected() {
    for info in keywords::KEYWORDS.iter().filter(|k| k.category != KeywordCategory::Literal) {
        let err = parse_literal(info.canonical).unwrap_err();
        assert!(err.message.contains("expected a value"), "{}: {}", info.canonical, err.message);
    }
}

#[test]
fn var_export_style_array_parses() {
    let source = "array (\n  'name' => 'article',\n  'tags' => \n  array (\n    0 => 'a',\n    1 => 'b',\n  ),\n  'score' => -1.5,\n)";
    let value = parse_literal(source).unwrap();
    assert_eq!(
        value,
        Value::array([
            (Key::from("name"), Value::from("article")),
            (Key::from("tags"), Value::list([Value::from("a"), Value::from("b")])),
            (Key::from("score"), Value::Float(-1.5)),
        ])
    );
}

#[test]
fn prefix_offsets_are_relative_to_input() {
    let text = "'x' ; after";
    let (value, consumed) = parse_literal_prefix(text).unwrap();
    assert_eq!(value, Value::from("x"));
    assert_eq!(&text[consumed..], " ; after");
}

#[test]
fn errors_render_as_diagnostics() {
    let err = parse_literal("array(1,, 2)").unwrap_err();
    let report = miette::Report::new(err);
    assert!(format!("{report:?}").contains("classforge::syntax"));
}
