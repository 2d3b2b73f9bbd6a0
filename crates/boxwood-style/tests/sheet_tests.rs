//! Integration tests for stylesheet compilation and diagnostics.

use boxwood_style::{BoxSizing, Coord, Layout, Sheet, StyleError};

fn compile(source: &str) -> (Sheet, Vec<StyleError>) {
    let mut errors: Vec<StyleError> = Vec::new();
    let sheet = Sheet::compile(source, &mut errors);
    (sheet, errors)
}

#[test]
fn test_compile_simple_definition() {
    let (sheet, errors) = compile("panel { width: 100; height: 50%; layout: edge-slice; }");

    assert!(errors.is_empty());
    assert_eq!(sheet.definitions().len(), 1);
    let block = &sheet.definitions()[0].block;
    assert_eq!(block.width, Coord::px(100.0));
    assert_eq!(block.height, Coord::percent(50.0));
    assert_eq!(block.layout, Layout::EdgeSlice);
}

#[test]
fn test_selector_list_shares_block() {
    let (sheet, errors) = compile("button, .primary { box-sizing: border-box; }");

    assert!(errors.is_empty());
    let definition = &sheet.definitions()[0];
    assert_eq!(definition.selectors.len(), 2);
    assert_eq!(definition.block.box_sizing, BoxSizing::BorderBox);
}

#[test]
fn test_last_semicolon_is_optional() {
    let (sheet, errors) = compile("a { width: 4 }\nb { height: 2; }");

    assert!(errors.is_empty());
    assert_eq!(sheet.definitions().len(), 2);
    assert_eq!(sheet.definitions()[0].block.width, Coord::px(4.0));
}

#[test]
fn test_bad_value_reported_and_skipped() {
    let source = "panel {\n  width: wide;\n  height: 10;\n}\n";
    let (sheet, errors) = compile(source);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "failed to parse 'width' value");
    assert_eq!((errors[0].line, errors[0].column), (2, 10));

    // compilation resumes at the next declaration
    assert_eq!(sheet.definitions().len(), 1);
    let block = &sheet.definitions()[0].block;
    assert_eq!(block.width, Coord::UNDEFINED);
    assert_eq!(block.height, Coord::px(10.0));
}

#[test]
fn test_structural_error_stops_compilation() {
    let (sheet, errors) = compile("a { width: 1; }\nb { width 2; }\nc { width: 3; }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "expected ':'");
    assert_eq!((errors[0].line, errors[0].column), (2, 11));
    assert_eq!(sheet.definitions().len(), 1);
}

#[test]
fn test_missing_open_brace() {
    let (sheet, errors) = compile("panel\n");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "expected ',' or '{'");
    assert_eq!((errors[0].line, errors[0].column), (2, 1));
    assert!(sheet.is_empty());
}

#[test]
fn test_unknown_property_is_not_an_error() {
    let (sheet, errors) = compile("a { color: red; width: 4; }");

    assert!(errors.is_empty());
    assert_eq!(sheet.definitions()[0].block.width, Coord::px(4.0));
}

#[test]
fn test_comments() {
    let source = "/* header */\na { width: 4; /* w */ height: 5 // tall\n; }";
    let (sheet, errors) = compile(source);

    assert!(errors.is_empty());
    let block = &sheet.definitions()[0].block;
    assert_eq!(block.width, Coord::px(4.0));
    assert_eq!(block.height, Coord::px(5.0));
}

#[test]
fn test_location_after_block_comment() {
    let (_, errors) = compile("/* note\n */ a { width: ?; }");

    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].line, errors[0].column), (2, 16));
}

#[test]
fn test_unterminated_comment() {
    let (sheet, errors) = compile("a { } /* open");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "unterminated comment");
    assert_eq!((errors[0].line, errors[0].column), (1, 7));
    assert!(sheet.is_empty());
}

#[test]
fn test_parse_collects_diagnostics() {
    let err = Sheet::parse("a { width: x; height: y; }").unwrap_err();

    assert_eq!(err.diagnostics.len(), 2);
    assert_eq!(err.first, err.diagnostics[0]);
    assert_eq!(err.first.column, 12);
    assert!(err.to_string().starts_with("1:12: failed to parse 'width' value"));
}

#[test]
fn test_parse_ok() {
    let sheet = Sheet::parse("").unwrap();
    assert!(sheet.is_empty());

    let sheet = Sheet::parse("a {}").unwrap();
    assert_eq!(sheet.definitions().len(), 1);
}
