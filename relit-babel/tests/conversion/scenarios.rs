//! Worked examples of both conversion directions, including the repair paths.

use crate::common::{code_from_text, text_from_code};
use insta::assert_snapshot;
use relit_babel::{
    convert, converter, lines::split_lines, BlockKind, ConvertError, ConvertOptions, Direction,
    LanguageRegistry,
};

fn registry() -> LanguageRegistry {
    LanguageRegistry::default()
}

#[test]
fn text_to_code_with_literal_block() {
    let text = "Title\n\nSome text::\n\n    x = 1\n    y = 2\n";
    assert_eq!(
        code_from_text(text),
        "# Title\n#\n# Some text::\n\nx = 1\ny = 2\n"
    );
}

#[test]
fn shallower_line_in_code_block_aborts() {
    let text = "Intro::\n\n    first = 1\n  second = 2\n\nMore text\n";
    let err = convert(
        text,
        &ConvertOptions::new(Direction::TextToCode),
        &registry(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Indentation { .. }));
    assert_snapshot!(
        err.to_string(),
        @r#"line 4: cannot unindent "  second = 2\n", it does not start with code indent "    ""#
    );
}

#[test]
fn indentation_error_stops_block_stream() {
    let text = "Intro::\n\n    first = 1\n  second = 2\n\nMore text\n";
    let blocks: Vec<_> = converter(
        split_lines(text),
        &ConvertOptions::new(Direction::TextToCode),
        &registry(),
    )
    .unwrap()
    .collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].is_ok());
    assert!(blocks[1].is_ok());
    assert!(blocks[2].is_err());
}

#[test]
fn code_without_leading_comment_has_placeholder_header() {
    let mut blocks = converter(
        split_lines("import os\n"),
        &ConvertOptions::new(Direction::CodeToText),
        &registry(),
    )
    .unwrap();
    let header = blocks.next().unwrap().unwrap();
    assert_eq!(header.lines, vec![".."]);
    assert_eq!(header.kind, BlockKind::Text);
}

#[test]
fn empty_input_yields_single_empty_header_block() {
    for direction in [Direction::TextToCode, Direction::CodeToText] {
        let blocks: Vec<_> = converter(
            split_lines(""),
            &ConvertOptions::new(direction),
            &registry(),
        )
        .unwrap()
        .map(|block| block.unwrap())
        .collect();
        assert_eq!(blocks.len(), 1, "{direction:?}");
        assert!(blocks[0].is_empty(), "{direction:?}");
    }
}

#[test]
fn header_only_text_is_consumed_as_header() {
    let blocks: Vec<_> = converter(
        split_lines("..  #!/usr/bin/env python\n  # -*- coding: utf-8 -*-\n"),
        &ConvertOptions::new(Direction::TextToCode),
        &registry(),
    )
    .unwrap()
    .map(|block| block.unwrap())
    .collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Code);
    assert_eq!(
        blocks[0].text(),
        "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n"
    );
}

#[test]
fn fixture_code_to_text() {
    assert_eq!(
        text_from_code(&crate::common::fixture("literate.py")),
        crate::common::fixture("literate.py.txt")
    );
}

#[test]
fn fixture_text_to_code() {
    assert_eq!(
        code_from_text(&crate::common::fixture("literate.py.txt")),
        crate::common::fixture("literate.py")
    );
}

#[test]
fn missing_literal_marker_and_glued_comment() {
    assert_eq!(
        text_from_code(&crate::common::fixture("unmarked.py")),
        crate::common::fixture("unmarked.py.txt")
    );
}

#[test]
fn missing_separators_are_repaired() {
    let text = "Setup::\n  x = 1\nDone\n";
    assert_eq!(code_from_text(text), "# Setup::\n\nx = 1\n\n# Done\n");
}

#[test]
fn other_language_marker() {
    let options = ConvertOptions::new(Direction::CodeToText).with_language("c++");
    let code = "// Main::\n\nint main() { return 0; }\n";
    assert_eq!(
        convert(code, &options, &registry()).unwrap(),
        "Main::\n\n  int main() { return 0; }\n"
    );
}

#[test]
fn custom_code_indent() {
    let options = ConvertOptions::new(Direction::CodeToText).with_code_indent(4);
    assert_eq!(
        convert("# Code::\n\nx = 1\n", &options, &registry()).unwrap(),
        "Code::\n\n    x = 1\n"
    );
}

#[test]
fn custom_header_marker() {
    let options = ConvertOptions::new(Direction::CodeToText).with_header_marker(".. code::");
    let text = convert("#!/bin/sh\n", &options, &registry()).unwrap();
    assert_eq!(text, ".. code::  #!/bin/sh\n");

    let back = convert(&text, &options.inverted(), &registry()).unwrap();
    assert_eq!(back, "#!/bin/sh\n");
}

#[test]
fn unknown_language_is_rejected() {
    let options = ConvertOptions::new(Direction::TextToCode).with_language("fortran");
    let err = convert("text\n", &options, &registry()).unwrap_err();
    assert_snapshot!(err.to_string(), @"Unknown language 'fortran' (no comment marker registered)");
}
