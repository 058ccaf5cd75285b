//! Strip mode: export only the code, or only the prose.

use relit_babel::code_to_text::strip_literal_marker;
use relit_babel::{convert, ConvertOptions, Direction, LanguageRegistry};

fn strip(text: &str, direction: Direction) -> String {
    convert(
        text,
        &ConvertOptions::new(direction).with_strip(true),
        &LanguageRegistry::default(),
    )
    .unwrap()
}

#[test]
fn text_to_code_keeps_only_code() {
    let text = "Intro::\n\n  import os\n\nThen::\n\n  print(os.sep)\n\nThe end.\n";
    assert_eq!(
        strip(text, Direction::TextToCode),
        "import os\n\nprint(os.sep)\n\n"
    );
}

#[test]
fn text_to_code_keeps_header_code() {
    let text = "..  #!/bin/sh\n\nText\n";
    assert_eq!(strip(text, Direction::TextToCode), "#!/bin/sh\n\n");
}

#[test]
fn code_to_text_keeps_only_prose() {
    let code = "#!/usr/bin/env python\n\n# Intro::\n\nimport os\n\n# Note\n\nprint(os.sep)\n";
    assert_eq!(strip(code, Direction::CodeToText), "Intro:\n\nNote\n\n");
}

#[test]
fn leading_comment_header_is_kept() {
    let code = "# Heading ::\n\nx = 1\n";
    assert_eq!(strip(code, Direction::CodeToText), "Heading\n\n");
}

#[test]
fn stripping_stripped_prose_changes_nothing() {
    let code = "# Intro::\n\nx = 1\n\n# Note ::\n\ny = 2\n\n# Plain\n\nz = 3\n";
    let once = strip(code, Direction::CodeToText);

    let mut lines: Vec<String> = once.split_inclusive('\n').map(str::to_string).collect();
    let before = lines.clone();
    strip_literal_marker(&mut lines);
    assert_eq!(lines, before);
}

#[test]
fn run_of_colons_collapses_to_one() {
    let code = "# Ratio:::\n\nx = 1\n";
    let once = strip(code, Direction::CodeToText);
    assert_eq!(once, "Ratio:\n\n");

    let mut lines: Vec<String> = once.split_inclusive('\n').map(str::to_string).collect();
    strip_literal_marker(&mut lines);
    assert_eq!(lines.concat(), once);
}
