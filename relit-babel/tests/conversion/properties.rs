//! Property tests: round trips, line accounting and strip idempotence.

use proptest::prelude::*;
use relit_babel::code_to_text::strip_literal_marker;
use relit_babel::lines::{is_blank, split_lines};
use relit_babel::{convert, converter, ConvertError, ConvertOptions, Direction, LanguageRegistry};

fn run(text: &str, direction: Direction) -> Result<String, ConvertError> {
    convert(
        text,
        &ConvertOptions::new(direction),
        &LanguageRegistry::default(),
    )
}

fn code_line() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9_ =()]{0,15}", prop::bool::ANY)
        .prop_map(|(body, nested)| if nested { format!("    {body}") } else { body })
}

/// Code with no comments at all; the first line is unindented and non-blank.
fn plain_code() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9_ =()]{0,15}",
        prop::collection::vec(prop_oneof![Just(String::new()), code_line()], 0..20),
    )
        .prop_map(|(first, rest)| {
            let mut code = format!("{first}\n");
            for line in rest {
                code.push_str(&line);
                code.push('\n');
            }
            code
        })
}

/// Alternating comment paragraphs (ending in `::`) and code, blank-separated.
fn commented_code() -> impl Strategy<Value = String> {
    let section = (
        prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,3}", 0..3),
        "[a-z]{1,8}",
        "[a-z][a-z0-9_ =()]{0,15}",
        prop::collection::vec(code_line(), 0..4),
    );
    prop::collection::vec(section, 1..5).prop_map(|sections| {
        let mut parts = Vec::new();
        for (comments, marker, first, code) in sections {
            let mut part = String::new();
            for comment in comments {
                part.push_str(&format!("# {comment}\n"));
            }
            part.push_str(&format!("# {marker}::\n\n{first}\n"));
            for line in code {
                part.push_str(&format!("{line}\n"));
            }
            parts.push(part);
        }
        parts.join("\n")
    })
}

fn prose_line() -> impl Strategy<Value = String> {
    (
        0usize..6,
        prop_oneof![
            Just(String::new()),
            "[a-z]{1,8}( [a-z]{1,8}){0,3}",
            "[a-z]{1,8}::",
        ],
    )
        .prop_map(|(indent, body)| {
            if body.is_empty() {
                "\n".to_string()
            } else {
                format!("{}{body}\n", " ".repeat(indent))
            }
        })
}

fn mixed_code_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("\n".to_string()),
        Just("#\n".to_string()),
        "# [a-z ]{1,20}\n",
        "[a-z][a-z =]{0,20}\n",
        "    [a-z]{1,10}\n",
    ]
}

proptest! {
    #[test]
    fn plain_code_round_trips(code in plain_code()) {
        let text = run(&code, Direction::CodeToText).unwrap();
        prop_assert_eq!(run(&text, Direction::TextToCode).unwrap(), code);
    }

    #[test]
    fn commented_code_round_trips(code in commented_code()) {
        let text = run(&code, Direction::CodeToText).unwrap();
        prop_assert_eq!(run(&text, Direction::TextToCode).unwrap(), code);
    }

    #[test]
    fn text_to_code_keeps_every_line(lines in prop::collection::vec(prose_line(), 0..30)) {
        let text = lines.concat();
        let code = match run(&text, Direction::TextToCode) {
            Ok(code) => code,
            Err(ConvertError::Indentation { .. }) => return Ok(()),
            Err(other) => panic!("unexpected error: {other}"),
        };

        let input_content = lines.iter().filter(|l| !is_blank(l)).count();
        let output_lines = split_lines(&code);
        let output_content = output_lines
            .iter()
            .filter(|l| !is_blank(l) && l.trim_end() != "#")
            .count();
        prop_assert_eq!(input_content, output_content);
        prop_assert!(output_lines.len() >= lines.len());
    }

    #[test]
    fn code_to_text_keeps_every_line(lines in prop::collection::vec(mixed_code_line(), 0..30)) {
        let code = lines.concat();
        let blocks: Vec<String> = converter(
            split_lines(&code),
            &ConvertOptions::new(Direction::CodeToText),
            &LanguageRegistry::default(),
        )
        .unwrap()
        .flat_map(|block| block.unwrap().lines)
        .collect();

        // Bare markers may turn blank or stay as code, so they are not counted.
        let input_content = lines
            .iter()
            .filter(|l| !is_blank(l) && l.trim() != "#")
            .count();
        let output_content = blocks
            .iter()
            .filter(|l| !is_blank(l) && l.trim() != "#")
            .filter(|l| l.as_str() != ".." && l.as_str() != "::\n")
            .count();
        prop_assert_eq!(input_content, output_content);
    }

    #[test]
    fn block_concatenation_is_the_conversion(lines in prop::collection::vec(mixed_code_line(), 0..30)) {
        let code = lines.concat();
        let options = ConvertOptions::new(Direction::CodeToText);
        let registry = LanguageRegistry::default();
        let joined: String = converter(split_lines(&code), &options, &registry)
            .unwrap()
            .map(|block| block.unwrap().text())
            .collect();
        prop_assert_eq!(joined, convert(&code, &options, &registry).unwrap());
    }

    #[test]
    fn strip_literal_marker_is_idempotent(
        paragraph in prop::collection::vec("[a-z]{1,5}( [a-z]{1,5}){0,2}", 1..4),
        ending in 0usize..6,
    ) {
        let mut block: Vec<String> = paragraph.iter().map(|l| format!("{l}\n")).collect();
        if let Some(last) = block.last_mut() {
            match ending {
                1 => *last = last.replace('\n', "::\n"),
                2 => *last = last.replace('\n', " ::\n"),
                4 => *last = last.replace('\n', ":::\n"),
                5 => *last = last.replace('\n', " :::\n"),
                _ => {}
            }
        }
        if ending == 3 {
            block.push("\n".to_string());
            block.push("::\n".to_string());
        }
        block.push("\n".to_string());

        let mut once = block;
        strip_literal_marker(&mut once);
        let mut twice = once.clone();
        strip_literal_marker(&mut twice);
        prop_assert_eq!(once, twice);
    }
}
