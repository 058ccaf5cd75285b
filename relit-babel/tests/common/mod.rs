//! Shared helpers for the conversion tests.

use relit_babel::{convert, ConvertOptions, Direction, LanguageRegistry};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

pub fn code_from_text(text: &str) -> String {
    convert(
        text,
        &ConvertOptions::new(Direction::TextToCode),
        &LanguageRegistry::default(),
    )
    .expect("text should convert to code")
}

pub fn text_from_code(code: &str) -> String {
    convert(
        code,
        &ConvertOptions::new(Direction::CodeToText),
        &LanguageRegistry::default(),
    )
    .expect("code should convert to text")
}
