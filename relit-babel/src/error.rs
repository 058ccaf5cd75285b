//! Error types for conversion operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort a conversion.
///
/// Missing paragraph separators and literal-block markers are repaired in place
/// and only logged; they never show up here.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A code line does not start with the indentation of its block's first line.
    #[error(
        "line {line_number}: cannot unindent {line:?}, it does not start with code indent {expected_prefix:?}"
    )]
    Indentation {
        line_number: usize,
        line: String,
        expected_prefix: String,
    },

    /// No comment marker given and the language has none registered.
    #[error("Unknown language '{0}' (no comment marker registered)")]
    UnknownLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
