//! Bidirectional conversion between the two sources of a literate program
//!
//!     A literate program lives in two equivalent files:
//!
//!     - the text source: prose as ordinary lines, code as indented literal blocks
//!       each introduced by a paragraph ending in `::`
//!     - the code source: code as is, prose as comment lines starting with the
//!       language's comment marker
//!
//!     This crate converts either one into the other, line for line, so that line
//!     numbers stay in sync and a well-formed code source survives a round trip
//!     unchanged.
//!
//! Architecture
//!
//!     Both directions share one small state machine (./machine.rs): a driver that
//!     holds a line source with pushback and the current state (header, text or
//!     code), and runs the matching handler to get one block at a time. Each
//!     direction is just a different set of handlers:
//!
//!     .
//!     ├── error.rs
//!     ├── lines.rs           # LineSource (pushback) and indentation helpers
//!     ├── machine.rs         # State, Block, Handlers trait, Converter driver
//!     ├── text_to_code.rs    # prose → commented code
//!     ├── code_to_text.rs    # commented code → prose
//!     ├── options.rs         # ConvertOptions, Direction
//!     ├── registry.rs        # languages, comment markers, file naming
//!     ├── diff.rs            # unified diff of a conversion against a target
//!     └── lib.rs
//!
//!     The parser is deliberately minimal: only paragraph-ending `::` markers and
//!     indentation decide block boundaries on the text side, only the comment
//!     marker and blank lines on the code side.
//!
//!     This is a pure lib: reading files, overwrite policies and timestamps belong
//!     to relit-cli.
//!
//! Repairs
//!
//!     Missing blank lines between text and code and missing `::` markers are
//!     inserted and logged with `log::warn!`. The one fatal condition is a code
//!     line indented less than the first line of its literal block, reported as
//!     [`ConvertError::Indentation`].

pub mod code_to_text;
pub mod diff;
pub mod error;
pub mod lines;
pub mod machine;
pub mod options;
pub mod registry;
pub mod text_to_code;

pub use code_to_text::CodeToText;
pub use error::{ConvertError, Result};
pub use machine::{Block, BlockKind, Converter, Handlers, State};
pub use options::{ConvertOptions, Direction};
pub use registry::{Language, LanguageRegistry};
pub use text_to_code::TextToCode;

/// Build a converter over `lines` for the direction and settings in `options`.
///
/// Lines must keep their terminators (see [`lines::split_lines`]).
pub fn converter<I>(
    lines: I,
    options: &ConvertOptions,
    registry: &LanguageRegistry,
) -> Result<Converter>
where
    I: IntoIterator<Item = String>,
    I::IntoIter: 'static,
{
    let comment_marker = options.effective_comment_marker(registry)?;
    let handlers: Box<dyn Handlers> = match options.direction {
        Direction::TextToCode => Box::new(TextToCode::new(
            comment_marker,
            options.header_marker.clone(),
        )),
        Direction::CodeToText => Box::new(CodeToText::new(
            comment_marker,
            options.code_indent,
            options.header_marker.clone(),
        )),
    };
    Ok(Converter::new(Box::new(lines.into_iter()), handlers).stripped(options.strip))
}

/// Convert a whole text at once.
pub fn convert(
    text: &str,
    options: &ConvertOptions,
    registry: &LanguageRegistry,
) -> Result<String> {
    converter(lines::split_lines(text), options, registry)?.into_string()
}
