//! Conversion options
//!
//! One [`ConvertOptions`] record carries every knob a conversion takes. Fields
//! left unset fall back to the documented defaults; the comment marker falls
//! back to the one registered for `language`.

use crate::error::{ConvertError, Result};
use crate::registry::LanguageRegistry;

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_CODE_INDENT: usize = 2;
pub const DEFAULT_HEADER_MARKER: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Prose with literal blocks → source code with comments.
    TextToCode,
    /// Source code with comments → prose with literal blocks.
    CodeToText,
}

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Direction::TextToCode => Direction::CodeToText,
            Direction::CodeToText => Direction::TextToCode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub direction: Direction,
    pub language: String,
    /// Overrides the language's comment marker when set.
    pub comment_marker: Option<String>,
    /// Spaces added in front of code lines (code → text only).
    pub code_indent: usize,
    /// Marks a leading code block in the text source.
    pub header_marker: String,
    pub strip: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            direction: Direction::TextToCode,
            language: DEFAULT_LANGUAGE.to_string(),
            comment_marker: None,
            code_indent: DEFAULT_CODE_INDENT,
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            strip: false,
        }
    }
}

impl ConvertOptions {
    pub fn new(direction: Direction) -> Self {
        ConvertOptions {
            direction,
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = Some(marker.into());
        self
    }

    pub fn with_code_indent(mut self, code_indent: usize) -> Self {
        self.code_indent = code_indent;
        self
    }

    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_marker = marker.into();
        self
    }

    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    /// The same options pointed the other way, without strip mode.
    pub fn inverted(&self) -> Self {
        ConvertOptions {
            direction: self.direction.inverse(),
            strip: false,
            ..self.clone()
        }
    }

    /// The explicit marker if one is set, otherwise the language's.
    pub fn effective_comment_marker(&self, registry: &LanguageRegistry) -> Result<String> {
        if let Some(marker) = self.comment_marker.as_ref().filter(|m| !m.is_empty()) {
            return Ok(marker.clone());
        }
        registry
            .get(&self.language)
            .map(|language| language.comment_marker.clone())
            .map_err(|_| ConvertError::UnknownLanguage(self.language.clone()))
    }
}
