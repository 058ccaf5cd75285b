//! Prose → commented code
//!
//!     Indented literal blocks introduced by a `::` paragraph become code: the
//!     indentation of the block's first line is removed from every line of the
//!     block. Everything else is prose and gets the comment marker prepended.
//!
//!     The code handler finds the end of a literal block by indentation alone: the
//!     first non-blank line indented no deeper than the paragraph that opened the
//!     block belongs to the next text block. That line is pushed back for the
//!     text handler.

use crate::error::{ConvertError, Result};
use crate::lines::{ensure_trailing_blank_line, indent_of, is_blank, leading_whitespace};
use crate::machine::{Block, BlockKind, Cursor, Handlers, State};

pub struct TextToCode {
    comment_marker: String,
    header_marker: String,
    /// Indentation of the paragraph that opened the current literal block.
    text_indent: usize,
    /// Leading whitespace of the first non-blank line of the current code block.
    code_prefix: Option<String>,
}

impl TextToCode {
    pub fn new(comment_marker: impl Into<String>, header_marker: impl Into<String>) -> Self {
        TextToCode {
            comment_marker: comment_marker.into(),
            header_marker: header_marker.into(),
            text_indent: 0,
            code_prefix: None,
        }
    }

    fn comment(&self, line: &str) -> String {
        if is_blank(line) {
            format!("{}{}", self.comment_marker.trim_end(), line)
        } else {
            format!("{}{}", self.comment_marker, line)
        }
    }

    fn starts_with_header_marker(&self, line: &str) -> bool {
        !self.header_marker.is_empty() && line.starts_with(&self.header_marker)
    }

    /// A paragraph ending in `::` opens a literal block, unless it is a directive.
    fn opens_literal_block(&self, line: &str) -> bool {
        line.trim_end().ends_with("::") && !self.starts_with_header_marker(line.trim_start())
    }
}

impl Handlers for TextToCode {
    fn header(&mut self, cursor: &mut Cursor) -> Result<Block> {
        let Some(line) = cursor.pull() else {
            return Ok(Block::empty(BlockKind::Text));
        };
        if self.starts_with_header_marker(&line) {
            let rest = line[self.header_marker.len()..].to_string();
            cursor.unpull(rest);
            cursor.switch_to(State::Code);
            return self.code(cursor);
        }
        cursor.unpull(line);
        cursor.switch_to(State::Text);
        Ok(Block::empty(BlockKind::Text))
    }

    fn text(&mut self, cursor: &mut Cursor) -> Result<Block> {
        let mut lines = Vec::new();
        while let Some(line) = cursor.pull() {
            lines.push(self.comment(&line));
            if !self.opens_literal_block(&line) {
                continue;
            }

            self.text_indent = indent_of(&line);
            cursor.switch_to(State::Code);
            match cursor.pull() {
                Some(next) if is_blank(&next) => lines.push(next),
                Some(next) => {
                    ensure_trailing_blank_line(&mut lines, &next);
                    cursor.unpull(next);
                }
                None => {}
            }
            return Ok(Block::new(BlockKind::Text, lines));
        }
        Ok(Block::new(BlockKind::Text, lines))
    }

    fn code(&mut self, cursor: &mut Cursor) -> Result<Block> {
        self.code_prefix = None;
        let mut lines = Vec::new();
        while let Some(line) = cursor.pull() {
            if is_blank(&line) {
                let line = match self.code_prefix.as_deref() {
                    Some(prefix) => line.strip_prefix(prefix).map(str::to_string).unwrap_or(line),
                    None => line,
                };
                lines.push(line);
                continue;
            }

            if indent_of(&line) <= self.text_indent {
                ensure_trailing_blank_line(&mut lines, &line);
                cursor.unpull(line);
                cursor.switch_to(State::Text);
                return Ok(Block::new(BlockKind::Code, lines));
            }

            let prefix = self
                .code_prefix
                .get_or_insert_with(|| leading_whitespace(&line).to_string());
            match line.strip_prefix(prefix.as_str()) {
                Some(code) => lines.push(code.to_string()),
                None => {
                    return Err(ConvertError::Indentation {
                        line_number: cursor.line_number(),
                        line,
                        expected_prefix: prefix.clone(),
                    })
                }
            }
        }
        Ok(Block::new(BlockKind::Code, lines))
    }

    fn strip(&self, block: Block) -> Option<Block> {
        (block.kind == BlockKind::Code).then_some(block)
    }
}
