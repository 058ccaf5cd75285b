//! Commented code → prose
//!
//!     Comment lines that start with the comment marker and are separated from code
//!     by a blank line become prose. Every other line is code and is indented by
//!     `code_indent` spaces into a literal block. Text blocks get a `::` literal
//!     marker appended when their last paragraph does not already end in one.
//!
//!     Comments glued to code without a blank line stay with the code: the text
//!     handler pushes them back, and the code handler only hands control back to
//!     the text handler on a comment line that follows a blank line.

use crate::error::Result;
use crate::lines::{is_bare_terminator, is_blank};
use crate::machine::{Block, BlockKind, Cursor, Handlers, State};

pub struct CodeToText {
    comment_marker: String,
    code_indent: usize,
    header_marker: String,
}

impl CodeToText {
    pub fn new(
        comment_marker: impl Into<String>,
        code_indent: usize,
        header_marker: impl Into<String>,
    ) -> Self {
        CodeToText {
            comment_marker: comment_marker.into(),
            code_indent,
            header_marker: header_marker.into(),
        }
    }

    fn is_comment(&self, line: &str) -> bool {
        line.starts_with(&self.comment_marker)
            || line.trim_end() == self.comment_marker.trim_end()
    }

    fn uncomment(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| match line.strip_prefix(&self.comment_marker) {
                Some(text) => text.to_string(),
                None => line,
            })
            .collect()
    }
}

impl Handlers for CodeToText {
    fn header(&mut self, cursor: &mut Cursor) -> Result<Block> {
        let block = self.text(cursor)?;
        if !block.is_empty() || cursor.is_exhausted() {
            return Ok(block);
        }
        // No leading comment: the first code line follows the marker directly.
        Ok(Block::new(BlockKind::Text, vec![self.header_marker.clone()]))
    }

    fn text(&mut self, cursor: &mut Cursor) -> Result<Block> {
        let mut lines = Vec::new();
        while let Some(line) = cursor.pull() {
            if is_blank(&line) || line.starts_with(&self.comment_marker) {
                lines.push(line);
                continue;
            }

            let bare_marker = self.comment_marker.trim_end();
            if line.trim_end() == bare_marker {
                lines.push(line.replacen(bare_marker, &self.comment_marker, 1));
                continue;
            }

            cursor.unpull(line);
            while let Some(last) = lines.pop() {
                if is_blank(&last) {
                    lines.push(last);
                    break;
                }
                cursor.unpull(last);
            }

            let mut lines = self.uncomment(lines);
            if lines.len() > 1 && !lines[lines.len() - 2].trim_end().ends_with("::") {
                lines.push("::\n".to_string());
                lines.push("\n".to_string());
            }
            cursor.switch_to(State::Code);
            return Ok(Block::new(BlockKind::Text, lines));
        }
        Ok(Block::new(BlockKind::Text, self.uncomment(lines)))
    }

    fn code(&mut self, cursor: &mut Cursor) -> Result<Block> {
        let mut lines: Vec<String> = Vec::new();
        while let Some(line) = cursor.pull() {
            if is_bare_terminator(&line) {
                lines.push(line);
                continue;
            }

            let after_blank = lines.last().is_some_and(|last| is_blank(last));
            if after_blank && self.is_comment(&line) {
                cursor.unpull(line);
                cursor.switch_to(State::Text);
                return Ok(Block::new(BlockKind::Code, lines));
            }

            lines.push(format!("{}{}", " ".repeat(self.code_indent), line));
        }
        Ok(Block::new(BlockKind::Code, lines))
    }

    fn strip(&self, mut block: Block) -> Option<Block> {
        if block.kind == BlockKind::Code || block.lines == [self.header_marker.as_str()] {
            return None;
        }
        strip_literal_marker(&mut block.lines);
        Some(block)
    }
}

/// Drop the `::` that would announce a literal block nobody will see.
///
/// Looks at the line before the trailing blank line only:
/// - `::` on a line of its own goes, with the blank line before it
/// - ` ::` after whitespace goes, with that whitespace
/// - `text::` (or `text:::`) becomes `text:`
///
/// Rewrites repeat until the block ends in no marker, so applying it to its own
/// output changes nothing.
pub fn strip_literal_marker(lines: &mut Vec<String>) {
    while strip_marker_step(lines) {}
}

fn strip_marker_step(lines: &mut Vec<String>) -> bool {
    if lines.len() < 2 {
        return false;
    }
    let idx = lines.len() - 2;
    let line = &lines[idx];
    let trimmed = line.trim_end();

    if trimmed.trim_start() == "::" {
        lines.remove(idx);
        if idx >= 1 && is_blank(&lines[idx - 1]) {
            lines.remove(idx - 1);
        }
        return true;
    }

    let Some(head) = trimmed.strip_suffix("::") else {
        return false;
    };
    let tail = &line[trimmed.len()..];
    let replaced = if head.ends_with(char::is_whitespace) {
        format!("{}{}", head.trim_end(), tail)
    } else {
        format!("{}:{tail}", head.trim_end_matches(':'))
    };
    lines[idx] = replaced;
    true
}
