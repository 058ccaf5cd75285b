//! Line-level plumbing shared by both converters
//!
//!     A line is an owned `String` that keeps its terminator, so concatenating the
//!     lines of every block reproduces the converted file byte for byte. The
//!     [`LineSource`] adds the one-line lookahead both converters need: a handler
//!     pulls a line, decides it belongs to the next block, and pushes it back.

/// Width of a hard tab when measuring indentation.
///
/// Changing it moves block boundaries on tab-indented input.
pub const TAB_WIDTH: usize = 8;

/// Sequential line reader with last-in-first-out pushback.
pub struct LineSource<I> {
    lines: I,
    pushed: Vec<String>,
    line_number: usize,
}

impl<I> LineSource<I>
where
    I: Iterator<Item = String>,
{
    pub fn new(lines: I) -> Self {
        LineSource {
            lines,
            pushed: Vec::new(),
            line_number: 0,
        }
    }

    /// Next line, taking pushed-back lines first.
    pub fn pull(&mut self) -> Option<String> {
        let line = self.pushed.pop().or_else(|| self.lines.next())?;
        self.line_number += 1;
        Some(line)
    }

    /// Push a line back; the next [`pull`](Self::pull) returns it.
    pub fn unpull(&mut self, line: String) {
        self.line_number = self.line_number.saturating_sub(1);
        self.pushed.push(line);
    }

    /// 1-based number of the most recently pulled line (0 before the first pull).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Split `text` into lines, keeping each line terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Leading whitespace width of `line`, with tabs expanded to [`TAB_WIDTH`] stops.
///
/// A whitespace-only line measures as 0, like an empty one.
pub fn indent_of(line: &str) -> usize {
    if is_blank(line) {
        return 0;
    }
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => column += TAB_WIDTH - column % TAB_WIDTH,
            c if c.is_whitespace() => column += 1,
            _ => break,
        }
    }
    column
}

/// The leading whitespace run of `line`, exactly as written.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True for a line made of nothing but its terminator.
pub fn is_bare_terminator(line: &str) -> bool {
    line == "\n" || line == "\r\n"
}

/// Make sure `block` ends in a blank line before `next_line` starts a new block.
///
/// An empty block is left alone. A missing separator is synthesized and
/// reported; it is never an error.
pub fn ensure_trailing_blank_line(block: &mut Vec<String>, next_line: &str) {
    let Some(last) = block.last() else {
        return;
    };
    if !is_blank(last) {
        log::warn!(
            "inserted blank line between {:?} and {:?}",
            last.trim_end(),
            next_line.trim_end()
        );
        block.push("\n".to_string());
    }
}
