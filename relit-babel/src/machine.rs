//! Block-producing state machine
//!
//!     A [`Converter`] holds a [`Cursor`] (line source plus current [`State`]) and one
//!     set of [`Handlers`]. Each call to `next()` runs the handler bound to the
//!     current state once. The handler pulls lines until it has a complete block,
//!     may switch the state as a side effect, and returns the block. The next call
//!     then runs whichever handler the state now names.
//!
//!     Handlers keep whatever they need between calls (latched indentation, for
//!     instance) in their own fields, so one block per call is enough to preserve
//!     position.
//!
//!     Iteration ends once the line source has run dry and the handler that saw
//!     the end has returned its final (possibly empty) block, or right after the
//!     first error.

use crate::error::Result;
use crate::lines::LineSource;
use std::io::Write;

/// The handler a [`Converter`] runs next. `Header` is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Header,
    Text,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    Code,
}

/// A run of output lines, tagged by the handler that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(kind: BlockKind, lines: Vec<String>) -> Self {
        Block { kind, lines }
    }

    pub fn empty(kind: BlockKind) -> Self {
        Block::new(kind, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The block's lines joined back into text.
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

pub type Lines = Box<dyn Iterator<Item = String>>;

/// Line source and state shared by the handlers of one conversion.
pub struct Cursor {
    source: LineSource<Lines>,
    pub state: State,
    exhausted: bool,
}

impl Cursor {
    pub fn new(lines: Lines) -> Self {
        Cursor {
            source: LineSource::new(lines),
            state: State::Header,
            exhausted: false,
        }
    }

    /// Pull the next line; `None` marks the cursor as exhausted.
    pub fn pull(&mut self) -> Option<String> {
        let line = self.source.pull();
        self.exhausted = line.is_none();
        line
    }

    pub fn unpull(&mut self, line: String) {
        self.exhausted = false;
        self.source.unpull(line);
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn line_number(&self) -> usize {
        self.source.line_number()
    }

    pub fn switch_to(&mut self, state: State) {
        if self.state != state {
            log::debug!(
                "line {}: {:?} -> {:?}",
                self.source.line_number(),
                self.state,
                state
            );
        }
        self.state = state;
    }
}

/// The three state handlers of one conversion direction.
///
/// Every handler call returns exactly one block. `strip` is the alternate
/// iteration policy: it decides which blocks survive strip mode and how they
/// are touched up on the way out.
pub trait Handlers {
    fn header(&mut self, cursor: &mut Cursor) -> Result<Block>;

    fn text(&mut self, cursor: &mut Cursor) -> Result<Block>;

    fn code(&mut self, cursor: &mut Cursor) -> Result<Block>;

    fn strip(&self, block: Block) -> Option<Block>;
}

/// Drives one set of [`Handlers`] over one input, one block per `next()`.
pub struct Converter {
    cursor: Cursor,
    handlers: Box<dyn Handlers>,
    strip: bool,
    finished: bool,
}

impl Converter {
    pub fn new(lines: Lines, handlers: Box<dyn Handlers>) -> Self {
        Converter {
            cursor: Cursor::new(lines),
            handlers,
            strip: false,
            finished: false,
        }
    }

    /// Switch to strip mode: only the blocks the handlers keep are yielded.
    pub fn stripped(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn state(&self) -> State {
        self.cursor.state
    }

    fn step(&mut self) -> Result<Block> {
        match self.cursor.state {
            State::Header => self.handlers.header(&mut self.cursor),
            State::Text => self.handlers.text(&mut self.cursor),
            State::Code => self.handlers.code(&mut self.cursor),
        }
    }

    /// Run to completion and return the converted text.
    ///
    /// Nothing is returned on error, not even the blocks that preceded it.
    pub fn into_string(self) -> Result<String> {
        let mut out = String::new();
        for block in self {
            out.extend(block?.lines);
        }
        Ok(out)
    }

    /// Stream every block to `sink` as soon as it is complete.
    ///
    /// Blocks written before an error stay written; nothing follows it.
    pub fn write_to<W: Write>(self, sink: &mut W) -> Result<()> {
        for block in self {
            for line in block?.lines {
                sink.write_all(line.as_bytes())?;
            }
        }
        sink.flush()?;
        Ok(())
    }
}

impl Iterator for Converter {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished || self.cursor.is_exhausted() {
                return None;
            }
            let block = match self.step() {
                Ok(block) => block,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            };
            if !self.strip {
                return Some(Ok(block));
            }
            if let Some(block) = self.handlers.strip(block) {
                return Some(Ok(block));
            }
        }
    }
}
