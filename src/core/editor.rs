//! Editor collaborator interfaces
//!
//! The suggestion core never stores text itself. It reads lines and the
//! cursor from a [`TextBuffer`] and writes back through `replace_range`.

use crate::error::Result;

/// Line/column position; `ch` counts `char`s from the start of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

pub trait TextBuffer {
    /// Text of a line without its line terminator
    fn line(&self, line: usize) -> Option<String>;

    fn cursor(&self) -> Position;

    /// Replace the text between `from` and `to` with `text`
    fn replace_range(&mut self, text: &str, from: Position, to: Position) -> Result<()>;
}

/// The document shown in the editor
pub trait ActiveDocument {
    /// Store path of the document, `None` for scratch buffers
    fn document_path(&self) -> Option<&str>;
}
