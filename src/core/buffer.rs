//! Buffer: text content, cursor and document path
//!
//! Uses ropey Rope for O(log n) line access. Columns are `char` offsets
//! within a line, matching [`Position`].

use ropey::Rope;

use crate::core::editor::{ActiveDocument, Position, TextBuffer};
use crate::error::{DictionaryError, Result};

#[derive(Debug, Clone, Default)]
pub struct Buffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Store path of the document (if any)
    path: Option<String>,
    cursor: Position,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from a string
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            ..Self::default()
        }
    }

    /// Attach a document path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get entire content as string
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get number of lines in buffer
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Move the cursor, clamping it to the buffer
    pub fn set_cursor(&mut self, position: Position) {
        let line = position.line.min(self.rope.len_lines().saturating_sub(1));
        let ch = position.ch.min(self.line_len_chars(line));
        self.cursor = Position { line, ch };
    }

    /// Put the cursor at the end of the last line
    pub fn cursor_to_end(&mut self) {
        let line = self.rope.len_lines().saturating_sub(1);
        self.set_cursor(Position::new(line, usize::MAX));
    }

    /// Length of a line in chars, without the line terminator
    fn line_len_chars(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    fn position_to_char(&self, position: Position) -> Result<usize> {
        if position.line >= self.rope.len_lines() {
            return Err(DictionaryError::LineOutOfRange(position.line));
        }
        let line_start = self.rope.line_to_char(position.line);
        Ok(line_start + position.ch.min(self.line_len_chars(position.line)))
    }

    fn char_to_position(&self, char_idx: usize) -> Position {
        let line = self.rope.char_to_line(char_idx);
        Position {
            line,
            ch: char_idx - self.rope.line_to_char(line),
        }
    }
}

impl TextBuffer for Buffer {
    fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) -> Result<()> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let start = self.position_to_char(from)?;
        let end = self.position_to_char(to)?;

        self.rope.remove(start..end);
        self.rope.insert(start, text);

        // Cursor lands after the inserted text
        self.cursor = self.char_to_position(start + text.chars().count());
        Ok(())
    }
}

impl ActiveDocument for Buffer {
    fn document_path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
