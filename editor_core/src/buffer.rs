//! Text buffer and position types

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// A buffer operation was given an out-of-range index.
///
/// Every variant is a caller bug, not a runtime condition: operations
/// validate before mutating, so a returned error means the buffer is
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Line index past the end of the buffer
    LineOutOfRange { line: usize, line_count: usize },
    /// Column index past the end of the line
    ColumnOutOfRange { column: usize, line_length: usize },
    /// Merge requested for the first line, which has no previous line
    NoPreviousLine,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LineOutOfRange { line, line_count } => {
                write!(f, "line {} out of range (buffer has {} lines)", line, line_count)
            }
            BufferError::ColumnOutOfRange { column, line_length } => {
                write!(f, "column {} out of range (line has {} chars)", column, line_length)
            }
            BufferError::NoPreviousLine => {
                write!(f, "cannot merge the first line with a previous line")
            }
        }
    }
}

/// Text buffer with line-based storage
///
/// Lines never contain embedded terminators, and the buffer always holds
/// at least one line (an empty document is a single empty line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    pub fn from_string(content: &str) -> Self {
        let lines = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(|s| s.into()).collect()
        };
        Self { lines }
    }

    /// Seed the buffer from loaded lines; an empty sequence becomes one
    /// empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map(|s| s.len()).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn check_position(&self, pos: Position) -> Result<(), BufferError> {
        let line = self.lines.get(pos.row).ok_or(BufferError::LineOutOfRange {
            line: pos.row,
            line_count: self.lines.len(),
        })?;
        if pos.col > line.len() {
            return Err(BufferError::ColumnOutOfRange {
                column: pos.col,
                line_length: line.len(),
            });
        }
        Ok(())
    }

    /// Insert a character before `pos.col`
    pub fn insert_char(&mut self, pos: Position, ch: char) -> Result<(), BufferError> {
        self.check_position(pos)?;
        self.lines[pos.row].insert(pos.col, ch);
        Ok(())
    }

    /// Split the line at `pos` into `[..col]` and `[col..]`, shifting all
    /// subsequent lines down by one index
    pub fn split_line(&mut self, pos: Position) -> Result<(), BufferError> {
        self.check_position(pos)?;
        let rest = self.lines[pos.row].split_off(pos.col);
        self.lines.insert(pos.row + 1, rest);
        Ok(())
    }

    /// Delete the character before `pos.col` on the same line
    ///
    /// Returns `Ok(false)` at the start of a line: that case is a no-op
    /// here, and the caller decides whether a line merge applies instead.
    pub fn delete_char_before(&mut self, pos: Position) -> Result<bool, BufferError> {
        self.check_position(pos)?;
        if pos.col == 0 {
            return Ok(false);
        }
        self.lines[pos.row].remove(pos.col - 1);
        Ok(true)
    }

    /// Append line `row`'s content to the previous line and remove it,
    /// shifting subsequent lines up by one index
    ///
    /// Returns the column where the two halves were joined.
    pub fn merge_with_previous(&mut self, row: usize) -> Result<usize, BufferError> {
        if row >= self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: row,
                line_count: self.lines.len(),
            });
        }
        if row == 0 {
            return Err(BufferError::NoPreviousLine);
        }
        let removed = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        let join_col = prev.len();
        prev.push_str(&removed);
        Ok(join_col)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
