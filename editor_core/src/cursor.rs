//! Cursor clamping and logical-to-screen mapping

use crate::buffer::{Position, TextBuffer};
use crate::mode::EditorMode;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Cursor position in frame coordinates
///
/// Always derived from the logical cursor, the scroll window, and the
/// frame width; never an independent source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ScreenPosition {
    pub row: usize,
    pub col: usize,
}

impl ScreenPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Number of frame rows a line of `len` characters occupies at `width`
///
/// A wholly empty line still occupies one row.
pub fn wrapped_rows(len: usize, width: usize) -> usize {
    if len == 0 || width == 0 {
        1
    } else {
        (len + width - 1) / width
    }
}

/// Shrink the cursor column to the mode-dependent bound for its line
///
/// Must run after any operation that can shorten the current line or
/// switch mode.
pub fn clamp_col(cursor: &mut Position, buffer: &TextBuffer, mode: EditorMode) {
    let len = buffer.line_length(cursor.row);
    let max = if mode.allows_cursor_past_end() {
        len
    } else {
        len.saturating_sub(1)
    };
    if cursor.col > max {
        cursor.col = max;
    }
}

/// Pull the cursor row back into the buffer after line-count changes
pub fn clamp_row(cursor: &mut Position, buffer: &TextBuffer) {
    let last = buffer.line_count() - 1;
    if cursor.row > last {
        cursor.row = last;
    }
}

/// Map the logical cursor to frame coordinates
///
/// Sums the wrapped rows of every logical line in `[first_line,
/// cursor.row)`, then adds the cursor's own in-line wrap offset. Only
/// defined once the scroll window has been resynced around the cursor.
pub fn to_screen(
    cursor: Position,
    first_line: usize,
    width: usize,
    buffer: &TextBuffer,
) -> ScreenPosition {
    let mut row = 0;
    for line in first_line..cursor.row {
        row += wrapped_rows(buffer.line_length(line), width);
    }
    if width == 0 {
        return ScreenPosition::new(row, 0);
    }
    ScreenPosition::new(row + cursor.col / width, cursor.col % width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows(0, 80), 1);
        assert_eq!(wrapped_rows(1, 80), 1);
        assert_eq!(wrapped_rows(80, 80), 1);
        assert_eq!(wrapped_rows(81, 80), 2);
        assert_eq!(wrapped_rows(160, 80), 2);
        assert_eq!(wrapped_rows(161, 80), 3);
        assert_eq!(wrapped_rows(5, 3), 2);
    }

    #[test]
    fn test_clamp_col_insert_mode() {
        let buffer = TextBuffer::from_string("hello");
        let mut cursor = Position::new(0, 9);
        clamp_col(&mut cursor, &buffer, EditorMode::Insert);
        assert_eq!(cursor.col, 5);
    }

    #[test]
    fn test_clamp_col_normal_mode() {
        let buffer = TextBuffer::from_string("hello");
        let mut cursor = Position::new(0, 5);
        clamp_col(&mut cursor, &buffer, EditorMode::Normal);
        assert_eq!(cursor.col, 4);
    }

    #[test]
    fn test_clamp_col_empty_line() {
        let buffer = TextBuffer::new();
        let mut cursor = Position::new(0, 3);
        clamp_col(&mut cursor, &buffer, EditorMode::Normal);
        assert_eq!(cursor.col, 0);

        let mut cursor = Position::new(0, 3);
        clamp_col(&mut cursor, &buffer, EditorMode::Insert);
        assert_eq!(cursor.col, 0);
    }

    #[test]
    fn test_clamp_row() {
        let buffer = TextBuffer::from_string("a\nb");
        let mut cursor = Position::new(5, 0);
        clamp_row(&mut cursor, &buffer);
        assert_eq!(cursor.row, 1);
    }

    #[test]
    fn test_to_screen_unwrapped() {
        let buffer = TextBuffer::from_string("abc\nde");
        let screen = to_screen(Position::new(1, 1), 0, 80, &buffer);
        assert_eq!(screen, ScreenPosition::new(1, 1));
    }

    #[test]
    fn test_to_screen_wrapped_cursor_line() {
        // "hello" at width 3 wraps to ["hel", "lo"]; column 4 sits at
        // screen (1, 1)
        let buffer = TextBuffer::from_string("hello");
        let screen = to_screen(Position::new(0, 4), 0, 3, &buffer);
        assert_eq!(screen, ScreenPosition::new(1, 1));
    }

    #[test]
    fn test_to_screen_counts_wraps_above() {
        // Line 0 occupies two rows at width 3, so line 1 starts at row 2
        let buffer = TextBuffer::from_string("hello\nhi");
        let screen = to_screen(Position::new(1, 1), 0, 3, &buffer);
        assert_eq!(screen, ScreenPosition::new(2, 1));
    }

    #[test]
    fn test_to_screen_empty_line_above_counts_one_row() {
        let buffer = TextBuffer::from_string("\nhi");
        let screen = to_screen(Position::new(1, 0), 0, 80, &buffer);
        assert_eq!(screen, ScreenPosition::new(1, 0));
    }

    #[test]
    fn test_to_screen_relative_to_first_line() {
        let buffer = TextBuffer::from_string("a\nb\nc\nd");
        let screen = to_screen(Position::new(3, 0), 2, 80, &buffer);
        assert_eq!(screen, ScreenPosition::new(1, 0));
    }
}
