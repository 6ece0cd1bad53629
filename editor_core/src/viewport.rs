//! Scroll window maintenance and wrap-aware frame rendering

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::buffer::{Position, TextBuffer};
use crate::cursor::{self, ScreenPosition};

/// Marker drawn in column 0 of frame rows past the rendered buffer content
pub const FILL_MARKER: char = '~';

/// Rendered character grid
///
/// Rebuilt in full on every resync; transient, derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    rows: Vec<Vec<char>>,
    used_rows: usize,
}

impl Frame {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![' '; width]; height],
            used_rows: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of leading rows holding rendered buffer content
    pub fn used_rows(&self) -> usize {
        self.used_rows
    }

    pub fn cell(&self, row: usize, col: usize) -> char {
        self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> &[char] {
        &self.rows[row]
    }

    /// Row content as a string with right padding trimmed (test helper)
    pub fn row_text(&self, row: usize) -> String {
        let text: String = self.rows[row].iter().collect();
        text.trim_end().into()
    }
}

/// Visible window over the buffer
///
/// Tracks the inclusive range of logical lines represented in the frame
/// and re-renders it with wrapping. `last_line` is authoritative only
/// after a render: it is exactly the last logical line contributing at
/// least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    first_line: usize,
    last_line: usize,
    width: usize,
    height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            first_line: 0,
            last_line: 0,
            width: width.max(1),
            height,
        }
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn last_line(&self) -> usize {
        self.last_line
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Adopt a new frame size
    ///
    /// The old window extent is meaningless at the new size, so it
    /// collapses to its first line; the next resync regrows it around
    /// the cursor within the new budget.
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height;
        self.last_line = self.first_line;
    }

    /// Reset the window to the top of the buffer (after a load)
    pub fn reset(&mut self) {
        self.first_line = 0;
        self.last_line = 0;
    }

    /// Total wrapped rows occupied by the window's lines
    fn span_rows(&self, buffer: &TextBuffer) -> usize {
        (self.first_line..=self.last_line)
            .map(|line| cursor::wrapped_rows(buffer.line_length(line), self.width))
            .sum()
    }

    /// Advance the window until the cursor's line is inside it, keeping
    /// the wrapped-row span within the frame budget
    pub fn scroll_down_if_needed(&mut self, cursor_row: usize, buffer: &TextBuffer) {
        while cursor_row > self.last_line {
            if self.last_line + 1 >= buffer.line_count() {
                return;
            }
            self.last_line += 1;
            while self.first_line < self.last_line && self.span_rows(buffer) > self.height {
                self.first_line += 1;
            }
        }
    }

    /// Pull the window back until the cursor's line is inside it
    pub fn scroll_up_if_needed(&mut self, cursor_row: usize, buffer: &TextBuffer) {
        while cursor_row < self.first_line {
            self.first_line -= 1;
            while self.last_line > self.first_line && self.span_rows(buffer) > self.height {
                self.last_line -= 1;
            }
        }
    }

    /// Render the window into a fresh frame
    ///
    /// Walks logical lines from `first_line`, emitting the wrapped rows
    /// of each (an empty line still emits one empty row) until the row
    /// budget or the buffer is exhausted. A line whose rows only partly
    /// fit still becomes `last_line`.
    pub fn render(&mut self, buffer: &TextBuffer) -> Frame {
        let mut frame = Frame::blank(self.width, self.height);
        let mut row = 0;
        let mut line = self.first_line;
        let mut last = self.first_line;

        'lines: while line < buffer.line_count() && row < self.height {
            last = line;
            let chars: Vec<char> = buffer.line(line).unwrap_or("").chars().collect();
            let line_rows = cursor::wrapped_rows(chars.len(), self.width);
            for chunk in 0..line_rows {
                if row == self.height {
                    break 'lines;
                }
                let start = (chunk * self.width).min(chars.len());
                let end = (start + self.width).min(chars.len());
                for (col, ch) in chars[start..end].iter().enumerate() {
                    frame.rows[row][col] = *ch;
                }
                row += 1;
            }
            line += 1;
        }

        frame.used_rows = row;
        self.last_line = last;
        fill_trailing_markers(&mut frame);
        frame
    }

    /// The single entry point after any state change
    ///
    /// Adjusts the scroll window around the cursor, re-renders the
    /// frame, and derives the screen cursor. Idempotent: with no
    /// intervening edit, a second call yields identical results.
    pub fn resync(&mut self, buffer: &TextBuffer, cursor: Position) -> (Frame, ScreenPosition) {
        // A window pointing past the end of the buffer is stale (the
        // buffer shrank or was replaced); start over from the top
        if self.last_line >= buffer.line_count() {
            self.reset();
        }
        self.scroll_down_if_needed(cursor.row, buffer);
        self.scroll_up_if_needed(cursor.row, buffer);
        let frame = self.render(buffer);
        let screen_cursor = cursor::to_screen(cursor, self.first_line, self.width, buffer);
        (frame, screen_cursor)
    }
}

/// Write the fill marker into column 0 of the unbroken trailing run of
/// unused rows
///
/// Scanning upward from the bottom, the fill stops permanently at the
/// first used row: interior blank rows (rendered from empty logical
/// lines) are never marker-filled, only rows past the last rendered
/// line.
fn fill_trailing_markers(frame: &mut Frame) {
    for row in (0..frame.rows.len()).rev() {
        if row < frame.used_rows {
            break;
        }
        if frame.width > 0 {
            frame.rows[row][0] = FILL_MARKER;
        }
    }
}
