//! Output surface abstraction

use thiserror::Error;

/// Failure talking to the output device
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Character-cell output device
///
/// `set_cell` and `show_cursor` may buffer; nothing is guaranteed
/// visible until `flush`. Coordinates are `(row, col)` from the top
/// left; writes outside `dimensions` are clipped, not errors.
pub trait Surface {
    fn set_cell(&mut self, row: usize, col: usize, ch: char) -> Result<(), ScreenError>;
    fn show_cursor(&mut self, row: usize, col: usize) -> Result<(), ScreenError>;
    fn flush(&mut self) -> Result<(), ScreenError>;
    /// Current `(width, height)` in cells
    fn dimensions(&self) -> (usize, usize);
}

/// Deterministic in-memory surface for tests
///
/// Records every cell, the last cursor position, and how many times
/// the buffer was flushed.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
    cursor: (usize, usize),
    flush_count: usize,
}

impl MemorySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
            cursor: (0, 0),
            flush_count: 0,
        }
    }

    /// Replace the grid with a blank one of the new size
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![vec![' '; width]; height];
    }

    pub fn cell(&self, row: usize, col: usize) -> char {
        self.cells[row][col]
    }

    /// Row content with right padding trimmed
    pub fn row_text(&self, row: usize) -> String {
        let text: String = self.cells[row].iter().collect();
        text.trim_end().into()
    }

    /// Last position passed to `show_cursor`, as `(row, col)`
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl Surface for MemorySurface {
    fn set_cell(&mut self, row: usize, col: usize, ch: char) -> Result<(), ScreenError> {
        if row < self.height && col < self.width {
            self.cells[row][col] = ch;
        }
        Ok(())
    }

    fn show_cursor(&mut self, row: usize, col: usize) -> Result<(), ScreenError> {
        self.cursor = (row, col);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ScreenError> {
        self.flush_count += 1;
        Ok(())
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
