//! Crossterm-backed terminal surface

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::surface::{ScreenError, Surface};

/// Real terminal output in raw mode on the alternate screen
///
/// Construction takes over the tty; `Drop` restores it, so the normal
/// screen comes back even on a panic unwind.
pub struct TerminalSurface {
    out: Stdout,
    width: usize,
    height: usize,
}

impl TerminalSurface {
    pub fn new() -> Result<Self, ScreenError> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Clear(ClearType::All))?;
        let (width, height) = terminal::size()?;
        Ok(Self {
            out,
            width: width as usize,
            height: height as usize,
        })
    }

    /// Adopt a new size reported by a resize event
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for TerminalSurface {
    fn set_cell(&mut self, row: usize, col: usize, ch: char) -> Result<(), ScreenError> {
        if row >= self.height || col >= self.width {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(col as u16, row as u16),
            Print(ch)
        )?;
        Ok(())
    }

    fn show_cursor(&mut self, row: usize, col: usize) -> Result<(), ScreenError> {
        queue!(
            self.out,
            cursor::MoveTo(col as u16, row as u16),
            cursor::Show
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ScreenError> {
        self.out.flush()?;
        Ok(())
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen, cursor::Show);
    }
}
