//! Editor state machine: modal dispatch over buffer, cursor, and viewport

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::buffer::{BufferError, Position, TextBuffer};
use crate::command::{self, ExCommand};
use crate::cursor::{self, ScreenPosition};
use crate::key::Key;
use crate::mode::EditorMode;
use crate::viewport::{Frame, Viewport};

/// Cursor movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// I/O the host must perform on the core's behalf
///
/// The core never touches storage itself; it hands the intent to the
/// session, which calls back with `mark_saved` on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoRequest {
    Save,
    SaveAs(String),
    SaveAndQuit,
}

/// Result of dispatching one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Key consumed, nothing changed
    Continue,
    /// Buffer or cursor changed; a redraw is due
    Changed,
    /// Text for the status row
    StatusMessage(String),
    /// The user asked to leave
    RequestExit { forced: bool },
    /// The user asked for file I/O
    RequestIo(IoRequest),
}

/// The editor core: buffer, cursor, mode, and scroll window
///
/// Every user-facing operation applies atomically: the buffer mutation
/// is validated before any state changes, so an `Err` leaves the core
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct EditorCore {
    buffer: TextBuffer,
    cursor: Position,
    mode: EditorMode,
    viewport: Viewport,
    command_line: String,
    dirty: bool,
}

impl EditorCore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Position::zero(),
            mode: EditorMode::Normal,
            viewport: Viewport::new(width, height),
            command_line: String::new(),
            dirty: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Text accumulated on the command line (without the leading `:`)
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Seed the buffer from loaded lines and reset cursor and scroll
    pub fn load_lines(&mut self, lines: Vec<String>) {
        self.buffer = TextBuffer::from_lines(lines);
        self.cursor = Position::zero();
        self.mode = EditorMode::Normal;
        self.command_line.clear();
        self.viewport.reset();
        self.dirty = false;
    }

    /// Clear the dirty flag after a successful save
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Adopt new frame dimensions; the buffer is untouched and the next
    /// resync rebuilds the window around the cursor
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.set_dimensions(width, height);
    }

    /// Rebuild the frame and screen cursor for the current state
    pub fn resync(&mut self) -> (Frame, ScreenPosition) {
        self.viewport.resync(&self.buffer, self.cursor)
    }

    /// Dispatch one key according to the current mode
    pub fn apply_key(&mut self, key: Key) -> Result<CoreOutcome, BufferError> {
        match self.mode {
            EditorMode::Normal => self.apply_normal(key),
            EditorMode::Insert => self.apply_insert(key),
            EditorMode::CommandLine => Ok(self.apply_command_line(key)),
        }
    }

    fn apply_normal(&mut self, key: Key) -> Result<CoreOutcome, BufferError> {
        match key {
            Key::Char('i') => {
                self.mode = EditorMode::Insert;
                Ok(CoreOutcome::Changed)
            }
            Key::Char('A') => {
                // Append: insert mode with the cursor past the last
                // character of the current line
                self.mode = EditorMode::Insert;
                self.cursor.col = self.buffer.line_length(self.cursor.row);
                Ok(CoreOutcome::Changed)
            }
            Key::Char('G') => {
                self.cursor.row = self.buffer.line_count() - 1;
                cursor::clamp_col(&mut self.cursor, &self.buffer, self.mode);
                Ok(CoreOutcome::Changed)
            }
            Key::Char(':') => {
                self.mode = EditorMode::CommandLine;
                self.command_line.clear();
                Ok(CoreOutcome::Changed)
            }
            Key::Char('h') | Key::Left => Ok(self.move_cursor(Direction::Left)),
            Key::Char('l') | Key::Right => Ok(self.move_cursor(Direction::Right)),
            Key::Char('k') | Key::Up => Ok(self.move_cursor(Direction::Up)),
            Key::Char('j') | Key::Down => Ok(self.move_cursor(Direction::Down)),
            _ => Ok(CoreOutcome::Continue),
        }
    }

    fn apply_insert(&mut self, key: Key) -> Result<CoreOutcome, BufferError> {
        match key {
            Key::Escape => {
                self.mode = EditorMode::Normal;
                cursor::clamp_col(&mut self.cursor, &self.buffer, self.mode);
                Ok(CoreOutcome::Changed)
            }
            Key::Char(ch) => {
                self.insert_character(ch)?;
                Ok(CoreOutcome::Changed)
            }
            Key::Enter => {
                self.insert_newline()?;
                Ok(CoreOutcome::Changed)
            }
            Key::Backspace => {
                if self.delete_backward()? {
                    Ok(CoreOutcome::Changed)
                } else {
                    Ok(CoreOutcome::Continue)
                }
            }
            Key::Left => Ok(self.move_cursor(Direction::Left)),
            Key::Right => Ok(self.move_cursor(Direction::Right)),
            Key::Up => Ok(self.move_cursor(Direction::Up)),
            Key::Down => Ok(self.move_cursor(Direction::Down)),
        }
    }

    fn apply_command_line(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                self.command_line.clear();
                self.mode = EditorMode::Normal;
                CoreOutcome::Changed
            }
            Key::Char(ch) => {
                self.command_line.push(ch);
                CoreOutcome::Changed
            }
            Key::Backspace => {
                // Backspacing past the `:` cancels the command line
                if self.command_line.pop().is_none() {
                    self.mode = EditorMode::Normal;
                }
                CoreOutcome::Changed
            }
            Key::Enter => {
                let parsed = command::parse_command(&self.command_line);
                self.command_line.clear();
                self.mode = EditorMode::Normal;
                self.execute_command(parsed)
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn execute_command(&mut self, parsed: ExCommand) -> CoreOutcome {
        match parsed {
            ExCommand::Quit => {
                if self.dirty {
                    CoreOutcome::StatusMessage(
                        "E37: No write since last change (add ! to override)".into(),
                    )
                } else {
                    CoreOutcome::RequestExit { forced: false }
                }
            }
            ExCommand::ForceQuit => CoreOutcome::RequestExit { forced: true },
            ExCommand::Write { path: None } => CoreOutcome::RequestIo(IoRequest::Save),
            ExCommand::Write { path: Some(path) } => {
                CoreOutcome::RequestIo(IoRequest::SaveAs(path))
            }
            ExCommand::WriteQuit => CoreOutcome::RequestIo(IoRequest::SaveAndQuit),
            ExCommand::Unknown(text) => {
                CoreOutcome::StatusMessage(format!("E492: Not an editor command: {}", text))
            }
        }
    }

    /// Insert `ch` at the cursor and advance one column
    pub fn insert_character(&mut self, ch: char) -> Result<(), BufferError> {
        self.buffer.insert_char(self.cursor, ch)?;
        self.cursor.col += 1;
        self.dirty = true;
        Ok(())
    }

    /// Split the current line at the cursor; the cursor lands at the
    /// start of the new line
    pub fn insert_newline(&mut self) -> Result<(), BufferError> {
        self.buffer.split_line(self.cursor)?;
        self.cursor.row += 1;
        self.cursor.col = 0;
        self.dirty = true;
        Ok(())
    }

    /// Delete backward from the cursor: the previous character, or at
    /// column 0 a merge with the previous line
    ///
    /// Returns `Ok(false)` at the very start of the buffer, where
    /// nothing can be deleted.
    pub fn delete_backward(&mut self) -> Result<bool, BufferError> {
        if self.cursor.col > 0 {
            self.buffer.delete_char_before(self.cursor)?;
            self.cursor.col -= 1;
            self.dirty = true;
            return Ok(true);
        }
        if self.cursor.row == 0 {
            return Ok(false);
        }
        let join_col = self.buffer.merge_with_previous(self.cursor.row)?;
        self.cursor.row -= 1;
        self.cursor.col = join_col;
        self.dirty = true;
        Ok(true)
    }

    /// Move the cursor one step, clamping to the mode's column bound
    pub fn move_cursor(&mut self, direction: Direction) -> CoreOutcome {
        let before = self.cursor;
        match direction {
            Direction::Left => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
            }
            Direction::Right => {
                self.cursor.col += 1;
                cursor::clamp_col(&mut self.cursor, &self.buffer, self.mode);
            }
            Direction::Up => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
                cursor::clamp_col(&mut self.cursor, &self.buffer, self.mode);
            }
            Direction::Down => {
                self.cursor.row += 1;
                cursor::clamp_row(&mut self.cursor, &self.buffer);
                cursor::clamp_col(&mut self.cursor, &self.buffer, self.mode);
            }
        }
        if self.cursor == before {
            CoreOutcome::Continue
        } else {
            CoreOutcome::Changed
        }
    }
}
