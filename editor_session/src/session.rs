//! The session loop: events in, frames out

use editor_core::{BufferError, CoreOutcome, EditorCore, EditorMode, IoRequest};
use editor_screen::{ScreenError, ScreenEvent, Surface};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::io::{EditorIo, IoError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// A core operation was handed an out-of-range index; the session
    /// cannot continue past a defect like this
    #[error("editor invariant violated: {0}")]
    Invariant(BufferError),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Whether the loop should keep consuming events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Exit,
}

/// One editing session over one file
///
/// Owns the core, the output surface, and storage. The bottom terminal
/// row is the status row; the frame above it belongs to the core.
pub struct Session<S: Surface, F: EditorIo> {
    core: EditorCore,
    surface: S,
    io: F,
    file_name: String,
    status_message: String,
    width: usize,
    height: usize,
}

impl<S: Surface, F: EditorIo> Session<S, F> {
    /// Open `file_name`, drawing the first frame
    ///
    /// A missing file is not an error: the session starts with an empty
    /// buffer and a `[New File]` banner.
    pub fn new(surface: S, io: F, file_name: String) -> Result<Self, SessionError> {
        let (width, height) = surface.dimensions();
        let mut session = Self {
            core: EditorCore::new(width, height.saturating_sub(1)),
            surface,
            io,
            file_name,
            status_message: String::new(),
            width,
            height,
        };
        session.load_file()?;
        session.redraw()?;
        Ok(session)
    }

    fn load_file(&mut self) -> Result<(), SessionError> {
        match self.io.load(&self.file_name) {
            Ok(lines) => {
                let line_count = lines.len();
                let char_count: usize = lines.iter().map(|line| line.len() + 1).sum();
                self.core.load_lines(lines);
                self.status_message =
                    format!("\"{}\" {}L, {}C", self.file_name, line_count, char_count);
                info!(file = %self.file_name, lines = line_count, "loaded");
            }
            Err(IoError::NotFound(_)) => {
                self.core.load_lines(Vec::new());
                self.status_message = format!("\"{}\" [New File]", self.file_name);
                info!(file = %self.file_name, "new file");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Apply one event and redraw
    pub fn handle_event(&mut self, event: ScreenEvent) -> Result<SessionControl, SessionError> {
        let control = match event {
            ScreenEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                self.width = width;
                self.height = height;
                self.core.resize(width, height.saturating_sub(1));
                SessionControl::Continue
            }
            ScreenEvent::Key(key) => {
                let outcome = self.core.apply_key(key).map_err(|err| {
                    error!(%err, "core rejected key");
                    SessionError::Invariant(err)
                })?;
                debug!(?key, ?outcome, "key");
                self.apply_outcome(outcome)
            }
        };
        if control == SessionControl::Continue {
            self.redraw()?;
        }
        Ok(control)
    }

    fn apply_outcome(&mut self, outcome: CoreOutcome) -> SessionControl {
        match outcome {
            CoreOutcome::Continue => SessionControl::Continue,
            CoreOutcome::Changed => {
                self.status_message.clear();
                SessionControl::Continue
            }
            CoreOutcome::StatusMessage(message) => {
                self.status_message = message;
                SessionControl::Continue
            }
            CoreOutcome::RequestExit { forced } => {
                info!(forced, "exit");
                SessionControl::Exit
            }
            CoreOutcome::RequestIo(request) => match request {
                IoRequest::Save => self.save_to(self.file_name.clone(), false),
                IoRequest::SaveAs(path) => self.save_to(path, false),
                IoRequest::SaveAndQuit => self.save_to(self.file_name.clone(), true),
            },
        }
    }

    /// Write the buffer out; a failure lands in the status row, never
    /// aborts the session
    fn save_to(&mut self, path: String, and_quit: bool) -> SessionControl {
        match self.io.save(&path, self.core.buffer().lines()) {
            Ok(()) => {
                self.core.mark_saved();
                let line_count = self.core.buffer().line_count();
                let char_count: usize = self
                    .core
                    .buffer()
                    .lines()
                    .iter()
                    .map(|line| line.len() + 1)
                    .sum();
                self.status_message =
                    format!("\"{}\" {}L, {}C written", path, line_count, char_count);
                info!(file = %path, lines = line_count, "saved");
                if and_quit {
                    SessionControl::Exit
                } else {
                    SessionControl::Continue
                }
            }
            Err(err) => {
                warn!(file = %path, %err, "save failed");
                self.status_message = format!("E212: Can't open file for writing: {}", path);
                SessionControl::Continue
            }
        }
    }

    fn status_text(&self) -> String {
        match self.core.mode() {
            EditorMode::CommandLine => format!(":{}", self.core.command_line()),
            EditorMode::Insert => "-- INSERT --".into(),
            EditorMode::Normal => self.status_message.clone(),
        }
    }

    /// Push the frame, the status row, and the cursor through the
    /// surface, then flush once
    fn redraw(&mut self) -> Result<(), SessionError> {
        let (frame, screen_cursor) = self.core.resync();
        for row in 0..frame.height() {
            for col in 0..frame.width() {
                self.surface.set_cell(row, col, frame.cell(row, col))?;
            }
        }

        if self.height > 0 {
            let status_row = self.height - 1;
            let status = self.status_text();
            let mut chars = status.chars();
            for col in 0..self.width {
                self.surface
                    .set_cell(status_row, col, chars.next().unwrap_or(' '))?;
            }
            if self.core.mode() == EditorMode::CommandLine {
                let col = (1 + self.core.command_line().len()).min(self.width.saturating_sub(1));
                self.surface.show_cursor(status_row, col)?;
            } else {
                self.surface.show_cursor(screen_cursor.row, screen_cursor.col)?;
            }
        }

        self.surface.flush()?;
        Ok(())
    }
}
