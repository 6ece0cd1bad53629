//! # Editor Session
//!
//! Glue between the editor core and the outside world: file storage,
//! the event-driven session loop, and the status row.

pub mod io;
pub mod session;

pub use io::{EditorIo, FsEditorIo, IoError};
pub use session::{Session, SessionControl, SessionError};
