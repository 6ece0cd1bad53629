//! # Editor Screen
//!
//! Terminal I/O for the editor: a character-cell `Surface` abstraction
//! with a crossterm backend and an in-memory test double, plus the
//! input pump translating terminal events into editor key events over a
//! bounded channel.

pub mod event;
pub mod surface;
pub mod terminal;

pub use event::{spawn_event_pump, translate_event, translate_key, ScreenEvent, EVENT_QUEUE_DEPTH};
pub use surface::{MemorySurface, ScreenError, Surface};
pub use terminal::TerminalSurface;
