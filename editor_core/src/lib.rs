#![no_std]

//! # Editor Core
//!
//! Viewport and buffer synchronization engine for a modal line editor.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same input trace => same editor state
//! - **Derived, never authoritative**: the frame, screen cursor, and
//!   scroll window are recomputed from the buffer and logical cursor on
//!   every resync
//! - **No ambient authority**: file and screen I/O are explicit host
//!   requests, never performed by the core
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: line-oriented text storage with validated edits
//! - Viewport: scroll window, wrap-aware rendering, fill markers
//! - EditorCore: modal state machine dispatching keys to edits
//! - CoreOutcome: structured results from key dispatch
//! - EditorSnapshot: deterministic state for tests

extern crate alloc;

pub mod buffer;
pub mod command;
pub mod core;
pub mod cursor;
pub mod key;
pub mod mode;
pub mod snapshot;
pub mod viewport;

pub use buffer::{BufferError, Position, TextBuffer};
pub use command::ExCommand;
pub use core::{CoreOutcome, Direction, EditorCore, IoRequest};
pub use cursor::ScreenPosition;
pub use key::Key;
pub use mode::EditorMode;
pub use snapshot::EditorSnapshot;
pub use viewport::{Frame, Viewport, FILL_MARKER};
