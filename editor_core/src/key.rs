//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Platform-independent key event
///
/// Hosts translate their own event types (terminal escape sequences,
/// simulated input traces) into this enum before feeding the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    /// Printable character
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,

    // Special keys
    Enter,
    Backspace,
    Escape,
}

impl Key {
    /// Convert an ASCII byte to a Key (for injected test traces)
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            ch if (0x20..0x7F).contains(&ch) => Some(Key::Char(ch as char)),
            _ => None,
        }
    }
}
