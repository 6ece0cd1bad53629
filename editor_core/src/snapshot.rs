//! Deterministic state snapshot for tests and diagnostics

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::buffer::Position;
use crate::core::EditorCore;
use crate::mode::EditorMode;

/// Point-in-time copy of the observable editor state
///
/// Built from owned data only, so two snapshots of equivalent states
/// compare equal regardless of how they were reached.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub mode: EditorMode,
    pub cursor: Position,
    pub lines: Vec<String>,
    pub dirty: bool,
    pub first_line: usize,
    pub last_line: usize,
}

impl EditorCore {
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            mode: self.mode(),
            cursor: self.cursor(),
            lines: self.buffer().lines().to_vec(),
            dirty: self.is_dirty(),
            first_line: self.viewport().first_line(),
            last_line: self.viewport().last_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use alloc::vec;

    #[test]
    fn test_snapshot_captures_state() {
        let mut core = EditorCore::new(80, 24);
        core.load_lines(vec!["abc".into(), "def".into()]);
        core.apply_key(Key::Char('j')).unwrap();
        core.resync();

        let snap = core.snapshot();
        assert_eq!(snap.mode, EditorMode::Normal);
        assert_eq!(snap.cursor, Position::new(1, 0));
        assert_eq!(snap.lines, vec![String::from("abc"), String::from("def")]);
        assert!(!snap.dirty);
        assert_eq!(snap.first_line, 0);
        assert_eq!(snap.last_line, 1);
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut core = EditorCore::new(80, 24);
        core.load_lines(vec!["abc".into(), "def".into()]);
        core.apply_key(Key::Char('j')).unwrap();
        let snap = core.snapshot();

        let json = serde_json::to_string(&snap).unwrap();
        let restored: EditorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snap);
    }

    #[test]
    fn test_equivalent_states_snapshot_equal() {
        let mut a = EditorCore::new(80, 24);
        a.load_lines(vec!["hi".into()]);
        a.apply_key(Key::Char('i')).unwrap();
        a.apply_key(Key::Char('x')).unwrap();
        a.apply_key(Key::Backspace).unwrap();
        a.apply_key(Key::Escape).unwrap();
        a.resync();

        let mut b = EditorCore::new(80, 24);
        b.load_lines(vec!["hi".into()]);
        b.apply_key(Key::Char('i')).unwrap();
        b.apply_key(Key::Escape).unwrap();
        b.resync();

        // The round trip left the buffer dirty, so the states differ
        // only in that flag
        let mut snap_a = a.snapshot();
        assert!(snap_a.dirty);
        snap_a.dirty = false;
        assert_eq!(snap_a, b.snapshot());
    }
}
