//! Editor modes

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum EditorMode {
    /// Normal mode (navigation and commands)
    Normal,
    /// Insert mode (text entry)
    Insert,
    /// Command-line mode (ex commands like :q, :w)
    CommandLine,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::CommandLine => "COMMAND_LINE",
        }
    }

    /// In insert mode the cursor may rest one column past the last
    /// character (the insertion point after it); in the other modes it
    /// must rest on an existing character.
    pub fn allows_cursor_past_end(&self) -> bool {
        matches!(self, EditorMode::Insert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(EditorMode::Normal.as_str(), "NORMAL");
        assert_eq!(EditorMode::Insert.as_str(), "INSERT");
        assert_eq!(EditorMode::CommandLine.as_str(), "COMMAND_LINE");
    }

    #[test]
    fn test_column_bound_policy() {
        assert!(EditorMode::Insert.allows_cursor_past_end());
        assert!(!EditorMode::Normal.allows_cursor_past_end());
        assert!(!EditorMode::CommandLine.allows_cursor_past_end());
    }
}
