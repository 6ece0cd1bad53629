//! Ex command-line parsing

use alloc::string::String;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Parsed ex command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum ExCommand {
    /// `:q` — quit, refused when the buffer has unsaved changes
    Quit,
    /// `:q!` — quit unconditionally
    ForceQuit,
    /// `:w` / `:w <path>` — write, optionally to an explicit path
    Write { path: Option<String> },
    /// `:wq` / `:x` — write then quit
    WriteQuit,
    /// Anything else; echoed back to the user
    Unknown(String),
}

/// Parse the text accumulated on the command line (without the leading
/// `:`)
pub fn parse_command(input: &str) -> ExCommand {
    let trimmed = input.trim();
    match trimmed {
        "q" => ExCommand::Quit,
        "q!" => ExCommand::ForceQuit,
        "w" => ExCommand::Write { path: None },
        "wq" | "x" => ExCommand::WriteQuit,
        _ => {
            if let Some(path) = trimmed.strip_prefix("w ") {
                let path = path.trim();
                if !path.is_empty() {
                    return ExCommand::Write {
                        path: Some(path.into()),
                    };
                }
            }
            ExCommand::Unknown(trimmed.into())
        }
    }
}
