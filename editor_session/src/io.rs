//! File storage for buffer contents

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// Distinct from other failures: a missing file starts an empty
    /// session instead of aborting
    #[error("file not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Storage seam between the session and the filesystem
pub trait EditorIo {
    fn load(&mut self, path: &str) -> Result<Vec<String>, IoError>;
    fn save(&mut self, path: &str, lines: &[String]) -> Result<(), IoError>;
}

/// Filesystem-backed storage, one buffer line per text line
pub struct FsEditorIo;

impl EditorIo for FsEditorIo {
    fn load(&mut self, path: &str) -> Result<Vec<String>, IoError> {
        let file = File::open(path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                IoError::NotFound(path.into())
            } else {
                IoError::Io(err)
            }
        })?;
        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        Ok(lines)
    }

    fn save(&mut self, path: &str, lines: &[String]) -> Result<(), IoError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }
}
