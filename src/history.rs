//! The append-only transaction history.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, error};
use thiserror::Error;

use crate::model::LogEntry;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot write history to {}: {source}", .path.display())]
    Append { path: PathBuf, source: io::Error },
    #[error("cannot read history from {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

pub trait History {
    /// Records one entry. Failing to record is never ignored.
    fn append(&mut self, entry: &LogEntry) -> Result<(), HistoryError>;

    /// Returns everything recorded so far, or `None` when nothing has ever
    /// been recorded.
    fn read_all(&self) -> Result<Option<String>, HistoryError>;
}

/// History kept in a UTF-8 text file, one line per entry.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl History for FileHistory {
    fn append(&mut self, entry: &LogEntry) -> Result<(), HistoryError> {
        let to_append_error = |source: io::Error| HistoryError::Append {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_append_error)?;

        writeln!(file, "{entry}").map_err(|source| {
            error!("failed appending to {}: {source}", self.path.display());
            to_append_error(source)
        })?;

        debug!("appended history entry to {}", self.path.display());

        Ok(())
    }

    fn read_all(&self) -> Result<Option<String>, HistoryError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HistoryError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
