//! Error type shared by the store, the providers and the app layer.
//!
//! Scanners never produce errors: a keystroke that does not match any
//! trigger syntax simply yields no trigger.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("record already exists: {0}")]
    RecordExists(String),
    #[error("not a folder: {0}")]
    NotAFolder(String),
    #[error("no active document")]
    NoActiveDocument,
    #[error("suggestion for {0:?} no longer matches the text")]
    StaleTrigger(String),
    #[error("malformed definition: {0:?}")]
    InvalidDefinition(String),
    #[error("invalid query pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("line {0} is out of range")]
    LineOutOfRange(usize),
}

impl DictionaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DictionaryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
