//! Error types for the acronym store and interactive sessions.
//!
//! Store errors carry the file path so the CLI can print a useful diagnostic
//! without extra context. Session errors wrap store errors and add the two
//! console failure modes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving the acronym store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file does not exist.
    #[error("acronym store not found: {} (run `acrodrill init` to create one)", path.display())]
    NotFound { path: PathBuf },

    /// The store file exists but could not be read.
    #[error("failed to read acronym store {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file is not an object of objects of strings.
    #[error("failed to parse acronym store {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the store file failed (permissions, disk full, ...).
    #[error("failed to write acronym store {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize acronym store")]
    Serialize(#[source] serde_json::Error),
}

/// Errors that end an interactive session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Standard input reached end-of-file while waiting for an answer.
    #[error("input closed")]
    InputClosed,

    #[error("console I/O failed")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Returns `true` if this error only means the user is gone, not that
    /// something went wrong.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, SessionError::InputClosed)
    }
}
