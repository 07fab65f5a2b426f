//! Error types for seedfix-edit.
//!
//! Every variant is scoped to a single document: the batch runner records it against that
//! document and moves on.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The document could not be read or is not UTF-8.
    #[error("read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backup copy could not be written; the document is left untouched.
    #[error("backup {path}: {source}")]
    Backup {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewritten document could not be persisted.
    #[error("write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            EditError::Read { path, .. }
            | EditError::Backup { path, .. }
            | EditError::Write { path, .. } => path,
        }
    }

    /// Short stage name used in reports.
    pub fn stage(&self) -> &'static str {
        match self {
            EditError::Read { .. } => "read",
            EditError::Backup { .. } => "backup",
            EditError::Write { .. } => "write",
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
