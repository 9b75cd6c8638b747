//! Error types for host access.

use std::io;
use std::path::PathBuf;

/// Errors a table host can report.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Snapshot file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot document is not valid.
    #[error("Invalid snapshot document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Table id unknown to the host.
    #[error("No table with id '{0}'")]
    TableNotFound(String),

    /// View id unknown within its table.
    #[error("No view '{view}' in table '{table}'")]
    ViewNotFound { table: String, view: String },

    /// Record id unknown within its table.
    #[error("No record '{record}' in table '{table}'")]
    RecordNotFound { table: String, record: String },

    /// Field id unknown within its table.
    #[error("No field '{field}' in table '{table}'")]
    FieldNotFound { table: String, field: String },

    /// Any other failure reported by the host.
    #[error("Host call failed: {0}")]
    Host(String),
}

impl HostError {
    /// Create a generic host failure.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
