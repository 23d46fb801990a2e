//! Store and run error types.

use std::path::PathBuf;

use picklist_catalog::CatalogError;
use picklist_core::ExpansionError;
use picklist_model::Column;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store root, table or sheet cannot be reached.
    #[error("cannot open {target}: {reason}")]
    Connection { target: PathBuf, reason: String },

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sheet {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// A sink step (update, append, clear) was rejected.
    #[error("{operation} failed: {message}")]
    Write {
        operation: &'static str,
        message: String,
    },

    #[error("cell {column}{row} is outside the sheet")]
    OutOfRange { row: usize, column: Column },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn connection(target: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Connection {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Short hint for the terminal.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Connection { .. } => {
                Some("Check --store, --table and --sheet; the sheet is <store>/<table>/<sheet>.csv.")
            }
            Self::Io { .. } | Self::Write { .. } => {
                Some("Check that the sheet is not open elsewhere and the directory is writable.")
            }
            Self::Csv { .. } => Some("Re-export the sheet as plain CSV."),
            Self::OutOfRange { .. } => None,
        }
    }
}

/// Fatal run failures. Sink step failures are not errors; they end the run
/// with `success = false` in the report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
