//! Error types for table configuration and export.
//!
//! Layout and formatting never fail on cell data; errors come from caller
//! misconfiguration (missing row ids, duplicate keys) and from the export
//! sinks writing files.

use std::io;

use thiserror::Error;

/// Errors that can occur when configuring a table or writing an export.
#[derive(Debug, Error)]
pub enum GridError {
    /// Row selection is enabled but a row carries no usable `id`.
    #[error("unique id is required in each row to enable row selection (row {index} has none)")]
    MissingRowId { index: usize },

    /// Two columns in one list share a key.
    #[error("duplicate column key '{0}'")]
    DuplicateColumnKey(String),

    /// A width update or lookup named a column that is not in the store.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A resize gesture started while another one was still active.
    #[error("a resize of column '{0}' is already in progress")]
    ResizeInProgress(String),

    /// Writing an export file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing CSV data failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A table definition could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The export format is not compiled into this build.
    #[error("export format '{0}' is not available in this build")]
    UnsupportedFormat(String),

    /// The PDF writer rejected the document.
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for GridError {
    fn from(err: serde_yaml::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

/// Result type for gridline operations.
pub type Result<T> = std::result::Result<T, GridError>;
