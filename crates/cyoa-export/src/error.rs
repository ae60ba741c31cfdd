//! Error types for exporting.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while rendering or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The requested format name is not known.
    #[error("unsupported format: \"{0}\". Use: html, json")]
    UnsupportedFormat(String),
}
