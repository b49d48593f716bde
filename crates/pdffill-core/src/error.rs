//! Error type shared by every layer of pdf-fill-form.
//!
//! Every failure is fatal to the command that hit it; nothing here is
//! retried. The CLI maps each variant to an exit code.

use thiserror::Error;

/// Fatal error raised while loading, extracting, filling or merging.
#[derive(Debug, Error)]
pub enum FillError {
    /// The input document could not be read or is not a usable PDF.
    #[error("failed to load document: {0}")]
    DocumentLoad(String),

    /// The JSON payload could not be parsed or produced.
    #[error("invalid field data: {0}")]
    ExchangeFormat(String),

    /// A record value cannot be coerced to the type of its target field.
    #[error("field '{field}' expects {expected}, got {found}")]
    ValueMismatch {
        /// Fully qualified field name.
        field: String,
        /// What the field accepts, e.g. "a boolean".
        expected: &'static str,
        /// What the record supplied, e.g. "a string".
        found: &'static str,
    },

    /// The PDF engine refused to save the document.
    #[error("failed to save document: {0}")]
    Serialization(String),

    /// An external merge or rasterize tool could not run or exited non-zero.
    #[error("{tool} failed: {reason}")]
    ExternalTool {
        /// Program name or path as it was invoked.
        tool: String,
        /// Exit status or spawn error.
        reason: String,
    },

    /// I/O error on scratch files or the output destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FillError {
    fn from(err: serde_json::Error) -> Self {
        FillError::ExchangeFormat(err.to_string())
    }
}
