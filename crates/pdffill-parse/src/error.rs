//! Error types for the lopdf backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf failures and converts them to [`FillError`].

use pdffill_core::FillError;
use thiserror::Error;

/// Error type for lopdf backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The bytes are not a parseable PDF.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// The PDF is encrypted; filling encrypted forms is not supported.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Error reading the PDF file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field object could not be resolved or updated.
    #[error("form field error: {0}")]
    Field(String),

    /// lopdf failed while writing the document.
    #[error("{0}")]
    Save(String),
}

impl From<BackendError> for FillError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(_) | BackendError::Encrypted | BackendError::Io(_) => {
                FillError::DocumentLoad(err.to_string())
            }
            BackendError::Field(msg) => FillError::Serialization(msg),
            BackendError::Save(msg) => FillError::Serialization(msg),
        }
    }
}
