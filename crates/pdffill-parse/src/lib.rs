//! pdffill-parse: lopdf-backed form document.
//!
//! Implements [`pdffill_core::FormDocument`] on top of
//! [lopdf](https://crates.io/crates/lopdf): walks page widgets to their
//! AcroForm fields, reads and writes `/V` and `/AS`, and saves the
//! modified object graph.

pub mod error;
pub mod lopdf_document;
mod pdf_string;

pub use error::BackendError;
pub use lopdf_document::LopdfDocument;
pub use pdffill_core;
