//! pdffill-core: Backend-independent form field model and codec.
//!
//! This crate provides the field and record types, the [`FormDocument`]
//! trait that PDF backends implement, and the codec that maps a document's
//! form fields to a flat name → value [`FieldRecord`] and back.

pub mod codec;
pub mod document;
pub mod error;
pub mod field;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod record;

pub use codec::{apply_fields, extract_fields};
pub use document::{FieldRef, FormDocument};
pub use error::FillError;
pub use field::{FieldKind, FieldValue};
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryDocument, MemoryField};
pub use record::{FieldRecord, RecordSet};
