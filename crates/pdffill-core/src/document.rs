//! Document capability trait.
//!
//! Defines the [`FormDocument`] trait that abstracts the PDF engine. The
//! codec, the filler and the orchestrator only talk to documents through it,
//! so backends (lopdf, in-memory) are interchangeable.

use std::io::Write;

use crate::error::FillError;
use crate::field::FieldKind;

/// A form field as seen on one page.
///
/// `id` is backend-specific and only meaningful for the document that
/// produced it. Several widgets of one logical field yield several
/// `FieldRef`s with the same `id` and `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef<Id> {
    /// Backend handle used for reads and writes.
    pub id: Id,
    /// Fully qualified field name.
    pub name: String,
    /// Field kind after `/FT` and `/Ff` inheritance.
    pub kind: FieldKind,
}

/// Trait abstracting a loaded PDF with interactive form fields.
///
/// # Associated Types
///
/// - `FieldId`: Handle to a field within this document.
/// - `Error`: Backend-specific error type, convertible to [`FillError`].
///
/// # Usage
///
/// ```ignore
/// for page in 0..doc.page_count() {
///     for field in doc.page_fields(page) {
///         println!("{} = {:?}", field.name, doc.text(field.id));
///     }
/// }
/// doc.save_to(&mut out)?;
/// ```
pub trait FormDocument {
    /// Handle to a field within this document.
    type FieldId: Copy + std::fmt::Debug;

    /// Backend-specific error type, convertible to [`FillError`].
    type Error: std::error::Error + Into<FillError>;

    /// Return the number of pages in the document.
    fn page_count(&self) -> usize;

    /// Return the form fields whose widgets sit on the given 0-based page,
    /// in widget order. Out-of-range pages yield an empty list.
    fn page_fields(&self, page_index: usize) -> Vec<FieldRef<Self::FieldId>>;

    /// Current text of a text field, or `None` if it has no value.
    fn text(&self, field: Self::FieldId) -> Option<String>;

    /// Replace the text of a text field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field object cannot be updated.
    fn set_text(&mut self, field: Self::FieldId, text: &str) -> Result<(), Self::Error>;

    /// Whether a checkbox is checked.
    fn state(&self, field: Self::FieldId) -> bool;

    /// Check or uncheck a checkbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the field object cannot be updated.
    fn set_state(&mut self, field: Self::FieldId, checked: bool) -> Result<(), Self::Error>;

    /// Serialize the whole document, including form changes, into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the engine's diagnostic if it cannot write
    /// the document.
    fn save_to<W: Write>(&mut self, sink: &mut W) -> Result<(), Self::Error>;
}
