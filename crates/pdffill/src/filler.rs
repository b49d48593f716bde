//! Single-record fill: apply one record and save the document.

use std::io::Write;

use pdffill_core::{FieldRecord, FillError, FormDocument, apply_fields};

/// Apply `record` to `doc` and write the full document, with form changes,
/// into `sink`.
///
/// # Errors
///
/// Returns [`FillError::ValueMismatch`] when a value does not fit its field
/// and [`FillError::Serialization`] with the engine's message when the
/// document cannot be saved.
pub fn fill_one<D, W>(doc: &mut D, record: &FieldRecord, sink: &mut W) -> Result<(), FillError>
where
    D: FormDocument,
    W: Write,
{
    apply_fields(doc, record)?;
    doc.save_to(sink).map_err(Into::<FillError>::into)?;
    sink.flush()?;
    Ok(())
}
