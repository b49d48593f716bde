//! In-memory [`FormDocument`] backend.
//!
//! Holds fields as plain structs and "saves" by writing the supported
//! field values as a JSON object. Useful wherever a real PDF is not
//! needed, such as exercising fill strategies.

use std::io::Write;

use crate::document::{FieldRef, FormDocument};
use crate::error::FillError;
use crate::field::{FieldKind, FieldValue};
use crate::record::FieldRecord;

/// One field of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryField {
    pub name: String,
    pub kind: FieldKind,
    /// 0-based page the field's widget sits on.
    pub page: usize,
    pub text: Option<String>,
    pub checked: bool,
}

impl MemoryField {
    pub fn text(name: &str, page: usize, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
            page,
            text: value.map(str::to_string),
            checked: false,
        }
    }

    pub fn checkbox(name: &str, page: usize, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::CheckBox,
            page,
            text: None,
            checked,
        }
    }

    pub fn other(name: &str, page: usize, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            page,
            text: None,
            checked: false,
        }
    }
}

/// A document whose fields live in a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    page_count: usize,
    fields: Vec<MemoryField>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryDocument {
    pub fn new(page_count: usize, fields: Vec<MemoryField>) -> Self {
        Self {
            page_count,
            fields,
            saves: 0,
            fail_saves: false,
        }
    }

    /// Make every subsequent save fail with a serialization error.
    pub fn fail_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn fields(&self) -> &[MemoryField] {
        &self.fields
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl FormDocument for MemoryDocument {
    type FieldId = usize;
    type Error = FillError;

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_fields(&self, page_index: usize) -> Vec<FieldRef<usize>> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.page == page_index)
            .map(|(id, field)| FieldRef {
                id,
                name: field.name.clone(),
                kind: field.kind,
            })
            .collect()
    }

    fn text(&self, field: usize) -> Option<String> {
        self.fields.get(field).and_then(|f| f.text.clone())
    }

    fn set_text(&mut self, field: usize, text: &str) -> Result<(), FillError> {
        if let Some(f) = self.fields.get_mut(field) {
            f.text = Some(text.to_string());
        }
        Ok(())
    }

    fn state(&self, field: usize) -> bool {
        self.fields.get(field).is_some_and(|f| f.checked)
    }

    fn set_state(&mut self, field: usize, checked: bool) -> Result<(), FillError> {
        if let Some(f) = self.fields.get_mut(field) {
            f.checked = checked;
        }
        Ok(())
    }

    fn save_to<W: Write>(&mut self, sink: &mut W) -> Result<(), FillError> {
        if self.fail_saves {
            return Err(FillError::Serialization("save disabled".to_string()));
        }
        let record: FieldRecord = self
            .fields
            .iter()
            .filter_map(|f| match f.kind {
                FieldKind::Text => Some((
                    f.name.clone(),
                    FieldValue::Text(f.text.clone().unwrap_or_default()),
                )),
                FieldKind::CheckBox => Some((f.name.clone(), FieldValue::Checked(f.checked))),
                _ => None,
            })
            .collect();
        serde_json::to_writer(&mut *sink, &record)?;
        sink.write_all(b"\n")?;
        self.saves += 1;
        Ok(())
    }
}
