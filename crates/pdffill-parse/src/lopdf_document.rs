//! lopdf-based form document.
//!
//! Implements [`FormDocument`] for a [`lopdf::Document`]. Fields are found
//! through each page's `/Annots` widgets rather than the AcroForm `/Fields`
//! array, so page order drives extraction order.

use std::io::Write;
use std::path::Path;

use lopdf::{Dictionary, Object, ObjectId};
use pdffill_core::{FieldKind, FieldRef, FormDocument};
use tracing::debug;

use crate::error::BackendError;
use crate::pdf_string::{decode_pdf_string, encode_pdf_string};

/// Upper bound on `/Parent` hops, guarding against reference cycles.
const MAX_FIELD_DEPTH: usize = 64;

/// Appearance state name used when a checkbox declares no "on" appearance.
const DEFAULT_ON_STATE: &[u8] = b"Yes";

const OFF_STATE: &[u8] = b"Off";

/// A parsed PDF form backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
    /// Set once any field value has been written.
    modified: bool,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

impl LopdfDocument {
    /// Parse PDF bytes into a form document.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if the bytes are not a valid PDF and
    /// [`BackendError::Encrypted`] for encrypted documents.
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Encrypted);
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), "opened PDF");

        Ok(Self {
            inner,
            page_ids,
            modified: false,
        })
    }

    /// Read and parse a PDF file.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes)
    }

    /// Whether any field value has been written since loading.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn dict(&self, id: ObjectId) -> Option<&Dictionary> {
        self.inner.get_object(id).and_then(Object::as_dict).ok()
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.inner.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// Look up `key` on a field, walking up `/Parent` links for inheritable
    /// entries such as `/FT`, `/Ff` and `/V`.
    fn inherited(&self, field_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut current = field_id;
        for _ in 0..MAX_FIELD_DEPTH {
            let dict = self.dict(current)?;
            if let Ok(value) = dict.get(key) {
                return self.resolve(value);
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        }
        None
    }

    /// The field a widget annotation belongs to.
    ///
    /// A widget carrying `/T` is merged with its field; otherwise its
    /// `/Parent` is the field.
    fn terminal_field(widget_id: ObjectId, widget: &Dictionary) -> ObjectId {
        if widget.has(b"T") {
            return widget_id;
        }
        match widget.get(b"Parent") {
            Ok(Object::Reference(parent)) => *parent,
            _ => widget_id,
        }
    }

    /// Partial `/T` names from the root of the field tree down, joined with `.`.
    fn qualified_name(&self, field_id: ObjectId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(field_id);
        let mut depth = 0;
        while let Some(id) = current {
            if depth >= MAX_FIELD_DEPTH {
                break;
            }
            let Some(dict) = self.dict(id) else {
                break;
            };
            if let Some(Object::String(bytes, _)) = dict.get(b"T").ok().and_then(|t| self.resolve(t)) {
                parts.push(decode_pdf_string(bytes));
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
        parts.reverse();
        parts.join(".")
    }

    fn field_kind(&self, field_id: ObjectId) -> FieldKind {
        let field_type = match self.inherited(field_id, b"FT") {
            Some(Object::Name(name)) => std::str::from_utf8(name).ok(),
            _ => None,
        };
        let flags = match self.inherited(field_id, b"Ff") {
            // Out-of-range flags are treated as no flags at all.
            Some(Object::Integer(n)) => u32::try_from(*n).unwrap_or(0),
            _ => 0,
        };
        FieldKind::from_pdf_entries(field_type, flags)
    }

    /// Widget annotations of a terminal field: its `/Kids` without `/T`,
    /// or the field itself when it is merged with its only widget.
    fn widgets(&self, field_id: ObjectId) -> Vec<ObjectId> {
        let kids = self
            .dict(field_id)
            .and_then(|d| d.get(b"Kids").ok())
            .and_then(|k| self.resolve(k))
            .and_then(|k| k.as_array().ok());

        let widgets: Vec<ObjectId> = kids
            .into_iter()
            .flatten()
            .filter_map(|kid| kid.as_reference().ok())
            .filter(|&kid| self.dict(kid).is_some_and(|d| !d.has(b"T")))
            .collect();

        if widgets.is_empty() {
            vec![field_id]
        } else {
            widgets
        }
    }

    /// The name of a checkbox widget's "on" appearance state.
    fn on_state(&self, widget_id: ObjectId) -> Vec<u8> {
        let normal = self
            .dict(widget_id)
            .and_then(|d| d.get(b"AP").ok())
            .and_then(|ap| self.resolve(ap))
            .and_then(|ap| ap.as_dict().ok())
            .and_then(|ap| ap.get(b"N").ok())
            .and_then(|n| self.resolve(n))
            .and_then(|n| n.as_dict().ok());

        normal
            .and_then(|n| {
                n.iter()
                    .map(|(name, _)| name)
                    .find(|name| name.as_slice() != OFF_STATE)
                    .cloned()
            })
            .unwrap_or_else(|| DEFAULT_ON_STATE.to_vec())
    }

    fn dict_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary, BackendError> {
        self.inner
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| BackendError::Field(format!("object {} {}: {e}", id.0, id.1)))
    }

    /// Ask viewers and rasterizers to regenerate field appearances.
    fn mark_need_appearances(&mut self) -> Result<(), BackendError> {
        let root_id = match self.inner.trailer.get(b"Root") {
            Ok(Object::Reference(id)) => *id,
            _ => return Ok(()),
        };
        let acroform_id = match self.dict(root_id).map(|catalog| catalog.get(b"AcroForm")) {
            Some(Ok(Object::Reference(id))) => Some(*id),
            Some(Ok(Object::Dictionary(_))) => None,
            _ => return Ok(()),
        };

        let acroform = match acroform_id {
            Some(id) => self.dict_mut(id)?,
            None => self
                .dict_mut(root_id)?
                .get_mut(b"AcroForm")
                .and_then(Object::as_dict_mut)
                .map_err(|e| BackendError::Field(format!("AcroForm: {e}")))?,
        };
        acroform.set("NeedAppearances", true);
        Ok(())
    }
}

impl FormDocument for LopdfDocument {
    type FieldId = ObjectId;
    type Error = BackendError;

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_fields(&self, page_index: usize) -> Vec<FieldRef<ObjectId>> {
        let Some(&page_id) = self.page_ids.get(page_index) else {
            return Vec::new();
        };
        let annots = self
            .dict(page_id)
            .and_then(|page| page.get(b"Annots").ok())
            .and_then(|a| self.resolve(a))
            .and_then(|a| a.as_array().ok());
        let Some(annots) = annots else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for annot in annots {
            // Inline annotation dictionaries cannot be addressed for writing.
            let Ok(widget_id) = annot.as_reference() else {
                continue;
            };
            let Some(widget) = self.dict(widget_id) else {
                continue;
            };
            let is_widget = matches!(widget.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Widget");
            if !is_widget {
                continue;
            }
            let field_id = Self::terminal_field(widget_id, widget);
            fields.push(FieldRef {
                id: field_id,
                name: self.qualified_name(field_id),
                kind: self.field_kind(field_id),
            });
        }
        fields
    }

    fn text(&self, field: ObjectId) -> Option<String> {
        match self.inherited(field, b"V")? {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }

    fn set_text(&mut self, field: ObjectId, text: &str) -> Result<(), BackendError> {
        self.dict_mut(field)?.set("V", encode_pdf_string(text));
        self.modified = true;
        Ok(())
    }

    fn state(&self, field: ObjectId) -> bool {
        match self.inherited(field, b"V") {
            Some(Object::Name(name)) => return name.as_slice() != OFF_STATE,
            Some(Object::String(bytes, _)) => return bytes.as_slice() != OFF_STATE,
            _ => {}
        }
        let first_widget = self.widgets(field).into_iter().next();
        match first_widget.and_then(|w| self.dict(w)).map(|w| w.get(b"AS")) {
            Some(Ok(Object::Name(name))) => name.as_slice() != OFF_STATE,
            _ => false,
        }
    }

    fn set_state(&mut self, field: ObjectId, checked: bool) -> Result<(), BackendError> {
        let states: Vec<(ObjectId, Vec<u8>)> = self
            .widgets(field)
            .into_iter()
            .map(|widget| {
                let state = if checked {
                    self.on_state(widget)
                } else {
                    OFF_STATE.to_vec()
                };
                (widget, state)
            })
            .collect();

        let value = states
            .first()
            .map(|(_, state)| state.clone())
            .unwrap_or_else(|| OFF_STATE.to_vec());
        self.dict_mut(field)?.set("V", Object::Name(value));
        for (widget, state) in states {
            self.dict_mut(widget)?.set("AS", Object::Name(state));
        }
        self.modified = true;
        Ok(())
    }

    fn save_to<W: Write>(&mut self, sink: &mut W) -> Result<(), BackendError> {
        if self.modified {
            self.mark_need_appearances()?;
        }
        self.inner
            .save_to(sink)
            .map_err(|e| BackendError::Save(e.to_string()))?;
        Ok(())
    }
}
