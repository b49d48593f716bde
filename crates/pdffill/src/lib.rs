//! pdffill: Fill PDF form fields from JSON records.
//!
//! This is the public API facade crate for pdf-fill-form. It re-exports types
//! from pdffill-core and pdffill-parse and adds the fill pipeline on top.
//!
//! # Architecture
//!
//! - **pdffill-core**: Field model, records, the `FormDocument` trait and the codec
//! - **pdffill-parse**: lopdf-backed `FormDocument`
//! - **pdffill** (this crate): single-record filler, multi-record orchestrator
//!   and the external merge/rasterize tools

pub mod filler;
pub mod orchestrator;
mod scratch;
pub mod tools;

pub use filler::fill_one;
pub use orchestrator::{FillOptions, FillStrategy, fill_records};
pub use tools::{PageTools, PopplerTools, ToolConfig};

pub use pdffill_core;
pub use pdffill_core::{
    FieldKind, FieldRecord, FieldValue, FillError, FormDocument, RecordSet, apply_fields,
    extract_fields,
};
pub use pdffill_parse;
pub use pdffill_parse::LopdfDocument;
