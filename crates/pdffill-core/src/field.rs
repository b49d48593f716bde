//! Form field kinds and the values records carry for them.
//!
//! Provides [`FieldKind`] for classifying interactive form fields and
//! [`FieldValue`] for the typed values exchanged as JSON.

use serde::{Deserialize, Serialize};

use crate::error::FillError;

/// Field flag bit for radio buttons (`/Ff` bit 16, PDF 1.7 Table 226).
pub const FLAG_RADIO: u32 = 1 << 15;

/// Field flag bit for push buttons (`/Ff` bit 17, PDF 1.7 Table 226).
pub const FLAG_PUSHBUTTON: u32 = 1 << 16;

/// The kind of an interactive form field.
///
/// Only [`Text`](FieldKind::Text) and [`CheckBox`](FieldKind::CheckBox) take
/// part in extraction and filling; every other kind is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field without the radio or push-button flag.
    CheckBox,
    /// Button field with the radio flag. Group identity is not resolvable.
    Radio,
    /// Button field with the push-button flag.
    PushButton,
    /// Choice field (`/FT /Ch`): combo and list boxes.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
    /// Missing or unrecognized `/FT`.
    Unknown,
}

impl FieldKind {
    /// Classify a field from its (possibly inherited) `/FT` name and `/Ff` flags.
    pub fn from_pdf_entries(field_type: Option<&str>, flags: u32) -> Self {
        match field_type {
            Some("Tx") => Self::Text,
            Some("Btn") if flags & FLAG_PUSHBUTTON != 0 => Self::PushButton,
            Some("Btn") if flags & FLAG_RADIO != 0 => Self::Radio,
            Some("Btn") => Self::CheckBox,
            Some("Ch") => Self::Choice,
            Some("Sig") => Self::Signature,
            _ => Self::Unknown,
        }
    }

    /// Whether the codec reads and writes fields of this kind.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Text | Self::CheckBox)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::CheckBox => write!(f, "CheckBox"),
            Self::Radio => write!(f, "Radio"),
            Self::PushButton => write!(f, "PushButton"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A field value as it appears in the JSON exchange format.
///
/// Extraction only ever produces [`Text`](FieldValue::Text) and
/// [`Checked`](FieldValue::Checked). The other variants exist so that fill
/// input can be coerced under a fixed policy instead of being rejected
/// wholesale at parse time. Arrays and objects land in
/// [`Other`](FieldValue::Other) and only fail when they target a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state.
    Checked(bool),
    /// A JSON number; text fields accept it in its canonical JSON form.
    Number(serde_json::Number),
    /// Text field contents.
    Text(String),
    /// JSON `null`: empty text, or an unchecked box.
    Null,
    /// Any other JSON value, such as an array or a nested object.
    Other(serde_json::Value),
}

/// Short description of a JSON value's type for error messages.
pub(crate) fn describe_json(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl FieldValue {
    fn describe(&self) -> &'static str {
        match self {
            Self::Checked(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::Text(_) => "a string",
            Self::Null => "null",
            Self::Other(value) => describe_json(value),
        }
    }

    /// Coerce this value for a text field named `field`.
    ///
    /// Strings pass through, `null` becomes `""` and numbers use their
    /// canonical JSON spelling (`42`, `1.5`). Booleans are rejected.
    pub fn coerce_text(&self, field: &str) -> Result<String, FillError> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Number(number) => Ok(number.to_string()),
            Self::Null => Ok(String::new()),
            Self::Checked(_) | Self::Other(_) => Err(FillError::ValueMismatch {
                field: field.to_string(),
                expected: "a string",
                found: self.describe(),
            }),
        }
    }

    /// Coerce this value for a checkbox named `field`.
    ///
    /// Booleans pass through and `null` means unchecked. Anything else is
    /// rejected.
    pub fn coerce_checked(&self, field: &str) -> Result<bool, FillError> {
        match self {
            Self::Checked(checked) => Ok(*checked),
            Self::Null => Ok(false),
            Self::Text(_) | Self::Number(_) | Self::Other(_) => Err(FillError::ValueMismatch {
                field: field.to_string(),
                expected: "a boolean",
                found: self.describe(),
            }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        Self::Checked(checked)
    }
}
