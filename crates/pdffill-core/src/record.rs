//! Field records and the fill-mode record set.

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FillError;
use crate::field::{FieldValue, describe_json};

/// A flat, insertion-ordered mapping from field name to value.
///
/// Serializes as a JSON object. Keys that match no document field are
/// carried along and ignored when the record is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRecord(IndexMap<String, FieldValue>);

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Overlay `overrides` onto a copy of `self`.
    ///
    /// Keys present in `overrides` win; keys only in `self` keep their
    /// value. Used to build the effective record of each sub-document from
    /// the template's pristine values.
    pub fn overlaid_with(&self, overrides: &FieldRecord) -> FieldRecord {
        let mut merged = self.clone();
        for (name, value) in &overrides.0 {
            merged.0.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Render as pretty JSON: 2-space indent, literal non-ASCII, trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, FillError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

impl FromIterator<(String, FieldValue)> for FieldRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The fill-mode payload: a single record or an ordered list of records.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    One(FieldRecord),
    Many(Vec<FieldRecord>),
}

impl RecordSet {
    /// Parse a record set from JSON.
    ///
    /// The payload must be an object or an array of objects. Values of any
    /// JSON type are accepted inside a record.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FillError> {
        let payload: serde_json::Value = serde_json::from_reader(reader)?;
        match payload {
            serde_json::Value::Object(_) => Ok(RecordSet::One(serde_json::from_value(payload)?)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    serde_json::Value::Object(_) => Ok(serde_json::from_value(item)?),
                    other => Err(FillError::ExchangeFormat(format!(
                        "record {index} is {}, expected an object",
                        describe_json(&other)
                    ))),
                })
                .collect::<Result<Vec<FieldRecord>, FillError>>()
                .map(RecordSet::Many),
            other => Err(FillError::ExchangeFormat(format!(
                "expected an object or an array of objects, found {}",
                describe_json(&other)
            ))),
        }
    }

    /// Normalize to an ordered sequence; a single object becomes one element.
    pub fn into_records(self) -> Vec<FieldRecord> {
        match self {
            RecordSet::One(record) => vec![record],
            RecordSet::Many(records) => records,
        }
    }
}
