//! Mapping between a document's form fields and a flat [`FieldRecord`].
//!
//! [`extract_fields`] reads every supported field; [`apply_fields`] writes a
//! record back. Neither performs I/O.

use tracing::debug;

use crate::document::FormDocument;
use crate::error::FillError;
use crate::field::{FieldKind, FieldValue};
use crate::record::FieldRecord;

/// Read every text and checkbox field of `doc` into a record.
///
/// Pages and widgets are visited in order. A name seen more than once keeps
/// its first position and the last visited value. Other field kinds are
/// skipped.
pub fn extract_fields<D: FormDocument>(doc: &D) -> FieldRecord {
    let mut record = FieldRecord::new();
    for page_index in 0..doc.page_count() {
        for field in doc.page_fields(page_index) {
            match field.kind {
                FieldKind::Text => {
                    let text = doc.text(field.id).unwrap_or_default();
                    record.insert(field.name, FieldValue::Text(text));
                }
                FieldKind::CheckBox => {
                    let checked = doc.state(field.id);
                    record.insert(field.name, FieldValue::Checked(checked));
                }
                kind => debug!(name = %field.name, %kind, "skipping unsupported field"),
            }
        }
    }
    record
}

enum FieldWrite<Id> {
    Text(Id, String),
    State(Id, bool),
}

/// Write the values of `record` into the matching fields of `doc`.
///
/// Fields whose name is not a key of `record` are left untouched, and keys
/// without a matching field are ignored. Every value is coerced before the
/// first write, so a [`FillError::ValueMismatch`] leaves `doc` unchanged.
pub fn apply_fields<D: FormDocument>(doc: &mut D, record: &FieldRecord) -> Result<(), FillError> {
    let mut writes = Vec::new();
    let mut matched = std::collections::HashSet::new();

    for page_index in 0..doc.page_count() {
        for field in doc.page_fields(page_index) {
            let Some(value) = record.get(&field.name) else {
                continue;
            };
            match field.kind {
                FieldKind::Text => {
                    writes.push(FieldWrite::Text(field.id, value.coerce_text(&field.name)?));
                }
                FieldKind::CheckBox => {
                    writes.push(FieldWrite::State(
                        field.id,
                        value.coerce_checked(&field.name)?,
                    ));
                }
                kind => {
                    debug!(name = %field.name, %kind, "not filling unsupported field");
                }
            }
            matched.insert(field.name);
        }
    }

    for (name, _) in record.iter() {
        if !matched.contains(name) {
            debug!(name, "record key matches no form field");
        }
    }

    for write in writes {
        let result = match write {
            FieldWrite::Text(id, text) => doc.set_text(id, &text),
            FieldWrite::State(id, checked) => doc.set_state(id, checked),
        };
        result.map_err(Into::<FillError>::into)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryField};

    fn sample_document() -> MemoryDocument {
        MemoryDocument::new(
            2,
            vec![
                MemoryField::text("name", 0, Some("Ann")),
                MemoryField::checkbox("agree", 0, true),
                MemoryField::other("gender", 0, FieldKind::Radio),
                MemoryField::other("country", 1, FieldKind::Choice),
                MemoryField::text("email", 1, None),
                MemoryField::other("submit", 1, FieldKind::PushButton),
            ],
        )
    }

    #[test]
    fn extract_counts_only_supported_fields() {
        let record = extract_fields(&sample_document());
        assert_eq!(record.len(), 3);
        assert!(!record.contains_key("gender"));
        assert!(!record.contains_key("country"));
        assert!(!record.contains_key("submit"));
    }

    #[test]
    fn extract_reads_values_and_defaults_missing_text() {
        let record = extract_fields(&sample_document());
        assert_eq!(record.get("name"), Some(&FieldValue::from("Ann")));
        assert_eq!(record.get("agree"), Some(&FieldValue::Checked(true)));
        assert_eq!(record.get("email"), Some(&FieldValue::from("")));
    }

    #[test]
    fn extract_follows_page_order() {
        let record = extract_fields(&sample_document());
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "agree", "email"]);
    }

    #[test]
    fn extract_last_visit_wins_for_repeated_names() {
        let doc = MemoryDocument::new(
            2,
            vec![
                MemoryField::text("title", 0, Some("first")),
                MemoryField::text("other", 0, None),
                MemoryField::text("title", 1, Some("second")),
            ],
        );
        let record = extract_fields(&doc);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("title"), Some(&FieldValue::from("second")));
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "other"]);
    }

    #[test]
    fn extract_empty_document() {
        let doc = MemoryDocument::new(1, vec![]);
        assert!(extract_fields(&doc).is_empty());
    }

    #[test]
    fn apply_sets_matching_fields() {
        let mut doc = sample_document();
        let mut record = FieldRecord::new();
        record.insert("name", "Bob");
        record.insert("agree", false);
        apply_fields(&mut doc, &record).unwrap();

        let after = extract_fields(&doc);
        assert_eq!(after.get("name"), Some(&FieldValue::from("Bob")));
        assert_eq!(after.get("agree"), Some(&FieldValue::Checked(false)));
        assert_eq!(after.get("email"), Some(&FieldValue::from("")));
    }

    #[test]
    fn apply_leaves_missing_keys_untouched() {
        let mut doc = sample_document();
        let mut record = FieldRecord::new();
        record.insert("email", "a@b.c");
        apply_fields(&mut doc, &record).unwrap();

        let after = extract_fields(&doc);
        assert_eq!(after.get("name"), Some(&FieldValue::from("Ann")));
        assert_eq!(after.get("agree"), Some(&FieldValue::Checked(true)));
        assert_eq!(after.get("email"), Some(&FieldValue::from("a@b.c")));
    }

    #[test]
    fn apply_ignores_unknown_keys() {
        let mut doc = sample_document();
        let before = extract_fields(&doc);
        let mut record = FieldRecord::new();
        record.insert("nonexistent_field", "z");
        apply_fields(&mut doc, &record).unwrap();
        assert_eq!(extract_fields(&doc), before);
    }

    #[test]
    fn apply_ignores_unknown_keys_with_nested_values() {
        let mut doc = sample_document();
        let before = extract_fields(&doc);
        let record: FieldRecord = serde_json::from_str(
            r#"{"marks_distribution": [1, 2], "marks_per_zone": {"north": 4}}"#,
        )
        .unwrap();
        apply_fields(&mut doc, &record).unwrap();
        assert_eq!(extract_fields(&doc), before);
    }

    #[test]
    fn apply_fills_known_keys_next_to_nested_values() {
        let mut doc = sample_document();
        let record: FieldRecord =
            serde_json::from_str(r#"{"name": "Alice", "rankings": [[1, "a"]]}"#).unwrap();
        apply_fields(&mut doc, &record).unwrap();
        assert_eq!(extract_fields(&doc).get("name"), Some(&FieldValue::from("Alice")));
    }

    #[test]
    fn apply_nested_value_on_field_is_mismatch() {
        let mut doc = sample_document();
        let before = extract_fields(&doc);
        let record: FieldRecord = serde_json::from_str(r#"{"email": "x", "name": [1]}"#).unwrap();

        let err = apply_fields(&mut doc, &record).unwrap_err();
        assert!(matches!(
            err,
            FillError::ValueMismatch { ref field, found: "an array", .. } if field == "name"
        ));
        assert_eq!(extract_fields(&doc), before);
    }

    #[test]
    fn apply_skips_unsupported_kinds() {
        let mut doc = sample_document();
        let mut record = FieldRecord::new();
        record.insert("gender", "Male");
        record.insert("country", "FR");
        apply_fields(&mut doc, &record).unwrap();
        assert_eq!(doc.fields()[2].text, None);
        assert_eq!(doc.fields()[3].text, None);
    }

    #[test]
    fn apply_coerces_null_and_numbers_for_text() {
        let mut doc = sample_document();
        let record: FieldRecord =
            serde_json::from_str(r#"{"name": null, "email": 42}"#).unwrap();
        apply_fields(&mut doc, &record).unwrap();

        let after = extract_fields(&doc);
        assert_eq!(after.get("name"), Some(&FieldValue::from("")));
        assert_eq!(after.get("email"), Some(&FieldValue::from("42")));
    }

    #[test]
    fn apply_mismatch_leaves_document_unchanged() {
        let mut doc = sample_document();
        let before = extract_fields(&doc);
        let record: FieldRecord =
            serde_json::from_str(r#"{"name": "Zed", "agree": "yes"}"#).unwrap();

        let err = apply_fields(&mut doc, &record).unwrap_err();
        assert!(matches!(err, FillError::ValueMismatch { ref field, .. } if field == "agree"));
        assert_eq!(extract_fields(&doc), before);
    }

    #[test]
    fn round_trip_is_idempotent() {
        let mut doc = sample_document();
        let extracted = extract_fields(&doc);
        apply_fields(&mut doc, &extracted).unwrap();
        assert_eq!(extract_fields(&doc), extracted);
    }
}
