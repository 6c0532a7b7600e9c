//! # Raw Records and Splits
//!
//! Input-side data model: a [`RawSplit`] is a named, ordered collection of
//! [`RawRecord`]s, each carrying its sequence under one of the
//! [`SEQUENCE_FIELD_NAMES`].

use std::collections::BTreeMap;

/// Accepted sequence field names, in lookup priority order.
pub const SEQUENCE_FIELD_NAMES: [&str; 2] = ["sequence", "Seq"];

/// A record field value, as delivered by a split source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A text value.
    Text(String),

    /// An explicit null.
    Null,

    /// A non-text value, carried as its textual rendering.
    Other(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => FieldValue::Text(s),
            serde_json::Value::Null => FieldValue::Null,
            other => FieldValue::Other(other.to_string()),
        }
    }
}

/// One input record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl RawRecord {
    /// Build a record with a single `sequence` text field.
    pub fn from_sequence<S: Into<String>>(sequence: S) -> Self {
        [(SEQUENCE_FIELD_NAMES[0], FieldValue::Text(sequence.into()))]
            .into_iter()
            .collect()
    }

    /// Get a field by name.
    pub fn field(
        &self,
        name: &str,
    ) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get the sequence field.
    ///
    /// ## Returns
    /// The value of the first of [`SEQUENCE_FIELD_NAMES`] present on the record;
    /// `None` if neither is present.
    pub fn sequence_value(&self) -> Option<&FieldValue> {
        SEQUENCE_FIELD_NAMES
            .iter()
            .find_map(|name| self.fields.get(*name))
    }
}

/// A named, ordered collection of [`RawRecord`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawSplit {
    /// The split name; e.g. `"train"`.
    pub name: String,

    /// The records, in source order.
    pub records: Vec<RawRecord>,
}

impl RawSplit {
    /// Create a new split.
    pub fn new<S: Into<String>>(
        name: S,
        records: Vec<RawRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the split is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sequence_value_priority() {
        let record: RawRecord = [("Seq", "CCCC"), ("sequence", "AAAA")]
            .into_iter()
            .collect();
        assert_eq!(record.sequence_value(), Some(&FieldValue::from("AAAA")));

        let record: RawRecord = [("Seq", "CCCC"), ("id", "x")].into_iter().collect();
        assert_eq!(record.sequence_value(), Some(&FieldValue::from("CCCC")));

        let record: RawRecord = [("id", "x")].into_iter().collect();
        assert_eq!(record.sequence_value(), None);
    }

    #[test]
    fn test_null_sequence_shadows_seq() {
        let record: RawRecord = [
            ("sequence", FieldValue::Null),
            ("Seq", FieldValue::from("ACGT")),
        ]
        .into_iter()
        .collect();
        assert_eq!(record.sequence_value(), Some(&FieldValue::Null));
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(FieldValue::from(json!("ACGT")), FieldValue::from("ACGT"));
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Null);
        assert_eq!(
            FieldValue::from(json!(12)),
            FieldValue::Other("12".to_string())
        );
        assert_eq!(
            FieldValue::from(json!(["AC", "GT"])),
            FieldValue::Other(r#"["AC","GT"]"#.to_string())
        );
    }

    #[test]
    fn test_raw_split() {
        let split = RawSplit::new("train", vec![RawRecord::from_sequence("ACGT")]);
        assert_eq!(split.name, "train");
        assert_eq!(split.len(), 1);
        assert!(!split.is_empty());
        assert!(RawSplit::default().is_empty());
    }
}
