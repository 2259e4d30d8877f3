//! The flat patient record.
//!
//! Every disease's fields coexist in one mapping; which subset is rendered depends on the
//! current [`ClinicalCategory`](crate::ClinicalCategory). Values for fields that are not
//! rendered are kept untouched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::derived::parse_date;
use crate::error::{RecordError, RecordResult};
use crate::mutation::MutationEntry;

/// A single field value as exchanged with the records API.
///
/// Serialized untagged, so a record maps 1:1 onto the API's JSON object. Values of any other
/// JSON shape are carried through as [`FieldValue::Json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Mutations(Vec<MutationEntry>),
    Json(serde_json::Value),
}

impl FieldValue {
    /// `true` for `Null` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Non-empty text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Calendar date from `YYYY-MM-DD` text or an ISO 8601 date-time.
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_text().and_then(parse_date)
    }

    pub fn as_mutations(&self) -> Option<&[MutationEntry]> {
        match self {
            FieldValue::Mutations(entries) => Some(entries),
            _ => None,
        }
    }

    /// Plain rendering for read-only display.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(true) => "Yes".to_string(),
            FieldValue::Bool(false) => "No".to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Mutations(entries) => entries
                .iter()
                .map(MutationEntry::summary)
                .collect::<Vec<_>>()
                .join("; "),
            FieldValue::Json(value) => value.to_string(),
        }
    }
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

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<MutationEntry>> for FieldValue {
    fn from(value: Vec<MutationEntry>) -> Self {
        FieldValue::Mutations(value)
    }
}

/// Flat mapping from field name to value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord(BTreeMap<String, FieldValue>);

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> RecordResult<Self> {
        serde_json::from_str(json).map_err(RecordError::Deserialization)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Non-empty text stored under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Explicitly clears a field. The key stays present with a `Null` value so the clear is
    /// sent to the API.
    pub fn clear(&mut self, key: &str) {
        self.0.insert(key.to_string(), FieldValue::Null);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn mutations(&self, key: &str) -> &[MutationEntry] {
        self.get(key)
            .and_then(FieldValue::as_mutations)
            .unwrap_or(&[])
    }

    /// Mutable access to the mutation list under `key`. A missing, `Null` or empty value
    /// becomes an empty list; any other stored value is left alone and reported.
    pub fn mutations_mut(&mut self, key: &str) -> RecordResult<&mut Vec<MutationEntry>> {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| FieldValue::Mutations(Vec::new()));
        let replaceable = match &*slot {
            FieldValue::Json(serde_json::Value::Array(items)) => items.is_empty(),
            other => other.is_empty(),
        };
        if replaceable {
            *slot = FieldValue::Mutations(Vec::new());
        }
        if let FieldValue::Mutations(entries) = slot {
            return Ok(entries);
        }
        Err(RecordError::InvalidInput(format!(
            "{key} does not hold a mutation list"
        )))
    }

    /// Sparse partial-update payload: fields whose value differs from `original`, plus
    /// `Null` for fields present in `original` but gone here.
    pub fn changes_since(&self, original: &PatientRecord) -> PatientRecord {
        let mut changes = PatientRecord::new();
        for (key, value) in &self.0 {
            if original.get(key) != Some(value) {
                changes.0.insert(key.clone(), value.clone());
            }
        }
        for key in original.0.keys() {
            if !self.0.contains_key(key) {
                changes.0.insert(key.clone(), FieldValue::Null);
            }
        }
        changes
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for PatientRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_mixed_value_shapes() {
        let record = PatientRecord::from_json_str(
            r#"{
                "disease": "Multiple Myeloma",
                "able_to_consent": true,
                "relapse_count": 1,
                "serum_m_protein": 2.4,
                "prior_radiation": null,
                "genetic_mutations": [{"gene": "BRCA1", "mutation": "", "origin": "Germline", "interpretation": ""}],
                "extra": {"nested": [1, 2]}
            }"#,
        )
        .expect("should parse");

        assert_eq!(record.text("disease"), Some("Multiple Myeloma"));
        assert_eq!(record.get("able_to_consent"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("relapse_count"), Some(&FieldValue::Integer(1)));
        assert_eq!(record.get("serum_m_protein"), Some(&FieldValue::Number(2.4)));
        assert_eq!(record.get("prior_radiation"), Some(&FieldValue::Null));
        assert_eq!(record.mutations("genetic_mutations")[0].gene, "BRCA1");
        assert!(matches!(record.get("extra"), Some(FieldValue::Json(_))));
    }

    #[test]
    fn test_serializes_back_to_flat_json() {
        let record: PatientRecord = [("stage", FieldValue::from("Stage II")), ("bmi", FieldValue::from(22.5))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json, serde_json::json!({"stage": "Stage II", "bmi": 22.5}));
    }

    #[test]
    fn test_changes_since_is_sparse() {
        let original: PatientRecord = [
            ("disease", FieldValue::from("Breast Cancer")),
            ("stage", FieldValue::from("Stage I")),
            ("city", FieldValue::from("Austin")),
        ]
        .into_iter()
        .collect();
        let mut edited = original.clone();
        edited.set("stage", "Stage II");
        edited.set("tumor_size", 2.1);
        edited.0.remove("city");

        let changes = edited.changes_since(&original);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes.text("stage"), Some("Stage II"));
        assert_eq!(changes.get("tumor_size"), Some(&FieldValue::Number(2.1)));
        assert_eq!(changes.get("city"), Some(&FieldValue::Null));
        assert!(!changes.contains_key("disease"));
    }

    #[test]
    fn test_as_date_accepts_date_and_datetime() {
        let expected = NaiveDate::from_ymd_opt(1980, 2, 29);
        assert_eq!(FieldValue::from("1980-02-29").as_date(), expected);
        assert_eq!(FieldValue::from("1980-02-29T00:00:00Z").as_date(), expected);
        assert_eq!(FieldValue::from("29/02/1980").as_date(), None);
        assert_eq!(FieldValue::Null.as_date(), None);
    }

    #[test]
    fn test_mutations_mut_keeps_foreign_values() {
        let mut record = PatientRecord::new();
        record.set("genetic_mutations", "BRCA1 positive");
        assert!(matches!(
            record.mutations_mut("genetic_mutations"),
            Err(RecordError::InvalidInput(_))
        ));
        assert_eq!(record.text("genetic_mutations"), Some("BRCA1 positive"));

        record.clear("genetic_mutations");
        record
            .mutations_mut("genetic_mutations")
            .expect("null becomes a list")
            .push(MutationEntry::new("BRCA1"));
        assert_eq!(record.mutations("genetic_mutations").len(), 1);
    }

    #[test]
    fn test_only_gene_keyed_lists_read_as_mutations() {
        let record = PatientRecord::from_json_str(
            r#"{
                "genetic_mutations": [{"gene": "brca2", "variant": "c.185delAG", "test_date": null}],
                "prior_procedures": [{"name": "Lumpectomy", "date": "2023-04-01"}]
            }"#,
        )
        .expect("should parse");

        assert_eq!(record.mutations("genetic_mutations")[0].gene, "brca2");
        assert!(matches!(record.get("prior_procedures"), Some(FieldValue::Json(_))));
        assert!(record.mutations("prior_procedures").is_empty());

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json["prior_procedures"],
            serde_json::json!([{"name": "Lumpectomy", "date": "2023-04-01"}])
        );
        assert_eq!(json["genetic_mutations"][0]["variant"], "c.185delAG");
        assert_eq!(json["genetic_mutations"][0]["test_date"], serde_json::Value::Null);
    }

    #[test]
    fn test_display_renders_booleans_as_yes_no() {
        assert_eq!(FieldValue::Bool(true).display(), "Yes");
        assert_eq!(FieldValue::Bool(false).display(), "No");
        assert_eq!(FieldValue::Null.display(), "");
    }
}
