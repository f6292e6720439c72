//! Record types
//!
//! A record is `(id, name, value)`. The id is assigned by the store and never
//! changes; name and value are opaque strings.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// A stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub value: String,
}

impl Record {
    /// Create a record with an already assigned id
    pub fn new(id: i64, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Apply a patch in place, keeping fields the patch leaves unset
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
    }
}

/// Fields for a record that does not have an id yet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Check both fields are present and return them. Empty strings pass.
    ///
    /// Runs before any persistence so a rejected create leaves the store untouched.
    pub fn validate(&self) -> StoreResult<(&str, &str)> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| StoreError::Validation("name".to_string()))?;
        let value = self
            .value
            .as_deref()
            .ok_or_else(|| StoreError::Validation("value".to_string()))?;
        Ok((name, value))
    }
}

/// Whole-field replacement for an existing record.
///
/// `None` keeps the stored field. `Some("")` sets it to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RecordPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization() {
        let record = Record::new(1, "a", "1");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "a", "value": "1"}));
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut record = Record::new(1, "a", "1");
        record.apply(&RecordPatch::value("9"));
        assert_eq!(record, Record::new(1, "a", "9"));

        record.apply(&RecordPatch::default());
        assert_eq!(record, Record::new(1, "a", "9"));
    }

    #[test]
    fn test_apply_explicit_empty_string() {
        let mut record = Record::new(1, "a", "1");
        record.apply(&RecordPatch::name(""));
        assert_eq!(record.name, "");
        assert_eq!(record.value, "1");
    }

    #[test]
    fn test_new_record_validation() {
        assert!(NewRecord::new("a", "1").validate().is_ok());
        assert_eq!(NewRecord::new("", "").validate(), Ok(("", "")));

        let missing: NewRecord = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert_eq!(
            missing.validate(),
            Err(StoreError::Validation("value".to_string()))
        );
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let patch: RecordPatch =
            serde_json::from_value(json!({"id": 42, "value": "9"})).unwrap();
        assert_eq!(patch, RecordPatch::value("9"));
        assert!(!patch.is_empty());
    }
}
