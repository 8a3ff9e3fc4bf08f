//! Records as handed over by the host's query engine.

use boardview_fields::{FieldId, FieldValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::RecordId;

/// A note in the current result set: its path plus the values of every
/// field the query exposes (`note.*`, `formula.*`, `file.*`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub values: IndexMap<FieldId, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        let id = id.into();
        let mut values = IndexMap::new();
        values.insert(FieldId::from("file.path"), FieldValue::text(id.as_str()));
        values.insert(FieldId::from("file.name"), FieldValue::text(id.basename()));
        Self { id, values }
    }

    /// Build a record from parsed frontmatter; every key becomes `note.<key>`.
    pub fn from_frontmatter(id: impl Into<RecordId>, frontmatter: &Map<String, Value>) -> Self {
        frontmatter
            .iter()
            .fold(Self::new(id), |record, (key, value)| {
                record.with_value(FieldId::note(key), FieldValue::from_json(value.clone()))
            })
    }

    pub fn with_value(mut self, field: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// The record's value for `field`, or `None` when the query has none.
    pub fn value(&self, field: &FieldId) -> Option<&FieldValue> {
        self.values.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_has_file_fields() {
        let record = Record::new("work/Task.md");
        assert_eq!(
            record.value(&FieldId::from("file.name")),
            Some(&FieldValue::text("Task"))
        );
        assert_eq!(
            record.value(&FieldId::from("file.path")),
            Some(&FieldValue::text("work/Task.md"))
        );
    }

    #[test]
    fn test_from_frontmatter() {
        let fm = json!({"status": "Doing", "tags": ["a", "b"], "due": null});
        let record = Record::from_frontmatter("a.md", fm.as_object().unwrap());

        assert_eq!(
            record.value(&FieldId::note("status")),
            Some(&FieldValue::text("Doing"))
        );
        assert!(record.value(&FieldId::note("tags")).unwrap().is_list());
        assert_eq!(record.value(&FieldId::note("due")), Some(&FieldValue::Empty));
        assert_eq!(record.value(&FieldId::note("missing")), None);
    }
}
