//! Collaborator interfaces the engine consumes, plus an in-memory vault.
//!
//! The host owns storage, the metadata index and the "new note" flow. The
//! engine only sees these traits; optional capabilities are plain `Option`s
//! resolved once when [`BoardServices`](crate::BoardServices) is built.

use std::sync::Mutex;

use async_trait::async_trait;
use boardview_fields::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::types::{Record, RecordId};

/// Metadata write path.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Set one frontmatter key on a record. `Value::Null` clears it.
    async fn write_field(&self, record: &RecordId, storage_key: &str, value: Value) -> Result<()>;
}

/// Every value a property has across the whole vault.
pub trait ValueIndex: Send + Sync {
    fn all_values_of(&self, storage_key: &str) -> Vec<String>;
}

/// The host's "new note" entry point.
#[async_trait]
pub trait NewRecordEntry: Send + Sync {
    /// Start the creation flow; completes once the host has created the note.
    async fn request_new_record(&self) -> Result<()>;
}

/// A single metadata write the caller must issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteInstruction {
    pub record: RecordId,
    pub key: String,
    pub value: Value,
}

/// Vault held in memory: record id → frontmatter.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    notes: Mutex<IndexMap<RecordId, Map<String, Value>>>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note. Non-object frontmatter is stored as an empty mapping.
    pub fn with_note(self, id: impl Into<RecordId>, frontmatter: Value) -> Self {
        let frontmatter = match frontmatter {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Ok(mut notes) = self.notes.lock() {
            notes.insert(id.into(), frontmatter);
        }
        self
    }

    /// Current records, in insertion order.
    pub fn records(&self) -> Vec<Record> {
        match self.notes.lock() {
            Ok(notes) => notes
                .iter()
                .map(|(id, fm)| Record::from_frontmatter(id, fm))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn frontmatter(&self, id: &RecordId) -> Option<Map<String, Value>> {
        self.notes.lock().ok()?.get(id).cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryVault {
    async fn write_field(&self, record: &RecordId, storage_key: &str, value: Value) -> Result<()> {
        let mut notes = self
            .notes
            .lock()
            .map_err(|e| BoardError::write_failed(record.as_str(), storage_key, e.to_string()))?;
        let frontmatter = notes.get_mut(record).ok_or_else(|| {
            BoardError::write_failed(record.as_str(), storage_key, "note does not exist")
        })?;
        debug!(record = %record, key = storage_key, value = %value, "frontmatter write");
        frontmatter.insert(storage_key.to_string(), value);
        Ok(())
    }
}

impl ValueIndex for InMemoryVault {
    fn all_values_of(&self, storage_key: &str) -> Vec<String> {
        let Ok(notes) = self.notes.lock() else {
            return Vec::new();
        };
        let mut values = Vec::new();
        for frontmatter in notes.values() {
            match frontmatter.get(storage_key) {
                Some(Value::Array(items)) => values.extend(
                    items
                        .iter()
                        .map(|item| FieldValue::from_json(item.clone()).to_canonical_string()),
                ),
                Some(value) => {
                    values.push(FieldValue::from_json(value.clone()).to_canonical_string())
                }
                None => {}
            }
        }
        values
    }
}
