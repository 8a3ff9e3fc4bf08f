//! Creating a record straight into a cell.
//!
//! The host owns the "new note" flow. We remember which cell the user asked
//! from, trigger the flow, and once the new note is the active record, write
//! the cell's values onto it. Pending values are used at most once.

use boardview_fields::FieldId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BoardError, Result};
use crate::store::{NewRecordEntry, RecordStore, WriteInstruction};
use crate::types::{BoardViewData, RecordId, EMPTY_GROUP};

/// Values to assign to the next created record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRecord {
    pub group_field: Option<FieldId>,
    pub group_value: Option<Value>,
    pub sub_group_field: Option<FieldId>,
    pub sub_group_value: Option<Value>,
}

impl PendingRecord {
    /// Values of the cell at `(column, row)` on `board`.
    pub fn for_cell(board: &BoardViewData, column: &str, row: Option<&str>) -> Self {
        Self {
            group_field: board.group_field.clone(),
            group_value: board.column(column).and_then(|c| c.raw_value.clone()),
            sub_group_field: board.sub_group_field.clone(),
            sub_group_value: row
                .and_then(|row| board.row(row))
                .and_then(|r| r.raw_value.clone()),
        }
    }

    /// Writes for `record`, skipping unset, empty-group and computed fields.
    pub fn writes(&self, record: &RecordId) -> Vec<WriteInstruction> {
        [
            (&self.group_field, &self.group_value),
            (&self.sub_group_field, &self.sub_group_value),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let field = field.as_ref()?;
            let value = value.as_ref()?;
            if value.is_null() || value.as_str() == Some(EMPTY_GROUP) {
                return None;
            }
            if field.is_computed() {
                debug!(field = %field, "computed field not assigned to new record");
                return None;
            }
            Some(WriteInstruction {
                record: record.clone(),
                key: field.storage_key().to_string(),
                value: value.clone(),
            })
        })
        .collect()
    }
}

/// What applying pending values did. Each write is attempted on its own.
#[derive(Debug, Default)]
pub struct PendingOutcome {
    pub written: Vec<WriteInstruction>,
    pub failed: Vec<(WriteInstruction, BoardError)>,
}

/// Holds at most one pending creation.
#[derive(Debug, Default)]
pub struct RecordCreator {
    pending: Option<PendingRecord>,
}

impl RecordCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingRecord> {
        self.pending.as_ref()
    }

    /// Remember `pending` and start the host's creation flow.
    ///
    /// Returns `false` when the host has no entry point; the values are then
    /// discarded rather than kept for a later attempt.
    pub async fn request(
        &mut self,
        pending: PendingRecord,
        entry: Option<&dyn NewRecordEntry>,
    ) -> Result<bool> {
        let Some(entry) = entry else {
            warn!("new record entry point not available; discarding pending values");
            self.pending = None;
            return Ok(false);
        };

        self.pending = Some(pending);
        if let Err(error) = entry.request_new_record().await {
            self.pending = None;
            return Err(error);
        }
        Ok(true)
    }

    /// Apply pending values to the newly active record. The pending state is
    /// cleared whether or not anything could be written, and a failed write
    /// does not stop the next one.
    pub async fn process_pending(
        &mut self,
        store: &dyn RecordStore,
        active: Option<&RecordId>,
    ) -> PendingOutcome {
        let mut outcome = PendingOutcome::default();
        let Some(pending) = self.pending.take() else {
            return outcome;
        };
        let Some(record) = active else {
            warn!("no active record after creation; pending values dropped");
            return outcome;
        };

        for write in pending.writes(record) {
            match store
                .write_field(&write.record, &write.key, write.value.clone())
                .await
            {
                Ok(()) => outcome.written.push(write),
                Err(error) => {
                    warn!(record = %write.record, key = %write.key, %error, "pending value not written");
                    outcome.failed.push((write, error));
                }
            }
        }
        debug!(
            record = %record,
            written = outcome.written.len(),
            failed = outcome.failed.len(),
            "pending values assigned"
        );
        outcome
    }
}
