//! DropCard command

use std::time::Instant;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::store::WriteInstruction;
use crate::types::{BoardLane, RecordId};
use boardview_fields::FieldId;
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Turn a drop into metadata writes.
///
/// A drop targeting a computed field is rejected as a whole. Otherwise each
/// defined value becomes one write, keyed by the field's storage key.
pub fn plan_drop(
    record: &RecordId,
    group_field: Option<&FieldId>,
    group_value: Option<Value>,
    sub_group_field: Option<&FieldId>,
    sub_group_value: Option<Value>,
) -> Result<Vec<WriteInstruction>> {
    for field in [group_field, sub_group_field].into_iter().flatten() {
        if field.is_computed() {
            return Err(BoardError::computed_drop(field.as_str()));
        }
    }

    let writes = [(group_field, group_value), (sub_group_field, sub_group_value)]
        .into_iter()
        .filter_map(|(field, value)| {
            Some(WriteInstruction {
                record: record.clone(),
                key: field?.storage_key().to_string(),
                value: value?,
            })
        })
        .collect();
    Ok(writes)
}

/// The value to write for a destination lane: the lane's stored value, `null`
/// for the empty group, or the lane id when the lane is not on the board.
fn lane_value(lane: Option<&BoardLane>, id: &str) -> Value {
    match lane {
        Some(lane) => lane.raw_value.clone().unwrap_or(Value::Null),
        None => Value::String(id.to_string()),
    }
}

/// Move a card to another cell by rewriting its grouping fields
#[derive(Debug, Deserialize, Serialize)]
pub struct DropCard {
    /// The record being dropped
    pub record: RecordId,
    /// Destination column id
    pub to_group: String,
    /// Destination row id, if the board has rows
    pub to_sub_group: Option<String>,
}

impl DropCard {
    pub fn new(record: impl Into<RecordId>, to_group: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            to_group: to_group.into(),
            to_sub_group: None,
        }
    }

    pub fn with_sub_group(mut self, to_sub_group: impl Into<String>) -> Self {
        self.to_sub_group = Some(to_sub_group.into());
        self
    }
}

impl Operation for DropCard {
    fn verb(&self) -> &'static str {
        "drop"
    }

    fn noun(&self) -> &'static str {
        "card"
    }

    fn description(&self) -> &'static str {
        "Move a card to another column or row by updating its properties"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DropCard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let board = ctx.build_board();

        let Some(item) = board.find_item(&self.record) else {
            return logged(
                self,
                start,
                Err(BoardError::RecordNotFound {
                    id: self.record.to_string(),
                }),
            );
        };

        let same_group = item.group_id == self.to_group;
        let same_sub_group = self.to_sub_group.is_none()
            || item.sub_group_id.as_deref() == self.to_sub_group.as_deref();
        if same_group && same_sub_group {
            debug!(record = %self.record, "dropped into its own cell");
            return ExecutionResult::Unlogged {
                value: json!({ "record": self.record, "writes": [] }),
            };
        }

        let group_value = board
            .group_field
            .as_ref()
            .map(|_| lane_value(board.column(&self.to_group), &self.to_group));
        let sub_group_value = match (&board.sub_group_field, &self.to_sub_group) {
            (Some(_), Some(row)) => Some(lane_value(board.row(row), row)),
            _ => None,
        };

        let result: Result<Value> = async {
            let writes = plan_drop(
                &self.record,
                board.group_field.as_ref(),
                group_value,
                board.sub_group_field.as_ref(),
                sub_group_value,
            )?;

            let store = &ctx.services().store;
            let mut first_error = None;
            for write in &writes {
                if let Err(error) = store
                    .write_field(&write.record, &write.key, write.value.clone())
                    .await
                {
                    warn!(record = %write.record, key = %write.key, %error, "write failed");
                    first_error.get_or_insert(error);
                }
            }
            if let Some(error) = first_error {
                return Err(error);
            }

            Ok(json!({ "record": self.record, "writes": writes }))
        }
        .await;

        logged(self, start, result)
    }
}
