//! SetGroupColor command

use std::time::Instant;

use crate::colors::{ColorAssignments, ColorName};
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::processor::logged;
use crate::types::{Axis, ViewStateChange};
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Assign a palette colour to one value of the group or sub-group field
#[derive(Debug, Deserialize, Serialize)]
pub struct SetGroupColor {
    /// Which field the lane belongs to
    pub axis: Axis,
    /// The lane's group key
    pub key: String,
    pub color: ColorName,
}

impl SetGroupColor {
    pub fn new(axis: Axis, key: impl Into<String>, color: ColorName) -> Self {
        Self {
            axis,
            key: key.into(),
            color,
        }
    }
}

impl Operation for SetGroupColor {
    fn verb(&self) -> &'static str {
        "color"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Set the colour of a column or row"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for SetGroupColor {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let options = ctx.options();
        let Some(field) = options.field(self.axis) else {
            debug!(axis = ?self.axis, "no field configured; colour not stored");
            return ExecutionResult::Unlogged { value: Value::Null };
        };

        let change = ViewStateChange::ColumnColor {
            key: ColorAssignments::key(field, &self.key),
            color: self.color.title().to_string(),
        };
        logged(self, start, serde_json::to_value(change).map_err(Into::into))
    }
}
