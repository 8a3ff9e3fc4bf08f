//! MoveSubGroup command

use std::time::Instant;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::order::{move_in_order, Direction};
use crate::processor::logged;
use crate::types::{Axis, ViewStateChange};
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Move a row one place up or down
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveSubGroup {
    /// The sub-group key to move
    pub key: String,
    /// `up` or `down`
    pub direction: Direction,
}

impl MoveSubGroup {
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

impl Operation for MoveSubGroup {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "sub-group"
    }

    fn description(&self) -> &'static str {
        "Swap a row with the row above or below"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveSubGroup {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result: Result<Value> = (|| {
            self.direction.check_axis(Axis::SubGroup)?;
            let current = ctx.build_board().row_ids();
            let order = move_in_order(&current, &self.key, self.direction);
            Ok(serde_json::to_value(ViewStateChange::SubGroupOrder(order))?)
        })();
        logged(self, start, result)
    }
}
