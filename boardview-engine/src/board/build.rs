//! BuildBoard command

use crate::context::BoardContext;
use crate::error::BoardError;
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Build the board from the current records and options
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BuildBoard;

impl Operation for BuildBoard {
    fn verb(&self) -> &'static str {
        "build"
    }

    fn noun(&self) -> &'static str {
        "board"
    }

    fn description(&self) -> &'static str {
        "Group the current records into columns and rows"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for BuildBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        match serde_json::to_value(ctx.build_board()) {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error: error.into(),
                log_entry: None,
            },
        }
    }
}
