//! HideSubGroup command

use std::time::Instant;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::group::with_hidden;
use crate::processor::logged;
use crate::types::ViewStateChange;
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hide a row
#[derive(Debug, Deserialize, Serialize)]
pub struct HideSubGroup {
    /// The sub-group key to hide
    pub key: String,
}

impl HideSubGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Operation for HideSubGroup {
    fn verb(&self) -> &'static str {
        "hide"
    }

    fn noun(&self) -> &'static str {
        "sub-group"
    }

    fn description(&self) -> &'static str {
        "Hide a row and the cards in it"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for HideSubGroup {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let hidden = with_hidden(&ctx.options().hidden_sub_groups, &self.key);
        let result =
            serde_json::to_value(ViewStateChange::HiddenSubGroups(hidden)).map_err(Into::into);
        logged(self, start, result)
    }
}
