//! MoveGroup command

use std::time::Instant;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::order::{move_in_order, Direction};
use crate::processor::logged;
use crate::types::{Axis, ViewStateChange};
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Move a column one place left or right
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveGroup {
    /// The group key to move
    pub key: String,
    /// `left` or `right`
    pub direction: Direction,
}

impl MoveGroup {
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

impl Operation for MoveGroup {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Swap a column with its left or right neighbour"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveGroup {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result: Result<Value> = (|| {
            self.direction.check_axis(Axis::Group)?;
            // The visible order must come from a fresh build, never a cached one.
            let current = ctx.build_board().column_ids();
            let order = move_in_order(&current, &self.key, self.direction);
            debug!(key = %self.key, ?order, "group order");
            Ok(serde_json::to_value(ViewStateChange::GroupOrder(order))?)
        })();
        logged(self, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BoardOptions;
    use crate::store::InMemoryVault;
    use crate::BoardServices;
    use boardview_fields::{FieldId, StaticTypeRegistry};
    use serde_json::json;
    use std::sync::Arc;

    fn context(options: BoardOptions) -> BoardContext {
        let vault = Arc::new(
            InMemoryVault::new()
                .with_note("a.md", json!({"status": "A"}))
                .with_note("b.md", json!({"status": "B"}))
                .with_note("c.md", json!({"status": "C"})),
        );
        let ctx = BoardContext::new(BoardServices::new(
            vault.clone(),
            Arc::new(StaticTypeRegistry::new()),
        ));
        ctx.set_records(vault.records());
        ctx.set_options(BoardOptions {
            group_field: Some(FieldId::note("status")),
            hide_empty_groups: true,
            ..options
        });
        ctx
    }

    async fn moved(ctx: &BoardContext, key: &str, direction: Direction) -> Value {
        MoveGroup::new(key, direction)
            .execute(ctx)
            .await
            .into_result()
            .unwrap()["value"]
            .clone()
    }

    #[tokio::test]
    async fn test_move_left() {
        let ctx = context(BoardOptions::default());
        assert_eq!(moved(&ctx, "B", Direction::Left).await, json!(["B", "A", "C"]));
    }

    #[tokio::test]
    async fn test_move_boundaries_are_noops() {
        let ctx = context(BoardOptions::default());
        assert_eq!(moved(&ctx, "A", Direction::Left).await, json!(["A", "B", "C"]));
        assert_eq!(moved(&ctx, "C", Direction::Right).await, json!(["A", "B", "C"]));
    }

    #[tokio::test]
    async fn test_move_uses_visible_order() {
        let ctx = context(BoardOptions {
            group_order: vec!["C".into()],
            hidden_groups: vec!["B".into()],
            ..Default::default()
        });
        assert_eq!(moved(&ctx, "A", Direction::Left).await, json!(["A", "C"]));
    }

    #[tokio::test]
    async fn test_vertical_direction_is_rejected() {
        let ctx = context(BoardOptions::default());
        let result = MoveGroup::new("A", Direction::Up).execute(&ctx).await;
        assert!(result.is_failed());
    }
}
