//! HideGroup command

use std::time::Instant;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::processor::logged;
use crate::types::ViewStateChange;
use boardview_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `hidden` with `key` appended, unless it is already there.
pub(crate) fn with_hidden(hidden: &[String], key: &str) -> Vec<String> {
    let mut next = hidden.to_vec();
    if !next.iter().any(|k| k == key) {
        next.push(key.to_string());
    }
    next
}

/// Hide a column
#[derive(Debug, Deserialize, Serialize)]
pub struct HideGroup {
    /// The group key to hide
    pub key: String,
}

impl HideGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Operation for HideGroup {
    fn verb(&self) -> &'static str {
        "hide"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Hide a column and the cards in it"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for HideGroup {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let hidden = with_hidden(&ctx.options().hidden_groups, &self.key);
        let result = serde_json::to_value(ViewStateChange::HiddenGroups(hidden)).map_err(Into::into);
        logged(self, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BoardOptions;
    use crate::store::InMemoryVault;
    use crate::BoardServices;
    use boardview_fields::StaticTypeRegistry;
    use std::sync::Arc;

    fn context(hidden: &[&str]) -> BoardContext {
        let ctx = BoardContext::new(BoardServices::new(
            Arc::new(InMemoryVault::new()),
            Arc::new(StaticTypeRegistry::new()),
        ));
        ctx.set_options(BoardOptions {
            hidden_groups: hidden.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        ctx
    }

    #[tokio::test]
    async fn test_hide_appends_key() {
        let ctx = context(&["Archived"]);
        let value = HideGroup::new("Done").execute(&ctx).await.into_result().unwrap();
        let change: ViewStateChange = serde_json::from_value(value).unwrap();
        assert_eq!(
            change,
            ViewStateChange::HiddenGroups(vec!["Archived".into(), "Done".into()])
        );
    }

    #[tokio::test]
    async fn test_hide_twice_is_stable() {
        let ctx = context(&["Done"]);
        let value = HideGroup::new("Done").execute(&ctx).await.into_result().unwrap();
        assert_eq!(value["value"], serde_json::json!(["Done"]));
    }
}
