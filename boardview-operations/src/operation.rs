//! The `Operation` naming trait and the `Execute` trait.

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Names an operation. The op string (`"{verb} {noun}"`) is what lands in the
/// activity log.
pub trait Operation {
    fn verb(&self) -> &'static str;

    fn noun(&self) -> &'static str;

    /// Human readable one-liner, shown in menus and logs.
    fn description(&self) -> &'static str;

    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Operation for Probe {
        fn verb(&self) -> &'static str {
            "move"
        }

        fn noun(&self) -> &'static str {
            "group"
        }

        fn description(&self) -> &'static str {
            "Move a column"
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Probe.op_string(), "move group");
    }
}
