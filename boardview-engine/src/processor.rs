//! Board operation processor
//!
//! Runs board operations and keeps their log entries in the context's
//! activity log. Read-only operations (building the board) leave no entry.

use std::time::Instant;

use async_trait::async_trait;
use boardview_operations::{ExecutionResult, LogEntry, Operation, OperationProcessor};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::BoardContext;
use crate::error::{BoardError, Result};

/// Processor for board operations
#[derive(Debug, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every logged entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<BoardContext, BoardError> for BoardOperationProcessor {
    fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    async fn write_log(&self, ctx: &BoardContext, entry: LogEntry) -> Result<()> {
        debug!(op = %entry.op, id = %entry.id, duration_ms = entry.duration_ms, "activity");
        ctx.append_activity(entry);
        Ok(())
    }
}

/// Wrap the outcome of a state-changing operation with its log entry.
pub(crate) fn logged<O>(operation: &O, start: Instant, result: Result<Value>) -> ExecutionResult<Value, BoardError>
where
    O: Operation + Serialize,
{
    let input = serde_json::to_value(operation).unwrap_or_default();
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::new(operation.op_string(), input, value.clone(), None, duration_ms),
            value,
        },
        Err(error) => {
            if error.is_user_visible() {
                debug!(op = %operation.op_string(), %error, "operation rejected");
            } else {
                warn!(op = %operation.op_string(), %error, "operation failed");
            }
            ExecutionResult::Failed {
                log_entry: Some(LogEntry::failure(
                    operation.op_string(),
                    input,
                    &error,
                    duration_ms,
                )),
                error,
            }
        }
    }
}
