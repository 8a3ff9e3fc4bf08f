//! Runs operations and forwards their log entries.

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;

/// Executes operations and persists whatever they ask to have logged.
///
/// Implementors decide where entries go; `process` attaches the actor and
/// hands the entry over before returning the operation's own result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Actor attributed to every logged entry, if any.
    fn actor(&self) -> Option<&str>;

    /// Persist one log entry.
    async fn write_log(&self, ctx: &C, entry: LogEntry) -> Result<(), E>;

    async fn process(&self, operation: &dyn Execute<C, E>, ctx: &C) -> Result<Value, E> {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = self.actor() {
                entry = entry.with_actor(actor);
            }
            let logged = self.write_log(ctx, entry).await;
            if result.is_ok() {
                logged?;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionResult, Operation};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Sink {
        entries: Mutex<Vec<LogEntry>>,
    }

    struct Recorder;

    #[async_trait]
    impl OperationProcessor<Sink, String> for Recorder {
        fn actor(&self) -> Option<&str> {
            Some("tester")
        }

        async fn write_log(&self, ctx: &Sink, entry: LogEntry) -> Result<(), String> {
            ctx.entries.lock().map_err(|e| e.to_string())?.push(entry);
            Ok(())
        }
    }

    struct Hide(bool);

    impl Operation for Hide {
        fn verb(&self) -> &'static str {
            "hide"
        }
        fn noun(&self) -> &'static str {
            "group"
        }
        fn description(&self) -> &'static str {
            "Hide a column"
        }
    }

    #[async_trait]
    impl Execute<Sink, String> for Hide {
        async fn execute(&self, _ctx: &Sink) -> ExecutionResult<Value, String> {
            if self.0 {
                ExecutionResult::Logged {
                    value: json!(["Done"]),
                    log_entry: LogEntry::new(self.op_string(), json!({}), json!(["Done"]), None, 0),
                }
            } else {
                ExecutionResult::Unlogged { value: json!(null) }
            }
        }
    }

    #[tokio::test]
    async fn test_process_logs_with_actor() {
        let sink = Sink::default();
        let value = Recorder.process(&Hide(true), &sink).await.unwrap();
        assert_eq!(value, json!(["Done"]));

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "hide group");
        assert_eq!(entries[0].actor.as_deref(), Some("tester"));
    }

    #[tokio::test]
    async fn test_unlogged_leaves_sink_empty() {
        let sink = Sink::default();
        Recorder.process(&Hide(false), &sink).await.unwrap();
        assert!(sink.entries.lock().unwrap().is_empty());
    }
}
