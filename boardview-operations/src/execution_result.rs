//! What running a board operation produced, and whether it goes in the
//! activity log.

use crate::LogEntry;

/// Outcome of one operation.
///
/// Drops, moves, hides and colour changes come back `Logged`. Building the
/// board, and drops into the card's own cell, come back `Unlogged`. A
/// rejected or failed operation is `Failed` and carries its entry when the
/// attempt itself is worth recording.
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Drop the log entry and keep the outcome.
    pub fn into_result(self) -> Result<T, E> {
        self.split().0
    }

    /// The outcome and the entry destined for the activity log.
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    pub fn should_log(&self) -> bool {
        match self {
            Self::Logged { .. } => true,
            Self::Unlogged { .. } => false,
            Self::Failed { log_entry, .. } => log_entry.is_some(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
