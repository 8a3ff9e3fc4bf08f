//! # Boardview Operations
//!
//! Board mutations are modelled as operation structs: the fields of the struct
//! ARE the parameters. Each operation names itself with a verb/noun pair and
//! executes against a context, returning an [`ExecutionResult`] that says
//! whether the outcome belongs in the activity log.
//!
//! ## Example
//!
//! ```ignore
//! use boardview_operations::*;
//!
//! #[derive(Debug, Serialize)]
//! pub struct HideGroup {
//!     /// The group key to hide
//!     pub key: String,
//! }
//!
//! impl Operation for HideGroup {
//!     fn verb(&self) -> &'static str { "hide" }
//!     fn noun(&self) -> &'static str { "group" }
//!     fn description(&self) -> &'static str { "Hide a column" }
//! }
//!
//! #[async_trait]
//! impl Execute<BoardContext, BoardError> for HideGroup {
//!     async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
