//! Board view engine
//!
//! Groups a flat list of records into columns ("groups") and rows
//! ("sub-groups") by the values of two configurable fields, and turns user
//! actions on the board back into metadata writes and persisted view state.
//!
//! ## Overview
//!
//! - **Stateless builds** - every render re-derives the board from the
//!   current records and persisted options; nothing is cached between builds
//! - **Writes go to the host** - a card drop becomes frontmatter writes
//!   through [`RecordStore`]; the next build picks them up
//! - **Whole-list replacements** - moving or hiding a lane returns a
//!   [`ViewStateChange`] carrying the complete new list for the host to store
//! - **Logged operations** - mutations run through
//!   [`BoardOperationProcessor`] and land in the context's activity log
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use boardview_engine::{
//!     BoardContext, BoardOptions, BoardServices, BoardView, Direction, InMemoryVault,
//!     StaticTypeRegistry,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vault = Arc::new(InMemoryVault::new());
//! let services = BoardServices::new(vault.clone(), Arc::new(StaticTypeRegistry::new()))
//!     .with_index(vault.clone());
//! let ctx = BoardContext::new(services);
//! ctx.set_options(BoardOptions::from_view_yaml("groupProperty: note.status")?);
//! ctx.set_records(vault.records());
//!
//! let mut view = BoardView::new(ctx);
//! let _board = view.render();
//! view.drop_card("Inbox/Task.md", "Done", None).await?;
//! let _change = view.move_group("Done", Direction::Left).await?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod builder;
pub mod card;
pub mod colors;
pub mod context;
pub mod creator;
pub mod drag;
pub mod error;
pub mod group;
pub mod logging;
pub mod options;
pub mod order;
pub mod processor;
pub mod resolver;
pub mod store;
pub mod sub_group;
pub mod types;
pub mod view;

pub use builder::{order_keys, BoardDataBuilder};
pub use colors::{CardColorMode, ColorAssignments, ColorName};
pub use context::{BoardContext, BoardServices};
pub use creator::{PendingOutcome, PendingRecord, RecordCreator};
pub use drag::{DragEvent, DragState, DragTracker, RenderDirective};
pub use error::{BoardError, Result};
pub use logging::Pretty;
pub use options::{BoardOptions, CardSize};
pub use order::{move_in_order, Direction};
pub use processor::BoardOperationProcessor;
pub use resolver::{ResolvedKey, ValueResolver};
pub use store::{InMemoryVault, NewRecordEntry, RecordStore, ValueIndex, WriteInstruction};
pub use types::{
    Axis, BoardColumn, BoardItem, BoardLane, BoardRow, BoardViewData, Cells, Layout, Record,
    RecordId, ViewStateChange, DEFAULT_SUB_GROUP, EMPTY_GROUP,
};
pub use view::BoardView;

// Re-export the pieces hosts need from the sibling crates
pub use boardview_fields::{FieldId, FieldTypeRegistry, FieldValue, NativeType, StaticTypeRegistry};
pub use boardview_operations::{Execute, ExecutionResult, LogEntry, Operation, OperationProcessor};
