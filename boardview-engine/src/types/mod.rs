//! Core types for the board engine

mod board;
mod ids;
mod record;
mod state;

pub use board::{
    Axis, BoardColumn, BoardItem, BoardLane, BoardRow, BoardViewData, Cells, Layout,
    DEFAULT_SUB_GROUP, EMPTY_GROUP,
};
pub use ids::RecordId;
pub use record::Record;
pub use state::ViewStateChange;
