//! Card commands

mod drop;

pub use drop::{plan_drop, DropCard};
