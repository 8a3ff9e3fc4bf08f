//! Board commands

mod build;

pub use build::BuildBoard;
