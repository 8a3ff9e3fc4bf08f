//! Column commands

mod color;
mod hide;
mod mv;

pub use color::SetGroupColor;
pub use hide::HideGroup;
pub(crate) use hide::with_hidden;
pub use mv::MoveGroup;
