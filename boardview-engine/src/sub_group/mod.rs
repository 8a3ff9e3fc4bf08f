//! Row commands

mod hide;
mod mv;

pub use hide::HideSubGroup;
pub use mv::MoveSubGroup;
