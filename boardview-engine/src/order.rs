//! Moving one lane past its neighbour.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::types::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Columns move left/right, rows move up/down.
    pub fn axis(&self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Group,
            Self::Up | Self::Down => Axis::SubGroup,
        }
    }

    fn is_backward(&self) -> bool {
        matches!(self, Self::Left | Self::Up)
    }

    /// Reject a direction that does not belong to `axis`.
    pub fn check_axis(&self, axis: Axis) -> Result<()> {
        if self.axis() == axis {
            Ok(())
        } else {
            Err(BoardError::invalid_value(
                "direction",
                format!("{self:?} does not move along {axis:?}"),
            ))
        }
    }
}

/// Swap `target` with its neighbour in `direction`. Moving past either end,
/// or moving a key that is not in `order`, returns `order` unchanged.
pub fn move_in_order(order: &[String], target: &str, direction: Direction) -> Vec<String> {
    let mut next = order.to_vec();
    let Some(index) = order.iter().position(|key| key == target) else {
        return next;
    };
    let neighbour = if direction.is_backward() {
        index.checked_sub(1)
    } else {
        Some(index + 1).filter(|&i| i < order.len())
    };
    if let Some(neighbour) = neighbour {
        next.swap(index, neighbour);
    }
    next
}
