//! Replacement values for externally persisted view state.

use serde::{Deserialize, Serialize};

/// A whole-value replacement for one piece of persisted view state.
///
/// Operations never edit persisted lists in place; they compute the new list
/// and hand it back for the host to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum ViewStateChange {
    GroupOrder(Vec<String>),
    SubGroupOrder(Vec<String>),
    HiddenGroups(Vec<String>),
    HiddenSubGroups(Vec<String>),
    /// The group field is no longer eligible and must be unset.
    ClearGroupProperty,
    /// The sub-group field is no longer eligible and must be unset.
    ClearSubGroupProperty,
    /// Colour for the composite `"{fieldId}:{groupKey}"` key.
    ColumnColor { key: String, color: String },
}

impl ViewStateChange {
    /// Name of the persisted configuration key this change replaces.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::GroupOrder(_) => "groupOrder",
            Self::SubGroupOrder(_) => "subGroupOrder",
            Self::HiddenGroups(_) => "hiddenGroups",
            Self::HiddenSubGroups(_) => "hiddenSubGroups",
            Self::ClearGroupProperty => "groupProperty",
            Self::ClearSubGroupProperty => "subGroupProperty",
            Self::ColumnColor { .. } => "columnColors",
        }
    }
}
