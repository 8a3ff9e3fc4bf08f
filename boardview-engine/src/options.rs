//! Board options extracted from a view's configuration.
//!
//! Options are layered with figment: built-in defaults first, then the
//! persisted view configuration (a view entry of a `.base` file). A key that
//! is absent or `null` falls back to its default; a key with a value wins,
//! even when it is `false`.

use std::path::Path;

use boardview_fields::FieldId;
use figment::{
    providers::Serialized,
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml_ng::{Mapping, Value as YamlValue};
use tracing::{debug, trace, warn};

use crate::colors::CardColorMode;
use crate::error::{BoardError, Result};
use crate::resolver::ValueResolver;
use crate::types::{Axis, ViewStateChange};

/// Field always shown first on a card.
pub const FILE_NAME_FIELD: &str = "file.name";

/// Scale applied to cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Grouping, ordering, visibility and display options for one board view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOptions {
    #[serde(
        rename = "groupProperty",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_field: Option<FieldId>,
    #[serde(
        rename = "subGroupProperty",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_group_field: Option<FieldId>,
    #[serde(
        rename = "imageProperty",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_field: Option<FieldId>,
    #[serde(
        rename = "iconProperty",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_field: Option<FieldId>,
    pub group_order: Vec<String>,
    pub sub_group_order: Vec<String>,
    pub hidden_groups: Vec<String>,
    pub hidden_sub_groups: Vec<String>,
    pub hide_empty_groups: bool,
    pub hide_empty_sub_groups: bool,
    pub card_size: CardSize,
    pub open_in_side_view: bool,
    pub hide_image_placeholder: bool,
    pub color_headers: bool,
    pub color_cells: bool,
    pub color_cards: bool,
    /// Properties shown on cards, in display order.
    #[serde(rename = "order")]
    pub card_properties: Vec<String>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            group_field: None,
            sub_group_field: None,
            image_field: None,
            icon_field: None,
            group_order: Vec::new(),
            sub_group_order: Vec::new(),
            hidden_groups: Vec::new(),
            hidden_sub_groups: Vec::new(),
            hide_empty_groups: false,
            hide_empty_sub_groups: false,
            card_size: CardSize::Medium,
            open_in_side_view: true,
            hide_image_placeholder: false,
            color_headers: true,
            color_cells: false,
            color_cards: true,
            card_properties: Vec::new(),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<FieldId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(FieldId::from))
}

/// The view mapping as a figment provider, with `null` entries removed so
/// they keep their defaults.
fn view_provider(yaml: &str) -> Result<Serialized<Mapping>> {
    let mut mapping = match serde_yaml_ng::from_str::<YamlValue>(yaml)? {
        YamlValue::Mapping(mapping) => mapping,
        YamlValue::Null => Mapping::new(),
        _ => return Err(BoardError::invalid_value("view", "expected a mapping")),
    };
    mapping.retain(|key, value| {
        if value.is_null() {
            trace!(key = ?key, "null view option uses its default");
            false
        } else {
            true
        }
    });
    Ok(Serialized::defaults(mapping))
}

impl BoardOptions {
    /// Figment seeded with the defaults; merge view sources on top.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(BoardOptions::default()))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let options: BoardOptions = figment.extract()?;
        debug!(
            group = ?options.group_field,
            sub_group = ?options.sub_group_field,
            "board options extracted"
        );
        Ok(options)
    }

    /// Options from one view's YAML mapping.
    pub fn from_view_yaml(yaml: &str) -> Result<Self> {
        Self::from_figment(Self::figment().merge(view_provider(yaml)?))
    }

    /// Options from a YAML file holding one view's mapping.
    pub fn load_view_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading view options");
        Self::from_view_yaml(&yaml)
    }

    pub fn field(&self, axis: Axis) -> Option<&FieldId> {
        match axis {
            Axis::Group => self.group_field.as_ref(),
            Axis::SubGroup => self.sub_group_field.as_ref(),
        }
    }

    pub fn order(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Group => &self.group_order,
            Axis::SubGroup => &self.sub_group_order,
        }
    }

    pub fn hidden(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Group => &self.hidden_groups,
            Axis::SubGroup => &self.hidden_sub_groups,
        }
    }

    /// Clear grouping fields that can no longer be grouped on, returning the
    /// changes the host must persist.
    pub fn sanitize(&mut self, resolver: &ValueResolver<'_>) -> Vec<ViewStateChange> {
        let mut changes = Vec::new();
        if let Some(field) = &self.group_field {
            if !resolver.is_groupable(field) {
                warn!(field = %field, "group property is no longer eligible for grouping; clearing it");
                self.group_field = None;
                changes.push(ViewStateChange::ClearGroupProperty);
            }
        }
        if let Some(field) = &self.sub_group_field {
            if !resolver.is_groupable(field) {
                warn!(field = %field, "sub-group property is no longer eligible for grouping; clearing it");
                self.sub_group_field = None;
                changes.push(ViewStateChange::ClearSubGroupProperty);
            }
        }
        changes
    }

    /// Apply a persisted-state replacement to this snapshot.
    pub fn apply(&mut self, change: &ViewStateChange) {
        match change {
            ViewStateChange::GroupOrder(order) => self.group_order = order.clone(),
            ViewStateChange::SubGroupOrder(order) => self.sub_group_order = order.clone(),
            ViewStateChange::HiddenGroups(hidden) => self.hidden_groups = hidden.clone(),
            ViewStateChange::HiddenSubGroups(hidden) => self.hidden_sub_groups = hidden.clone(),
            ViewStateChange::ClearGroupProperty => self.group_field = None,
            ViewStateChange::ClearSubGroupProperty => self.sub_group_field = None,
            ViewStateChange::ColumnColor { .. } => {}
        }
    }

    /// Fields shown on each card: `file.name` first, then the configured
    /// order without repeats.
    pub fn card_fields(&self) -> Vec<FieldId> {
        let mut fields = vec![FieldId::from(FILE_NAME_FIELD)];
        for property in &self.card_properties {
            let field = FieldId::from(property.as_str());
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn card_color_mode(&self) -> CardColorMode {
        if self.color_cards {
            CardColorMode::Minimal
        } else {
            CardColorMode::None
        }
    }
}
