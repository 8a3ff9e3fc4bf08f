//! Named lane colours and their per-value assignments.
//!
//! Colours are stored by name in the plugin settings under composite keys
//! `"{fieldId}:{groupKey}"`. Each name maps to a light and a dark theme RGB
//! value; the renderer picks one.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use boardview_fields::FieldId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BoardError, Result};

/// The fixed palette offered in the colour menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    #[default]
    Grey,
    Purple,
    Brown,
    Blue,
    Green,
    Yellow,
    Red,
}

impl ColorName {
    pub const ALL: [ColorName; 7] = [
        Self::Grey,
        Self::Purple,
        Self::Brown,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grey => "grey",
            Self::Purple => "purple",
            Self::Brown => "brown",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Menu label, e.g. `"Blue"`. This is also the form stored in settings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Grey => "Grey",
            Self::Purple => "Purple",
            Self::Brown => "Brown",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }

    pub fn light(&self) -> &'static str {
        match self {
            Self::Grey => "rgb(151, 151, 151)",
            Self::Purple => "rgb(138, 92, 245)",
            Self::Brown => "rgb(139, 69, 19)",
            Self::Blue => "rgb(0, 128, 213)",
            Self::Green => "rgb(33, 148, 94)",
            Self::Yellow => "rgb(200, 180, 80)",
            Self::Red => "rgb(214, 74, 64)",
        }
    }

    pub fn dark(&self) -> &'static str {
        match self {
            Self::Grey => "rgb(99, 98, 93)",
            Self::Purple => "rgb(107, 78, 129)",
            Self::Brown => "rgba(122, 78, 44, 1)",
            Self::Blue => "rgb(52, 97, 145)",
            Self::Green => "rgb(55, 107, 78)",
            Self::Yellow => "rgba(158, 122, 43, 1)",
            Self::Red => "rgb(150, 74, 69)",
        }
    }
}

impl FromStr for ColorName {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::invalid_value("color", format!("unknown color '{s}'")))
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How strongly cards pick up their cell colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColorMode {
    None,
    /// Left border only.
    Minimal,
}

/// Persisted `"{fieldId}:{groupKey}" → colour name` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorAssignments(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PluginSettings {
    #[serde(default)]
    column_colors: ColorAssignments,
}

impl ColorAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `columnColors` table out of the plugin's settings document.
    pub fn from_settings_json(json: &str) -> Result<Self> {
        let settings: PluginSettings = serde_json::from_str(json)?;
        Ok(settings.column_colors)
    }

    pub fn key(field: &FieldId, group: &str) -> String {
        format!("{field}:{group}")
    }

    /// Colour assigned to one value of `field`. Unknown stored names are
    /// reported and ignored.
    pub fn get(&self, field: &FieldId, group: &str) -> Option<ColorName> {
        let stored = self.0.get(&Self::key(field, group))?;
        match stored.parse() {
            Ok(color) => Some(color),
            Err(_) => {
                warn!(color = %stored, field = %field, group, "unknown color in settings");
                None
            }
        }
    }

    pub fn set(&mut self, field: &FieldId, group: &str, color: ColorName) {
        self.0
            .insert(Self::key(field, group), color.title().to_string());
    }

    /// Store a raw entry, e.g. from a `ColumnColor` change.
    pub fn insert_raw(&mut self, key: impl Into<String>, color: impl Into<String>) {
        self.0.insert(key.into(), color.into());
    }

    /// All assignments for one field, keyed by group key.
    pub fn for_field<'a>(
        &'a self,
        field: &FieldId,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let prefix = format!("{field}:");
        self.0.iter().filter_map(move |(key, color)| {
            key.strip_prefix(prefix.as_str())
                .map(|group| (group, color.as_str()))
        })
    }

    /// Split a composite key into field and group key.
    ///
    /// Field identifiers and group values may both contain `:`, so the split
    /// point is taken from the longest known field identifier that prefixes
    /// the key rather than from the first colon.
    pub fn parse_key<'k>(key: &'k str, known_fields: &[FieldId]) -> Option<(FieldId, &'k str)> {
        known_fields
            .iter()
            .filter_map(|field| {
                key.strip_prefix(field.as_str())
                    .and_then(|rest| rest.strip_prefix(':'))
                    .map(|group| (field, group))
            })
            .max_by_key(|(field, _)| field.as_str().len())
            .map(|(field, group)| (field.clone(), group))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
