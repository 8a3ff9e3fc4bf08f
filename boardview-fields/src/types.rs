//! Field identifiers and native field types.
//!
//! A field identifier is namespaced: `note.status` is a frontmatter key,
//! `formula.overdue` is computed by the host's query engine and `file.name`
//! is derived from the file itself. Only the `note` namespace is stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldsError, Result};

/// Where a field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldNamespace {
    /// Frontmatter property, writable.
    Note,
    /// Derived by a formula, read-only.
    Formula,
    /// Derived from the file (name, folder, mtime), read-only.
    File,
}

impl FieldNamespace {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "note" => Some(Self::Note),
            "formula" => Some(Self::Formula),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// A namespaced field identifier such as `note.status`.
///
/// Identifiers without a known namespace prefix are frontmatter keys and are
/// stored as `note.<key>`, so `status` and `note.status` are the same field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldId(String);

impl FieldId {
    /// Parse a field identifier; only the empty string is rejected.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(FieldsError::EmptyFieldId);
        }
        Ok(Self::from(id))
    }

    fn normalize(id: String) -> String {
        let known = id
            .split_once('.')
            .is_some_and(|(prefix, _)| FieldNamespace::from_prefix(prefix).is_some());
        if known || id.is_empty() {
            id
        } else {
            format!("note.{id}")
        }
    }

    /// Build a `note.<key>` identifier.
    pub fn note(key: &str) -> Self {
        Self(format!("note.{key}"))
    }

    /// Build a `formula.<name>` identifier.
    pub fn formula(name: &str) -> Self {
        Self(format!("formula.{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace named by the prefix.
    pub fn namespace(&self) -> FieldNamespace {
        self.0
            .split_once('.')
            .and_then(|(prefix, _)| FieldNamespace::from_prefix(prefix))
            .unwrap_or(FieldNamespace::Note)
    }

    /// The frontmatter key: everything after the namespace prefix.
    pub fn storage_key(&self) -> &str {
        self.0.split_once('.').map_or(&self.0, |(_, rest)| rest)
    }

    /// True when the value is derived rather than stored.
    pub fn is_computed(&self) -> bool {
        self.namespace() != FieldNamespace::Note
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(Self::normalize(s))
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The widget type a host assigns to a property (`types.json`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NativeType {
    Text,
    Multitext,
    Number,
    Checkbox,
    Date,
    Datetime,
    Tags,
    Aliases,
    Other(String),
}

impl NativeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Multitext => "multitext",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Tags => "tags",
            Self::Aliases => "aliases",
            Self::Other(name) => name,
        }
    }

    /// Multi-valued types whose raw data is a list.
    pub fn is_list_like(&self) -> bool {
        matches!(self, Self::Multitext | Self::Tags | Self::Aliases)
    }
}

impl From<&str> for NativeType {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "multitext" => Self::Multitext,
            "number" => Self::Number,
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "tags" => Self::Tags,
            "aliases" => Self::Aliases,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for NativeType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<NativeType> for String {
    fn from(t: NativeType) -> Self {
        t.as_str().to_string()
    }
}
