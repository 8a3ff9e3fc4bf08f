//! Field type registry.
//!
//! Hosts keep a property → widget type table (Obsidian stores it in
//! `.obsidian/types.json`). Lookups are best effort: an unknown property has
//! no type, and nothing here ever fails at lookup time.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{FieldId, FieldNamespace, NativeType};

/// Best-effort lookup of a property's declared type.
pub trait FieldTypeRegistry: Send + Sync {
    /// Type for a storage key (`status`, not `note.status`). Never fails.
    fn type_of(&self, storage_key: &str) -> Option<NativeType>;
}

/// A registry backed by an in-memory table with case-insensitive keys.
#[derive(Debug, Clone, Default)]
pub struct StaticTypeRegistry {
    types: HashMap<String, NativeType>,
}

#[derive(Deserialize)]
struct TypesFile {
    #[serde(default)]
    types: HashMap<String, NativeType>,
}

impl StaticTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property type.
    pub fn with_type(mut self, key: &str, native: NativeType) -> Self {
        self.types.insert(key.to_lowercase(), native);
        self
    }

    /// Parse a `types.json` document: `{"types": {"status": "text"}}`.
    pub fn from_types_json(json: &str) -> Result<Self> {
        let file: TypesFile = serde_json::from_str(json)?;
        let types = file
            .types
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Ok(Self { types })
    }

    /// Load a `types.json` file from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FieldsError::RegistryNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).await?;
        let registry = Self::from_types_json(&content)?;
        debug!(types = registry.len(), path = %path.display(), "type registry loaded");
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FieldTypeRegistry for StaticTypeRegistry {
    fn type_of(&self, storage_key: &str) -> Option<NativeType> {
        self.types.get(&storage_key.to_lowercase()).cloned()
    }
}

/// Whether a field may drive columns or rows.
///
/// File-derived fields and list-like property types do not partition records
/// into a single group each, so they cannot be grouped on.
pub fn is_eligible_for_grouping(field: &FieldId, native: Option<&NativeType>) -> bool {
    field.namespace() != FieldNamespace::File && !native.is_some_and(NativeType::is_list_like)
}
