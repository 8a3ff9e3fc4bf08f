//! Group keys from record values, and the value universe of a field.

use std::collections::BTreeSet;

use boardview_fields::{is_eligible_for_grouping, FieldId, FieldTypeRegistry, NativeType};
use serde_json::Value;
use tracing::{debug, trace};

use crate::store::ValueIndex;
use crate::types::{Record, EMPTY_GROUP};

/// A record's group key along one axis, with the typed value behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    pub key: String,
    /// `None` for [`EMPTY_GROUP`].
    pub raw: Option<Value>,
}

impl ResolvedKey {
    fn empty() -> Self {
        Self {
            key: EMPTY_GROUP.to_string(),
            raw: None,
        }
    }
}

/// Reads grouping values. Never fails: anything it cannot answer resolves to
/// the empty group, an empty set or no type.
#[derive(Clone, Copy)]
pub struct ValueResolver<'a> {
    index: Option<&'a dyn ValueIndex>,
    registry: &'a dyn FieldTypeRegistry,
}

impl<'a> ValueResolver<'a> {
    pub fn new(index: Option<&'a dyn ValueIndex>, registry: &'a dyn FieldTypeRegistry) -> Self {
        Self { index, registry }
    }

    /// Group key for `record`; `field = None` means the axis is not configured.
    pub fn resolve(&self, record: &Record, field: Option<&FieldId>) -> ResolvedKey {
        let Some(field) = field else {
            return ResolvedKey::empty();
        };
        match record.value(field) {
            Some(value) if value.is_truthy() => ResolvedKey {
                key: value.to_canonical_string(),
                raw: value.raw(),
            },
            _ => ResolvedKey::empty(),
        }
    }

    /// Every value `field` has anywhere in the vault.
    pub fn all_known_values(&self, field: &FieldId) -> BTreeSet<String> {
        let Some(index) = self.index else {
            debug!(field = %field, "no value index available; skipping enrichment values");
            return BTreeSet::new();
        };
        let values: BTreeSet<String> = index
            .all_values_of(field.storage_key())
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect();
        trace!(field = %field, count = values.len(), "known values");
        values
    }

    pub fn field_native_type(&self, field: &FieldId) -> Option<NativeType> {
        self.registry.type_of(field.storage_key())
    }

    /// Whether `field` can still drive columns or rows.
    pub fn is_groupable(&self, field: &FieldId) -> bool {
        is_eligible_for_grouping(field, self.field_native_type(field).as_ref())
    }
}
