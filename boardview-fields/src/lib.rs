//! Field identifiers, values and native types
//!
//! `boardview-fields` knows how records describe their metadata, not what a
//! board does with it. The engine crate builds on three pieces:
//!
//! - **[`FieldId`]**: a namespaced identifier (`note.status`, `formula.due`,
//!   `file.name`) plus the storage key used when writing frontmatter back
//! - **[`FieldValue`]**: the closed value variant with truthiness, canonical
//!   string form and the typed raw data needed for write-back
//! - **[`FieldTypeRegistry`]**: best-effort lookup of a field's declared
//!   widget type, never failing

pub mod error;
pub mod registry;
pub mod types;
pub mod value;

pub use error::{FieldsError, Result};
pub use registry::{is_eligible_for_grouping, FieldTypeRegistry, StaticTypeRegistry};
pub use types::{FieldId, FieldNamespace, NativeType};
pub use value::FieldValue;
