//! Error types for the fields crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while loading field metadata
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field identifier was empty
    #[error("field identifier must not be empty")]
    EmptyFieldId,

    /// Type registry file not found
    #[error("type registry not found: {path}")]
    RegistryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::RegistryNotFound {
            path: PathBuf::from("/vault/.obsidian/types.json"),
        };
        assert_eq!(
            err.to_string(),
            "type registry not found: /vault/.obsidian/types.json"
        );
    }

    #[test]
    fn test_json_error_wraps() {
        let err: FieldsError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
