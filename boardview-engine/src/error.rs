//! Error types for the board engine

use boardview_fields::FieldsError;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// A card was dropped into a group whose field is computed, not stored
    #[error("cannot drop card into computed group '{field}'")]
    ComputedFieldDropRejected { field: String },

    /// Record is not part of the current result set
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// Invalid value for an operation parameter
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The metadata store refused a write
    #[error("failed to write '{key}' on {record}: {message}")]
    WriteFailed {
        record: String,
        key: String,
        message: String,
    },

    /// The host's new-record flow reported a failure
    #[error("new record request failed: {message}")]
    NewRecordFailed { message: String },

    /// View configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// View YAML could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Field metadata error
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a rejection for a drop onto a computed field
    pub fn computed_drop(field: impl Into<String>) -> Self {
        Self::ComputedFieldDropRejected {
            field: field.into(),
        }
    }

    /// Create a write failure
    pub fn write_failed(
        record: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::WriteFailed {
            record: record.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Errors the host should show to the user as a notice rather than treat
    /// as a failure.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::ComputedFieldDropRejected { .. })
    }
}

impl From<figment::Error> for BoardError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
