//! Error types for imbib-identity
//!
//! The identity core itself never fails: absent or malformed identifiers
//! degrade to "no match". Errors only surface at the collaborator seams
//! (the record store, search backends, configuration parsing).

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for identity operations
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Main error type for identity operations
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Persistence collaborator failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A search backend failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Errors from the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Record already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors reported by a search backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{source_name} unavailable: {message}")]
    Unavailable {
        source_name: String,
        message: String,
    },

    #[error("{source_name} returned an invalid response: {message}")]
    InvalidResponse {
        source_name: String,
        message: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
