//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a log record
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read log record: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors raised by a transaction-id cache backend
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize cache value: {0}")]
    Serialization(String),

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors raised when usage data read back from JSON breaks ranking rules
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Invalid percentage '{0}'")]
    InvalidPercentage(String),

    #[error("Counter '{name}' has non-positive limit {limit}")]
    NonPositiveLimit { name: String, limit: i64 },

    #[error("Counter '{name}' reports {found}% but current/max gives {expected}%")]
    PercentageMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Counter '{name}' is ranked above a more utilized counter")]
    OutOfOrder { name: String },
}
