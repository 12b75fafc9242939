//! Utility modules for configuration and error handling.

pub mod error;
pub mod config;

// Re-export commonly used error types for convenience
pub use error::{CacheError, ConfigError, OutputError, RecordError, UsageError};
pub use config::{load_config, TritonConfig};
