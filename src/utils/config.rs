//! Configuration and constants for the library and CLI.
//!
//! Compile-time defaults live here as constants. A TOML file can
//! override them at runtime (see [`load_config`]).

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Current usage report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Token identifying stack frames that belong to the logging framework itself
pub const DEFAULT_FRAMEWORK_MARKER: &str = "Triton.";

/// Class name given to captured frames from this crate
pub const FRAMEWORK_CLASS: &str = "Triton";

/// Appended to the principal id to build the transaction cache key
pub const TRANSACTION_KEY_SUFFIX: &str = "TransactionId";

/// Lifetime of a cached transaction id
pub const DEFAULT_TRANSACTION_TTL: Duration = Duration::from_secs(300);

/// Fractional digits kept by utilization percentages
pub const PERCENTAGE_SCALE: u32 = 4;

/// Utilization at or above which a counter is reported as near its limit
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Runtime configuration, usually loaded from `triton.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TritonConfig {
    /// Stack-trace filtering settings
    #[serde(default)]
    pub stack_trace: StackTraceConfig,

    /// Transaction-id cache settings
    #[serde(default)]
    pub transaction: TransactionConfig,

    /// Usage ranking settings
    #[serde(default)]
    pub usage: UsageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StackTraceConfig {
    /// Frames containing this token are dropped from traces
    #[serde(default = "default_marker")]
    pub framework_marker: String,
}

impl Default for StackTraceConfig {
    fn default() -> Self {
        Self {
            framework_marker: default_marker(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TransactionConfig {
    /// Suffix appended to the principal id
    #[serde(default = "default_key_suffix")]
    pub key_suffix: String,

    /// Seconds a transaction id stays in the cache
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            key_suffix: default_key_suffix(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl TransactionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UsageConfig {
    /// Threshold used by summaries and `--summary` output
    #[serde(default = "default_near_limit")]
    pub near_limit_percent: f64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            near_limit_percent: default_near_limit(),
        }
    }
}

fn default_marker() -> String {
    DEFAULT_FRAMEWORK_MARKER.to_string()
}

fn default_key_suffix() -> String {
    TRANSACTION_KEY_SUFFIX.to_string()
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TRANSACTION_TTL.as_secs()
}

fn default_near_limit() -> f64 {
    NEAR_LIMIT_PERCENT
}

impl TritonConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TritonConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would silently disable filtering or caching
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_trace.framework_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "stack_trace.framework_marker cannot be empty".to_string(),
            ));
        }

        if self.transaction.ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "transaction.ttl_secs must be greater than 0".to_string(),
            ));
        }

        if self.transaction.key_suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "transaction.key_suffix cannot be empty".to_string(),
            ));
        }

        let near = self.usage.near_limit_percent;
        if !near.is_finite() || near < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "usage.near_limit_percent must be a non-negative number, got {}",
                near
            )));
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
///
/// # Example
/// ```ignore
/// let config = load_config("triton.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TritonConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    TritonConfig::from_toml_str(&contents)
}
