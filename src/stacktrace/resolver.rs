//! Clean raw stack traces and recover the calling operation.
//!
//! Raw traces are newline-delimited, one frame per line, in the
//! `Class.method: line N, column M` layout. Frames containing the
//! framework marker are the logger's own and never reach the user.

use super::frame::{Operation, StackFrame};
use crate::utils::config::{StackTraceConfig, DEFAULT_FRAMEWORK_MARKER};
use crate::utils::error::ConfigError;
use log::debug;

/// Filters framework frames out of stack traces
///
/// **Public** - construct once per marker and reuse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTraceResolver {
    marker: String,
}

impl Default for StackTraceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMEWORK_MARKER)
    }
}

impl StackTraceResolver {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Resolver for a user-supplied marker
    ///
    /// # Errors
    /// A blank marker matches every line and is rejected.
    pub fn try_new(marker: impl Into<String>) -> Result<Self, ConfigError> {
        let marker = marker.into();
        if marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "framework marker cannot be empty".to_string(),
            ));
        }
        Ok(Self::new(marker))
    }

    pub fn from_config(config: &StackTraceConfig) -> Self {
        Self::new(config.framework_marker.clone())
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Classify every line of a raw trace, in order
    pub fn frames<'a>(&'a self, raw: &'a str) -> impl Iterator<Item = StackFrame<'a>> + 'a {
        raw.lines()
            .map(move |line| StackFrame::classify(line, &self.marker))
    }

    /// Remove framework frames from a raw trace
    ///
    /// **Public** - produces the user-facing trace
    ///
    /// Each line is trimmed; lines containing the marker are dropped and the
    /// survivors are rejoined with `\n` in their original order.
    pub fn clean_trace(&self, raw: &str) -> String {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.contains(self.marker.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find the first application frame naming a `Class.Method`
    ///
    /// **Public** - main entry point for operation extraction
    ///
    /// Blank lines, framework frames, lines without a `:` and tokens without
    /// a `.` are skipped. Returns `None` when no frame qualifies.
    pub fn extract_operation(&self, raw: &str) -> Option<Operation> {
        for frame in self.frames(raw) {
            if frame.line().trim().is_empty() || frame.is_framework() {
                continue;
            }

            match frame.call_site() {
                Some(site) => return Some(Operation::from(site)),
                None => debug!("Skipping unparsable frame: {}", frame.line().trim()),
            }
        }

        None
    }

    /// Clean a trace and extract its operation in one call
    pub fn resolve(&self, raw: &str) -> ResolvedTrace {
        ResolvedTrace {
            operation: self.extract_operation(raw),
            stack_trace: self.clean_trace(raw),
        }
    }
}

/// Output of [`StackTraceResolver::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrace {
    pub operation: Option<Operation>,
    pub stack_trace: String,
}

/// [`StackTraceResolver::clean_trace`] with the default marker
pub fn clean_trace(raw: &str) -> String {
    StackTraceResolver::default().clean_trace(raw)
}

/// [`StackTraceResolver::extract_operation`] with the default marker
pub fn extract_operation(raw: &str) -> Option<Operation> {
    StackTraceResolver::default().extract_operation(raw)
}
