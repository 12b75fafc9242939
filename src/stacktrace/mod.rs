//! Call-stack resolution.
//!
//! This module handles:
//! - Classifying frames as framework or application code
//! - Stripping framework frames from raw traces
//! - Extracting the calling `Class.Method` operation
//! - Capturing the current call stack natively

pub mod capture;
pub mod frame;
pub mod resolver;

// Re-export main types
pub use capture::{current_operation, current_stack_trace};
pub use frame::{Operation, StackFrame};
pub use resolver::{clean_trace, extract_operation, ResolvedTrace, StackTraceResolver};
