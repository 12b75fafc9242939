//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod rank;
pub mod resolve;
pub mod utils;

// Re-export main command functions
pub use models::{AnnotateArgs, RankArgs};
pub use rank::{execute_rank, format_table, validate_rank_args};
pub use resolve::{execute_annotate, execute_resolve, read_trace};
pub use utils::{display_correlation_id, display_schema, display_version, validate_report_file};
