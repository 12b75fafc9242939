//! Triton Trace CLI
//!
//! Ranks the resource counters of a log record and resolves the calling
//! operation from a raw stack trace.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use triton_trace::commands::{
    display_correlation_id, display_schema, display_version, execute_annotate, execute_rank,
    execute_resolve, read_trace, validate_rank_args, validate_report_file, AnnotateArgs, RankArgs,
};
use triton_trace::stacktrace::StackTraceResolver;
use triton_trace::utils::config::{load_config, TritonConfig};

/// Triton Trace - usage ranking and stack-trace resolution for log records
#[derive(Parser, Debug)]
#[command(name = "triton-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "TRITON_CONFIG")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank a log record's counters by utilization
    Rank {
        /// Log record JSON file
        #[arg(short, long)]
        record: PathBuf,

        /// Output path for the JSON usage report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only the N most utilized counters
        #[arg(long)]
        top: Option<usize>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print the operation and cleaned trace of a raw stack trace
    Resolve {
        /// Stack trace file (reads stdin when omitted)
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Override the framework marker token
        #[arg(long)]
        marker: Option<String>,
    },

    /// Write operation, cleaned trace and transaction id back onto a record
    Annotate {
        /// Log record JSON file
        #[arg(short, long)]
        record: PathBuf,

        /// Output path for the annotated record
        #[arg(short, long)]
        output: PathBuf,

        /// Principal the transaction id belongs to
        #[arg(short, long, default_value = "anonymous")]
        principal: String,
    },

    /// Generate a correlation id
    CorrelationId,

    /// Validate a usage report JSON file
    Validate {
        /// Path to usage report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TritonConfig::default(),
    };

    // Execute command
    match cli.command {
        Commands::Rank {
            record,
            output,
            top,
            summary,
        } => {
            let args = RankArgs {
                record,
                output_json: output,
                top,
                print_summary: summary,
                config,
            };

            // Validate args first
            validate_rank_args(&args)?;

            execute_rank(args)?;
        }

        Commands::Resolve { trace, marker } => {
            let resolver = match marker {
                Some(marker) => StackTraceResolver::try_new(marker)?,
                None => StackTraceResolver::from_config(&config.stack_trace),
            };
            let raw = read_trace(trace.as_deref())?;
            execute_resolve(&raw, &resolver);
        }

        Commands::Annotate {
            record,
            output,
            principal,
        } => {
            execute_annotate(AnnotateArgs {
                record,
                output,
                principal,
                config,
            })?;
        }

        Commands::CorrelationId => {
            display_correlation_id();
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
