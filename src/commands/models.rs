use crate::utils::config::TritonConfig;
use std::path::PathBuf;

/// Arguments for the rank command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RankArgs {
    /// Log record JSON to read
    pub record: PathBuf,

    /// Output path for the JSON usage report (optional)
    pub output_json: Option<PathBuf>,

    /// Keep only the N most utilized counters
    pub top: Option<usize>,

    /// Print text summary to stdout
    pub print_summary: bool,

    pub config: TritonConfig,
}

impl Default for RankArgs {
    fn default() -> Self {
        Self {
            record: PathBuf::from("record.json"),
            output_json: Some(PathBuf::from("usage.json")),
            top: None,
            print_summary: false,
            config: TritonConfig::default(),
        }
    }
}

/// Arguments for the annotate command
#[derive(Debug, Clone)]
pub struct AnnotateArgs {
    /// Log record JSON to read
    pub record: PathBuf,

    /// Where to write the annotated record
    pub output: PathBuf,

    /// Principal the transaction id is cached under
    pub principal: String,

    pub config: TritonConfig,
}
