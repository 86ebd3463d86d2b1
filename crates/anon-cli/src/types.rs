use std::path::PathBuf;

use anon_ingest::DatasetFormat;
use anon_model::{ColumnAction, InferenceMode};
use anon_transform::ColumnSummary;

/// Inputs of one anonymisation run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: PathBuf,
    pub max_input_size: u64,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: DatasetFormat,
    pub output_format: DatasetFormat,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    /// Input columns absent from the output, in schema order.
    pub dropped_columns: Vec<String>,
}

/// Inputs of a config creation.
#[derive(Debug, Clone)]
pub struct CreateConfigRequest {
    pub input: PathBuf,
    pub config: PathBuf,
    pub mode: InferenceMode,
    pub force: bool,
}

/// Outcome of a config creation.
#[derive(Debug)]
pub struct ConfigReport {
    pub path: PathBuf,
    pub mode: InferenceMode,
    pub columns: Vec<(String, ColumnAction)>,
}
