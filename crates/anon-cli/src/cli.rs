//! CLI argument definitions for the cost report anonymiser.

use std::path::PathBuf;

use anon_ingest::MAX_INPUT_FILE_SIZE;
use anon_model::InferenceMode;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cur-anonymiser",
    version,
    about = "Anonymise AWS Cost & Usage Reports and FOCUS cost exports",
    long_about = "Anonymise AWS Cost & Usage Reports (legacy and CUR 2.0) and FOCUS cost exports.\n\n\
                  Columns are kept, removed, hashed or replaced with deterministic fake values\n\
                  according to a JSON config. Inputs and outputs may be CSV or Parquet,\n\
                  chosen by file extension."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow original cell values in trace logs.
    ///
    /// Off by default: trace events show [REDACTED] in place of original
    /// account ids, ARNs and tags.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a config file from the input's column names.
    CreateConfig(CreateConfigArgs),

    /// Anonymise an input file according to a config file.
    Run(RunArgs),

    /// List the supported column actions.
    Actions,
}

#[derive(Parser)]
pub struct CreateConfigArgs {
    /// Input dataset (.csv for CSV, anything else is read as Parquet).
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Config file to write.
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Naming heuristic for the suggested actions.
    #[arg(long = "mode", value_enum, default_value = "cur")]
    pub mode: ModeArg,

    /// Overwrite an existing config file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input dataset (.csv for CSV, anything else is read as Parquet).
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output dataset (.csv for CSV, anything else is written as Parquet).
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// JSON config file mapping column names to actions.
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Reject inputs larger than this many bytes.
    #[arg(long = "max-input-size", value_name = "BYTES", default_value_t = MAX_INPUT_FILE_SIZE)]
    pub max_input_size: u64,
}

/// Config inference modes.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// AWS Cost & Usage Report (legacy and 2.0).
    Cur,
    /// FOCUS and other generic cost exports.
    Focus,
    /// Keep every column.
    KeepAll,
}

impl From<ModeArg> for InferenceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cur => Self::Cur,
            ModeArg::Focus => Self::Focus,
            ModeArg::KeepAll => Self::KeepAll,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
