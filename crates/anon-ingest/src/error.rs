//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating or loading an input dataset.
///
/// Every variant is an input error: fatal, reported before the anonymiser
/// runs, and never leaves output behind.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("input path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File has zero bytes.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// File exceeds the configured size limit.
    #[error("input file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Parsing Errors ===
    /// File starts with a byte-order mark for an unsupported encoding.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse Parquet.
    #[error("failed to parse Parquet {path}: {message}")]
    ParquetParse { path: PathBuf, message: String },

    /// Dataset has no columns (empty or malformed file).
    #[error("input file has no columns (empty or malformed): {path}")]
    NoColumns { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
