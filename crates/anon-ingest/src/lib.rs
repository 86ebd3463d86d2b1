//! Input loading for the cost report anonymiser.
//!
//! Validates input files and reads CSV or Parquet datasets into Polars
//! DataFrames. The format is chosen by file extension: `.csv` is CSV, any
//! other extension is Parquet.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use anon_ingest::{read_dataset, read_schema};
//!
//! let columns = read_schema(Path::new("cur.csv"))?;
//! let df = read_dataset(Path::new("cur.csv"))?;
//! ```

mod csv;
mod dataset;
mod error;
mod format;
mod parquet;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use format::DatasetFormat;

// === Validation ===
pub use validate::{
    MAX_INPUT_FILE_SIZE, validate_encoding, validate_input_file, validate_input_file_with_limit,
};

// === Reading ===
pub use csv::{read_csv_dataset, read_csv_header};
pub use dataset::{read_dataset, read_dataset_with_limit, read_schema};
pub use parquet::{read_parquet_dataset, read_parquet_schema};
