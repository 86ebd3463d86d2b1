//! Parquet file reading.

use std::fs::File;
use std::path::Path;

use polars::prelude::{DataFrame, ParquetReader, SerReader};

use crate::error::{IngestError, Result};
use crate::validate::open_error;

fn parquet_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::ParquetParse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Reads a Parquet file into a DataFrame, keeping the stored column types.
pub fn read_parquet_dataset(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| parquet_error(path, e))
}

/// Reads the column names from the Parquet footer without loading any rows.
pub fn read_parquet_schema(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let schema = ParquetReader::new(file)
        .schema()
        .map_err(|e| parquet_error(path, e))?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}
