//! Format-dispatching dataset loading.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use crate::csv::{read_csv_dataset, read_csv_header};
use crate::error::{IngestError, Result};
use crate::format::DatasetFormat;
use crate::parquet::{read_parquet_dataset, read_parquet_schema};
use crate::validate::{MAX_INPUT_FILE_SIZE, validate_input_file_with_limit};

/// Loads a CSV or Parquet dataset, chosen by file extension.
pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    read_dataset_with_limit(path, MAX_INPUT_FILE_SIZE)
}

/// Loads a dataset, rejecting files larger than `max_size` bytes.
///
/// # Errors
///
/// Fails when the file is missing, empty, too large or unreadable in its
/// format, or when it yields no columns.
pub fn read_dataset_with_limit(path: &Path, max_size: u64) -> Result<DataFrame> {
    let size = validate_input_file_with_limit(path, max_size)?;
    let format = DatasetFormat::from_path(path);

    let df = match format {
        DatasetFormat::Csv => read_csv_dataset(path)?,
        DatasetFormat::Parquet => read_parquet_dataset(path)?,
    };

    if df.width() == 0 {
        return Err(IngestError::NoColumns {
            path: path.to_path_buf(),
        });
    }

    for column in df.get_columns() {
        if column.dtype().is_nested() {
            warn!(
                column = %column.name(),
                dtype = %column.dtype(),
                "nested column type is only supported with the keep or remove actions"
            );
        }
    }

    debug!(
        path = %path.display(),
        format = %format,
        bytes = size,
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(df)
}

/// Returns the column names of a dataset in file order.
///
/// Only the CSV header row or the Parquet footer is read.
pub fn read_schema(path: &Path) -> Result<Vec<String>> {
    validate_input_file_with_limit(path, MAX_INPUT_FILE_SIZE)?;
    let columns = match DatasetFormat::from_path(path) {
        DatasetFormat::Csv => read_csv_header(path)?,
        DatasetFormat::Parquet => read_parquet_schema(path)?,
    };
    if columns.is_empty() {
        return Err(IngestError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}
