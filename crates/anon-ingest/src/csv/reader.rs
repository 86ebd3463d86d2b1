//! CSV file reading.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};
use crate::validate::{open_error, validate_encoding};

const BOM: char = '\u{feff}';

fn csv_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Reads only the header row of a CSV file.
///
/// Used to create a configuration without loading the data.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches(BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Reads a CSV file with a header row into a DataFrame.
///
/// Every column is read as text so cells keep their exact spelling
/// (`012345678901` stays `012345678901`, `2.0` stays `2.0`). Empty fields are
/// read as nulls. A header-only file yields zero rows.
pub fn read_csv_dataset(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    // No inference: a schema length of zero types every column as String.
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| csv_error(path, e))?
        .finish()
        .map_err(|e| csv_error(path, e))?;

    let first = df
        .get_column_names()
        .first()
        .map(|name| name.to_string());
    if let Some(first) = first
        && let Some(stripped) = first.strip_prefix(BOM)
    {
        df.rename(&first, stripped.into())?;
    }

    Ok(df)
}
