//! Dataset writers.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anon_ingest::DatasetFormat;
use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};

/// Temporary sibling of `path` used while writing (`out.csv` → `out.csv.tmp`).
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write CSV {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(())
}

fn write_parquet(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    ParquetWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("write Parquet {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(())
}

/// Writes `df` to `path` as CSV (with header) or Parquet.
///
/// The parent directory is created if needed. On failure the temporary file
/// is removed and any existing file at `path` is left as it was.
pub fn write_dataset(path: &Path, df: &mut DataFrame) -> Result<DatasetFormat> {
    let format = DatasetFormat::from_path(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    let temp_path = temp_path_for(path);
    let written = match format {
        DatasetFormat::Csv => write_csv(&temp_path, df),
        DatasetFormat::Parquet => write_parquet(&temp_path, df),
    }
    .and_then(|()| {
        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })
    });

    if let Err(error) = written {
        if temp_path.exists()
            && let Err(cleanup) = fs::remove_file(&temp_path)
        {
            tracing::warn!(
                path = %temp_path.display(),
                error = %cleanup,
                "failed to remove temporary output"
            );
        }
        return Err(error);
    }

    tracing::info!(
        path = %path.display(),
        format = %format,
        rows = df.height(),
        columns = df.width(),
        "wrote dataset"
    );
    Ok(format)
}
