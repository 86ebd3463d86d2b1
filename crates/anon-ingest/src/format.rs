//! Dataset serialization formats.

use std::fmt;
use std::path::Path;

/// On-disk format of a dataset, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Delimited text with a header row.
    Csv,
    /// Self-describing columnar binary.
    Parquet,
}

impl DatasetFormat {
    /// `.csv` (any case) is CSV; everything else is treated as Parquet.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Parquet,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Parquet => "Parquet",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
