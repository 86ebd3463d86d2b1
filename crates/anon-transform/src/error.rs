//! Runtime errors raised while anonymising a dataset.

use anon_model::ConfigError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors produced by the transformation engine.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A substituted column has no mapping table.
    #[error("no mapping table was built for column '{column}'")]
    MissingMapping { column: String },

    /// Projection changed the number of rows.
    #[error("projection produced {actual} rows, expected {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// Configuration does not fit the dataset.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying DataFrame operation failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
