//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, saving or resolving an anonymiser configuration.
///
/// All of them are fatal and are reported before any output is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read or written.
    #[error("failed to {operation} config file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or does not have the expected shape.
    #[error("malformed configuration: {reason}")]
    Malformed { reason: String },

    /// Action for a column is not a string.
    #[error("action for column '{column}' must be a string")]
    InvalidActionValue { column: String },

    /// Action keyword is not one of the supported actions.
    #[error(
        "unrecognized action '{action}' for column '{column}' \
         (expected keep, remove, hash, uuid, awsid_anonymise or awsarn_anonymise)"
    )]
    UnrecognizedAction { column: String, action: String },

    /// Configured column does not exist in the input schema.
    #[error("unknown column '{column}' in configuration{}", suggestion_hint(.suggestion))]
    UnknownColumn {
        column: String,
        suggestion: Option<String>,
    },

    /// ARN column has no account-id column to take fake account ids from.
    #[error(
        "no account-id column for ARN column '{column}': configure an awsid_anonymise \
         column whose name contains 'account'"
    )]
    MissingAccountBinding { column: String },

    /// Every configured column is removed or the configuration is empty.
    #[error("configuration retains no columns")]
    NoRetainedColumns,
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
