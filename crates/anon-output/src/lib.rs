//! Output writing for anonymised datasets.
//!
//! The format follows the target extension (`.csv` is CSV, anything else is
//! Parquet). Data is written to a temporary sibling file and renamed into
//! place, so a failed write never leaves a partial dataset at the target.

mod writer;

pub use writer::{temp_path_for, write_dataset};
