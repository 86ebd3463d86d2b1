//! CSV reading utilities.

mod reader;

pub use reader::{read_csv_dataset, read_csv_header};
