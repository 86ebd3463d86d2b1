//! Library components of the `cur-anonymiser` command.

pub mod logging;
pub mod pipeline;
pub mod types;
