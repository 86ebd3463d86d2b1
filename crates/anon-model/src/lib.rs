//! Data model for the cost report anonymiser.
//!
//! - [`ColumnAction`]: the closed set of per-column actions
//! - [`AnonymiserConfig`]: ordered column → action configuration with JSON load/save
//! - [`InferenceMode`]: naming heuristics for generating a starting configuration
//! - [`ConfigError`]: every fatal configuration problem

pub mod action;
pub mod config;
pub mod error;
pub mod lookup;
pub mod mode;

pub use action::ColumnAction;
pub use config::{AnonymiserConfig, ColumnRule, load_config, save_config};
pub use error::{ConfigError, Result};
pub use lookup::CaseInsensitiveSet;
pub use mode::InferenceMode;
