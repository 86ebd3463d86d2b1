//! Heuristic modes for inferring a starting configuration.

use std::fmt;

/// Naming heuristic used when generating a configuration from a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceMode {
    /// AWS Cost & Usage Report (legacy and 2.0): substring rules on column names.
    #[default]
    Cur,
    /// FOCUS / generic cost exports: a fixed set of known sensitive column names.
    Focus,
    /// Every column is kept; the operator edits the file by hand.
    KeepAll,
}

impl InferenceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cur => "cur",
            Self::Focus => "focus",
            Self::KeepAll => "keep-all",
        }
    }
}

impl fmt::Display for InferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
