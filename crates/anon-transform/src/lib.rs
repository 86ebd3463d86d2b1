//! Column anonymisation engine for cost and usage datasets.
//!
//! - **identifiers**: deterministic fake account ids, UUIDs, ARNs and digests
//! - **resolver**: validates a configuration against a schema into a [`ResolvedPlan`]
//! - **mapping**: original → fake tables for substituted columns
//! - **projector**: emits the anonymised dataset
//! - **inference**: starting configurations guessed from column names
//!
//! # Example
//!
//! ```ignore
//! use anon_transform::{execute, resolve};
//!
//! let schema: Vec<String> = df.get_column_names().iter().map(|c| c.to_string()).collect();
//! let plan = resolve(&schema, &config)?;
//! let execution = execute(&df, &plan)?;
//! ```

use std::time::Instant;

use anon_model::ColumnAction;
use polars::prelude::DataFrame;
use tracing::{info, info_span};

pub mod error;
pub mod identifiers;
pub mod inference;
pub mod mapping;
pub mod projector;
pub mod resolver;

pub use error::{Result, TransformError};
pub use identifiers::{arn_account_segment, fake_account_id, fake_arn, fake_uuid, hash_value};
pub use inference::{infer_config, mode_actions};
pub use mapping::{
    MappingSet, MappingTable, build_arn_mapping, build_identifier_mapping, build_mappings,
    build_uuid_mapping,
};
pub use projector::project;
pub use resolver::{
    ActionGroups, PlannedColumn, ResolvedAction, ResolvedPlan, account_binding, resolve,
};

/// What happened to one output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub column: String,
    pub action: ColumnAction,
    /// Distinct originals substituted, for mapped columns.
    pub distinct_values: Option<usize>,
    /// Account-id column supplying fake ids, for ARN columns.
    pub account_column: Option<String>,
}

/// Result of anonymising one dataset.
#[derive(Debug, Clone)]
pub struct Execution {
    pub data: DataFrame,
    pub summaries: Vec<ColumnSummary>,
}

/// Builds the mapping tables for `plan` and projects `df` through them.
///
/// The input frame is left untouched; the anonymised frame is returned whole
/// so nothing is written until every column has been rewritten.
pub fn execute(df: &DataFrame, plan: &ResolvedPlan) -> Result<Execution> {
    let mappings = info_span!("mapping").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let mappings = build_mappings(df, plan)?;
        info!(
            tables = mappings.len(),
            rows = df.height(),
            duration_ms = start.elapsed().as_millis(),
            "mapping complete"
        );
        Ok(mappings)
    })?;

    let data = info_span!("project").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let data = project(df, plan, &mappings)?;
        info!(
            rows = data.height(),
            columns = data.width(),
            duration_ms = start.elapsed().as_millis(),
            "projection complete"
        );
        Ok(data)
    })?;

    let summaries = plan
        .columns()
        .iter()
        .map(|planned| ColumnSummary {
            column: planned.name.clone(),
            action: planned.action.column_action(),
            distinct_values: mappings.get(&planned.name).map(MappingTable::len),
            account_column: match &planned.action {
                ResolvedAction::Arn { account_column } => Some(account_column.clone()),
                _ => None,
            },
        })
        .collect();

    Ok(Execution { data, summaries })
}
