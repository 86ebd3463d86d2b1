//! Final per-row projection.

use anon_common::canonical_values;
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};
use crate::identifiers::hash_value;
use crate::mapping::{MappingSet, MappingTable};
use crate::resolver::{ResolvedAction, ResolvedPlan};

fn hash_column(source: &Column) -> Result<Column> {
    let values: Vec<Option<String>> = canonical_values(source)?
        .into_iter()
        .map(|value| value.map(|text| hash_value(&text)))
        .collect();
    Ok(Column::new(source.name().clone(), values))
}

/// Looks every value up in `table`. Values the table does not cover pass
/// through in canonical form.
fn substitute_column(source: &Column, table: &MappingTable) -> Result<Column> {
    let values: Vec<Option<String>> = canonical_values(source)?
        .into_iter()
        .map(|value| {
            value.map(|text| match table.get(&text) {
                Some(fake) => fake.to_string(),
                None => text,
            })
        })
        .collect();
    Ok(Column::new(source.name().clone(), values))
}

/// Builds the output dataset: the plan's columns in plan order, rewritten.
///
/// Kept columns retain their native type; rewritten columns are strings.
/// Nulls stay null in every column.
///
/// # Errors
///
/// Fails with [`TransformError::MissingMapping`] when a UUID, account-id or
/// ARN column has no table in `mappings`.
pub fn project(df: &DataFrame, plan: &ResolvedPlan, mappings: &MappingSet) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(plan.len());
    for planned in plan.columns() {
        let source = df.column(&planned.name)?;
        let column = match &planned.action {
            ResolvedAction::Keep => source.clone(),
            ResolvedAction::Hash => hash_column(source)?,
            ResolvedAction::Uuid | ResolvedAction::AccountId | ResolvedAction::Arn { .. } => {
                let table =
                    mappings
                        .get(&planned.name)
                        .ok_or_else(|| TransformError::MissingMapping {
                            column: planned.name.clone(),
                        })?;
                substitute_column(source, table)?
            }
        };
        columns.push(column);
    }

    let projected = DataFrame::new(columns)?;
    if projected.height() != df.height() {
        return Err(TransformError::RowCountMismatch {
            expected: df.height(),
            actual: projected.height(),
        });
    }
    Ok(projected)
}
