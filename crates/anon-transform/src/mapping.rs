//! Original → fake value tables.
//!
//! A [`MappingTable`] covers exactly the distinct non-null values observed in
//! one column, keyed by canonical string. Tables are built once per run and
//! only read afterwards.

use std::collections::HashMap;

use anon_common::{canonical_values, redact_value};
use polars::prelude::DataFrame;
use tracing::{debug, trace};

use crate::error::{Result, TransformError};
use crate::identifiers::{arn_account_segment, fake_account_id, fake_arn, fake_uuid};
use crate::resolver::ResolvedPlan;

/// Substitutes for the distinct values of one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    column: String,
    entries: HashMap<String, String>,
}

impl MappingTable {
    fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Column the table was built from.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Fake value for a canonical original value.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    /// Number of distinct originals covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_with(&mut self, original: String, derive: impl FnOnce(&str) -> String) {
        if self.entries.contains_key(&original) {
            return;
        }
        let fake = derive(&original);
        trace!(
            column = %self.column,
            original = redact_value(&original),
            fake = %fake,
            "mapped value"
        );
        self.entries.insert(original, fake);
    }
}

fn distinct_mapping(
    df: &DataFrame,
    column: &str,
    derive: fn(&str) -> String,
) -> Result<MappingTable> {
    let mut table = MappingTable::new(column);
    for value in canonical_values(df.column(column)?)?.into_iter().flatten() {
        table.insert_with(value, derive);
    }
    Ok(table)
}

/// Maps every distinct value of an account-id column to a fake account id.
pub fn build_identifier_mapping(df: &DataFrame, column: &str) -> Result<MappingTable> {
    distinct_mapping(df, column, fake_account_id)
}

/// Maps every distinct value of a column to a v5 UUID.
pub fn build_uuid_mapping(df: &DataFrame, column: &str) -> Result<MappingTable> {
    distinct_mapping(df, column, fake_uuid)
}

/// Maps every distinct ARN of `column` to the same ARN carrying a fake account id.
///
/// ARNs are visited in row order and the account value on the row where an
/// ARN first appears decides its fake id: the entry of `account_table` when
/// there is one, otherwise an id derived from that account value or, when the
/// account value is null, from the ARN's own account segment.
///
/// A null account value is never used as a seed itself: ARNs of different
/// accounts with null companions still get different fake accounts, and an
/// ARN with a null companion gets the same fake account as its own account id
/// would in the account-id column.
pub fn build_arn_mapping(
    df: &DataFrame,
    column: &str,
    account_column: &str,
    account_table: &MappingTable,
) -> Result<MappingTable> {
    let arns = canonical_values(df.column(column)?)?;
    let accounts = canonical_values(df.column(account_column)?)?;

    let mut table = MappingTable::new(column);
    for (arn, account) in arns.into_iter().zip(accounts) {
        let Some(arn) = arn else {
            continue;
        };
        table.insert_with(arn, |arn| {
            let fake_account = match account.as_deref() {
                Some(account) => account_table
                    .get(account)
                    .map(str::to_string)
                    .unwrap_or_else(|| fake_account_id(account)),
                None => fake_account_id(arn_account_segment(arn).unwrap_or(arn)),
            };
            fake_arn(arn, &fake_account)
        });
    }
    Ok(table)
}

/// All mapping tables of one run, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct MappingSet {
    tables: HashMap<String, MappingTable>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: MappingTable) {
        self.tables.insert(table.column.clone(), table);
    }

    pub fn get(&self, column: &str) -> Option<&MappingTable> {
        self.tables.get(column)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Builds every mapping table the plan needs.
///
/// Account-id tables are built first because ARN tables read them; UUID
/// tables come last. The dataset is not modified.
pub fn build_mappings(df: &DataFrame, plan: &ResolvedPlan) -> Result<MappingSet> {
    let groups = plan.groups();
    let mut mappings = MappingSet::new();

    for column in &groups.account_id {
        let table = build_identifier_mapping(df, column)?;
        debug!(column = %column, distinct = table.len(), "built account-id mapping");
        mappings.insert(table);
    }

    for (column, account_column) in &groups.arn {
        let account_table =
            mappings
                .get(account_column)
                .ok_or_else(|| TransformError::MissingMapping {
                    column: (*account_column).to_string(),
                })?;
        let table = build_arn_mapping(df, column, account_column, account_table)?;
        debug!(
            column = %column,
            account_column = %account_column,
            distinct = table.len(),
            "built ARN mapping"
        );
        mappings.insert(table);
    }

    for column in &groups.uuid {
        let table = build_uuid_mapping(df, column)?;
        debug!(column = %column, distinct = table.len(), "built UUID mapping");
        mappings.insert(table);
    }

    Ok(mappings)
}
