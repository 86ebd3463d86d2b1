//! Resolution of a configuration against a dataset schema.
//!
//! [`resolve`] turns the per-column keywords of an [`AnonymiserConfig`] into a
//! [`ResolvedPlan`]: the retained columns in schema order, each tagged with
//! the concrete rewrite to apply. Every configuration problem is reported
//! here, before any data is touched.

use std::collections::{HashMap, HashSet};

use anon_model::{AnonymiserConfig, CaseInsensitiveSet, ColumnAction, ConfigError};

/// Rewrite applied to one retained column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    Keep,
    Hash,
    Uuid,
    AccountId,
    /// ARN rewrite bound to the account-id column supplying fake ids.
    Arn { account_column: String },
}

impl ResolvedAction {
    /// Configuration keyword this action was resolved from.
    pub fn column_action(&self) -> ColumnAction {
        match self {
            Self::Keep => ColumnAction::Keep,
            Self::Hash => ColumnAction::Hash,
            Self::Uuid => ColumnAction::Uuid,
            Self::AccountId => ColumnAction::AwsIdAnonymise,
            Self::Arn { .. } => ColumnAction::AwsArnAnonymise,
        }
    }

    /// Whether the column is rewritten through a mapping table.
    pub fn uses_mapping(&self) -> bool {
        matches!(self, Self::Uuid | Self::AccountId | Self::Arn { .. })
    }
}

/// A retained column and its rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedColumn {
    pub name: String,
    pub action: ResolvedAction,
}

/// Validated plan for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlan {
    columns: Vec<PlannedColumn>,
}

/// Retained columns grouped by action, each group in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionGroups<'a> {
    pub keep: Vec<&'a str>,
    pub hash: Vec<&'a str>,
    pub uuid: Vec<&'a str>,
    pub account_id: Vec<&'a str>,
    /// `(arn column, bound account-id column)` pairs.
    pub arn: Vec<(&'a str, &'a str)>,
}

impl ResolvedPlan {
    /// Retained columns in output order.
    pub fn columns(&self) -> &[PlannedColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn action_for(&self, column: &str) -> Option<&ResolvedAction> {
        self.columns
            .iter()
            .find(|planned| planned.name == column)
            .map(|planned| &planned.action)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn groups(&self) -> ActionGroups<'_> {
        let mut groups = ActionGroups::default();
        for planned in &self.columns {
            let name = planned.name.as_str();
            match &planned.action {
                ResolvedAction::Keep => groups.keep.push(name),
                ResolvedAction::Hash => groups.hash.push(name),
                ResolvedAction::Uuid => groups.uuid.push(name),
                ResolvedAction::AccountId => groups.account_id.push(name),
                ResolvedAction::Arn { account_column } => {
                    groups.arn.push((name, account_column.as_str()));
                }
            }
        }
        groups
    }
}

/// The account-id column every ARN column binds to: the first
/// `awsid_anonymise` column, in declaration order, whose name contains
/// "account" in any casing.
pub fn account_binding(config: &AnonymiserConfig) -> Option<&str> {
    config
        .columns_with(ColumnAction::AwsIdAnonymise)
        .find(|column| column.to_ascii_lowercase().contains("account"))
}

/// Validates `config` against `schema` and builds the plan.
///
/// # Errors
///
/// - [`ConfigError::UnknownColumn`] when a configured column is not in the
///   schema (with a case-insensitive suggestion when one exists)
/// - [`ConfigError::MissingAccountBinding`] when an ARN column has no
///   account-id column to bind to
/// - [`ConfigError::NoRetainedColumns`] when nothing would be written
pub fn resolve<S: AsRef<str>>(
    schema: &[S],
    config: &AnonymiserConfig,
) -> Result<ResolvedPlan, ConfigError> {
    let present: HashSet<&str> = schema.iter().map(AsRef::as_ref).collect();
    let lookup = CaseInsensitiveSet::new(schema.iter().map(AsRef::as_ref));

    for rule in config.rules() {
        if !present.contains(rule.column.as_str()) {
            return Err(ConfigError::UnknownColumn {
                column: rule.column.clone(),
                suggestion: lookup.get(&rule.column).map(str::to_string),
            });
        }
    }

    let binding = account_binding(config);
    if binding.is_none()
        && let Some(column) = config.columns_with(ColumnAction::AwsArnAnonymise).next()
    {
        return Err(ConfigError::MissingAccountBinding {
            column: column.to_string(),
        });
    }

    let actions: HashMap<&str, ColumnAction> = config
        .rules()
        .iter()
        .map(|rule| (rule.column.as_str(), rule.action))
        .collect();

    let mut columns = Vec::new();
    for name in schema.iter().map(AsRef::as_ref) {
        let action = match actions.get(name) {
            None | Some(ColumnAction::Remove) => continue,
            Some(ColumnAction::Keep) => ResolvedAction::Keep,
            Some(ColumnAction::Hash) => ResolvedAction::Hash,
            Some(ColumnAction::Uuid) => ResolvedAction::Uuid,
            Some(ColumnAction::AwsIdAnonymise) => ResolvedAction::AccountId,
            Some(ColumnAction::AwsArnAnonymise) => match binding {
                Some(account_column) => ResolvedAction::Arn {
                    account_column: account_column.to_string(),
                },
                None => {
                    return Err(ConfigError::MissingAccountBinding {
                        column: name.to_string(),
                    });
                }
            },
        };
        columns.push(PlannedColumn {
            name: name.to_string(),
            action,
        });
    }

    if columns.is_empty() {
        return Err(ConfigError::NoRetainedColumns);
    }

    tracing::debug!(
        configured = config.len(),
        retained = columns.len(),
        account_binding = binding.unwrap_or("-"),
        "resolved configuration"
    );
    Ok(ResolvedPlan { columns })
}
