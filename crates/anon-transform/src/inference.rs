//! Starting configurations inferred from column names.
//!
//! Inference only looks at the schema and only ever suggests `keep`, `hash`,
//! `awsid_anonymise` and `awsarn_anonymise`. The result is written out for
//! the operator to review before a run.

use anon_model::{AnonymiserConfig, CaseInsensitiveSet, ColumnAction, InferenceMode};

/// Substrings marking account-id columns in Cost & Usage Reports.
const CUR_ACCOUNT_PATTERNS: &[&str] = &["account_id", "usageaccountid", "payeraccountid"];

/// Substrings marking ARN columns (`a_r_n` is the CUR 2.0 spelling).
const CUR_ARN_PATTERNS: &[&str] = &["arn", "a_r_n"];

const CUR_TAG_PATTERNS: &[&str] = &["resource_tags"];

/// FOCUS columns hashed by default.
const FOCUS_SENSITIVE_COLUMNS: &[&str] = &[
    "BillingAccountId",
    "BillingAccountName",
    "SubAccountId",
    "SubAccountName",
    "SubAccountIdName",
    "InvoiceId",
    "Tags",
    "tag",
];

/// Action keywords listed in the `_comment` of an inferred configuration.
pub fn mode_actions(mode: InferenceMode) -> &'static [ColumnAction] {
    match mode {
        InferenceMode::Cur => &ColumnAction::ALL,
        InferenceMode::Focus => &[
            ColumnAction::Keep,
            ColumnAction::Remove,
            ColumnAction::Hash,
            ColumnAction::Uuid,
        ],
        InferenceMode::KeepAll => &[
            ColumnAction::Keep,
            ColumnAction::Remove,
            ColumnAction::AwsIdAnonymise,
            ColumnAction::AwsArnAnonymise,
        ],
    }
}

fn mode_comment(mode: InferenceMode) -> String {
    let options: Vec<String> = mode_actions(mode)
        .iter()
        .map(|action| format!("'{action}'"))
        .collect();
    format!("Column options: {}", options.join(", "))
}

fn contains_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| name.contains(pattern))
}

fn infer_cur_action(column: &str) -> ColumnAction {
    let name = column.to_ascii_lowercase();
    if contains_any(&name, CUR_ACCOUNT_PATTERNS) {
        ColumnAction::AwsIdAnonymise
    } else if contains_any(&name, CUR_ARN_PATTERNS) {
        ColumnAction::AwsArnAnonymise
    } else if contains_any(&name, CUR_TAG_PATTERNS) {
        ColumnAction::Hash
    } else {
        ColumnAction::Keep
    }
}

/// Infers an action for every column of `schema`, in schema order.
pub fn infer_config<S: AsRef<str>>(schema: &[S], mode: InferenceMode) -> AnonymiserConfig {
    let focus_sensitive = CaseInsensitiveSet::new(FOCUS_SENSITIVE_COLUMNS);
    let mut config = AnonymiserConfig::new().with_comment(mode_comment(mode));

    for column in schema.iter().map(AsRef::as_ref) {
        let action = match mode {
            InferenceMode::Cur => infer_cur_action(column),
            InferenceMode::Focus if focus_sensitive.contains(column) => ColumnAction::Hash,
            InferenceMode::Focus | InferenceMode::KeepAll => ColumnAction::Keep,
        };
        config.set_action(column, action);
    }

    tracing::debug!(
        mode = %mode,
        columns = config.len(),
        sensitive = config
            .rules()
            .iter()
            .filter(|rule| rule.action != ColumnAction::Keep)
            .count(),
        "inferred configuration"
    );
    config
}
