//! Column actions accepted in the anonymiser configuration.

use std::fmt;

/// Action applied to one configured column.
///
/// The set is closed: configuration documents naming any other keyword are
/// rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnAction {
    /// Emit the column unchanged.
    Keep,
    /// Omit the column from the output.
    Remove,
    /// Emit a deterministic one-way digest of each value.
    Hash,
    /// Emit a deterministic name-based (v5) UUID of each value.
    Uuid,
    /// Emit a deterministic fake 12-digit account identifier.
    AwsIdAnonymise,
    /// Rewrite the account segment of an ARN with the fake account identifier.
    AwsArnAnonymise,
}

impl ColumnAction {
    /// Every action, in the order they are documented.
    pub const ALL: [ColumnAction; 6] = [
        Self::Keep,
        Self::Remove,
        Self::Hash,
        Self::Uuid,
        Self::AwsIdAnonymise,
        Self::AwsArnAnonymise,
    ];

    /// Keyword used for this action in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Remove => "remove",
            Self::Hash => "hash",
            Self::Uuid => "uuid",
            Self::AwsIdAnonymise => "awsid_anonymise",
            Self::AwsArnAnonymise => "awsarn_anonymise",
        }
    }

    /// Parses a configuration keyword. Matching is exact.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == keyword)
    }

    /// One-line description shown in generated configs and `actions` output.
    pub fn description(self) -> &'static str {
        match self {
            Self::Keep => "Keep the column as is",
            Self::Remove => "Remove the column from the output",
            Self::Hash => "Replace values with a fixed-width numeric digest (same input = same output, not reversible)",
            Self::Uuid => "Replace values with a deterministic v5 UUID (same input = same output, not reversible)",
            Self::AwsIdAnonymise => "Anonymise as AWS account ID (12-digit fake, consistent)",
            Self::AwsArnAnonymise => "Anonymise as AWS ARN, using the fake account ID",
        }
    }

    /// Whether the column appears in the output at all.
    pub fn is_retained(self) -> bool {
        !matches!(self, Self::Remove)
    }
}

impl fmt::Display for ColumnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_parse_back() {
        for action in ColumnAction::ALL {
            assert_eq!(ColumnAction::from_keyword(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        assert_eq!(ColumnAction::from_keyword("notanaction"), None);
        assert_eq!(ColumnAction::from_keyword("Keep"), None);
        assert_eq!(ColumnAction::from_keyword(""), None);
    }

    #[test]
    fn test_only_remove_is_dropped() {
        let dropped: Vec<_> = ColumnAction::ALL
            .into_iter()
            .filter(|action| !action.is_retained())
            .collect();
        assert_eq!(dropped, vec![ColumnAction::Remove]);
    }
}
