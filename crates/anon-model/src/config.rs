//! Anonymiser configuration document.
//!
//! The on-disk format is a JSON object:
//!
//! ```json
//! {
//!   "_comment": "free text",
//!   "columns": { "bill_payer_account_id": "awsid_anonymise", "product_region_code": "keep" }
//! }
//! ```
//!
//! Column order in `columns` is significant (it decides which account-id
//! column an ARN column binds to), so it is preserved on load and save.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::ColumnAction;
use crate::error::{ConfigError, Result};

/// One configured column and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    pub column: String,
    pub action: ColumnAction,
}

/// Per-column actions plus an optional free-text annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymiserConfig {
    /// Free-text annotation stored as `_comment`.
    pub comment: Option<String>,
    rules: Vec<ColumnRule>,
}

/// Serialized shape of the configuration file.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    columns: Map<String, Value>,
}

impl AnonymiserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>, action: ColumnAction) -> Self {
        self.set_action(column, action);
        self
    }

    /// Sets the action for a column. An existing entry keeps its position.
    pub fn set_action(&mut self, column: impl Into<String>, action: ColumnAction) {
        let column = column.into();
        if let Some(rule) = self.rules.iter_mut().find(|rule| rule.column == column) {
            rule.action = action;
        } else {
            self.rules.push(ColumnRule { column, action });
        }
    }

    /// Configured columns in declaration order.
    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    pub fn action_for(&self, column: &str) -> Option<ColumnAction> {
        self.rules
            .iter()
            .find(|rule| rule.column == column)
            .map(|rule| rule.action)
    }

    /// Columns configured with the given action, in declaration order.
    pub fn columns_with(&self, action: ColumnAction) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(move |rule| rule.action == action)
            .map(|rule| rule.column.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] for invalid JSON or a missing or
    /// non-object `columns` field, [`ConfigError::InvalidActionValue`] when an
    /// action is not a string and [`ConfigError::UnrecognizedAction`] for
    /// keywords outside the supported set.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: ConfigDocument = serde_json::from_str(text)?;
        let mut config = Self {
            comment: document.comment,
            rules: Vec::with_capacity(document.columns.len()),
        };
        for (column, value) in document.columns {
            let Value::String(keyword) = value else {
                return Err(ConfigError::InvalidActionValue { column });
            };
            let Some(action) = ColumnAction::from_keyword(&keyword) else {
                return Err(ConfigError::UnrecognizedAction {
                    column,
                    action: keyword,
                });
            };
            config.rules.push(ColumnRule { column, action });
        }
        Ok(config)
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let columns: Map<String, Value> = self
            .rules
            .iter()
            .map(|rule| {
                (
                    rule.column.clone(),
                    Value::String(rule.action.as_str().to_string()),
                )
            })
            .collect();
        let document = ConfigDocument {
            comment: self.comment.clone(),
            columns,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

/// Loads a configuration file.
pub fn load_config(path: &Path) -> Result<AnonymiserConfig> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let config = AnonymiserConfig::from_json_str(&text)?;
    tracing::debug!(
        path = %path.display(),
        columns = config.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Writes a configuration file, creating the parent directory if needed.
pub fn save_config(config: &AnonymiserConfig, path: &Path) -> Result<()> {
    let mut text = config.to_json_string()?;
    text.push('\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            operation: "create directory for",
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ConfigError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), columns = config.len(), "wrote configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_declaration_order() {
        let config = AnonymiserConfig::from_json_str(
            r#"{"_comment": "x", "columns": {"b": "keep", "a": "hash", "c": "remove"}}"#,
        )
        .unwrap();
        let names: Vec<&str> = config.rules().iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(config.comment.as_deref(), Some("x"));
        assert_eq!(config.action_for("a"), Some(ColumnAction::Hash));
    }

    #[test]
    fn test_comment_is_optional() {
        let config = AnonymiserConfig::from_json_str(r#"{"columns": {}}"#).unwrap();
        assert!(config.comment.is_none());
        assert!(config.is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for bad in ["{bad json", "", r#"{"columns": "notadict"}"#, r#"{"_comment": "no columns"}"#] {
            let err = AnonymiserConfig::from_json_str(bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::Malformed { .. }),
                "expected malformed for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_unrecognized_action() {
        let err = AnonymiserConfig::from_json_str(r#"{"columns": {"col": "notanaction"}}"#)
            .unwrap_err();
        match err {
            ConfigError::UnrecognizedAction { column, action } => {
                assert_eq!(column, "col");
                assert_eq!(action, "notanaction");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_string_action() {
        let err = AnonymiserConfig::from_json_str(r#"{"columns": {"col": 1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidActionValue { .. }));
    }

    #[test]
    fn test_set_action_keeps_position() {
        let mut config = AnonymiserConfig::new()
            .with_column("a", ColumnAction::Keep)
            .with_column("b", ColumnAction::Keep);
        config.set_action("a", ColumnAction::Uuid);
        assert_eq!(config.rules()[0].column, "a");
        assert_eq!(config.rules()[0].action, ColumnAction::Uuid);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_json_text_layout() {
        let config = AnonymiserConfig::new()
            .with_comment("note")
            .with_column("z", ColumnAction::AwsIdAnonymise)
            .with_column("a", ColumnAction::Keep);
        let text = config.to_json_string().unwrap();
        assert_eq!(
            text,
            "{\n  \"_comment\": \"note\",\n  \"columns\": {\n    \"z\": \"awsid_anonymise\",\n    \"a\": \"keep\"\n  }\n}"
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AnonymiserConfig::new()
            .with_comment("generated")
            .with_column("line_item_usage_account_id", ColumnAction::AwsIdAnonymise)
            .with_column("line_item_resource_id", ColumnAction::AwsArnAnonymise)
            .with_column("resource_tags", ColumnAction::Hash);
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { operation: "read", .. }));
    }
}
