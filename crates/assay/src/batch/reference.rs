//! Relational batch references.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::InitOptions;
use crate::error::{AssayError, Result};

/// Points at a relational table or query instead of holding rows.
///
/// Exactly one of `table_name` and `query` must be set for
/// [`init_options`](Self::init_options) to succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlBatchReference {
    /// Connection URL of the database engine (e.g. `bigquery://project/dataset`).
    pub engine_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl SqlBatchReference {
    /// Reference a whole table.
    pub fn table(engine_url: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            engine_url: engine_url.into(),
            table_name: Some(table_name.into()),
            query: None,
            schema: None,
        }
    }

    /// Reference the result of a query.
    pub fn query(engine_url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            engine_url: engine_url.into(),
            table_name: None,
            query: Some(query.into()),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Engine-specific initialization options derived from this reference.
    pub fn init_options(&self) -> Result<InitOptions> {
        let mut options = InitOptions::new();
        options.insert("engine".to_string(), Value::String(self.engine_url.clone()));

        match (&self.table_name, &self.query) {
            (Some(_), Some(_)) => {
                return Err(AssayError::InvalidReference(
                    "both table_name and query were provided".to_string(),
                ));
            }
            (Some(table), None) => {
                options.insert("table_name".to_string(), Value::String(table.clone()));
            }
            (None, Some(query)) => {
                options.insert("custom_sql".to_string(), Value::String(query.clone()));
            }
            (None, None) => {
                return Err(AssayError::InvalidReference(
                    "either table_name or query must be provided".to_string(),
                ));
            }
        }

        if let Some(ref schema) = self.schema {
            options.insert("schema".to_string(), Value::String(schema.clone()));
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_reference_options() {
        let reference = SqlBatchReference::table("sqlite://", "taxi_data").with_schema("main");
        let options = reference.init_options().unwrap();

        assert_eq!(options["engine"], "sqlite://");
        assert_eq!(options["table_name"], "taxi_data");
        assert_eq!(options["schema"], "main");
        assert!(!options.contains_key("custom_sql"));
    }

    #[test]
    fn test_query_reference_options() {
        let reference = SqlBatchReference::query("sqlite://", "SELECT 1");
        let options = reference.init_options().unwrap();

        assert_eq!(options["custom_sql"], "SELECT 1");
        assert!(!options.contains_key("table_name"));
        assert!(!options.contains_key("schema"));
    }

    #[test]
    fn test_table_and_query_rejected() {
        let mut reference = SqlBatchReference::table("sqlite://", "t");
        reference.query = Some("SELECT 1".to_string());
        assert!(matches!(
            reference.init_options(),
            Err(AssayError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_neither_table_nor_query_rejected() {
        let mut reference = SqlBatchReference::table("sqlite://", "t");
        reference.table_name = None;
        assert!(reference.init_options().is_err());
    }
}
