//! Engine over a relational table or query.

use std::any::Any;

use serde_json::Value;

use super::{Dataset, DatasetArgs, EngineInput, InitOptions};
use crate::engine::EngineKind;
use crate::error::{AssayError, Result};

/// Where the rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlSource {
    Table { name: String, schema: Option<String> },
    Query(String),
}

/// Relational engine. Holds connection details only; no connection is
/// opened at construction.
#[derive(Debug, Clone)]
pub struct SqlDataset {
    engine_url: String,
    source: SqlSource,
    args: DatasetArgs,
}

impl SqlDataset {
    /// Build from the `engine`, `table_name`/`custom_sql` and `schema` options.
    pub fn new(args: DatasetArgs) -> Result<Self> {
        let engine_url = string_option(&args.options, "engine")?.ok_or_else(|| {
            AssayError::InvalidOption {
                option: "engine".to_string(),
                message: "a relational engine needs a connection url".to_string(),
            }
        })?;
        let table_name = string_option(&args.options, "table_name")?;
        let custom_sql = string_option(&args.options, "custom_sql")?;
        let schema = string_option(&args.options, "schema")?;

        let source = match (table_name, custom_sql) {
            (Some(name), None) => SqlSource::Table { name, schema },
            (None, Some(query)) => SqlSource::Query(query),
            (Some(_), Some(_)) => {
                return Err(AssayError::InvalidOption {
                    option: "custom_sql".to_string(),
                    message: "cannot be combined with table_name".to_string(),
                });
            }
            (None, None) => {
                return Err(AssayError::InvalidOption {
                    option: "table_name".to_string(),
                    message: "either table_name or custom_sql is required".to_string(),
                });
            }
        };

        Ok(Self {
            engine_url,
            source,
            args,
        })
    }

    /// Registry constructor.
    pub fn construct(input: EngineInput, args: DatasetArgs) -> Result<Box<dyn Dataset>> {
        match input {
            EngineInput::Reference => Ok(Box::new(Self::new(args)?)),
            other => Err(other.mismatch(&args.class_name, EngineKind::RelationalReference)),
        }
    }

    pub fn engine_url(&self) -> &str {
        &self.engine_url
    }

    pub fn source(&self) -> &SqlSource {
        &self.source
    }

    /// SQL previewing the first `n` rows.
    pub fn head_query(&self, n: usize) -> String {
        match &self.source {
            SqlSource::Table {
                name,
                schema: Some(schema),
            } => format!("SELECT * FROM {}.{} LIMIT {}", schema, name, n),
            SqlSource::Table { name, schema: None } => {
                format!("SELECT * FROM {} LIMIT {}", name, n)
            }
            SqlSource::Query(query) => format!(
                "SELECT * FROM ({}) AS subquery LIMIT {}",
                query.trim().trim_end_matches(';'),
                n
            ),
        }
    }
}

impl Dataset for SqlDataset {
    fn kind(&self) -> EngineKind {
        EngineKind::RelationalReference
    }

    fn args(&self) -> &DatasetArgs {
        &self.args
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn string_option(options: &InitOptions, key: &str) -> Result<Option<String>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AssayError::InvalidOption {
            option: key.to_string(),
            message: format!("expected a string, got {}", other),
        }),
    }
}
