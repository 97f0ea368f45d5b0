//! Factory configuration and environment-driven warehouse settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::DEFAULT_MODULE;
use crate::error::{AssayError, Result};

/// Configuration for the validator factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Module searched when a descriptor names no module.
    pub default_module: String,
    /// `caching` value for distributed engines when the caller gives none.
    pub default_caching: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_module: DEFAULT_MODULE.to_string(),
            default_caching: true,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_module(mut self, module: impl Into<String>) -> Self {
        self.default_module = module.into();
        self
    }

    pub fn with_default_caching(mut self, caching: bool) -> Self {
        self.default_caching = caching;
        self
    }
}

/// Connection settings for a cloud warehouse, read from the environment.
///
/// | Variable | Required |
/// |---|---|
/// | `GCP_PROJECT` | yes |
/// | `GCP_BIGQUERY_DATASET` | yes |
/// | `GCP_CREDENTIALS` | no (service-account JSON) |
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseConfig {
    pub project: String,
    pub dataset: String,
    pub credentials: Option<Value>,
}

impl WarehouseConfig {
    pub const PROJECT_VAR: &'static str = "GCP_PROJECT";
    pub const DATASET_VAR: &'static str = "GCP_BIGQUERY_DATASET";
    pub const CREDENTIALS_VAR: &'static str = "GCP_CREDENTIALS";

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    AssayError::Config(format!("{} environment variable not set", key))
                })
        };

        let project = required(Self::PROJECT_VAR)?;
        let dataset = required(Self::DATASET_VAR)?;
        let credentials = match lookup(Self::CREDENTIALS_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(serde_json::from_str(&raw)?),
            _ => None,
        };

        Ok(Self {
            project,
            dataset,
            credentials,
        })
    }

    /// `bigquery://{project}/{dataset}`
    pub fn connection_string(&self) -> String {
        format!("bigquery://{}/{}", self.project, self.dataset)
    }
}
