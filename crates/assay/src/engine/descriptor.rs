//! Engine descriptors: which engine type a caller is asking for.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

static CLASS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static MODULE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap());

/// Names a validation-engine type, optionally qualified by a module.
///
/// When `module_name` is absent, the resolving registry's default module is
/// used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineDescriptor {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

impl EngineDescriptor {
    /// Descriptor resolved against the default module.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            module_name: None,
        }
    }

    /// Descriptor with an explicit module.
    pub fn in_module(module_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            module_name: Some(module_name.into()),
        }
    }

    /// Parse `Class` or `some.module.Class`.
    pub fn parse(qualified: &str) -> Result<Self> {
        let qualified = qualified.trim();
        let descriptor = match qualified.rsplit_once('.') {
            Some((module, class)) => Self::in_module(module, class),
            None => Self::new(qualified),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check both identifiers are well formed.
    pub fn validate(&self) -> Result<()> {
        if !CLASS_NAME.is_match(&self.class_name) {
            return Err(AssayError::InvalidDescriptor(format!(
                "'{}' is not a valid class name",
                self.class_name
            )));
        }
        if let Some(ref module) = self.module_name {
            if !MODULE_NAME.is_match(module) {
                return Err(AssayError::InvalidDescriptor(format!(
                    "'{}' is not a valid module name",
                    module
                )));
            }
        }
        Ok(())
    }

    /// The module to resolve in, falling back to `default_module`.
    pub fn module_or<'a>(&'a self, default_module: &'a str) -> &'a str {
        self.module_name.as_deref().unwrap_or(default_module)
    }

    /// `module.Class`, using `default_module` when no module was given.
    pub fn qualified_name(&self, default_module: &str) -> String {
        format!("{}.{}", self.module_or(default_module), self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_class() {
        let d = EngineDescriptor::parse("TableDataset").unwrap();
        assert_eq!(d.class_name, "TableDataset");
        assert!(d.module_name.is_none());
        assert_eq!(d.qualified_name("assay.dataset"), "assay.dataset.TableDataset");
    }

    #[test]
    fn test_parse_qualified() {
        let d = EngineDescriptor::parse("plugins.custom.FastTable").unwrap();
        assert_eq!(d.module_name.as_deref(), Some("plugins.custom"));
        assert_eq!(d.class_name, "FastTable");
        assert_eq!(d.module_or("assay.dataset"), "plugins.custom");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(EngineDescriptor::parse("").is_err());
        assert!(EngineDescriptor::parse("mod.").is_err());
        assert!(EngineDescriptor::parse("1Bad").is_err());
        assert!(EngineDescriptor::parse(".Class").is_err());
        assert!(EngineDescriptor::parse("a..b.Class").is_err());
    }

    #[test]
    fn test_deserialize_from_config_shape() {
        let d: EngineDescriptor =
            serde_json::from_str(r#"{"class_name": "SqlDataset"}"#).unwrap();
        assert_eq!(d, EngineDescriptor::new("SqlDataset"));
    }
}
