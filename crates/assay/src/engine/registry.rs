//! Registry mapping engine names to constructors.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::descriptor::EngineDescriptor;
use super::kind::EngineKind;
use crate::dataset::{Dataset, DatasetArgs, EngineInput, FrameDataset, SqlDataset, TableDataset};
use crate::error::{AssayError, Result};

/// Module the built-in engines are registered under.
pub const DEFAULT_MODULE: &str = "assay.dataset";

/// Builds an engine from its per-capability payload and forwarded arguments.
pub type Constructor = fn(EngineInput, DatasetArgs) -> Result<Box<dyn Dataset>>;

static GLOBAL: Lazy<EngineRegistry> = Lazy::new(EngineRegistry::with_builtins);

/// A registered engine type.
#[derive(Debug, Clone)]
pub struct EngineType {
    module_name: String,
    class_name: String,
    capabilities: Vec<EngineKind>,
    constructor: Constructor,
}

impl EngineType {
    pub fn new(
        module_name: impl Into<String>,
        class_name: impl Into<String>,
        capabilities: &[EngineKind],
        constructor: Constructor,
    ) -> Self {
        let mut deduped = Vec::with_capacity(capabilities.len());
        for kind in capabilities {
            if !deduped.contains(kind) {
                deduped.push(*kind);
            }
        }
        Self {
            module_name: module_name.into(),
            class_name: class_name.into(),
            capabilities: deduped,
            constructor,
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module_name, self.class_name)
    }

    pub fn capabilities(&self) -> &[EngineKind] {
        &self.capabilities
    }

    pub fn satisfies(&self, kind: EngineKind) -> bool {
        self.capabilities.contains(&kind)
    }

    /// The variant this type dispatches as: the first capability it
    /// satisfies in [`EngineKind::PRIORITY`] order, regardless of the order
    /// capabilities were declared in.
    pub fn kind(&self) -> Option<EngineKind> {
        EngineKind::PRIORITY
            .into_iter()
            .find(|kind| self.satisfies(*kind))
    }

    /// Run the registered constructor.
    pub fn construct(&self, input: EngineInput, args: DatasetArgs) -> Result<Box<dyn Dataset>> {
        (self.constructor)(input, args)
    }
}

/// Explicit `(module, class) -> engine type` map.
#[derive(Debug, Clone, Default)]
pub struct EngineRegistry {
    engines: HashMap<(String, String), EngineType>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in engines under [`DEFAULT_MODULE`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for engine in builtin_engines() {
            registry.insert(engine);
        }
        registry
    }

    /// Process-wide registry of the built-in engines, built on first use.
    pub fn global() -> &'static EngineRegistry {
        &GLOBAL
    }

    /// Add an engine type, replacing any previous type under the same name.
    ///
    /// Types declaring no capability could never be dispatched and are
    /// rejected.
    pub fn register(&mut self, engine: EngineType) -> Result<()> {
        if engine.capabilities.is_empty() {
            return Err(AssayError::Unsupported {
                class_name: engine.qualified_name(),
            });
        }
        self.insert(engine);
        Ok(())
    }

    fn insert(&mut self, engine: EngineType) {
        let key = (engine.module_name.clone(), engine.class_name.clone());
        if self.engines.contains_key(&key) {
            warn!(engine = %engine.qualified_name(), "Replacing registered engine type");
        }
        self.engines.insert(key, engine);
    }

    /// Look up the engine type a descriptor names.
    pub fn resolve(
        &self,
        descriptor: &EngineDescriptor,
        default_module: &str,
    ) -> Result<&EngineType> {
        let module_name = descriptor.module_or(default_module);
        let key = (module_name.to_string(), descriptor.class_name.clone());

        match self.engines.get(&key) {
            Some(engine) => {
                debug!(
                    module_name,
                    class_name = %descriptor.class_name,
                    "Resolved engine type"
                );
                Ok(engine)
            }
            None => Err(AssayError::Resolution {
                module_name: module_name.to_string(),
                class_name: descriptor.class_name.clone(),
            }),
        }
    }

    pub fn contains(&self, module_name: &str, class_name: &str) -> bool {
        self.engines
            .contains_key(&(module_name.to_string(), class_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Registered qualified names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.values().map(EngineType::qualified_name).collect();
        names.sort();
        names
    }
}

fn builtin_engines() -> [EngineType; 3] {
    [
        EngineType::new(
            DEFAULT_MODULE,
            "TableDataset",
            &[EngineKind::InMemoryTable],
            TableDataset::construct,
        ),
        EngineType::new(
            DEFAULT_MODULE,
            "SqlDataset",
            &[EngineKind::RelationalReference],
            SqlDataset::construct,
        ),
        EngineType::new(
            DEFAULT_MODULE,
            "FrameDataset",
            &[EngineKind::DistributedFrame],
            FrameDataset::construct,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = EngineRegistry::with_builtins();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.names(),
            vec![
                "assay.dataset.FrameDataset",
                "assay.dataset.SqlDataset",
                "assay.dataset.TableDataset"
            ]
        );
    }

    #[test]
    fn test_resolve_uses_default_module() {
        let registry = EngineRegistry::with_builtins();
        let engine = registry
            .resolve(&EngineDescriptor::new("SqlDataset"), DEFAULT_MODULE)
            .unwrap();
        assert_eq!(engine.kind(), Some(EngineKind::RelationalReference));
    }

    #[test]
    fn test_resolve_unknown_class() {
        let registry = EngineRegistry::with_builtins();
        let err = registry
            .resolve(&EngineDescriptor::new("PandasDataset"), DEFAULT_MODULE)
            .unwrap_err();
        assert!(err.is_resolution());
    }

    #[test]
    fn test_resolve_wrong_module() {
        let registry = EngineRegistry::with_builtins();
        let descriptor = EngineDescriptor::in_module("elsewhere", "TableDataset");
        assert!(registry.resolve(&descriptor, DEFAULT_MODULE).is_err());
    }

    #[test]
    fn test_kind_follows_priority_not_declaration_order() {
        let engine = EngineType::new(
            "plugins",
            "Hybrid",
            &[EngineKind::DistributedFrame, EngineKind::RelationalReference],
            SqlDataset::construct,
        );
        assert_eq!(engine.kind(), Some(EngineKind::RelationalReference));
        assert_eq!(engine.capabilities().len(), 2);
    }

    #[test]
    fn test_register_rejects_capability_less_type() {
        let mut registry = EngineRegistry::new();
        let err = registry
            .register(EngineType::new("plugins", "Nothing", &[], TableDataset::construct))
            .unwrap_err();
        assert!(matches!(err, AssayError::Unsupported { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = EngineRegistry::with_builtins();
        registry
            .register(EngineType::new(
                DEFAULT_MODULE,
                "TableDataset",
                &[EngineKind::DistributedFrame],
                FrameDataset::construct,
            ))
            .unwrap();
        assert_eq!(registry.len(), 3);
        let engine = registry
            .resolve(&EngineDescriptor::new("TableDataset"), DEFAULT_MODULE)
            .unwrap();
        assert_eq!(engine.kind(), Some(EngineKind::DistributedFrame));
    }

    #[test]
    fn test_global_registry() {
        assert!(EngineRegistry::global().contains(DEFAULT_MODULE, "FrameDataset"));
    }
}
