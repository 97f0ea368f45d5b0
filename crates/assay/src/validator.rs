//! The validator factory: picks and builds the engine for a batch.

use serde_json::Value;
use tracing::{debug, info};

use crate::batch::{Batch, BatchData};
use crate::config::ValidatorConfig;
use crate::dataset::{Dataset, DatasetArgs, EngineInput, InitOptions};
use crate::engine::{EngineDescriptor, EngineKind, EngineRegistry, EngineType};
use crate::error::{AssayError, Result};
use crate::suite::ExpectationSuite;

/// Option extracted for distributed engines and passed explicitly.
const CACHING_OPTION: &str = "caching";

/// Binds a batch and an expectation suite to a resolved engine type.
///
/// The engine type is resolved once, in [`Validator::new`]. Each call to
/// [`get_dataset`](Validator::get_dataset) checks the batch against that type
/// and constructs a fresh engine; nothing is cached between calls and the
/// stored inputs are never modified.
///
/// # Example
///
/// ```
/// use assay::{
///     Batch, DataTable, Dataset, EngineDescriptor, ExpectationSuite, InitOptions, Validator,
/// };
///
/// let table = DataTable::from_rows(&["id", "fare"], &[&["1", "7.5"]]);
/// let validator = Validator::new(
///     Batch::new(table.into()),
///     ExpectationSuite::new("taxi"),
///     &EngineDescriptor::new("TableDataset"),
///     InitOptions::new(),
/// )
/// .unwrap();
///
/// let dataset = validator.get_dataset().unwrap();
/// assert_eq!(dataset.class_name(), "TableDataset");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    batch: Batch,
    expectation_suite: ExpectationSuite,
    engine: EngineType,
    init_options: InitOptions,
    config: ValidatorConfig,
}

impl Validator {
    /// Resolve against the global registry with default configuration.
    pub fn new(
        batch: Batch,
        expectation_suite: ExpectationSuite,
        descriptor: &EngineDescriptor,
        init_options: InitOptions,
    ) -> Result<Self> {
        Self::with_registry(
            batch,
            expectation_suite,
            descriptor,
            init_options,
            EngineRegistry::global(),
            ValidatorConfig::default(),
        )
    }

    /// Resolve against a caller-supplied registry and configuration.
    pub fn with_registry(
        batch: Batch,
        expectation_suite: ExpectationSuite,
        descriptor: &EngineDescriptor,
        init_options: InitOptions,
        registry: &EngineRegistry,
        config: ValidatorConfig,
    ) -> Result<Self> {
        let engine = registry
            .resolve(descriptor, &config.default_module)?
            .clone();

        Ok(Self {
            batch,
            expectation_suite,
            engine,
            init_options,
            config,
        })
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn expectation_suite(&self) -> &ExpectationSuite {
        &self.expectation_suite
    }

    pub fn engine_type(&self) -> &EngineType {
        &self.engine
    }

    pub fn init_options(&self) -> &InitOptions {
        &self.init_options
    }

    /// Check the batch against the resolved engine type and construct it.
    pub fn get_dataset(&self) -> Result<Box<dyn Dataset>> {
        let kind = self.engine.kind().ok_or_else(|| AssayError::Unsupported {
            class_name: self.engine.qualified_name(),
        })?;
        debug!(
            engine = %self.engine.qualified_name(),
            kind = %kind,
            "Dispatching batch to engine"
        );

        let data = &self.batch.data;
        if !kind.accepts(data) {
            return Err(self.mismatch(kind, data));
        }

        // `data` matches `kind` from here on.
        let mut options = self.init_options.clone();
        let input = match data {
            BatchData::Table(table) => EngineInput::Table(table.clone()),
            BatchData::Reference(reference) => {
                let mut merged = reference.init_options()?;
                merged.extend(options);
                options = merged;
                EngineInput::Reference
            }
            BatchData::Frame(frame) => {
                let caching = take_caching(&mut options, self.config.default_caching)?;
                EngineInput::Frame {
                    frame: frame.clone(),
                    caching,
                }
            }
            BatchData::Records(_) => return Err(self.mismatch(kind, data)),
        };

        let args = DatasetArgs {
            class_name: self.engine.class_name().to_string(),
            expectation_suite: self.expectation_suite.clone(),
            batch_kwargs: self.batch.batch_kwargs.clone(),
            batch_parameters: self.batch.batch_parameters.clone(),
            batch_markers: self.batch.batch_markers.clone(),
            data_context: self.batch.data_context.clone(),
            options,
        };

        let dataset = self.engine.construct(input, args)?;
        info!(
            engine = %self.engine.qualified_name(),
            kind = %kind,
            suite = %self.expectation_suite.name,
            "Constructed validation engine"
        );
        Ok(dataset)
    }

    fn mismatch(&self, kind: EngineKind, data: &BatchData) -> AssayError {
        AssayError::TypeMismatch {
            engine: self.engine.class_name().to_string(),
            kind,
            expected: kind.required_representation(),
            found: data.representation(),
        }
    }
}

/// Remove `caching` from the options bag, defaulting when absent.
fn take_caching(options: &mut InitOptions, default: bool) -> Result<bool> {
    match options.shift_remove(CACHING_OPTION) {
        None => Ok(default),
        Some(Value::Bool(caching)) => Ok(caching),
        Some(other) => Err(AssayError::InvalidOption {
            option: CACHING_OPTION.to_string(),
            message: format!("expected a boolean, got {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{DistributedFrame, SqlBatchReference};
    use crate::input::DataTable;
    use serde_json::json;

    fn frame_batch() -> Batch {
        let table = DataTable::from_rows(&["id"], &[&["1"], &["2"]]);
        Batch::new(DistributedFrame::partitioned("trips", &table, 2).into())
    }

    #[test]
    fn test_take_caching() {
        let mut options = InitOptions::new();
        assert!(take_caching(&mut options, true).unwrap());
        assert!(!take_caching(&mut options, false).unwrap());

        options.insert("caching".to_string(), json!(false));
        options.insert("other".to_string(), json!(1));
        assert!(!take_caching(&mut options, true).unwrap());
        assert!(!options.contains_key("caching"));
        assert!(options.contains_key("other"));

        options.insert("caching".to_string(), json!("yes"));
        assert!(take_caching(&mut options, true).is_err());
    }

    #[test]
    fn test_config_default_caching_applies() {
        let validator = Validator::with_registry(
            frame_batch(),
            ExpectationSuite::new("s"),
            &EngineDescriptor::new("FrameDataset"),
            InitOptions::new(),
            EngineRegistry::global(),
            ValidatorConfig::default().with_default_caching(false),
        )
        .unwrap();

        let dataset = validator.get_dataset().unwrap();
        let frame = dataset
            .downcast_ref::<crate::dataset::FrameDataset>()
            .unwrap();
        assert!(!frame.caching());
    }

    #[test]
    fn test_custom_default_module() {
        let config = ValidatorConfig::default().with_default_module("plugins");
        let err = Validator::with_registry(
            frame_batch(),
            ExpectationSuite::new("s"),
            &EngineDescriptor::new("FrameDataset"),
            InitOptions::new(),
            EngineRegistry::global(),
            config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AssayError::Resolution { ref module_name, .. } if module_name == "plugins"
        ));
    }

    #[test]
    fn test_invalid_reference_propagates() {
        let mut reference = SqlBatchReference::table("sqlite://", "t");
        reference.query = Some("SELECT 1".to_string());
        let validator = Validator::new(
            Batch::new(reference.into()),
            ExpectationSuite::new("s"),
            &EngineDescriptor::new("SqlDataset"),
            InitOptions::new(),
        )
        .unwrap();

        assert!(matches!(
            validator.get_dataset(),
            Err(AssayError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_records_batch_rejected_by_every_builtin() {
        let records = || Batch::new(BatchData::Records(vec![json!({"id": 1})]));

        for class_name in ["TableDataset", "SqlDataset", "FrameDataset"] {
            let validator = Validator::new(
                records(),
                ExpectationSuite::new("s"),
                &EngineDescriptor::new(class_name),
                InitOptions::new(),
            )
            .unwrap();

            let kind = validator.engine_type().kind().unwrap();
            assert!(!kind.accepts(&validator.batch().data));
            match validator.get_dataset().unwrap_err() {
                AssayError::TypeMismatch {
                    engine,
                    kind: reported,
                    found,
                    ..
                } => {
                    assert_eq!(engine, class_name);
                    assert_eq!(reported, kind);
                    assert_eq!(found, validator.batch().data.representation());
                }
                other => panic!("expected a type mismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_mismatch_message_names_representation_and_variant() {
        let validator = Validator::new(
            frame_batch(),
            ExpectationSuite::new("s"),
            &EngineDescriptor::new("TableDataset"),
            InitOptions::new(),
        )
        .unwrap();

        let message = validator.get_dataset().unwrap_err().to_string();
        assert_eq!(
            message,
            "TableDataset (in-memory table) requires an in-memory table for its batch, \
             found a distributed dataframe"
        );
    }
}
