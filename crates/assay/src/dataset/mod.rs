//! Validation engines constructed by the factory.
//!
//! Every engine wraps one data representation together with the expectation
//! suite and the batch metadata it was built from. The three built-in engines
//! cover one capability each:
//!
//! - [`TableDataset`] - in-memory tables
//! - [`SqlDataset`] - relational references
//! - [`FrameDataset`] - distributed dataframes

mod frame;
mod sql;
mod table;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::batch::{BatchKwargs, BatchMarkers, BatchParameters, DataContext, DistributedFrame};
use crate::engine::EngineKind;
use crate::error::AssayError;
use crate::input::DataTable;
use crate::suite::ExpectationSuite;

pub use frame::FrameDataset;
pub use sql::{SqlDataset, SqlSource};
pub use table::TableDataset;

/// Open-ended initialization options passed to an engine.
pub type InitOptions = IndexMap<String, Value>;

/// Arguments forwarded to every engine constructor.
#[derive(Debug, Clone)]
pub struct DatasetArgs {
    /// Class name the engine was registered and resolved under.
    pub class_name: String,
    pub expectation_suite: ExpectationSuite,
    pub batch_kwargs: BatchKwargs,
    pub batch_parameters: BatchParameters,
    pub batch_markers: BatchMarkers,
    pub data_context: Option<Arc<DataContext>>,
    /// Effective options after merging and extraction.
    pub options: InitOptions,
}

/// The data handed to a constructor, shaped per capability.
///
/// Relational engines get no payload: everything they need was merged into
/// [`DatasetArgs::options`] from the batch reference.
#[derive(Debug, Clone)]
pub enum EngineInput {
    Table(DataTable),
    Reference,
    Frame { frame: DistributedFrame, caching: bool },
}

impl EngineInput {
    pub fn kind(&self) -> EngineKind {
        match self {
            EngineInput::Table(_) => EngineKind::InMemoryTable,
            EngineInput::Reference => EngineKind::RelationalReference,
            EngineInput::Frame { .. } => EngineKind::DistributedFrame,
        }
    }

    /// Mismatch error for a constructor that received the wrong payload.
    pub(crate) fn mismatch(&self, class_name: &str, wanted: EngineKind) -> AssayError {
        AssayError::TypeMismatch {
            engine: class_name.to_string(),
            kind: wanted,
            expected: wanted.required_representation(),
            found: self.kind().required_representation(),
        }
    }
}

/// A constructed validation engine.
pub trait Dataset: fmt::Debug {
    /// The capability this engine was constructed for.
    fn kind(&self) -> EngineKind;

    /// Arguments the engine was constructed with.
    fn args(&self) -> &DatasetArgs;

    /// Downcast support for reaching engine-specific operations.
    fn as_any(&self) -> &dyn Any;

    fn class_name(&self) -> &str {
        &self.args().class_name
    }

    fn expectation_suite(&self) -> &ExpectationSuite {
        &self.args().expectation_suite
    }

    fn batch_kwargs(&self) -> &BatchKwargs {
        &self.args().batch_kwargs
    }

    fn batch_parameters(&self) -> &BatchParameters {
        &self.args().batch_parameters
    }

    fn batch_markers(&self) -> &BatchMarkers {
        &self.args().batch_markers
    }

    fn data_context(&self) -> Option<&Arc<DataContext>> {
        self.args().data_context.as_ref()
    }

    fn options(&self) -> &InitOptions {
        &self.args().options
    }
}

impl<'a> dyn Dataset + 'a {
    /// Borrow the engine as its concrete type.
    pub fn downcast_ref<T: Dataset + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Dataset + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

#[cfg(test)]
pub(crate) fn test_args(class_name: &str) -> DatasetArgs {
    DatasetArgs {
        class_name: class_name.to_string(),
        expectation_suite: ExpectationSuite::new("test_suite"),
        batch_kwargs: BatchKwargs::new(),
        batch_parameters: BatchParameters::new(),
        batch_markers: BatchMarkers::new(),
        data_context: None,
        options: InitOptions::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::SqlBatchReference;

    fn preview_query(dataset: &dyn Dataset) -> Option<String> {
        dataset.downcast_ref::<SqlDataset>().map(|sql| sql.head_query(5))
    }

    fn is_table(dataset: &dyn Dataset) -> bool {
        dataset.is::<TableDataset>()
    }

    #[test]
    fn test_downcast_through_borrowed_trait_object() {
        let mut args = test_args("SqlDataset");
        args.options = SqlBatchReference::table("sqlite://", "trips")
            .init_options()
            .unwrap();
        let boxed = SqlDataset::construct(EngineInput::Reference, args).unwrap();

        assert_eq!(
            preview_query(boxed.as_ref()).as_deref(),
            Some("SELECT * FROM trips LIMIT 5")
        );
        assert!(!is_table(boxed.as_ref()));

        let table = DataTable::from_rows(&["id"], &[&["1"]]);
        let boxed =
            TableDataset::construct(EngineInput::Table(table), test_args("TableDataset")).unwrap();
        assert!(is_table(boxed.as_ref()));
        assert_eq!(preview_query(boxed.as_ref()), None);
    }
}
