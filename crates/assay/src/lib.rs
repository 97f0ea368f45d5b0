//! Assay: dispatches data batches to the matching validation engine.
//!
//! A [`Validator`] takes a [`Batch`], an [`ExpectationSuite`] and an
//! [`EngineDescriptor`], resolves the descriptor through an
//! [`EngineRegistry`], checks the batch carries the data representation the
//! engine needs, and builds the engine.
//!
//! # Engine capabilities
//!
//! Every registered engine type declares one or more [`EngineKind`]s:
//!
//! - **In-memory table**: the batch must hold a [`DataTable`]
//! - **Relational reference**: the batch must hold a [`SqlBatchReference`];
//!   its derived options are merged under the caller's options
//! - **Distributed dataframe**: the batch must hold a [`DistributedFrame`];
//!   `caching` is pulled out of the options and passed explicitly
//!
//! A type declaring several capabilities dispatches as the first one in
//! [`EngineKind::PRIORITY`].
//!
//! # Example
//!
//! ```
//! use assay::{Batch, Dataset, EngineDescriptor, ExpectationSuite, InitOptions,
//!             SqlBatchReference, SqlDataset, Validator};
//!
//! let reference = SqlBatchReference::table("sqlite:///taxi.db", "taxi_data");
//! let validator = Validator::new(
//!     Batch::new(reference.into()),
//!     ExpectationSuite::new("taxi_suite"),
//!     &EngineDescriptor::new("SqlDataset"),
//!     InitOptions::new(),
//! )?;
//!
//! let dataset = validator.get_dataset()?;
//! let sql = dataset.downcast_ref::<SqlDataset>().unwrap();
//! assert_eq!(sql.head_query(5), "SELECT * FROM taxi_data LIMIT 5");
//! # Ok::<(), assay::AssayError>(())
//! ```

pub mod batch;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod input;
pub mod suite;

mod validator;

pub use batch::{
    Batch, BatchData, BatchKwargs, BatchMarkers, BatchParameters, DataContext, DistributedFrame,
    SqlBatchReference,
};
pub use config::{ValidatorConfig, WarehouseConfig};
pub use dataset::{
    Dataset, DatasetArgs, EngineInput, FrameDataset, InitOptions, SqlDataset, SqlSource,
    TableDataset,
};
pub use engine::{Constructor, DEFAULT_MODULE, EngineDescriptor, EngineKind, EngineRegistry, EngineType};
pub use error::{AssayError, Result};
pub use input::{DataTable, ReaderConfig, TableReader};
pub use suite::{ExpectationConfiguration, ExpectationSuite};
pub use validator::Validator;
