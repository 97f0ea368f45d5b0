//! Batches: a slice of data plus the metadata describing how it was obtained.

mod frame;
mod reference;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::DataTable;

pub use frame::DistributedFrame;
pub use reference::SqlBatchReference;

/// How the batch was requested.
pub type BatchKwargs = IndexMap<String, Value>;

/// Parameterization of the batch request.
pub type BatchParameters = IndexMap<String, Value>;

/// The data a batch carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BatchData {
    /// Two-dimensional in-memory table.
    Table(DataTable),
    /// A plain one-dimensional sequence of values.
    Records(Vec<Value>),
    /// Reference to a relational table or query.
    Reference(SqlBatchReference),
    /// Handle to a partitioned dataframe.
    Frame(DistributedFrame),
}

impl BatchData {
    /// Name of the representation, used in mismatch errors.
    pub fn representation(&self) -> &'static str {
        match self {
            BatchData::Table(_) => "an in-memory table",
            BatchData::Records(_) => "a plain record sequence",
            BatchData::Reference(_) => "a relational batch reference",
            BatchData::Frame(_) => "a distributed dataframe",
        }
    }
}

/// Provenance information stamped on a batch when it is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMarkers {
    pub load_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

impl BatchMarkers {
    pub fn new() -> Self {
        Self {
            load_time: Utc::now(),
            fingerprint: None,
            extra: IndexMap::new(),
        }
    }

    /// Markers for freshly loaded data; in-memory tables are fingerprinted.
    pub fn for_data(data: &BatchData) -> Self {
        let mut markers = Self::new();
        if let BatchData::Table(table) = data {
            markers.fingerprint = Some(table.fingerprint());
        }
        markers
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for BatchMarkers {
    fn default() -> Self {
        Self::new()
    }
}

/// The orchestration object that issues batches and suites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContext {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<PathBuf>,
}

impl DataContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_directory: None,
        }
    }

    pub fn with_root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_directory = Some(root.into());
        self
    }
}

/// A request-scoped handle to a slice of data plus its provenance metadata.
#[derive(Debug, Clone)]
pub struct Batch {
    pub data: BatchData,
    pub batch_kwargs: BatchKwargs,
    pub batch_parameters: BatchParameters,
    pub batch_markers: BatchMarkers,
    pub data_context: Option<Arc<DataContext>>,
}

impl Batch {
    /// Create a batch with empty kwargs/parameters and fresh markers.
    pub fn new(data: BatchData) -> Self {
        let batch_markers = BatchMarkers::for_data(&data);
        Self {
            data,
            batch_kwargs: BatchKwargs::new(),
            batch_parameters: BatchParameters::new(),
            batch_markers,
            data_context: None,
        }
    }

    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.batch_kwargs.insert(key.into(), value.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.batch_parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_markers(mut self, markers: BatchMarkers) -> Self {
        self.batch_markers = markers;
        self
    }

    pub fn with_context(mut self, context: Arc<DataContext>) -> Self {
        self.data_context = Some(context);
        self
    }
}

impl From<DataTable> for BatchData {
    fn from(table: DataTable) -> Self {
        BatchData::Table(table)
    }
}

impl From<SqlBatchReference> for BatchData {
    fn from(reference: SqlBatchReference) -> Self {
        BatchData::Reference(reference)
    }
}

impl From<DistributedFrame> for BatchData {
    fn from(frame: DistributedFrame) -> Self {
        BatchData::Frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_batch_is_fingerprinted() {
        let table = DataTable::from_rows(&["a"], &[&["1"]]);
        let fingerprint = table.fingerprint();
        let batch = Batch::new(table.into());

        assert_eq!(batch.batch_markers.fingerprint, Some(fingerprint));
    }

    #[test]
    fn test_reference_batch_has_no_fingerprint() {
        let batch = Batch::new(SqlBatchReference::table("sqlite://", "t").into());
        assert!(batch.batch_markers.fingerprint.is_none());
    }

    #[test]
    fn test_builder_keeps_insertion_order() {
        let batch = Batch::new(BatchData::Records(vec![json!(1)]))
            .with_kwarg("query", "SELECT 1")
            .with_kwarg("bigquery_temp_table", "ge_temp")
            .with_parameter("run_id", 7);

        let keys: Vec<&str> = batch.batch_kwargs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["query", "bigquery_temp_table"]);
        assert_eq!(batch.batch_parameters["run_id"], 7);
    }

    #[test]
    fn test_representation_names() {
        assert_eq!(
            BatchData::Records(Vec::new()).representation(),
            "a plain record sequence"
        );
        let frame = DistributedFrame::new("f", Vec::new());
        assert_eq!(BatchData::Frame(frame).representation(), "a distributed dataframe");
    }

    #[test]
    fn test_batch_data_serde_tagging() {
        let data = BatchData::Reference(SqlBatchReference::query("sqlite://", "SELECT 1"));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "reference");
        assert_eq!(json["value"]["query"], "SELECT 1");
    }
}
