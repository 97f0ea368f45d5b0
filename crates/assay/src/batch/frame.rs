//! Distributed dataframe handles.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// A handle to a dataframe split across partitions.
///
/// Every partition shares `headers`; rows only come together on
/// [`collect`](Self::collect).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedFrame {
    pub name: String,
    pub headers: Vec<String>,
    pub partitions: Vec<Vec<Vec<String>>>,
}

impl DistributedFrame {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            partitions: Vec::new(),
        }
    }

    /// Split a table into `count` contiguous partitions (at least one).
    pub fn partitioned(name: impl Into<String>, table: &DataTable, count: usize) -> Self {
        let count = count.max(1);
        let chunk = table.row_count().div_ceil(count).max(1);
        let mut frame = Self::new(name, table.headers.clone());
        for rows in table.rows.chunks(chunk) {
            frame.partitions.push(rows.to_vec());
        }
        frame
    }

    pub fn with_partition(mut self, rows: Vec<Vec<String>>) -> Self {
        self.partitions.push(rows);
        self
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn row_count(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Concatenate all partitions into one in-memory table.
    pub fn collect(&self) -> DataTable {
        DataTable::new(
            self.headers.clone(),
            self.partitions.iter().flatten().cloned().collect(),
        )
    }
}
