//! Capability variants a validation engine can belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::batch::BatchData;

/// The closed set of engine capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Evaluates expectations against a two-dimensional in-memory table.
    InMemoryTable,
    /// Evaluates expectations by issuing SQL against a referenced table or query.
    RelationalReference,
    /// Evaluates expectations against a partitioned dataframe.
    DistributedFrame,
}

impl EngineKind {
    /// Dispatch order. An engine type with several capabilities is treated as
    /// the first one listed here.
    pub const PRIORITY: [EngineKind; 3] = [
        EngineKind::InMemoryTable,
        EngineKind::RelationalReference,
        EngineKind::DistributedFrame,
    ];

    /// The batch representation this variant requires.
    pub fn required_representation(&self) -> &'static str {
        match self {
            EngineKind::InMemoryTable => "an in-memory table",
            EngineKind::RelationalReference => "a relational batch reference",
            EngineKind::DistributedFrame => "a distributed dataframe",
        }
    }

    /// Whether `data` has the representation this variant requires.
    pub fn accepts(&self, data: &BatchData) -> bool {
        matches!(
            (self, data),
            (EngineKind::InMemoryTable, BatchData::Table(_))
                | (EngineKind::RelationalReference, BatchData::Reference(_))
                | (EngineKind::DistributedFrame, BatchData::Frame(_))
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::InMemoryTable => "in-memory table",
            EngineKind::RelationalReference => "relational reference",
            EngineKind::DistributedFrame => "distributed dataframe",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
