//! Engine over an in-memory table.

use std::any::Any;

use super::{Dataset, DatasetArgs, EngineInput};
use crate::engine::EngineKind;
use crate::error::Result;
use crate::input::DataTable;

#[derive(Debug, Clone)]
pub struct TableDataset {
    table: DataTable,
    args: DatasetArgs,
}

impl TableDataset {
    pub fn new(table: DataTable, args: DatasetArgs) -> Self {
        Self { table, args }
    }

    /// Registry constructor.
    pub fn construct(input: EngineInput, args: DatasetArgs) -> Result<Box<dyn Dataset>> {
        match input {
            EngineInput::Table(table) => Ok(Box::new(Self::new(table, args))),
            other => Err(other.mismatch(&args.class_name, EngineKind::InMemoryTable)),
        }
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn head(&self, n: usize) -> DataTable {
        self.table.head(n)
    }
}

impl Dataset for TableDataset {
    fn kind(&self) -> EngineKind {
        EngineKind::InMemoryTable
    }

    fn args(&self) -> &DatasetArgs {
        &self.args
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_args;
    use crate::error::AssayError;

    #[test]
    fn test_construct_from_table() {
        let table = DataTable::from_rows(&["a", "b"], &[&["1", "2"], &["3", "4"]]);
        let dataset = TableDataset::construct(EngineInput::Table(table), test_args("TableDataset"))
            .unwrap();

        assert_eq!(dataset.kind(), EngineKind::InMemoryTable);
        let concrete = dataset.downcast_ref::<TableDataset>().unwrap();
        assert_eq!(concrete.row_count(), 2);
        assert_eq!(concrete.head(1).rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_construct_rejects_other_payloads() {
        let err = TableDataset::construct(EngineInput::Reference, test_args("TableDataset"))
            .unwrap_err();
        assert!(matches!(
            err,
            AssayError::TypeMismatch {
                kind: EngineKind::InMemoryTable,
                ..
            }
        ));
    }
}
