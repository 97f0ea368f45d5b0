//! Engine over a distributed dataframe.

use std::any::Any;

use once_cell::sync::OnceCell;

use super::{Dataset, DatasetArgs, EngineInput};
use crate::batch::DistributedFrame;
use crate::engine::EngineKind;
use crate::error::Result;
use crate::input::DataTable;

/// Distributed engine. With `caching` on, partitions are collected at most
/// once and the collected table is reused.
#[derive(Debug)]
pub struct FrameDataset {
    frame: DistributedFrame,
    caching: bool,
    collected: OnceCell<DataTable>,
    args: DatasetArgs,
}

impl FrameDataset {
    pub fn new(frame: DistributedFrame, caching: bool, args: DatasetArgs) -> Self {
        Self {
            frame,
            caching,
            collected: OnceCell::new(),
            args,
        }
    }

    /// Registry constructor.
    pub fn construct(input: EngineInput, args: DatasetArgs) -> Result<Box<dyn Dataset>> {
        match input {
            EngineInput::Frame { frame, caching } => Ok(Box::new(Self::new(frame, caching, args))),
            other => Err(other.mismatch(&args.class_name, EngineKind::DistributedFrame)),
        }
    }

    pub fn frame(&self) -> &DistributedFrame {
        &self.frame
    }

    pub fn caching(&self) -> bool {
        self.caching
    }

    /// Whether a collected copy is currently held.
    pub fn is_cached(&self) -> bool {
        self.collected.get().is_some()
    }

    pub fn head(&self, n: usize) -> DataTable {
        if self.caching {
            self.collected.get_or_init(|| self.frame.collect()).head(n)
        } else {
            self.frame.collect().head(n)
        }
    }
}

impl Dataset for FrameDataset {
    fn kind(&self) -> EngineKind {
        EngineKind::DistributedFrame
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

    fn frame() -> DistributedFrame {
        let table = DataTable::from_rows(&["id"], &[&["1"], &["2"], &["3"], &["4"]]);
        DistributedFrame::partitioned("trips", &table, 2)
    }

    #[test]
    fn test_caching_memoizes_collection() {
        let dataset = FrameDataset::new(frame(), true, test_args("FrameDataset"));
        assert!(!dataset.is_cached());

        let head = dataset.head(3);
        assert_eq!(head.column_values(0).collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(dataset.is_cached());
    }

    #[test]
    fn test_no_caching_never_holds_collection() {
        let dataset = FrameDataset::new(frame(), false, test_args("FrameDataset"));
        assert_eq!(dataset.head(10).row_count(), 4);
        assert!(!dataset.is_cached());
    }

    #[test]
    fn test_construct_rejects_reference_payload() {
        let err = FrameDataset::construct(EngineInput::Reference, test_args("FrameDataset"))
            .unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
