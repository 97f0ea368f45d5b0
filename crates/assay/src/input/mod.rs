//! In-memory tables and delimited-text loading.

mod reader;
mod table;

pub use reader::{ReaderConfig, TableReader};
pub use table::DataTable;
