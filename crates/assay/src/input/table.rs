//! Two-dimensional in-memory table.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A two-dimensional in-memory table of string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices, mostly useful in tests and demos.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> DataTable {
        DataTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Content fingerprint over headers and cells.
    ///
    /// Cells are length-prefixed so that `["ab", "c"]` and `["a", "bc"]`
    /// hash differently.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for header in &self.headers {
            hasher.update((header.len() as u64).to_le_bytes());
            hasher.update(header.as_bytes());
        }
        for row in &self.rows {
            hasher.update([0xff]);
            for cell in row {
                hasher.update((cell.len() as u64).to_le_bytes());
                hasher.update(cell.as_bytes());
            }
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::from_rows(
            &["vendor_id", "fare"],
            &[&["1", "7.5"], &["2", "12.0"], &["1", "3.25"]],
        )
    }

    #[test]
    fn test_dimensions_and_access() {
        let table = sample();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get(1, 1), Some("12.0"));
        assert_eq!(table.get(5, 0), None);
        assert_eq!(
            table.column_by_name("vendor_id"),
            Some(vec!["1", "2", "1"])
        );
        assert!(table.column_by_name("missing").is_none());
    }

    #[test]
    fn test_head_keeps_headers() {
        let head = sample().head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.headers, vec!["vendor_id", "fare"]);

        assert_eq!(sample().head(10).row_count(), 3);
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        assert_eq!(sample().fingerprint(), sample().fingerprint());
        assert!(sample().fingerprint().starts_with("sha256:"));

        let a = DataTable::from_rows(&["x", "y"], &[&["ab", "c"]]);
        let b = DataTable::from_rows(&["x", "y"], &[&["a", "bc"]]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
