//! Delimited-text loader producing in-memory tables.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::table::DataTable;
use crate::error::{AssayError, Result};

/// Candidate delimiters in preference order; earlier wins ties.
const CANDIDATES: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines sampled when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads headed, delimited text into a [`DataTable`].
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    config: ReaderConfig,
}

impl TableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file from disk.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AssayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), size = bytes.len(), "Reading delimited table");
        self.read_bytes(&bytes)
    }

    /// Read delimited bytes already in memory.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => sniff_delimiter(bytes, self.config.quote)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AssayError::EmptyData("No header row found".to_string()));
        }

        let width = headers.len();
        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let mut rows = Vec::new();
        for record in reader.records().take(limit) {
            let record = record?;
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(AssayError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

/// Pick the candidate that splits the sampled lines into a consistent number
/// of fields greater than one. Highest field count wins.
fn sniff_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let sample_end = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'\n')
        .nth(SNIFF_LINES - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(bytes.len());
    let sample = &bytes[..sample_end];

    if sample.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(AssayError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best: Option<(u8, usize)> = None;
    for &candidate in CANDIDATES {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .quote(quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample);

        let widths: Vec<usize> = reader
            .records()
            .filter_map(|r| r.ok())
            .map(|r| r.len())
            .collect();
        let Some(&first) = widths.first() else {
            continue;
        };
        if first < 2 || widths.iter().any(|&w| w != first) {
            continue;
        }
        if best.is_none_or(|(_, width)| first > width) {
            best = Some((candidate, first));
        }
    }

    Ok(best.map(|(d, _)| d).unwrap_or(b','))
}
