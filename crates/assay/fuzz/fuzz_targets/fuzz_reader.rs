//! Fuzz target for delimited-table reading.
//!
//! Arbitrary bytes must produce a table or an error, never a panic, and every
//! row of a produced table must match the header width.

#![no_main]

use assay::TableReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(table) = TableReader::new().read_bytes(data) {
        let width = table.column_count();
        assert!(table.rows.iter().all(|row| row.len() == width));
        let _ = table.fingerprint();
    }
});
