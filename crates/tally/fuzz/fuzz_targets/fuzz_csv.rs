//! Fuzz target for the CSV reader.
//!
//! The reader must never panic on malformed input, and any table it returns
//! must be rectangular.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::{DataFormat, Orientation, TableReader};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let reader = TableReader::new();
    if let Ok(table) = reader.read_bytes(data, DataFormat::Csv, Orientation::Records) {
        for (_, column) in table.columns() {
            assert_eq!(column.len(), table.num_rows());
        }
    }
});
