//! Fuzz target for count-by-year.
//!
//! Arbitrary values and date formats must either parse or fail with an
//! error, and a failure must leave the table unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::config::{DataFileConfig, DataFormat, Orientation};
use tally::{Column, MemoryReporter, StatisticsEngine, Table};

fuzz_target!(|input: (Vec<String>, String)| {
    let (values, format) = input;
    if values.len() > 1_000 || format.len() > 64 {
        return;
    }

    let config = DataFileConfig {
        file_name: "fuzz".to_string(),
        file_path: ".".into(),
        file_type: DataFormat::Csv,
        orientation: Orientation::Records,
        columns: Vec::new(),
        date_format: format,
    };
    let reporter = MemoryReporter::new();
    let engine = StatisticsEngine::new("cars", &config, &reporter);

    let Ok(mut table) = Table::from_columns(vec![("Date", Column::from(values))]) else {
        return;
    };
    let before = table.clone();
    if engine.count_by_year(&mut table, "Date").is_err() {
        assert_eq!(table, before);
    }
});
