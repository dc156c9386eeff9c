//! Property-based tests for the table, validation and statistics layers.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tally --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p tally --test property_tests
//! ```

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use tally::config::{DataFileConfig, DataFormat, Orientation};
use tally::validation::{check_required_columns, missing_columns};
use tally::{Column, MemoryReporter, StatisticsEngine, Table, TableReader, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Integer cells with some nulls.
fn int_cells() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1_000i64..1_000), 0..60)
}

/// Short labels drawn from a small alphabet so values repeat.
fn label_cells(len: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::weighted(0.9, "[a-d]{1,2}"), len)
}

/// Dates in a narrow range so years repeat.
fn date_cells() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        (1990i32..2000, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d)),
        0..40,
    )
}

fn column_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-E]", 0..6)
}

fn config() -> DataFileConfig {
    DataFileConfig {
        file_name: "cars".to_string(),
        file_path: ".".into(),
        file_type: DataFormat::Json,
        orientation: Orientation::Records,
        columns: Vec::new(),
        date_format: "%Y-%m-%d".to_string(),
    }
}

fn numeric_table(cells: &[Option<i64>]) -> Table {
    let names: Vec<Value> = (0..cells.len()).map(|i| Value::from(format!("car{}", i))).collect();
    Table::from_columns(vec![
        ("Name", Column::new(names)),
        ("HP", cells.iter().copied().map(Value::from).collect()),
    ])
    .unwrap()
}

// =============================================================================
// Validation Properties
// =============================================================================

mod validation_tests {
    use super::*;

    proptest! {
        /// The check passes iff every required column exists, and reports the
        /// absent ones in request order.
        #[test]
        fn passes_iff_subset(present in column_names(), required in column_names()) {
            let mut unique: Vec<String> = Vec::new();
            for name in present {
                if !unique.contains(&name) {
                    unique.push(name);
                }
            }
            let table = Table::from_columns(
                unique.iter().map(|n| (n.clone(), Column::from(vec![1i64]))),
            ).unwrap();

            let expected: Vec<String> = required
                .iter()
                .filter(|r| !unique.contains(r))
                .cloned()
                .collect();
            prop_assert_eq!(missing_columns(&table, &required), expected.clone());

            let result = check_required_columns(&table, &required, &MemoryReporter::new());
            prop_assert_eq!(result.is_ok(), expected.is_empty());
        }
    }
}

// =============================================================================
// Statistics Properties
// =============================================================================

mod statistics_tests {
    use super::*;

    proptest! {
        /// Unique count equals the number of distinct non-null values.
        #[test]
        fn unique_matches_distinct(cells in int_cells()) {
            let (config, reporter) = (config(), MemoryReporter::new());
            let engine = StatisticsEngine::new("cars", &config, &reporter);
            let table = numeric_table(&cells);

            let distinct: HashSet<i64> = cells.iter().flatten().copied().collect();
            prop_assert_eq!(engine.unique_number(&table, "HP").unwrap(), distinct.len());
        }

        /// Average equals the arithmetic mean of the non-null values.
        #[test]
        fn average_is_mean(cells in int_cells()) {
            let (config, reporter) = (config(), MemoryReporter::new());
            let engine = StatisticsEngine::new("cars", &config, &reporter);
            let average = engine.average(&numeric_table(&cells), "HP").unwrap();

            let present: Vec<f64> = cells.iter().flatten().map(|&v| v as f64).collect();
            if present.is_empty() {
                prop_assert!(average.is_nan());
            } else {
                let expected = present.iter().sum::<f64>() / present.len() as f64;
                prop_assert!((average - expected).abs() < 1e-6);
            }
        }

        /// Top-N is sorted descending, has min(N, non-null) entries, and keeps
        /// row order among ties.
        #[test]
        fn top_max_is_ordered_and_stable(cells in int_cells(), n in -3i64..80) {
            let (config, reporter) = (config(), MemoryReporter::new());
            let engine = StatisticsEngine::new("cars", &config, &reporter);
            let table = numeric_table(&cells);

            let top = engine.top_max(&table, "HP", "Name", n).unwrap();
            let non_null = cells.iter().flatten().count();
            prop_assert_eq!(top.len(), usize::try_from(n).unwrap_or(0).min(non_null));

            let rows: Vec<usize> = top
                .iter()
                .map(|name| name.as_str().unwrap()[3..].parse().unwrap())
                .collect();
            for pair in rows.windows(2) {
                let (a, b) = (cells[pair[0]].unwrap(), cells[pair[1]].unwrap());
                prop_assert!(a > b || (a == b && pair[0] < pair[1]));
            }
        }

        /// Grouped counts always sum to the row count.
        #[test]
        fn count_by_value_sums_to_rows(labels in (0usize..50).prop_flat_map(label_cells)) {
            let (config, reporter) = (config(), MemoryReporter::new());
            let engine = StatisticsEngine::new("cars", &config, &reporter);
            let table = Table::from_columns(vec![(
                "Origin",
                labels.iter().cloned().map(Value::from).collect::<Column>(),
            )]).unwrap();

            let counts = engine.count_by_value(&table, "Origin").unwrap();
            prop_assert_eq!(counts.values().sum::<usize>(), labels.len());
        }

        /// Counting the derived year column gives the same result, and so
        /// does a second count-by-year on the already-parsed table.
        #[test]
        fn count_by_year_is_idempotent(dates in date_cells()) {
            let (config, reporter) = (config(), MemoryReporter::new());
            let engine = StatisticsEngine::new("cars", &config, &reporter);
            let mut table = Table::from_columns(vec![
                ("Date", Column::from(dates.clone())),
            ]).unwrap();

            let first = engine.count_by_year(&mut table, "Date").unwrap();
            prop_assert_eq!(first.values().sum::<usize>(), dates.len());

            let regrouped: BTreeMap<i32, usize> = engine
                .count_by_value(&table, "Year")
                .unwrap()
                .into_iter()
                .filter_map(|(year, count)| year.as_f64().map(|y| (y as i32, count)))
                .collect();
            prop_assert_eq!(&regrouped, &first);

            let second = engine.count_by_year(&mut table, "Date").unwrap();
            prop_assert_eq!(second, first);
        }
    }
}

// =============================================================================
// Reader Properties
// =============================================================================

mod reader_tests {
    use super::*;

    proptest! {
        /// The CSV reader never panics, and any table it returns is rectangular.
        #[test]
        fn csv_never_panics(input in prop::collection::vec(any::<u8>(), 0..300)) {
            if let Ok(table) = TableReader::new().read_bytes(&input, DataFormat::Csv, Orientation::Records) {
                for (_, column) in table.columns() {
                    prop_assert_eq!(column.len(), table.num_rows());
                }
            }
        }

        /// The JSON reader never panics in any orientation.
        #[test]
        fn json_never_panics(input in "[\\[\\]{}:,\"a-c0-9 ]{0,80}") {
            for orientation in [
                Orientation::Records,
                Orientation::Columns,
                Orientation::Index,
                Orientation::Split,
                Orientation::Values,
            ] {
                let _ = TableReader::new().read_bytes(input.as_bytes(), DataFormat::Json, orientation);
            }
        }
    }
}
