//! The statistics engine.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::config::DataFileConfig;
use crate::error::{Result, TallyError};
use crate::report::{Reporter, format_list, format_mapping};
use crate::table::{Column, ColumnType, Table, Value};
use crate::validation::requires_numeric;

use super::Statistic;

/// Name of the column count-by-year derives.
pub const YEAR_COLUMN: &str = "Year";

/// Computes statistics over a table and reports each result.
///
/// The engine borrows the data configuration (for the date format) and a
/// reporter. It never owns the table: every operation but
/// [`count_by_year`](Self::count_by_year) takes it by shared reference.
pub struct StatisticsEngine<'a> {
    scope: String,
    config: &'a DataFileConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> StatisticsEngine<'a> {
    /// Create an engine. `scope` is the noun used in messages, e.g. `cars`.
    pub fn new(
        scope: impl Into<String>,
        config: &'a DataFileConfig,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            scope: scope.into(),
            config,
            reporter,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Number of distinct non-null values in `column`.
    pub fn unique_number(&self, table: &Table, column: &str) -> Result<usize> {
        self.attempt(Statistic::UniqueNumber, || {
            let unique = table.try_column(column)?.n_unique();
            self.reporter.info(&format!(
                "The number of unique {} is {}",
                column.to_lowercase(),
                unique
            ));
            Ok(unique)
        })
    }

    /// Mean of the non-null values in a numeric `column`.
    ///
    /// NaN when the column has no non-null values.
    pub fn average(&self, table: &Table, column: &str) -> Result<f64> {
        self.attempt(Statistic::Average, || {
            requires_numeric(table, column, self.reporter)?;
            let mean = table.try_column(column)?.mean();
            self.reporter.info(&format!(
                "The average {} of all the {} is {:?}",
                column.to_lowercase(),
                self.scope,
                mean
            ));
            Ok(mean)
        })
    }

    /// `group_by` values of the `n` rows with the largest `sort_by` values.
    ///
    /// Rows are taken in descending order; equal values keep their row order.
    /// Rows whose `sort_by` value is null are never selected, and `n <= 0`
    /// selects nothing.
    pub fn top_max(
        &self,
        table: &Table,
        sort_by: &str,
        group_by: &str,
        n: i64,
    ) -> Result<Vec<Value>> {
        self.attempt(Statistic::TopMax, || {
            requires_numeric(table, sort_by, self.reporter)?;
            let labels = table.try_column(group_by)?;
            let take = usize::try_from(n).unwrap_or(0);

            let top: Vec<Value> = table
                .try_column(sort_by)?
                .nlargest_rows(take)
                .into_iter()
                .filter_map(|row| labels.get(row).cloned())
                .collect();

            self.reporter.info(&format!(
                "The top {} most {} {} are {}",
                n,
                sort_by.to_lowercase(),
                self.scope,
                format_list(&top)
            ));
            Ok(top)
        })
    }

    /// Number of rows per distinct value of `column`, ordered by value.
    ///
    /// Nulls are grouped under [`Value::Null`], so the counts sum to the row
    /// count.
    pub fn count_by_value(&self, table: &Table, column: &str) -> Result<BTreeMap<Value, usize>> {
        self.attempt(Statistic::CountByValue, || {
            let counts = table.try_column(column)?.value_counts();
            self.reporter.info(&format!(
                "The number of {} made by each {} is {}",
                self.scope,
                column.to_lowercase(),
                format_mapping(counts.iter().map(|(v, c)| (v, *c)))
            ));
            Ok(counts)
        })
    }

    /// Number of rows per calendar year of the dates in `column`.
    ///
    /// Every value is parsed with the configured date format. On success the
    /// table is modified: `column` is replaced by the parsed datetimes and a
    /// [`YEAR_COLUMN`] of integer years is appended (or replaced). If any
    /// value fails to parse, nothing is modified. Values that are already
    /// datetimes are kept as-is, and a [`YEAR_COLUMN`] that already holds
    /// integer years is counted directly, so calling this twice yields the
    /// same counts.
    pub fn count_by_year(&self, table: &mut Table, column: &str) -> Result<BTreeMap<i32, usize>> {
        self.attempt(Statistic::CountByYear, || {
            let (dates, years) = self.year_columns(table, column)?;
            let counts = year_counts(&years);

            table.set_column(column, dates)?;
            table.set_column(YEAR_COLUMN, years)?;

            self.report_year_counts(column, &counts);
            Ok(counts)
        })
    }

    /// Like [`count_by_year`](Self::count_by_year), but leaves `table`
    /// untouched and returns an annotated copy alongside the counts.
    pub fn derive_year_table(
        &self,
        table: &Table,
        column: &str,
    ) -> Result<(Table, BTreeMap<i32, usize>)> {
        self.attempt(Statistic::CountByYear, || {
            let (dates, years) = self.year_columns(table, column)?;
            let counts = year_counts(&years);

            let mut derived = table.clone();
            derived.set_column(column, dates)?;
            derived.set_column(YEAR_COLUMN, years)?;

            self.report_year_counts(column, &counts);
            Ok((derived, counts))
        })
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Parse `column` into datetimes and derive the matching year column.
    fn year_columns(&self, table: &Table, column: &str) -> Result<(Column, Column)> {
        let format = &self.config.date_format;
        let source = table.try_column(column)?;

        // Years derived by an earlier call; both columns end up as the years.
        if column == YEAR_COLUMN
            && source.column_type() == ColumnType::Integer
            && source.null_count() == 0
        {
            return Ok((source.clone(), source.clone()));
        }

        let dates = source
            .parse_datetime(format)
            .map_err(|value| TallyError::DateParse {
                column: column.to_string(),
                value,
                format: format.clone(),
            })?;

        let years = dates
            .iter()
            .map(|v| match v {
                Value::DateTime(dt) => Value::Int(i64::from(dt.year())),
                _ => Value::Null,
            })
            .collect();
        Ok((dates, years))
    }

    fn report_year_counts(&self, column: &str, counts: &BTreeMap<i32, usize>) {
        self.reporter.info(&format!(
            "The number of {} made each {} is {}",
            self.scope,
            column.to_lowercase(),
            format_mapping(counts.iter().map(|(y, c)| (*y, *c)))
        ));
    }

    /// Run one statistic; on failure report it and wrap the cause.
    fn attempt<T>(&self, operation: Statistic, compute: impl FnOnce() -> Result<T>) -> Result<T> {
        compute().map_err(|err| {
            let err = err.in_statistic(operation);
            self.reporter.error(&err.to_string());
            err
        })
    }
}

fn year_counts(years: &Column) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in years.iter() {
        if let Value::Int(year) = year {
            *counts.entry(*year as i32).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataFormat, Orientation};
    use crate::report::{Level, MemoryReporter};

    fn config() -> DataFileConfig {
        DataFileConfig {
            file_name: "cars".to_string(),
            file_path: "data".into(),
            file_type: DataFormat::Json,
            orientation: Orientation::Records,
            columns: vec!["Name".into(), "HP".into(), "Origin".into(), "Date".into()],
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    fn cars() -> Table {
        Table::from_columns(vec![
            ("Name", Column::from(vec!["A", "B"])),
            ("HP", Column::from(vec![100i64, 200])),
            ("Origin", Column::from(vec!["US", "EU"])),
            ("Date", Column::from(vec!["2020-01-01", "2020-06-01"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_unique_number() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        assert_eq!(engine.unique_number(&cars(), "Origin").unwrap(), 2);
        assert!(reporter.contains("The number of unique origin is 2"));

        let empty = Table::from_columns(vec![("Origin", Column::default())]).unwrap();
        assert_eq!(engine.unique_number(&empty, "Origin").unwrap(), 0);
    }

    #[test]
    fn test_average() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        assert_eq!(engine.average(&cars(), "HP").unwrap(), 150.0);
        assert!(reporter.contains("The average hp of all the cars is 150.0"));
    }

    #[test]
    fn test_average_of_text_fails_without_result() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        let err = engine.average(&cars(), "Name").unwrap_err();
        assert!(matches!(
            err,
            TallyError::Statistic { operation: Statistic::Average, .. }
        ));
        assert!(matches!(err.root_cause(), TallyError::TypeMismatch { .. }));
        assert!(!reporter.contains("The average"));

        let errors = reporter.messages_at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'get_average'"));
    }

    #[test]
    fn test_top_max() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        assert_eq!(engine.top_max(&cars(), "HP", "Name", 1).unwrap(), vec![Value::from("B")]);
        assert!(reporter.contains("The top 1 most hp cars are ['B']"));

        assert_eq!(
            engine.top_max(&cars(), "HP", "Name", 10).unwrap(),
            vec![Value::from("B"), Value::from("A")]
        );
        assert!(engine.top_max(&cars(), "HP", "Name", 0).unwrap().is_empty());
        assert!(engine.top_max(&cars(), "HP", "Name", -3).unwrap().is_empty());
    }

    #[test]
    fn test_top_max_skips_nulls_and_keeps_ties() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let table = Table::from_columns(vec![
            ("Name", Column::from(vec!["a", "b", "c", "d"])),
            ("HP", Column::new(vec![Value::Int(90), Value::Null, Value::Int(130), Value::Int(90)])),
        ])
        .unwrap();

        assert_eq!(
            engine.top_max(&table, "HP", "Name", 4).unwrap(),
            vec![Value::from("c"), Value::from("a"), Value::from("d")]
        );
    }

    #[test]
    fn test_top_max_missing_group_column() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        let err = engine.top_max(&cars(), "HP", "Model", 1).unwrap_err();
        assert!(matches!(err.root_cause(), TallyError::Column { column } if column == "Model"));
    }

    #[test]
    fn test_count_by_value() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        let counts = engine.count_by_value(&cars(), "Origin").unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&Value::from("US")], 1);
        assert_eq!(counts[&Value::from("EU")], 1);
        assert!(reporter.contains("The number of cars made by each origin is {'EU': 1, 'US': 1}"));
    }

    #[test]
    fn test_count_by_year_mutates_table() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let mut table = cars();

        let counts = engine.count_by_year(&mut table, "Date").unwrap();
        assert_eq!(counts, BTreeMap::from([(2020, 2)]));
        assert!(reporter.contains("The number of cars made each date is {2020: 2}"));

        assert!(table.column("Date").unwrap().column_type().is_temporal());
        assert_eq!(table.column(YEAR_COLUMN).unwrap().values(), &[Value::Int(2020), Value::Int(2020)]);
        assert_eq!(table.column_names().last(), Some(YEAR_COLUMN));

        // Already-parsed dates are accepted on a second call.
        assert_eq!(engine.count_by_year(&mut table, "Date").unwrap(), counts);
        assert_eq!(table.num_columns(), 5);
    }

    #[test]
    fn test_count_by_year_bad_format_leaves_table() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let mut table = Table::from_columns(vec![(
            "Date",
            Column::from(vec!["2020-01-01", "01/02/2020"]),
        )])
        .unwrap();
        let before = table.clone();

        let err = engine.count_by_year(&mut table, "Date").unwrap_err();
        match err.root_cause() {
            TallyError::DateParse { column, value, format } => {
                assert_eq!(column, "Date");
                assert_eq!(value, "01/02/2020");
                assert_eq!(format, "%Y-%m-%d");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_count_by_year_partial_date_formats() {
        let reporter = MemoryReporter::new();
        let mut config = config();
        config.date_format = "%Y-%m".to_string();
        let engine = StatisticsEngine::new("cars", &config, &reporter);

        let mut table =
            Table::from_columns(vec![("Date", Column::from(vec!["2020-01", "2021-03", "2021-11"]))])
                .unwrap();
        assert_eq!(
            engine.count_by_year(&mut table, "Date").unwrap(),
            BTreeMap::from([(2020, 1), (2021, 2)])
        );

        config.date_format = "%Y".to_string();
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let mut text = Table::from_columns(vec![("Built", Column::from(vec!["1970", "1971"]))]).unwrap();
        let mut ints = Table::from_columns(vec![("Built", Column::from(vec![1970i64, 1971]))]).unwrap();

        let expected = BTreeMap::from([(1970, 1), (1971, 1)]);
        assert_eq!(engine.count_by_year(&mut text, "Built").unwrap(), expected);
        assert_eq!(engine.count_by_year(&mut ints, "Built").unwrap(), expected);
        assert!(reporter.messages_at(Level::Error).is_empty());
    }

    #[test]
    fn test_count_by_year_on_year_column_twice() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let mut table = Table::from_columns(vec![
            ("Name", Column::from(vec!["A", "B"])),
            (YEAR_COLUMN, Column::from(vec!["1970-01-01", "1971-01-01"])),
        ])
        .unwrap();

        let first = engine.count_by_year(&mut table, YEAR_COLUMN).unwrap();
        assert_eq!(first, BTreeMap::from([(1970, 1), (1971, 1)]));
        assert_eq!(table.column(YEAR_COLUMN).unwrap().values(), &[Value::Int(1970), Value::Int(1971)]);

        assert_eq!(engine.count_by_year(&mut table, YEAR_COLUMN).unwrap(), first);
        assert_eq!(table.num_columns(), 2);
    }

    #[test]
    fn test_derive_year_table_is_non_mutating() {
        let (config, reporter) = (config(), MemoryReporter::new());
        let engine = StatisticsEngine::new("cars", &config, &reporter);
        let table = cars();

        let (derived, counts) = engine.derive_year_table(&table, "Date").unwrap();
        assert_eq!(counts, BTreeMap::from([(2020, 2)]));
        assert!(!table.has_column(YEAR_COLUMN));
        assert!(derived.has_column(YEAR_COLUMN));
        assert_eq!(derived.num_rows(), table.num_rows());
    }
}
