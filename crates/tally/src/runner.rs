//! The run driver: config, read, validate, statistics, write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::Result;
use crate::input::{SourceMetadata, TableReader};
use crate::output::TableWriter;
use crate::report::Reporter;
use crate::stats::{StatisticsEngine, ValueCount};
use crate::table::{Table, Value};
use crate::validation::check_required_columns;

/// Noun used in statistic messages when none is configured.
pub const DEFAULT_SCOPE: &str = "cars";

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// The input file.
    pub source: SourceMetadata,
    pub unique_number: usize,
    /// Serialized as `null` when the column had no values.
    pub average: f64,
    pub top_max: Vec<Value>,
    pub count_by_value: Vec<ValueCount>,
    pub count_by_year: BTreeMap<i32, usize>,
    /// Where the annotated table was written.
    pub output_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed_ms: u64,
}

/// Drives one pass over one configured dataset.
pub struct Runner<'a> {
    config: AppConfig,
    reporter: &'a dyn Reporter,
    scope: String,
    reader: TableReader,
    writer: TableWriter,
}

impl<'a> Runner<'a> {
    /// Create a runner with default reader and writer.
    pub fn new(config: AppConfig, reporter: &'a dyn Reporter) -> Self {
        Self {
            config,
            reporter,
            scope: DEFAULT_SCOPE.to_string(),
            reader: TableReader::new(),
            writer: TableWriter::new(),
        }
    }

    /// Load the configuration file at `path` and create a runner for it.
    pub fn from_config_file(path: impl AsRef<Path>, reporter: &'a dyn Reporter) -> Result<Self> {
        let path = path.as_ref();
        match AppConfig::load(path) {
            Ok(config) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                reporter.info(&format!("Configuration file '{}' was successfully read.", name));
                Ok(Self::new(config, reporter))
            }
            Err(err) => {
                reporter.error(&format!(
                    "Failed to read configuration file '{}': {}",
                    path.display(),
                    err
                ));
                Err(err)
            }
        }
    }

    /// Set the noun used in statistic messages.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Use a custom table reader.
    pub fn with_reader(mut self, reader: TableReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Execute the full run.
    ///
    /// The first error stops the run; it is reported and returned.
    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Local::now();
        let timer = Instant::now();
        self.reporter
            .info(&format!("Program execution started: {}", started_at));

        self.execute(started_at, timer).inspect_err(|err| {
            self.reporter.error(&format!(
                "The following error occurred during execution of the program: {}",
                err
            ));
        })
    }

    /// Read the input table.
    pub fn read(&self) -> Result<(Table, SourceMetadata)> {
        let data = &self.config.data_file;
        let (table, source) =
            self.reader
                .read_path(data.full_path(), data.file_type, data.orientation)?;
        self.reporter.info(&format!(
            "Data file '{}' was successfully read.",
            data.display_name()
        ));
        Ok((table, source))
    }

    /// Read the input table and check its required columns.
    pub fn validate(&self) -> Result<(Table, SourceMetadata)> {
        let (table, source) = self.read()?;
        check_required_columns(&table, &self.config.data_file.columns, self.reporter)?;
        Ok((table, source))
    }

    fn execute(&self, started_at: DateTime<Local>, timer: Instant) -> Result<RunSummary> {
        let (mut table, source) = self.validate()?;

        let params = &self.config.functions_params;
        let engine = StatisticsEngine::new(
            self.scope.as_str(),
            &self.config.data_file,
            self.reporter,
        );

        let unique_number = engine.unique_number(&table, &params.unique_number.column)?;
        let average = engine.average(&table, &params.average.column)?;
        let top_max = engine.top_max(
            &table,
            &params.top_max.sort_by,
            &params.top_max.group_by,
            params.top_max.top_n,
        )?;
        let count_by_value = engine.count_by_value(&table, &params.count_by_value.column)?;
        let count_by_year = engine.count_by_year(&mut table, &params.count_by_year.column)?;

        let output = &self.config.output_file;
        let output_path = output.full_path();
        self.writer
            .write_path(&table, &output_path, output.file_type, output.index)?;
        self.reporter.info(&format!(
            "Table was saved as '{}' in the following location: '{}'",
            output.file_type,
            output_path.display()
        ));

        let finished_at = Local::now();
        let elapsed = timer.elapsed();
        self.reporter
            .info(&format!("Program execution ended: {}", finished_at));
        self.reporter
            .info(&format!("Overall execution time: {:?}", elapsed));

        Ok(RunSummary {
            source,
            unique_number,
            average,
            top_max,
            count_by_value: ValueCount::from_counts(&count_by_value),
            count_by_year,
            output_path,
            started_at,
            finished_at,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
