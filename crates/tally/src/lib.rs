//! Tally: a batch job that summarizes a tabular dataset.
//!
//! One configuration drives one pass over one in-memory table: the input file
//! is read, checked for its required columns, summarized by five statistics,
//! and written back out with a derived `Year` column.
//!
//! # Example
//!
//! ```no_run
//! use tally::{Runner, TracingReporter};
//!
//! let reporter = TracingReporter::default();
//! let runner = Runner::from_config_file("config/config.yaml", &reporter).unwrap();
//! let summary = runner.run().unwrap();
//!
//! println!("Average: {}", summary.average);
//! println!("Top: {:?}", summary.top_max);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod report;
pub mod stats;
pub mod table;
pub mod validation;

mod runner;

pub use crate::runner::{DEFAULT_SCOPE, RunSummary, Runner};
pub use config::{AppConfig, DataFileConfig, DataFormat, FunctionParams, Orientation, OutputFileConfig};
pub use error::{Result, TallyError};
pub use input::{SourceMetadata, TableReader};
pub use output::TableWriter;
pub use report::{MemoryReporter, Reporter, TracingReporter};
pub use stats::{Statistic, StatisticsEngine};
pub use table::{Column, ColumnType, Table, Value};
