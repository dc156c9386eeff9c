//! Error types for the Tally library.

use std::path::PathBuf;

use thiserror::Error;

use crate::stats::Statistic;
use crate::table::ColumnType;

/// The kind of column a type guard expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    /// Integers or floats.
    Numeric,
    /// Text values.
    String,
}

impl std::fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedKind::Numeric => write!(f, "numeric"),
            ExpectedKind::String => write!(f, "strings"),
        }
    }
}

/// Main error type for Tally operations.
#[derive(Debug, Error)]
pub enum TallyError {
    /// Required columns are absent from the table.
    #[error("Data Quality Check Failed. Missing columns in dataframe: {}", crate::report::format_list(.missing))]
    MissingColumns { missing: Vec<String> },

    /// A referenced column does not exist.
    #[error("Column '{column}' does not exist")]
    Column { column: String },

    /// A column holds values of the wrong kind for an operation.
    #[error("Values in column {column} are NOT {expected} (found {found:?})")]
    TypeMismatch {
        column: String,
        expected: ExpectedKind,
        found: ColumnType,
    },

    /// A value does not match the configured date format.
    #[error("Value '{value}' in column {column} does not match format '{format}'")]
    DateParse {
        column: String,
        value: String,
        format: String,
    },

    /// A statistic failed; wraps the underlying cause.
    #[error("The following error occurred during the execution of the '{operation}' function: {source}")]
    Statistic {
        operation: Statistic,
        #[source]
        source: Box<TallyError>,
    },

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File format or orientation not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input contained no usable rows or columns.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns of unequal length or repeated names.
    #[error("Table shape error: {0}")]
    Shape(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TallyError {
    /// Wrap `self` as the cause of a failed statistic.
    pub fn in_statistic(self, operation: Statistic) -> Self {
        TallyError::Statistic {
            operation,
            source: Box::new(self),
        }
    }

    /// Strip any `Statistic` wrappers and return the originating error.
    pub fn root_cause(&self) -> &TallyError {
        match self {
            TallyError::Statistic { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TallyError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;
