//! Run configuration.
//!
//! A configuration file has three sections: `data_file` describes the input
//! table and its schema, `functions_params` parameterizes each statistic, and
//! `output_file` says where the annotated table goes.
//!
//! ```yaml
//! data_file:
//!   file_name: cars
//!   file_path: ./data
//!   file_type: json
//!   orientation: records
//!   columns: [Name, Horsepower, Origin, Year]
//!   date_format: "%Y-%m-%d"
//! functions_params:
//!   get_unique_number: { column: Origin }
//!   get_average: { column: Horsepower }
//!   get_top_max: { sort_by: Horsepower, group_by: Name, top_n: 5 }
//!   get_count_by_value: { column: Origin }
//!   get_count_by_year: { column: Year }
//! output_file:
//!   name: cars_out
//!   file_path: ./output
//!   file_type: csv
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::table::DATE_FORMAT;

/// Tabular file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Csv,
    /// Recognized so configurations naming it load, but not readable.
    Xlsx,
}

impl DataFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Csv => "csv",
            DataFormat::Xlsx => "xlsx",
        }
    }

    /// Detect a format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DataFormat::Json),
            "csv" => Some(DataFormat::Csv),
            "xlsx" => Some(DataFormat::Xlsx),
            _ => None,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Layout of a JSON table, named after the pandas `orient` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `[{column: value}, ...]`
    #[default]
    Records,
    /// `{column: {index: value}}`
    Columns,
    /// `{index: {column: value}}`
    Index,
    /// `{"columns": [...], "index": [...], "data": [[...]]}`
    Split,
    /// `[[value, ...], ...]`
    Values,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Records => "records",
            Orientation::Columns => "columns",
            Orientation::Index => "index",
            Orientation::Split => "split",
            Orientation::Values => "values",
        };
        f.write_str(name)
    }
}

fn default_date_format() -> String {
    DATE_FORMAT.to_string()
}

/// Input table location and schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFileConfig {
    /// File name without extension.
    pub file_name: String,
    /// Directory holding the file.
    pub file_path: PathBuf,
    pub file_type: DataFormat,
    /// JSON layout; ignored for CSV.
    #[serde(default)]
    pub orientation: Orientation,
    /// Columns the table must carry.
    #[serde(default)]
    pub columns: Vec<String>,
    /// strftime-style pattern used by count-by-year.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl DataFileConfig {
    /// `file_path/file_name.file_type`
    pub fn full_path(&self) -> PathBuf {
        self.file_path
            .join(format!("{}.{}", self.file_name, self.file_type.extension()))
    }

    /// File name with extension, as used in report messages.
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.file_name, self.file_type)
    }
}

/// Parameters for a statistic over one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnParams {
    pub column: String,
}

/// Parameters for top-N.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopMaxParams {
    /// Numeric column to rank rows by.
    pub sort_by: String,
    /// Column whose values are reported for the selected rows.
    pub group_by: String,
    /// Number of rows; zero or negative selects nothing.
    pub top_n: i64,
}

/// Per-statistic parameters, keyed like the statistic names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParams {
    #[serde(rename = "get_unique_number")]
    pub unique_number: ColumnParams,
    #[serde(rename = "get_average")]
    pub average: ColumnParams,
    #[serde(rename = "get_top_max")]
    pub top_max: TopMaxParams,
    #[serde(rename = "get_count_by_value")]
    pub count_by_value: ColumnParams,
    #[serde(rename = "get_count_by_year")]
    pub count_by_year: ColumnParams,
}

/// Output table location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFileConfig {
    /// File name without extension.
    pub name: String,
    pub file_path: PathBuf,
    pub file_type: DataFormat,
    /// Write a leading row-index column. On unless switched off.
    #[serde(default = "default_index")]
    pub index: bool,
}

fn default_index() -> bool {
    true
}

impl OutputFileConfig {
    /// `file_path/name.file_type`
    pub fn full_path(&self) -> PathBuf {
        self.file_path
            .join(format!("{}.{}", self.name, self.file_type.extension()))
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_file: DataFileConfig,
    pub functions_params: FunctionParams,
    pub output_file: OutputFileConfig,
}

impl AppConfig {
    /// Load a configuration file.
    ///
    /// `.yaml`/`.yml` files are read as YAML and `.json` files as JSON. Any
    /// other extension is a [`TallyError::Config`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(TallyError::Config(format!(
                    "unsupported configuration file '{}': expected .yaml, .yml or .json",
                    path.display()
                )));
            }
        };

        let content = fs::read_to_string(path).map_err(|e| TallyError::io(path, e))?;
        let config = parse(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse YAML configuration text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse JSON configuration text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
