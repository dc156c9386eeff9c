//! Reads CSV and JSON files into a [`Table`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::{DataFormat, Orientation};
use crate::error::{Result, TallyError};
use crate::table::{Column, Table, Value};

use super::json::parse_json;
use super::source::SourceMetadata;

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// CSV field delimiter.
    pub delimiter: u8,
    /// CSV quote character.
    pub quote: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            max_rows: None,
        }
    }
}

/// Reads tabular files.
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    config: ReaderConfig,
}

impl TableReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file and return the table and its metadata.
    ///
    /// `orientation` only applies to JSON.
    pub fn read_path(
        &self,
        path: impl AsRef<Path>,
        format: DataFormat,
        orientation: Orientation,
    ) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        // Reject before touching the file
        if format == DataFormat::Xlsx {
            return Err(unsupported_xlsx());
        }

        let mut file = File::open(path).map_err(|e| TallyError::io(path, e))?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| TallyError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.read_bytes(&contents, format, orientation)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "table read"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            (format == DataFormat::Json).then_some(orientation),
            table.num_rows(),
            table.num_columns(),
        );

        Ok((table, metadata))
    }

    /// Parse in-memory file contents.
    pub fn read_bytes(
        &self,
        bytes: &[u8],
        format: DataFormat,
        orientation: Orientation,
    ) -> Result<Table> {
        let table = match format {
            DataFormat::Csv => self.parse_csv(bytes)?,
            DataFormat::Json => parse_json(bytes, orientation)?,
            DataFormat::Xlsx => return Err(unsupported_xlsx()),
        };
        Ok(match self.config.max_rows {
            Some(max) if max < table.num_rows() => truncate(table, max)?,
            _ => table,
        })
    }

    /// Parse CSV with a header row. Cells are typed one by one.
    fn parse_csv(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(TallyError::EmptyData("No header row found".to_string()));
        }

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(Value::parse_cell).collect());
        }

        Table::from_rows(headers, rows)
    }
}

fn unsupported_xlsx() -> TallyError {
    TallyError::UnsupportedFormat("xlsx input is not supported; convert the file to csv or json".to_string())
}

fn truncate(table: Table, max: usize) -> Result<Table> {
    Table::from_columns(table.columns().map(|(name, column)| {
        let values: Column = column.iter().take(max).cloned().collect();
        (name.to_string(), values)
    }))
}
