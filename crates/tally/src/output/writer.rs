//! Writes a [`Table`] as CSV or JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::config::DataFormat;
use crate::error::{Result, TallyError};
use crate::table::Table;

/// Header of the row-index column, left blank like the usual CSV export.
const INDEX_HEADER: &str = "";

/// Serializes tables to files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `table` to `path`, creating parent directories as needed.
    ///
    /// With `include_index`, CSV output gets a leading column holding each
    /// row's position. JSON output is an array of records and has no index.
    pub fn write_path(
        &self,
        table: &Table,
        path: impl AsRef<Path>,
        format: DataFormat,
        include_index: bool,
    ) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| TallyError::io(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| TallyError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(table, &mut writer, format, include_index)?;
        writer.flush().map_err(|e| TallyError::io(path, e))?;

        tracing::debug!(path = %path.display(), rows = table.num_rows(), %format, "table written");
        Ok(())
    }

    /// Serialize `table` into any writer.
    pub fn write_to<W: Write>(
        &self,
        table: &Table,
        writer: W,
        format: DataFormat,
        include_index: bool,
    ) -> Result<()> {
        match format {
            DataFormat::Csv => write_csv(table, writer, include_index),
            DataFormat::Json => write_json(table, writer),
            DataFormat::Xlsx => Err(TallyError::UnsupportedFormat(
                "xlsx output is not supported".to_string(),
            )),
        }
    }
}

fn write_csv<W: Write>(table: &Table, writer: W, include_index: bool) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(table.num_columns() + 1);
    if include_index {
        header.push(INDEX_HEADER);
    }
    header.extend(table.column_names());
    if !header.is_empty() {
        csv.write_record(&header)?;
    }

    for (i, row) in table.rows().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
        if include_index {
            record.push(i.to_string());
        }
        record.extend(row.into_iter().map(ToString::to_string));
        csv.write_record(&record)?;
    }

    csv.flush().map_err(|e| TallyError::Csv(e.into()))?;
    Ok(())
}

fn write_json<W: Write>(table: &Table, writer: W) -> Result<()> {
    let names: Vec<&str> = table.column_names().collect();
    let records: Vec<Json> = table
        .rows()
        .map(|row| {
            let object: Map<String, Json> = names
                .iter()
                .zip(row)
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect();
            Json::Object(object)
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}
