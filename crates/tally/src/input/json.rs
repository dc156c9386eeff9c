//! JSON tables in the pandas orientations.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value as Json};

use crate::config::Orientation;
use crate::error::{Result, TallyError};
use crate::table::{Column, Table, Value};

/// Parse a JSON document laid out according to `orientation`.
///
/// Scalars become typed [`Value`]s; nested arrays and objects are kept as
/// their JSON text. Cells missing from a row are null.
pub fn parse_json(bytes: &[u8], orientation: Orientation) -> Result<Table> {
    let document: Json = serde_json::from_slice(bytes)?;
    match orientation {
        Orientation::Records => records(&document),
        Orientation::Columns => columns(&document),
        Orientation::Index => index(&document),
        Orientation::Split => split(&document),
        Orientation::Values => values(&document),
    }
}

/// `[{column: value}, ...]`
fn records(document: &Json) -> Result<Table> {
    let rows = expect_array(document, "records")?
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object()
                .ok_or_else(|| shape(format!("record {} is not a JSON object", i)))
        })
        .collect::<Result<Vec<_>>>()?;
    from_objects(&rows)
}

/// `{column: {index: value}}`
fn columns(document: &Json) -> Result<Table> {
    let by_column = expect_object(document, "columns")?;

    let mut labels: IndexSet<&str> = IndexSet::new();
    let mut cells: Vec<(&str, &Map<String, Json>)> = Vec::with_capacity(by_column.len());
    for (name, column) in by_column {
        let column = column
            .as_object()
            .ok_or_else(|| shape(format!("column '{}' is not a JSON object", name)))?;
        labels.extend(column.keys().map(String::as_str));
        cells.push((name.as_str(), column));
    }

    Table::from_columns(cells.into_iter().map(|(name, column)| {
        let values: Column = labels
            .iter()
            .map(|label| column.get(*label).map_or(Value::Null, Value::from_json))
            .collect();
        (name, values)
    }))
}

/// `{index: {column: value}}`
fn index(document: &Json) -> Result<Table> {
    let rows = expect_object(document, "index")?
        .iter()
        .map(|(label, row)| {
            row.as_object()
                .ok_or_else(|| shape(format!("row '{}' is not a JSON object", label)))
        })
        .collect::<Result<Vec<_>>>()?;
    from_objects(&rows)
}

/// `{"columns": [...], "index": [...], "data": [[...], ...]}`
///
/// The index is optional and not kept.
fn split(document: &Json) -> Result<Table> {
    let object = expect_object(document, "split")?;
    let names = object
        .get("columns")
        .and_then(Json::as_array)
        .ok_or_else(|| shape("split layout needs a 'columns' array".to_string()))?
        .iter()
        .map(label)
        .collect::<Vec<_>>();
    let data = object
        .get("data")
        .and_then(Json::as_array)
        .ok_or_else(|| shape("split layout needs a 'data' array".to_string()))?;

    Table::from_rows(names, array_rows(data)?)
}

/// `[[value, ...], ...]`; columns are named by position.
fn values(document: &Json) -> Result<Table> {
    let rows = array_rows(expect_array(document, "values")?)?;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let names = (0..width).map(|i| i.to_string()).collect();
    Table::from_rows(names, rows)
}

// =============================================================================
// HELPERS
// =============================================================================

/// Build a table from row objects. Columns appear in first-seen order.
fn from_objects(rows: &[&Map<String, Json>]) -> Result<Table> {
    let mut columns: IndexMap<&str, Vec<Value>> = IndexMap::new();
    for (i, row) in rows.iter().enumerate() {
        for (name, cell) in row.iter() {
            columns
                .entry(name.as_str())
                .or_insert_with(|| vec![Value::Null; i])
                .push(Value::from_json(cell));
        }
        // Pad columns this row did not mention
        for values in columns.values_mut() {
            values.resize(i + 1, Value::Null);
        }
    }
    Table::from_columns(
        columns
            .into_iter()
            .map(|(name, values)| (name, Column::new(values))),
    )
}

fn array_rows(data: &[Json]) -> Result<Vec<Vec<Value>>> {
    data.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_array()
                .map(|cells| cells.iter().map(Value::from_json).collect())
                .ok_or_else(|| shape(format!("row {} is not a JSON array", i)))
        })
        .collect()
}

fn label(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn expect_array<'a>(document: &'a Json, orientation: &str) -> Result<&'a Vec<Json>> {
    document
        .as_array()
        .ok_or_else(|| shape(format!("'{}' layout needs a top-level JSON array", orientation)))
}

fn expect_object<'a>(document: &'a Json, orientation: &str) -> Result<&'a Map<String, Json>> {
    document
        .as_object()
        .ok_or_else(|| shape(format!("'{}' layout needs a top-level JSON object", orientation)))
}

fn shape(message: String) -> TallyError {
    TallyError::Shape(message)
}
