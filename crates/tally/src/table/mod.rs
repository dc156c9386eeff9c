//! In-memory columnar table.
//!
//! A [`Table`] is an ordered set of named [`Column`]s of equal length. Rows are
//! aligned by position. Columns keep the order in which they were added.

mod column;
mod value;

pub use column::{Column, ColumnType};
pub use value::{DATE_FORMAT, DATETIME_FORMAT, Value};

pub(crate) use value::quote;

use indexmap::IndexMap;

use crate::error::{Result, TallyError};

/// Structured data represented in a column-oriented form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from named columns.
    ///
    /// Returns an error if the columns have different lengths or a name repeats.
    pub fn from_columns<N, I>(columns: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Column)>,
    {
        let mut table = Self::new();
        for (name, column) in columns {
            let name = name.into();
            if table.columns.contains_key(&name) {
                return Err(TallyError::Shape(format!("duplicate column '{}'", name)));
            }
            table.set_column(name, column)?;
        }
        Ok(table)
    }

    /// Create a table from row-major data.
    ///
    /// Short rows are padded with nulls; extra cells are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = headers.len();
        let mut cells: Vec<Vec<Value>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
        for mut row in rows {
            row.resize(width, Value::Null);
            for (cell, values) in row.into_iter().zip(cells.iter_mut()) {
                values.push(cell);
            }
        }
        Self::from_columns(headers.into_iter().zip(cells.into_iter().map(Column::new)))
    }

    /// Returns the number of rows in the table.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    /// Returns the number of columns in the table.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get a column by name, failing with [`TallyError::Column`] if absent.
    pub fn try_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| TallyError::Column {
            column: name.to_string(),
        })
    }

    /// Iterate over `(name, column)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Replace the column called `name` in place, or append it if absent.
    ///
    /// The first column of an empty table sets the row count; every later
    /// column must match it.
    pub fn set_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        let expected = self.num_rows();
        let only_self = self.columns.len() == 1 && self.columns.contains_key(&name);
        if !self.columns.is_empty() && !only_self && column.len() != expected {
            return Err(TallyError::Shape(format!(
                "column '{}' has {} rows, table has {}",
                name,
                column.len(),
                expected
            )));
        }
        // `insert` keeps the position of an existing key.
        self.columns.insert(name, column);
        Ok(())
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(
            self.columns
                .values()
                .filter_map(|c| c.get(index))
                .collect(),
        )
    }

    /// Iterate over rows as vectors of cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> {
        (0..self.num_rows()).filter_map(move |i| self.row(i))
    }
}
