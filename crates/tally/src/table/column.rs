//! Typed table columns and the aggregates computed over them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::format::{ParseErrorKind, Parsed, StrftimeItems, parse};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::value::Value;

/// Logical type of a column, derived from its non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values.
    Boolean,
    /// Text values.
    String,
    /// Parsed dates and datetimes.
    DateTime,
    /// More than one kind of non-null value.
    Mixed,
    /// No non-null values.
    Empty,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::DateTime)
    }

    fn of(value: &Value) -> Option<ColumnType> {
        match value {
            _ if value.is_null() => None,
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Int(_) => Some(ColumnType::Integer),
            Value::Float(_) => Some(ColumnType::Float),
            Value::Str(_) => Some(ColumnType::String),
            Value::DateTime(_) => Some(ColumnType::DateTime),
            Value::Null => None,
        }
    }
}

/// A single column in a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    values: Vec<Value>,
}

impl Column {
    /// Creates a column from values.
    ///
    /// A column holding both integers and floats stores every integer as a
    /// float, so each column keeps a single numeric representation.
    pub fn new(mut values: Vec<Value>) -> Self {
        let has_float = values.iter().any(|v| matches!(v, Value::Float(_)));
        let has_int = values.iter().any(|v| matches!(v, Value::Int(_)));
        if has_float && has_int {
            for value in &mut values {
                if let Value::Int(i) = value {
                    *value = Value::Float(*i as f64);
                }
            }
        }
        Self { values }
    }

    /// Number of cells, including nulls.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Non-null cells only.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Logical type of the column.
    pub fn column_type(&self) -> ColumnType {
        let mut found: Option<ColumnType> = None;
        for kind in self.values.iter().filter_map(ColumnType::of) {
            match found {
                None => found = Some(kind),
                Some(current) if current == kind => {}
                Some(_) => return ColumnType::Mixed,
            }
        }
        found.unwrap_or(ColumnType::Empty)
    }

    /// True if every non-null value is an integer or float.
    pub fn is_numeric(&self) -> bool {
        self.non_null().all(Value::is_numeric)
    }

    /// True if every non-null value is text.
    pub fn is_string(&self) -> bool {
        self.non_null().all(|v| matches!(v, Value::Str(_)))
    }

    /// Number of distinct non-null values.
    pub fn n_unique(&self) -> usize {
        self.non_null().collect::<BTreeSet<_>>().len()
    }

    /// Row count per distinct value, sorted by value. Nulls are counted under
    /// `Value::Null`, so the counts always sum to `len()`.
    pub fn value_counts(&self) -> BTreeMap<Value, usize> {
        let mut counts = BTreeMap::new();
        for value in &self.values {
            let key = if value.is_null() { Value::Null } else { value.clone() };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Arithmetic mean of the non-null numeric values; NaN if there are none.
    pub fn mean(&self) -> f64 {
        // Incremental mean keeps the running value bounded for large inputs.
        let mut count = 0usize;
        let mut mean = 0.0;
        for x in self.values.iter().filter_map(Value::as_f64) {
            count += 1;
            mean += (x - mean) / count as f64;
        }
        if count == 0 { f64::NAN } else { mean }
    }

    /// Row indices of the `n` largest numeric values, largest first.
    ///
    /// Equal values keep their original row order. Nulls are never selected.
    pub fn nlargest_rows(&self, n: usize) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = self
            .values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.as_f64().map(|x| (row, x)))
            .collect();
        // `sort_by` is stable, so ties stay in row order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().take(n).map(|(row, _)| row).collect()
    }

    /// Parses every value as a datetime using a strftime-style `format`.
    ///
    /// Values that are already temporal are kept. On failure returns the first
    /// value that cannot be parsed, as text; a null (`None`) counts as a failure.
    pub fn parse_datetime(&self, format: &str) -> std::result::Result<Column, String> {
        let mut parsed = Vec::with_capacity(self.values.len());
        for value in &self.values {
            let datetime = match value {
                Value::DateTime(dt) => Some(*dt),
                Value::Str(s) => parse_datetime_str(s, format),
                Value::Int(_) | Value::Float(_) if !value.is_null() => {
                    parse_datetime_str(&value.to_string(), format)
                }
                _ => None,
            };
            match datetime {
                Some(dt) => parsed.push(Value::DateTime(dt)),
                None if value.is_null() => return Err(value.repr()),
                None => return Err(value.to_string()),
            }
        }
        Ok(Column { values: parsed })
    }
}

/// Parse a datetime with a strftime-style `format`.
///
/// The year must be present. Fields the format leaves out are filled in:
/// month and day default to 1, minutes to 0 and a missing time to midnight.
fn parse_datetime_str(value: &str, format: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(format)).ok()?;

    // `set_*` refuses to overwrite a parsed field, so only gaps are filled.
    let date = match parsed.to_naive_date() {
        Ok(date) => date,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            let _ = parsed.set_month(1);
            let _ = parsed.set_day(1);
            parsed.to_naive_date().ok()?
        }
        Err(_) => return None,
    };

    let time = match parsed.to_naive_time() {
        Ok(time) => time,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            let _ = parsed.set_minute(0);
            match parsed.to_naive_time() {
                Ok(time) => time,
                Err(_) => NaiveTime::from_hms_opt(0, 0, 0)?,
            }
        }
        Err(_) => return None,
    };

    Some(date.and_time(time))
}

impl FromIterator<Value> for Column {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Column::new(iter.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Column {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(Into::into).collect()
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
