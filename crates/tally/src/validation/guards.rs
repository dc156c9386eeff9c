//! Column type guards.

use crate::error::{ExpectedKind, Result, TallyError};
use crate::report::Reporter;
use crate::table::{Column, Table};

/// Succeed iff every non-null value in `column` is an integer or a float.
pub fn requires_numeric(table: &Table, column: &str, reporter: &dyn Reporter) -> Result<()> {
    guard(table, column, ExpectedKind::Numeric, Column::is_numeric, reporter)
}

/// Succeed iff every non-null value in `column` is text.
pub fn requires_string(table: &Table, column: &str, reporter: &dyn Reporter) -> Result<()> {
    guard(table, column, ExpectedKind::String, Column::is_string, reporter)
}

fn guard(
    table: &Table,
    column: &str,
    expected: ExpectedKind,
    check: fn(&Column) -> bool,
    reporter: &dyn Reporter,
) -> Result<()> {
    let values = table.try_column(column)?;
    if check(values) {
        reporter.info(&format!("Values in column {} are {}", column, expected));
        Ok(())
    } else {
        reporter.info(&format!("Values in column {} are NOT {}", column, expected));
        Err(TallyError::TypeMismatch {
            column: column.to_string(),
            expected,
            found: values.column_type(),
        })
    }
}
