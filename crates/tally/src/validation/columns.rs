//! Required-column check.

use crate::error::{Result, TallyError};
use crate::report::{Reporter, format_list};
use crate::table::Table;

/// Message reported when every required column is present.
pub const CHECK_PASSED: &str = "Data Quality Check Passed";

/// Required names absent from `table`, in the order they were requested.
pub fn missing_columns<S: AsRef<str>>(table: &Table, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !table.has_column(name))
        .map(str::to_string)
        .collect()
}

/// Verify that `table` has every column in `required`.
///
/// Reports `Data Quality Check Passed` on success. On failure reports the
/// missing names and returns [`TallyError::MissingColumns`]. The table is
/// never modified.
pub fn check_required_columns<S: AsRef<str>>(
    table: &Table,
    required: &[S],
    reporter: &dyn Reporter,
) -> Result<()> {
    let missing = missing_columns(table, required);
    if missing.is_empty() {
        reporter.info(CHECK_PASSED);
        return Ok(());
    }

    reporter.info(&format!(
        "Data Quality Check Failed. Missing columns in dataframe: {}",
        format_list(&missing)
    ));
    Err(TallyError::MissingColumns { missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use crate::table::Column;

    fn cars() -> Table {
        Table::from_columns(vec![
            ("Name", Column::from(vec!["A", "B"])),
            ("HP", Column::from(vec![100i64, 200])),
            ("Origin", Column::from(vec!["US", "EU"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_columns_present() {
        let reporter = MemoryReporter::new();
        check_required_columns(&cars(), &["Name", "HP"], &reporter).unwrap();
        assert_eq!(reporter.messages(), vec![CHECK_PASSED]);
    }

    #[test]
    fn test_empty_requirement_passes() {
        let reporter = MemoryReporter::new();
        let required: [&str; 0] = [];
        assert!(check_required_columns(&Table::new(), &required, &reporter).is_ok());
    }

    #[test]
    fn test_missing_columns_in_request_order() {
        let reporter = MemoryReporter::new();
        let err = check_required_columns(&cars(), &["Zeta", "Name", "Alpha"], &reporter)
            .unwrap_err();

        match err {
            TallyError::MissingColumns { missing } => assert_eq!(missing, vec!["Zeta", "Alpha"]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(reporter.contains("Missing columns in dataframe: ['Zeta', 'Alpha']"));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let table = cars();
        let before = table.clone();
        let _ = check_required_columns(&table, &["Missing"], &MemoryReporter::new());
        assert_eq!(table, before);
    }
}
