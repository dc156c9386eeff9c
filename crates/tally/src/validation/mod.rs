//! Schema and type checks run before statistics.
//!
//! [`check_required_columns`] verifies that a table carries every column the
//! configuration names. The type guards ([`requires_numeric`],
//! [`requires_string`]) are called by operations that assume a column kind.

mod columns;
mod guards;

pub use columns::{check_required_columns, missing_columns};
pub use guards::{requires_numeric, requires_string};
