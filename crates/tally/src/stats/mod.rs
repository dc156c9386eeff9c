//! Descriptive statistics over a [`Table`](crate::table::Table).
//!
//! The [`StatisticsEngine`] computes five independent aggregates. Each one
//! returns its value, reports a human-readable message, and wraps any failure
//! in [`TallyError::Statistic`](crate::error::TallyError::Statistic) so the
//! caller can tell which computation failed.

mod engine;

pub use engine::{StatisticsEngine, YEAR_COLUMN};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// The statistics the engine can compute.
///
/// Displays as the configuration key that parameterizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    UniqueNumber,
    Average,
    TopMax,
    CountByValue,
    CountByYear,
}

impl Statistic {
    /// Every statistic, in run order.
    pub const ALL: [Statistic; 5] = [
        Statistic::UniqueNumber,
        Statistic::Average,
        Statistic::TopMax,
        Statistic::CountByValue,
        Statistic::CountByYear,
    ];

    /// Configuration key, e.g. `get_top_max`.
    pub fn key(&self) -> &'static str {
        match self {
            Statistic::UniqueNumber => "get_unique_number",
            Statistic::Average => "get_average",
            Statistic::TopMax => "get_top_max",
            Statistic::CountByValue => "get_count_by_value",
            Statistic::CountByYear => "get_count_by_year",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One group of a count-by-value result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

impl ValueCount {
    /// Flatten an ordered count map into a list, keeping the map's order.
    ///
    /// JSON objects only take string keys, so summaries carry counts this way.
    pub fn from_counts(counts: &BTreeMap<Value, usize>) -> Vec<ValueCount> {
        counts
            .iter()
            .map(|(value, count)| ValueCount {
                value: value.clone(),
                count: *count,
            })
            .collect()
    }
}
