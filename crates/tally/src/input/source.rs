//! Metadata about an ingested file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{DataFormat, Orientation};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    pub format: DataFormat,
    /// JSON layout the file was read with; `None` for CSV.
    pub orientation: Option<Orientation>,
    /// Number of data rows.
    pub row_count: usize,
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has just been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: DataFormat,
        orientation: Option<Orientation>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            orientation,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}
