//! Table ingestion and source metadata.

mod json;
mod reader;
mod source;

pub use json::parse_json;
pub use reader::{ReaderConfig, TableReader};
pub use source::SourceMetadata;
