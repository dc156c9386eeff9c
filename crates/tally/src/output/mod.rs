//! Table egress.

mod writer;

pub use writer::TableWriter;
