//! Fuzz target for the JSON reader in every orientation.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tally::{DataFormat, Orientation, TableReader};

#[derive(Debug, Arbitrary)]
enum Layout {
    Records,
    Columns,
    Index,
    Split,
    Values,
}

impl From<Layout> for Orientation {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Records => Orientation::Records,
            Layout::Columns => Orientation::Columns,
            Layout::Index => Orientation::Index,
            Layout::Split => Orientation::Split,
            Layout::Values => Orientation::Values,
        }
    }
}

fuzz_target!(|input: (Layout, &[u8])| {
    let (layout, data) = input;
    if data.len() > 100_000 {
        return;
    }

    let _ = TableReader::new().read_bytes(data, DataFormat::Json, layout.into());
});
