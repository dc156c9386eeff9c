//! Example: Summarize a data file without a configuration file.
//!
//! Usage:
//!   cargo run --example summarize -- <file_path> <numeric_column> <label_column>
//!
//! Example:
//!   cargo run --example summarize -- demos/data/cars.json Horsepower Name

use std::env;
use std::path::Path;

use tally::config::{DataFileConfig, DataFormat, Orientation};
use tally::{MemoryReporter, StatisticsEngine, TableReader};

fn main() -> tally::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: cargo run --example summarize -- <file_path> <numeric_column> <label_column>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example summarize -- demos/data/cars.json Horsepower Name");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let (numeric, label) = (&args[2], &args[3]);

    let Some(format) = DataFormat::from_path(path) else {
        eprintln!("Error: cannot tell the format of {}", path.display());
        std::process::exit(1);
    };

    let (table, source) = TableReader::new().read_path(path, format, Orientation::Records)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Tally Summary: {}", path.display());
    println!("{}", separator);
    println!();

    println!("## Source Metadata");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Rows: {}", source.row_count);
    println!("  Hash: {}", source.hash);
    println!();

    println!("## Columns ({})", table.num_columns());
    for (name, column) in table.columns() {
        println!(
            "  {:24} {:10} nulls={:<5} unique={}",
            name,
            format!("{:?}", column.column_type()),
            column.null_count(),
            column.n_unique()
        );
    }
    println!();

    let config = DataFileConfig {
        file_name: source.file.clone(),
        file_path: path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        file_type: format,
        orientation: Orientation::Records,
        columns: Vec::new(),
        date_format: tally::table::DATE_FORMAT.to_string(),
    };
    let reporter = MemoryReporter::new();
    let engine = StatisticsEngine::new("rows", &config, &reporter);

    engine.average(&table, numeric)?;
    engine.top_max(&table, numeric, label, 5)?;

    println!("## Statistics");
    for message in reporter.messages() {
        println!("  {}", message);
    }
    println!();
    println!("{}", separator);

    Ok(())
}
