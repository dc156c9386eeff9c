//! Validate command - read the dataset and check its required columns.

use std::path::PathBuf;

use colored::Colorize;
use tally::{Runner, TracingReporter};

pub fn run(config: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !config.exists() {
        return Err(format!("Config file not found: {}", config.display()).into());
    }

    let reporter = TracingReporter::default();
    let runner = Runner::from_config_file(&config, &reporter)?;
    let (table, source) = runner.validate()?;

    let required = &runner.config().data_file.columns;
    println!(
        "{} {} ({} rows, {} columns)",
        "✓ Valid:".green().bold(),
        source.file.white(),
        table.num_rows(),
        table.num_columns()
    );
    println!(
        "  {} required column(s) present",
        required.len().to_string().white().bold()
    );

    if verbose {
        for name in required {
            println!("    {}", name);
        }
    }

    Ok(())
}
