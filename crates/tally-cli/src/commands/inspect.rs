//! Inspect command - show the columns of the configured dataset.

use std::path::PathBuf;

use colored::Colorize;
use tally::{Runner, Table, TracingReporter};

pub fn run(config: PathBuf, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !config.exists() {
        return Err(format!("Config file not found: {}", config.display()).into());
    }

    let reporter = TracingReporter::default();
    let runner = Runner::from_config_file(&config, &reporter)?;
    let (table, source) = runner.read()?;
    let required = &runner.config().data_file.columns;

    if json_output {
        let columns: Vec<serde_json::Value> = table
            .columns()
            .map(|(name, column)| {
                serde_json::json!({
                    "name": name,
                    "type": column.column_type(),
                    "nulls": column.null_count(),
                    "unique": column.n_unique(),
                    "required": required.iter().any(|r| r == name),
                })
            })
            .collect();
        let report = serde_json::json!({
            "source": source,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows)",
        "Columns of".cyan().bold(),
        source.file.white(),
        table.num_rows()
    );
    println!();
    print_columns(&table, required);

    if verbose {
        println!();
        println!("  Hash: {}", source.hash);
        println!("  Size: {} bytes", source.size_bytes);
    }

    Ok(())
}

fn print_columns(table: &Table, required: &[String]) {
    for (name, column) in table.columns() {
        let marker = if required.iter().any(|r| r == name) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "  {} {:24} {:10} nulls={:<5} unique={}",
            marker,
            name,
            format!("{:?}", column.column_type()),
            column.null_count(),
            column.n_unique()
        );
    }

    let missing = tally::validation::missing_columns(table, required);
    if !missing.is_empty() {
        println!();
        println!(
            "  {} {}",
            "Missing required:".red().bold(),
            tally::report::format_list(&missing)
        );
    }
}
