//! Run command - execute the full job and print a summary.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tally::{RunSummary, Runner, TracingReporter};

pub fn run(
    config: PathBuf,
    summary_json: Option<PathBuf>,
    scope: String,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !config.exists() {
        return Err(format!("Config file not found: {}", config.display()).into());
    }

    let reporter = TracingReporter::default();
    let runner = Runner::from_config_file(&config, &reporter)?.with_scope(scope);

    println!(
        "{} {}",
        "Summarizing".cyan().bold(),
        runner.config().data_file.full_path().display().to_string().white()
    );

    let summary = runner.run()?;
    print_summary(&summary, verbose);

    if let Some(path) = summary_json {
        write_summary(&summary, &path)?;
        println!("Summary written to {}", path.display().to_string().white());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, verbose: bool) {
    println!();
    println!("{}", "Results:".yellow().bold());
    println!(
        "  Unique values:   {}",
        summary.unique_number.to_string().white().bold()
    );
    println!("  Average:         {}", format!("{:?}", summary.average).white().bold());
    println!(
        "  Top rows:        {}",
        tally::report::format_list(&summary.top_max)
    );
    println!(
        "  Count by value:  {}",
        tally::report::format_mapping(summary.count_by_value.iter().map(|c| (&c.value, c.count)))
    );
    println!(
        "  Count by year:   {}",
        tally::report::format_mapping(summary.count_by_year.iter().map(|(y, c)| (*y, *c)))
    );
    println!();

    if verbose {
        println!("{}", "Source:".yellow().bold());
        println!("  File: {}", summary.source.path.display());
        println!("  Hash: {}", summary.source.hash);
        println!(
            "  Size: {} rows x {} columns ({} bytes)",
            summary.source.row_count, summary.source.column_count, summary.source.size_bytes
        );
        println!();
    }

    println!(
        "{} {} in {} ms",
        "✓ Wrote".green().bold(),
        summary.output_path.display().to_string().white(),
        summary.elapsed_ms
    );
}

fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
