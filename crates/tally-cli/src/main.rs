//! Tally CLI - validate and summarize a tabular dataset.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Run {
            config,
            summary_json,
            scope,
        } => commands::run::run(config, summary_json, scope, cli.verbose),

        Commands::Validate { config } => commands::validate::run(config, cli.verbose),

        Commands::Inspect { config, json } => commands::inspect::run(config, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
