//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally::DEFAULT_SCOPE;

/// Tally: validate a tabular dataset and summarize it
#[derive(Parser)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write log events to this file (appended, no colors)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read, validate, summarize and write the configured dataset
    Run {
        /// Path to the configuration file (YAML or JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Also write the run summary as JSON to this path
        #[arg(long, value_name = "PATH")]
        summary_json: Option<PathBuf>,

        /// Noun used in result messages
        #[arg(long, default_value = DEFAULT_SCOPE)]
        scope: String,
    },

    /// Read the configured dataset and check its required columns
    Validate {
        /// Path to the configuration file (YAML or JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Read the configured dataset and show its columns
    Inspect {
        /// Path to the configuration file (YAML or JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
