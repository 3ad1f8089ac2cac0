//! Command-line argument definitions for the er2sql CLI.
//!
//! [`Args`] holds the global options (configuration file and logging
//! verbosity) and one [`Command`].

use clap::{Parser, Subcommand};

/// Command-line arguments for the er2sql tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a diagram (.erd, .graphml, .xml) into SQL DDL
    Convert {
        /// Path to the diagram file
        input: String,

        /// Write the script to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a SQL DDL script and print the report as JSON
    Validate {
        /// Path to the SQL file
        input: String,
    },

    /// Convert a diagram and validate the generated script; fails like
    /// `convert` when the diagram cannot be parsed
    Check {
        /// Path to the diagram file
        input: String,
    },
}
