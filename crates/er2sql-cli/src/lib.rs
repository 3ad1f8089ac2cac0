//! CLI logic for the er2sql tool.
//!
//! Each subcommand maps onto [`Er2Sql`] operations: `convert` writes the
//! generated DDL, `validate` prints the report for a SQL file and `check`
//! does both for a diagram. `convert` and `check` both stop with
//! [`Er2SqlError::Conversion`] when the diagram cannot be parsed.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    sync::Arc,
};

use log::{info, warn};

use er2sql::{
    CheckOutcome, Er2Sql, Er2SqlError, config::AppConfig, is_error_entry, join_statements,
    model::{HttpModel, SharedModel},
};

/// Run the er2sql CLI application, printing results to stdout.
///
/// # Errors
///
/// Returns `Er2SqlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unsupported or unparseable diagrams
/// - Language model failures
pub fn run(args: &Args) -> Result<(), Er2SqlError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the CLI, writing printed results to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), Er2SqlError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let er2sql = build(app_config)?;

    match &args.command {
        Command::Convert { input, output } => {
            info!(input_path = input; "Converting diagram");
            let statements = convert(&er2sql, input)?;
            let script = format!("{}\n", join_statements(&statements));

            match output {
                Some(path) => {
                    fs::write(path, script)?;
                    info!(output_file = path; "SQL exported successfully");
                }
                None => out.write_all(script.as_bytes())?,
            }
        }
        Command::Validate { input } => {
            info!(input_path = input; "Validating script");
            let sql = fs::read_to_string(input)?;
            let report = er2sql.validate(&sql)?;
            write_json(out, &report)?;
        }
        Command::Check { input } => {
            info!(input_path = input; "Checking diagram");
            let statements = convert(&er2sql, input)?;
            let report = er2sql.validate(&join_statements(&statements))?;
            write_json(out, &CheckOutcome { statements, report })?;
        }
    }

    Ok(())
}

fn build(config: AppConfig) -> Result<Er2Sql, Er2SqlError> {
    let model = HttpModel::from_config(config.semantic())?;
    let er2sql = Er2Sql::new(config);

    Ok(match model {
        Some(model) => er2sql.with_model(Arc::new(model) as SharedModel),
        None => er2sql,
    })
}

fn convert(er2sql: &Er2Sql, input: &str) -> Result<Vec<String>, Er2SqlError> {
    let statements = er2sql.convert_file(input)?;

    if let Some(entry) = statements.iter().find(|entry| is_error_entry(entry)) {
        let summary = entry.split_once(": ").map_or(entry.as_str(), |(_, rest)| rest);
        return Err(Er2SqlError::Conversion(summary.to_string()));
    }
    if statements.iter().all(|s| !s.starts_with("CREATE TABLE")) {
        warn!(input_path = input; "Diagram contains no tables");
    }

    Ok(statements)
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<(), Er2SqlError> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{json}")?;
    Ok(())
}
