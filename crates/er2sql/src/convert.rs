//! Converter facade: picks the format parser from the file extension.

use std::path::Path;

use log::{debug, info};

use er2sql_parser::DiagramFormat;

use crate::Er2SqlError;

/// Converts the diagram at `path` into DDL statements.
///
/// The parser is selected by the file extension (`.erd`, `.graphml`,
/// `.xml`). Parse failures, including an unreadable file, are reported as a
/// single error entry in the returned sequence.
///
/// # Errors
///
/// Returns [`Er2SqlError::UnsupportedFormat`] for any other extension; no
/// parser runs in that case.
pub fn convert_file(path: impl AsRef<Path>) -> Result<Vec<String>, Er2SqlError> {
    let path = path.as_ref();
    let format = DiagramFormat::from_path(path)
        .ok_or_else(|| Er2SqlError::UnsupportedFormat(path.display().to_string()))?;

    info!(path = path.display().to_string(), format:% = format; "Converting diagram");
    let statements = er2sql_parser::parse_file(format, path);
    debug!(statement_count = statements.len(); "Conversion finished");

    Ok(statements)
}

/// Converts an in-memory diagram document of the given format.
pub fn convert_source(format: DiagramFormat, source: &str) -> Vec<String> {
    er2sql_parser::parse(format, source)
}

/// Joins converted statements into one DDL script for validation.
pub fn join_statements(statements: &[String]) -> String {
    statements.join("\n")
}
