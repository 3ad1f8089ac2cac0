//! # er2sql Parser
//!
//! Parsers for the three supported entity-relationship diagram formats. Each
//! parser lowers its document into the shared
//! [`Schema`](er2sql_core::schema::Schema), which is then rendered to DDL by
//! [`er2sql_core::ddl`].
//!
//! ## Usage
//!
//! ```
//! # use er2sql_parser::{parse, DiagramFormat};
//! let source = r#"<er-diagram>
//!     <entity id="1" name="User">
//!         <attribute name="id" type="INTEGER" primary="true"/>
//!     </entity>
//! </er-diagram>"#;
//!
//! let statements = parse(DiagramFormat::EntityRelationship, source);
//! assert!(statements[0].starts_with("CREATE TABLE User"));
//! ```
//!
//! [`parse`] and [`parse_file`] never fail: a parse failure becomes a single
//! entry starting with [`ERROR_MARKER`], and a document without any table
//! becomes the single entry [`NO_TABLES_FOUND`].

mod drawio;
mod erd;
pub mod error;
mod format;
mod graphml;
mod type_map;
mod xml;

pub use format::DiagramFormat;
pub use type_map::DEFAULT_TYPE;

use std::{fs, path::Path};

use log::{debug, info, warn};

use er2sql_core::ddl;

use error::{Diagnostic, ErrorCode, ParseError};

/// Leading term of the single entry produced when a document cannot be parsed.
pub const ERROR_MARKER: &str = "Error";

/// Sole entry produced when a document yields no table.
pub const NO_TABLES_FOUND: &str = "No tables found";

/// Parses a diagram document and renders its DDL statements.
///
/// All `CREATE TABLE` statements precede all `ALTER TABLE` statements. On
/// failure the result holds exactly one entry for which [`is_error_entry`] is
/// `true`.
pub fn parse(format: DiagramFormat, source: &str) -> Vec<String> {
    info!(format:% = format; "Parsing diagram");

    match format.parse_schema(source) {
        Ok(schema) => {
            let statements = ddl::render(&schema);
            if statements.is_empty() {
                warn!(format:% = format; "Diagram contains no tables");
                return vec![NO_TABLES_FOUND.to_string()];
            }
            debug!(statement_count = statements.len(); "Diagram converted");
            statements
        }
        Err(err) => {
            warn!(format:% = format, err:% = err; "Diagram parsing failed");
            vec![error_entry(&err)]
        }
    }
}

/// Reads the document at `path` and parses it with [`parse`].
///
/// An unreadable file is reported through the error entry, like any other
/// parse failure.
pub fn parse_file(format: DiagramFormat, path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(source) => parse(format, &source),
        Err(err) => {
            let err = ParseError::from(
                Diagnostic::error(format!("cannot read {}: {err}", path.display()))
                    .with_code(ErrorCode::E002)
                    .with_help("check the path and that the file is UTF-8 text"),
            );
            warn!(path = path.display().to_string(), err:% = err; "Diagram unreadable");
            vec![error_entry(&err)]
        }
    }
}

/// Returns `true` when `entry` is the error entry of a failed parse.
pub fn is_error_entry(entry: &str) -> bool {
    entry
        .strip_prefix(ERROR_MARKER)
        .is_some_and(|rest| rest.starts_with(':'))
}

fn error_entry(err: &ParseError) -> String {
    format!("{ERROR_MARKER}: {}", err.summary())
}
