//! er2sql - Convert entity-relationship diagrams into SQL DDL and validate it.
//!
//! Three diagram formats are supported (`.erd`, `.graphml` and draw.io
//! `.xml`). The generated script can be checked by a validation pipeline
//! that combines linting, execution on an in-memory database, structural
//! rules and an optional language-model review.

pub mod config;
pub mod model;
pub mod validate;

mod convert;
mod error;

pub use er2sql_core::{ddl, schema};
pub use er2sql_parser::{DiagramFormat, NO_TABLES_FOUND, is_error_entry};

pub use convert::{convert_file, convert_source, join_statements};
pub use error::Er2SqlError;

use std::path::Path;

use log::info;
use serde::Serialize;

use config::AppConfig;
use model::SharedModel;
use validate::{ValidationReport, Validator};

/// Statements converted from a diagram together with their validation report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub statements: Vec<String>,
    pub report: ValidationReport,
}

/// Entry point for converting and validating diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use er2sql::{Er2Sql, config::AppConfig};
///
/// let er2sql = Er2Sql::new(AppConfig::default());
///
/// let statements = er2sql.convert_file("schema.erd")
///     .expect("Unsupported format");
/// let report = er2sql.validate(&er2sql::join_statements(&statements))
///     .expect("Validation failed");
///
/// println!("{}", report.ast_messages.join("\n"));
/// ```
#[derive(Clone)]
pub struct Er2Sql {
    validator: Validator,
}

impl Default for Er2Sql {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Er2Sql {
    /// Create a new instance with the given configuration.
    ///
    /// The semantic checker stays disabled until a model is attached with
    /// [`Er2Sql::with_model`].
    pub fn new(config: AppConfig) -> Self {
        Self {
            validator: Validator::new(&config),
        }
    }

    /// Attach the language model used by the semantic checker.
    pub fn with_model(mut self, model: SharedModel) -> Self {
        self.validator = self.validator.with_model(model);
        self
    }

    /// Convert the diagram at `path`. See [`convert_file`].
    ///
    /// # Errors
    ///
    /// Returns `Er2SqlError::UnsupportedFormat` for an unknown extension.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>, Er2SqlError> {
        convert_file(path)
    }

    /// Convert an in-memory diagram document.
    pub fn convert_source(&self, format: DiagramFormat, source: &str) -> Vec<String> {
        convert_source(format, source)
    }

    /// Run every checker over a DDL script.
    ///
    /// # Errors
    ///
    /// Returns `Er2SqlError::Model` when the language model is unreachable.
    pub fn validate(&self, sql: &str) -> Result<ValidationReport, Er2SqlError> {
        self.validator.validate(sql)
    }

    /// Convert the diagram at `path` and validate the joined statements.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Er2Sql::convert_file`] and [`Er2Sql::validate`].
    pub fn convert_and_validate(&self, path: impl AsRef<Path>) -> Result<CheckOutcome, Er2SqlError> {
        let statements = self.convert_file(path)?;
        info!(statement_count = statements.len(); "Validating converted statements");

        let report = self.validate(&join_statements(&statements))?;
        Ok(CheckOutcome { statements, report })
    }
}
