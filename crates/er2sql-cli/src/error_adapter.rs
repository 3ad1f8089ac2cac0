//! Error adapter for converting [`Er2SqlError`] to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's report formatting used in the CLI. A conversion failure
//! already carries the parser's code and help in its message, so it is
//! reported as a single diagnostic.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use er2sql::{DiagramFormat, Er2SqlError};

/// Adapter exposing an [`Er2SqlError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a Er2SqlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            Er2SqlError::Io(_) => "er2sql::io",
            Er2SqlError::UnsupportedFormat(_) => "er2sql::format",
            Er2SqlError::Conversion(_) => "er2sql::conversion",
            Er2SqlError::Config(_) => "er2sql::config",
            Er2SqlError::Model(_) => "er2sql::model",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            Er2SqlError::UnsupportedFormat(_) => {
                let extensions: Vec<_> = DiagramFormat::ALL
                    .iter()
                    .map(|format| format!(".{}", format.extension()))
                    .collect();
                Some(Box::new(format!(
                    "supported extensions: {}",
                    extensions.join(", ")
                )))
            }
            Er2SqlError::Model(_) => Some(Box::new(
                "check `semantic.endpoint` or remove it to skip the semantic check",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
