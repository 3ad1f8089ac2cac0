//! The ParseError type for wrapping a parser diagnostic.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for a failed diagram parse.
#[derive(Debug)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Get the diagnostic describing the failure.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Renders the diagnostic as one line: code, message and help.
    ///
    /// This is the text carried by the error entry of a parser's output.
    pub fn summary(&self) -> String {
        let diag = &self.diagnostic;
        let mut summary = match diag.code() {
            Some(code) => format!("[{code}] {}", diag.message()),
            None => diag.message().to_string(),
        };
        if let Some(help) = diag.help() {
            summary.push_str(&format!(" (help: {help})"));
        }
        summary
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
