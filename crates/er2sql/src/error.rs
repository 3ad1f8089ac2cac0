//! Error types for er2sql operations.
//!
//! Parse failures and checker findings are data, not errors: they travel in
//! the statement sequence and the [`ValidationReport`](crate::validate::ValidationReport).
//! [`Er2SqlError`] covers what is left: rejected inputs, I/O and
//! infrastructure failures of the language model.

use std::io;

use thiserror::Error;

use crate::model::ModelError;

/// The main error type for er2sql operations.
#[derive(Debug, Error)]
pub enum Er2SqlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Diagram conversion failed: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Language model error: {0}")]
    Model(#[from] ModelError),
}
