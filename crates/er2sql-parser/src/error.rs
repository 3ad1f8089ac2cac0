//! Error and diagnostic system for the er2sql parsers.
//!
//! Parsers report failures as [`Diagnostic`]s carrying an [`ErrorCode`] and an
//! optional help text. A failed parse yields one [`ParseError`], which the
//! crate boundary ([`crate::parse`]) flattens into a single error entry of
//! the statement sequence.
//!
//! # Example
//!
//! ```
//! # use er2sql_parser::error::{Diagnostic, ErrorCode, ParseError};
//! let diag = Diagnostic::error("malformed XML document: unexpected end of stream")
//!     .with_code(ErrorCode::E001)
//!     .with_help("check that the file is a well-formed XML export");
//! let err = ParseError::from(diag);
//! assert!(err.summary().ends_with("(help: check that the file is a well-formed XML export)"));
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
