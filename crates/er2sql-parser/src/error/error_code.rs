//! Error codes for the er2sql parser diagnostics.
//!
//! - `E0xx` - Document errors (reading and XML well-formedness)

use std::fmt;

/// Error codes for categorizing parser diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed XML.
    ///
    /// The document is not well-formed XML and could not be parsed at all.
    E001,

    /// Unreadable document.
    ///
    /// The document could not be read from disk or is not valid UTF-8.
    E002,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E002.to_string(), "E002");
    }
}
