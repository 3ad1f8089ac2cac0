//! Execution checker backed by a disposable in-memory SQLite database.

use log::debug;
use rusqlite::Connection;

/// Runs a DDL script against a fresh in-memory database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionChecker;

impl ExecutionChecker {
    pub fn new() -> Self {
        Self
    }

    /// Executes `sql` as one batch.
    ///
    /// Returns the first execution error, or `None` when every statement ran.
    /// The database is dropped before returning.
    pub fn check(&self, sql: &str) -> Option<String> {
        let connection = match Connection::open_in_memory() {
            Ok(connection) => connection,
            Err(err) => return Some(err.to_string()),
        };

        match connection.execute_batch(sql) {
            Ok(()) => None,
            Err(err) => {
                debug!(error:% = err; "Script failed to execute");
                Some(err.to_string())
            }
        }
    }
}
