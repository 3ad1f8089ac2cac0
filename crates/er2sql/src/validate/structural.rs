//! Structural checks over the parsed statement tree.

use log::debug;
use sqlparser::{
    ast::{ColumnOption, CreateTable, Statement, TableConstraint},
    dialect::SQLiteDialect,
    parser::Parser,
};

/// Rule engine over `CREATE TABLE` statements.
///
/// For each table, in declaration order, reports:
/// 1. a missing primary key,
/// 2. each distinct duplicated column name, in first-seen order,
/// 3. an empty column list (reported alone).
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralChecker;

impl StructuralChecker {
    pub fn new() -> Self {
        Self
    }

    /// Parses `sql` and returns the structural findings.
    ///
    /// A script that cannot be parsed yields a single finding describing the
    /// parse error.
    pub fn check(&self, sql: &str) -> Vec<String> {
        let statements = match Parser::parse_sql(&SQLiteDialect {}, sql) {
            Ok(statements) => statements,
            Err(err) => {
                debug!(error:% = err; "Structural check could not parse script");
                return vec![format!("Could not parse SQL: {err}")];
            }
        };

        statements
            .iter()
            .filter_map(|statement| match statement {
                Statement::CreateTable(create) => Some(check_table(statement, create)),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

fn check_table(statement: &Statement, create: &CreateTable) -> Vec<String> {
    let table = create.name.to_string();
    let columns: Vec<&str> = create
        .columns
        .iter()
        .map(|column| column.name.value.as_str())
        .collect();

    if columns.is_empty() {
        return vec![format!("Table {table} has no columns")];
    }

    let mut messages = Vec::new();
    if !has_primary_key(statement, create) {
        messages.push(format!(
            "Table {table} ({}) has no PRIMARY KEY",
            columns.join(", ")
        ));
    }

    let mut reported: Vec<&str> = Vec::new();
    for (idx, name) in columns.iter().enumerate() {
        if reported.contains(name) {
            continue;
        }
        if columns[idx + 1..].contains(name) {
            messages.push(format!("Table {table} has duplicate column name {name}"));
            reported.push(name);
        }
    }

    messages
}

fn has_primary_key(statement: &Statement, create: &CreateTable) -> bool {
    let inline = create.columns.iter().any(|column| {
        column
            .options
            .iter()
            .any(|opt| matches!(opt.option, ColumnOption::PrimaryKey(_)))
    });
    let constraint = create
        .constraints
        .iter()
        .any(|constraint| matches!(constraint, TableConstraint::PrimaryKey(_)));

    // Dialect-specific encodings may not surface as a node.
    inline || constraint || statement.to_string().to_uppercase().contains("PRIMARY KEY")
}
