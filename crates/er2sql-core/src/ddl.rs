//! Deterministic DDL synthesis from a [`Schema`].
//!
//! [`synthesize`] emits every `CREATE TABLE` statement before any
//! `ALTER TABLE ... ADD FOREIGN KEY` statement, so a script built from the
//! output can be executed top to bottom without forward references.

use std::{collections::HashSet, fmt};

use log::{debug, trace};

use crate::schema::{Schema, TableId};

/// Indentation used for column definitions inside `CREATE TABLE`.
const INDENT: &str = "    ";

/// A column definition as it appears in a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
}

/// A single DDL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlStatement {
    CreateTable {
        table: String,
        columns: Vec<ColumnDefinition>,
        primary_key: Vec<String>,
    },
    AddForeignKey {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },
}

impl DdlStatement {
    /// Returns `true` for `CREATE TABLE` statements.
    pub fn is_create_table(&self) -> bool {
        matches!(self, DdlStatement::CreateTable { .. })
    }
}

impl fmt::Display for DdlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdlStatement::CreateTable {
                table,
                columns,
                primary_key,
            } => {
                let mut lines: Vec<String> = columns
                    .iter()
                    .map(|column| format!("{INDENT}{} {}", column.name, column.data_type))
                    .collect();
                if !primary_key.is_empty() {
                    lines.push(format!("{INDENT}PRIMARY KEY ({})", primary_key.join(", ")));
                }
                write!(f, "CREATE TABLE {table} (\n{}\n);", lines.join(",\n"))
            }
            DdlStatement::AddForeignKey {
                table,
                column,
                target_table,
                target_column,
            } => write!(
                f,
                "ALTER TABLE {table} ADD FOREIGN KEY ({column}) REFERENCES {target_table}({target_column});"
            ),
        }
    }
}

/// Synthesizes the ordered DDL statements for a schema.
///
/// Tables without a name or without any column are skipped. Foreign keys whose
/// source or target table was skipped are skipped as well.
pub fn synthesize(schema: &Schema) -> Vec<DdlStatement> {
    let mut statements = Vec::new();
    let mut emitted: HashSet<&TableId> = HashSet::new();

    for (id, table) in schema.tables() {
        if table.name().is_empty() || table.is_empty() {
            debug!(table_id = id.as_str(); "Skipping table without name or columns");
            continue;
        }
        emitted.insert(id);
        statements.push(DdlStatement::CreateTable {
            table: table.name().to_string(),
            columns: table
                .columns()
                .map(|column| ColumnDefinition {
                    name: column.name().to_string(),
                    data_type: column.data_type().to_string(),
                })
                .collect(),
            primary_key: table.primary_key_columns().map(str::to_string).collect(),
        });
    }

    for link in schema.links() {
        if !emitted.contains(link.source()) || !emitted.contains(link.target()) {
            debug!(
                source = link.source().as_str(),
                target = link.target().as_str();
                "Skipping foreign key to a table that was not created"
            );
            continue;
        }
        // Both ends were emitted, so both lookups succeed.
        let (Some(source), Some(target)) = (schema.table(link.source()), schema.table(link.target()))
        else {
            continue;
        };
        statements.push(DdlStatement::AddForeignKey {
            table: source.name().to_string(),
            column: link.column().to_string(),
            target_table: target.name().to_string(),
            target_column: link.target_column().to_string(),
        });
    }

    trace!(statements:?; "Synthesized DDL");
    statements
}

/// Synthesizes and renders the DDL statements as strings.
pub fn render(schema: &Schema) -> Vec<String> {
    synthesize(schema).iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::schema::{Column, Table};

    fn sample_schema() -> Schema {
        let mut schema = Schema::new();
        schema.insert_table(
            TableId::new("u"),
            Table::new("User")
                .with_column(Column::new("id", "INTEGER").with_primary_key(true))
                .with_column(Column::new("name", "VARCHAR(255)")),
        );
        schema.insert_table(
            TableId::new("o"),
            Table::new("Order").with_column(Column::new("total", "FLOAT")),
        );
        schema.add_foreign_key(&TableId::new("o"), &TableId::new("u"), "User_id", "id");
        schema
    }

    #[test]
    fn test_render_create_table() {
        let rendered = render(&sample_schema());

        assert_eq!(
            rendered[0],
            "CREATE TABLE User (\n    id INTEGER,\n    name VARCHAR(255),\n    PRIMARY KEY (id)\n);"
        );
        assert_eq!(
            rendered[1],
            "CREATE TABLE Order (\n    total FLOAT,\n    User_id INTEGER\n);"
        );
    }

    #[test]
    fn test_render_foreign_key() {
        let rendered = render(&sample_schema());

        assert_eq!(rendered.len(), 3);
        assert_eq!(
            rendered[2],
            "ALTER TABLE Order ADD FOREIGN KEY (User_id) REFERENCES User(id);"
        );
    }

    #[test]
    fn test_composite_primary_key() {
        let mut schema = Schema::new();
        schema.insert_table(
            TableId::new("1"),
            Table::new("Membership")
                .with_column(Column::new("user_id", "INTEGER").with_primary_key(true))
                .with_column(Column::new("group_id", "INTEGER").with_primary_key(true)),
        );

        let rendered = render(&schema);
        assert!(rendered[0].contains("PRIMARY KEY (user_id, group_id)"));
    }

    #[test]
    fn test_empty_and_unnamed_tables_are_skipped() {
        let mut schema = Schema::new();
        schema.insert_table(TableId::new("1"), Table::new("Empty"));
        schema.insert_table(
            TableId::new("2"),
            Table::new("").with_column(Column::new("id", "INTEGER")),
        );

        assert!(synthesize(&schema).is_empty());
    }

    #[test]
    fn test_foreign_key_to_skipped_table_is_dropped() {
        let mut schema = Schema::new();
        schema.insert_table(
            TableId::new("a"),
            Table::new("A").with_column(Column::new("id", "INTEGER")),
        );
        schema.insert_table(TableId::new("b"), Table::new("B"));
        schema.add_foreign_key(&TableId::new("a"), &TableId::new("b"), "b_id", "id");

        let statements = synthesize(&schema);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].is_create_table());
    }

    #[test]
    fn test_foreign_key_only_table_is_emitted() {
        let mut schema = sample_schema();
        schema.insert_table(TableId::new("x"), Table::new("Link"));
        schema.add_foreign_key(&TableId::new("x"), &TableId::new("u"), "User_id", "id");

        let rendered = render(&schema);
        assert!(rendered.contains(&"CREATE TABLE Link (\n    User_id INTEGER\n);".to_string()));
    }

    proptest! {
        #[test]
        fn prop_create_statements_precede_alter_statements(
            tables in proptest::collection::vec(("[A-Za-z]{1,8}", 0usize..4), 1..8),
            links in proptest::collection::vec((0usize..8, 0usize..8), 0..10),
        ) {
            let mut schema = Schema::new();
            for (idx, (name, column_count)) in tables.iter().enumerate() {
                let mut table = Table::new(name.clone());
                for col in 0..*column_count {
                    table.push_column(Column::new(format!("c{col}"), "TEXT"));
                }
                schema.insert_table(TableId::new(idx.to_string()), table);
            }
            for (source, target) in links {
                schema.add_foreign_key(
                    &TableId::new(source.to_string()),
                    &TableId::new(target.to_string()),
                    format!("t{target}_id"),
                    "id",
                );
            }

            let statements = synthesize(&schema);
            let first_alter = statements.iter().position(|s| !s.is_create_table());
            if let Some(first_alter) = first_alter {
                prop_assert!(statements[first_alter..].iter().all(|s| !s.is_create_table()));
            }
            prop_assert_eq!(render(&schema), render(&schema));
        }
    }
}
