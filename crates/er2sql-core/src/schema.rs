//! Schema model shared by all diagram formats.
//!
//! Every format parser lowers its document into a [`Schema`]. Tables are keyed
//! by the diagram's native identifier ([`TableId`]) rather than by display
//! name, so duplicate or late-arriving names never merge two tables. Names are
//! only consulted when the schema is rendered by [`crate::ddl`].

use std::fmt;

use indexmap::IndexMap;

/// SQL type used for every injected foreign-key column.
pub const FOREIGN_KEY_TYPE: &str = "INTEGER";

/// Native identifier of a table in its source diagram.
///
/// This is the entity `id` attribute, the GraphML node id or the draw.io cell
/// id, depending on the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(String);

impl TableId {
    /// Creates a table identifier from its native diagram id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    data_type: String,
    primary_key: bool,
}

impl Column {
    /// Creates a regular (non primary-key) column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            primary_key: false,
        }
    }

    /// Marks the column as part of the primary key.
    pub fn with_primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// A table with its declared columns and injected foreign-key columns.
///
/// Declared columns always precede foreign-key columns when iterated through
/// [`Table::columns`], regardless of the order in which they were added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    foreign_key_columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_key_columns: Vec::new(),
        }
    }

    /// Display name used when rendering DDL.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a declared column.
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Builder-style variant of [`Table::push_column`].
    pub fn with_column(mut self, column: Column) -> Self {
        self.push_column(column);
        self
    }

    /// Returns the declared columns, excluding injected foreign-key columns.
    pub fn declared_columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns all columns: declared columns first, then foreign-key columns.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().chain(self.foreign_key_columns.iter())
    }

    /// Names of the columns flagged as primary key, in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns()
            .filter(|column| column.is_primary_key())
            .map(Column::name)
    }

    /// `true` when the table has neither declared nor foreign-key columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.foreign_key_columns.is_empty()
    }

    fn push_foreign_key_column(&mut self, name: impl Into<String>) {
        self.foreign_key_columns
            .push(Column::new(name, FOREIGN_KEY_TYPE));
    }
}

/// A foreign-key reference between two tables.
///
/// Both ends are stored by [`TableId`]; the referencing column is synthesized
/// by the parser and does not exist in the source diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyLink {
    source: TableId,
    column: String,
    target: TableId,
    target_column: String,
}

impl ForeignKeyLink {
    pub fn source(&self) -> &TableId {
        &self.source
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn target(&self) -> &TableId {
        &self.target
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }
}

/// The normalized schema produced by a format parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: IndexMap<TableId, Table>,
    links: Vec<ForeignKeyLink>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table under its native id.
    ///
    /// A later table with the same id replaces the earlier one in place, keeping
    /// the first position.
    pub fn insert_table(&mut self, id: TableId, table: Table) {
        self.tables.insert(id, table);
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn table_mut(&mut self, id: &TableId) -> Option<&mut Table> {
        self.tables.get_mut(id)
    }

    pub fn contains_table(&self, id: &TableId) -> bool {
        self.tables.contains_key(id)
    }

    /// Iterates tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = (&TableId, &Table)> {
        self.tables.iter()
    }

    pub fn links(&self) -> &[ForeignKeyLink] {
        &self.links
    }

    /// Adds a foreign key from `source` to `target`.
    ///
    /// Appends a [`FOREIGN_KEY_TYPE`] column named `column` to the source table
    /// and records the link. Returns `false` without modifying the schema when
    /// either table is unknown.
    pub fn add_foreign_key(
        &mut self,
        source: &TableId,
        target: &TableId,
        column: impl Into<String>,
        target_column: impl Into<String>,
    ) -> bool {
        if !self.tables.contains_key(target) {
            return false;
        }
        let Some(table) = self.tables.get_mut(source) else {
            return false;
        };

        let column = column.into();
        table.push_foreign_key_column(column.clone());
        self.links.push(ForeignKeyLink {
            source: source.clone(),
            column,
            target: target.clone(),
            target_column: target_column.into(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_table() -> Table {
        Table::new("User")
            .with_column(Column::new("id", "INTEGER").with_primary_key(true))
            .with_column(Column::new("name", "VARCHAR(255)"))
    }

    #[test]
    fn test_foreign_key_columns_follow_declared_columns() {
        let mut schema = Schema::new();
        schema.insert_table(TableId::new("1"), user_table());
        schema.insert_table(TableId::new("2"), Table::new("Order"));

        assert!(schema.add_foreign_key(&TableId::new("2"), &TableId::new("1"), "User_id", "id"));
        schema
            .table_mut(&TableId::new("2"))
            .unwrap()
            .push_column(Column::new("total", "FLOAT"));

        let order = schema.table(&TableId::new("2")).unwrap();
        let names: Vec<_> = order.columns().map(Column::name).collect();
        assert_eq!(names, ["total", "User_id"]);
        assert_eq!(order.columns().last().unwrap().data_type(), FOREIGN_KEY_TYPE);
    }

    #[test]
    fn test_foreign_key_to_unknown_table_is_rejected() {
        let mut schema = Schema::new();
        schema.insert_table(TableId::new("1"), user_table());

        assert!(!schema.add_foreign_key(&TableId::new("1"), &TableId::new("9"), "x_id", "id"));
        assert!(!schema.add_foreign_key(&TableId::new("9"), &TableId::new("1"), "x_id", "id"));
        assert!(schema.links().is_empty());
        assert_eq!(schema.table(&TableId::new("1")).unwrap().columns().count(), 2);
    }

    #[test]
    fn test_tables_keyed_by_id_not_name() {
        let mut schema = Schema::new();
        schema.insert_table(TableId::new("a"), Table::new("Same"));
        schema.insert_table(TableId::new("b"), Table::new("Same"));

        assert_eq!(schema.tables().count(), 2);
    }

    #[test]
    fn test_primary_key_columns() {
        let table = user_table();
        assert_eq!(table.primary_key_columns().collect::<Vec<_>>(), ["id"]);
        assert!(!table.is_empty());
        assert!(Table::new("Empty").is_empty());
    }
}
