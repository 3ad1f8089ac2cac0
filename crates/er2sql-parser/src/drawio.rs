//! draw.io (`.xml`) parser.
//!
//! Tables are `mxCell`s whose style starts with [`TABLE_STYLE`]. The whole
//! table lives in the cell's `value` label, an HTML fragment such as
//! `<b>User</b><br>PK: id<br>id:int<br>email:string`:
//!
//! - line 1 is the table name, optionally followed by an inline column list
//!   in brackets (`User[id:int, email]`);
//! - `PK: <name>` designates the primary key (default: the first column,
//!   also used when the directive names nothing);
//! - `name:type` or a bare `name` declares a column.
//!
//! Edge cells (`edge="1"`) between two tables add a `<target>_id` column to
//! the source table, with the target name lowercased.

use log::debug;

use er2sql_core::schema::{Column, Schema, Table, TableId};

use crate::{error::ParseError, type_map, xml};

/// Style prefix identifying table shapes.
const TABLE_STYLE: &str = "shape=table";

/// Prefix of the primary-key directive line.
const PK_DIRECTIVE: &str = "PK:";

/// Primary key assumed for a table with no columns and no directive.
const FALLBACK_PRIMARY_KEY: &str = "id";

/// A table label after HTML cleanup and line splitting.
#[derive(Debug, PartialEq, Eq)]
struct TableLabel {
    name: String,
    columns: Vec<(String, String)>,
    primary_key: String,
}

pub(crate) fn parse_schema(source: &str) -> Result<Schema, ParseError> {
    let doc = xml::parse_document(source)?;
    let root = doc.root_element();
    let mut schema = Schema::new();
    // Resolved primary key per table, used as the target of incoming edges.
    let mut primary_keys = Vec::new();

    for (index, cell) in xml::descendants_named(root, "mxCell").enumerate() {
        if !cell
            .attribute("style")
            .is_some_and(|style| style.starts_with(TABLE_STYLE))
        {
            continue;
        }
        let id = TableId::new(xml::native_id(cell, "cell", index));
        let Some(label) = cell.attribute("value").and_then(parse_label) else {
            debug!(cell_id = id.as_str(); "Skipping table cell with an empty label");
            continue;
        };

        let mut table = Table::new(label.name);
        for (name, declared) in &label.columns {
            table.push_column(
                Column::new(name.as_str(), type_map::drawio_type(declared))
                    .with_primary_key(*name == label.primary_key),
            );
        }
        primary_keys.push((id.clone(), label.primary_key));
        schema.insert_table(id, table);
    }

    for cell in xml::descendants_named(root, "mxCell") {
        if cell.attribute("edge") != Some("1") {
            continue;
        }
        let (Some(source), Some(target)) = (cell.attribute("source"), cell.attribute("target"))
        else {
            continue;
        };
        let source = TableId::new(source);
        let target = TableId::new(target);
        if !schema.contains_table(&source) {
            continue;
        }
        let Some(referenced) = schema.table(&target) else {
            continue;
        };
        let Some((_, target_column)) = primary_keys.iter().rev().find(|(id, _)| *id == target)
        else {
            continue;
        };

        let column = format!("{}_id", referenced.name().to_lowercase());
        schema.add_foreign_key(&source, &target, column, target_column.clone());
    }

    Ok(schema)
}

/// Strips the HTML markup of a table label and splits it into its parts.
///
/// Returns `None` when the label has no non-blank line.
fn parse_label(value: &str) -> Option<TableLabel> {
    let cleaned = value
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("<b>", "")
        .replace("</b>", "");
    let mut lines = cleaned.lines().map(str::trim).filter(|line| !line.is_empty());

    let (name, inline) = split_inline_columns(lines.next()?);
    let mut columns = Vec::new();
    let mut directive = None;

    for part in inline.into_iter().chain(lines) {
        if part.starts_with(PK_DIRECTIVE) {
            directive = part
                .split(':')
                .nth(1)
                .map(str::trim)
                .filter(|pk| !pk.is_empty())
                .map(str::to_string);
        } else if let Some((column, declared)) = part.split_once(':') {
            columns.push((column.trim().to_string(), declared.trim().to_string()));
        } else {
            columns.push((part.to_string(), type_map::DEFAULT_TYPE.to_string()));
        }
    }

    let primary_key = directive
        .or_else(|| columns.first().map(|(column, _)| column.clone()))
        .unwrap_or_else(|| FALLBACK_PRIMARY_KEY.to_string());

    Some(TableLabel {
        name: name.to_string(),
        columns,
        primary_key,
    })
}

/// Splits `Name[col:type, col2]` into the name and its inline column parts.
fn split_inline_columns(line: &str) -> (&str, Vec<&str>) {
    let Some(inner) = line.strip_suffix(']') else {
        return (line, Vec::new());
    };
    let Some((name, columns)) = inner.split_once('[') else {
        return (line, Vec::new());
    };
    let columns = columns
        .split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    (name.trim(), columns)
}

#[cfg(test)]
mod tests {
    use er2sql_core::ddl;

    use super::*;

    fn document(cells: &str) -> String {
        format!(
            r#"<mxfile><diagram><mxGraphModel><root>
                <mxCell id="0"/><mxCell id="1" parent="0"/>
                {cells}
            </root></mxGraphModel></diagram></mxfile>"#
        )
    }

    #[test]
    fn test_parse_label_with_directive() {
        let label = parse_label("<b>User</b><br>PK: uid<br>name:string<br>uid:int").unwrap();

        assert_eq!(label.name, "User");
        assert_eq!(label.primary_key, "uid");
        assert_eq!(
            label.columns,
            [
                ("name".to_string(), "string".to_string()),
                ("uid".to_string(), "int".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_label_defaults() {
        let label = parse_label("Tag<br/>label").unwrap();
        assert_eq!(label.primary_key, "label");
        assert_eq!(label.columns, [("label".to_string(), "VARCHAR(255)".to_string())]);

        let label = parse_label("Empty").unwrap();
        assert_eq!(label.primary_key, "id");
        assert!(label.columns.is_empty());

        assert!(parse_label("<br> <br />").is_none());
    }

    #[test]
    fn test_inline_bracket_columns() {
        assert_eq!(split_inline_columns("User[id:int]"), ("User", vec!["id:int"]));
        assert_eq!(
            split_inline_columns("User [id:int, name; email]"),
            ("User", vec!["id:int", "name", "email"])
        );
        assert_eq!(split_inline_columns("Plain"), ("Plain", vec![]));
        assert_eq!(split_inline_columns("Odd]"), ("Odd]", vec![]));
    }

    #[test]
    fn test_bracket_cell_becomes_table() {
        let schema = parse_schema(
            r#"<mxfile><diagram><mxCell value="User[id:int]" style="shape=table"/></diagram></mxfile>"#,
        )
        .unwrap();

        assert_eq!(
            ddl::render(&schema),
            ["CREATE TABLE User (\n    id INTEGER,\n    PRIMARY KEY (id)\n);"]
        );
    }

    #[test]
    fn test_escaped_html_label_and_edges() {
        let source = document(
            r#"<mxCell id="u" value="&lt;b&gt;User&lt;/b&gt;&lt;br&gt;PK: uid&lt;br&gt;uid:integer&lt;br&gt;joined:datetime" style="shape=table;startSize=30;" vertex="1" parent="1"/>
               <mxCell id="p" value="Post&lt;br&gt;id:int&lt;br&gt;score:float" style="shape=table" vertex="1" parent="1"/>
               <mxCell id="e" edge="1" source="p" target="u" parent="1"/>
               <mxCell id="n" value="note" style="text;html=1" vertex="1" parent="1"/>"#,
        );
        let rendered = ddl::render(&parse_schema(&source).unwrap());

        assert_eq!(
            rendered,
            [
                "CREATE TABLE User (\n    uid INTEGER,\n    joined TIMESTAMP,\n    PRIMARY KEY (uid)\n);",
                "CREATE TABLE Post (\n    id INTEGER,\n    score FLOAT,\n    user_id INTEGER,\n    PRIMARY KEY (id)\n);",
                "ALTER TABLE Post ADD FOREIGN KEY (user_id) REFERENCES User(uid);",
            ]
        );
    }

    #[test]
    fn test_blank_directive_falls_back_to_first_column() {
        let source = document(
            r#"<mxCell id="u" value="User&lt;br&gt;PK:&lt;br&gt;uid:int&lt;br&gt;name" style="shape=table" vertex="1"/>
               <mxCell id="p" value="Post&lt;br&gt;id:int" style="shape=table" vertex="1"/>
               <mxCell id="e" edge="1" source="p" target="u"/>"#,
        );
        let rendered = ddl::render(&parse_schema(&source).unwrap());

        assert_eq!(
            rendered,
            [
                "CREATE TABLE User (\n    uid INTEGER,\n    name VARCHAR(255),\n    PRIMARY KEY (uid)\n);",
                "CREATE TABLE Post (\n    id INTEGER,\n    user_id INTEGER,\n    PRIMARY KEY (id)\n);",
                "ALTER TABLE Post ADD FOREIGN KEY (user_id) REFERENCES User(uid);",
            ]
        );
        assert_eq!(parse_label("T<br>PK:   <br>a:int").unwrap().primary_key, "a");
    }

    #[test]
    fn test_edge_with_unknown_endpoint_is_ignored() {
        let source = document(
            r#"<mxCell id="u" value="User&lt;br&gt;id:int" style="shape=table" vertex="1"/>
               <mxCell id="e" edge="1" source="u" target="missing"/>"#,
        );
        let schema = parse_schema(&source).unwrap();

        assert!(schema.links().is_empty());
    }
}
