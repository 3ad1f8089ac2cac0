//! GraphML (`.graphml`) parser for yFiles entity-relationship exports.
//!
//! Each table is a `node` carrying two `NodeLabel`s: the name label and the
//! attributes label, whose text lists one `name:type` (or bare `name`) per
//! line. The format has no key flag, so the first declared column of every
//! table is its primary key. Edges point from the referencing node to the
//! referenced node.

use log::debug;

use er2sql_core::schema::{Column, Schema, Table, TableId};

use crate::{error::ParseError, type_map, xml};

const NAME_LABEL: &str = "com.yworks.entityRelationship.label.name";
const ATTRIBUTES_LABEL: &str = "com.yworks.entityRelationship.label.attributes";

/// Target column used when the referenced node declares no column.
const FALLBACK_PRIMARY_KEY: &str = "id";

pub(crate) fn parse_schema(source: &str) -> Result<Schema, ParseError> {
    let doc = xml::parse_document(source)?;
    let root = doc.root_element();
    let mut schema = Schema::new();

    for (index, node) in xml::descendants_named(root, "node").enumerate() {
        let id = xml::native_id(node, "node", index);
        let find_label = |configuration: &str| {
            xml::descendants_named(node, "NodeLabel")
                .find(|label| label.attribute("configuration") == Some(configuration))
        };

        let Some(name_label) = find_label(NAME_LABEL) else {
            debug!(node_id = id.as_str(); "Skipping node without a name label");
            continue;
        };
        let name = match name_label.text().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("table_{id}"),
        };

        let mut table = Table::new(name);
        if let Some(text) = find_label(ATTRIBUTES_LABEL).and_then(|label| label.text()) {
            let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
            for (position, line) in lines.enumerate() {
                let (column, declared) = match line.split_once(':') {
                    Some((column, declared)) => (column.trim(), declared.trim()),
                    None => (line, ""),
                };
                table.push_column(
                    Column::new(column, type_map::graphml_type(declared))
                        .with_primary_key(position == 0),
                );
            }
        }

        schema.insert_table(TableId::new(id), table);
    }

    for edge in xml::descendants_named(root, "edge") {
        let (Some(source), Some(target)) = (edge.attribute("source"), edge.attribute("target"))
        else {
            continue;
        };
        let source = TableId::new(source);
        let target = TableId::new(target);
        if !schema.contains_table(&source) {
            debug!(source = source.as_str(); "Skipping edge from unknown node");
            continue;
        }
        let Some(referenced) = schema.table(&target) else {
            debug!(target = target.as_str(); "Skipping edge to unknown node");
            continue;
        };

        let column = format!("{}_id", referenced.name());
        let target_column = referenced
            .declared_columns()
            .first()
            .map_or(FALLBACK_PRIMARY_KEY, Column::name)
            .to_string();
        schema.add_foreign_key(&source, &target, column, target_column);
    }

    Ok(schema)
}
