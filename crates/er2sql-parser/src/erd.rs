//! Entity-Relationship XML (`.erd`) parser.
//!
//! ```xml
//! <er-diagram>
//!     <entity id="1" name="User">
//!         <attribute name="id" type="INTEGER" primary="true"/>
//!         <attribute name="name"/>
//!     </entity>
//!     <entity id="2" name="Order"> ... </entity>
//!     <relation type="fk" fk-ref="2" pk-ref="1"/>
//! </er-diagram>
//! ```
//!
//! Declared types are kept verbatim. A relation adds `<primary-table>_id` to
//! the referencing entity; it targets the primary entity's first flagged key
//! column, or `id` when none is flagged.

use log::debug;

use er2sql_core::schema::{Column, Schema, Table, TableId};

use crate::{error::ParseError, type_map::DEFAULT_TYPE, xml};

/// Target column used when the referenced entity declares no primary key.
const FALLBACK_PRIMARY_KEY: &str = "id";

/// Relation `type` value marking a foreign key.
const FOREIGN_KEY_RELATION: &str = "fk";

pub(crate) fn parse_schema(source: &str) -> Result<Schema, ParseError> {
    let doc = xml::parse_document(source)?;
    let root = doc.root_element();
    let mut schema = Schema::new();

    for (index, entity) in xml::descendants_named(root, "entity").enumerate() {
        let id = TableId::new(xml::native_id(entity, "entity", index));
        let mut table = Table::new(entity.attribute("name").unwrap_or_default());

        for attribute in xml::descendants_named(entity, "attribute") {
            let Some(name) = attribute.attribute("name") else {
                debug!(entity = id.as_str(); "Skipping attribute without a name");
                continue;
            };
            let primary = attribute
                .attribute("primary")
                .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));
            table.push_column(
                Column::new(name, attribute.attribute("type").unwrap_or(DEFAULT_TYPE))
                    .with_primary_key(primary),
            );
        }

        schema.insert_table(id, table);
    }

    for relation in xml::descendants_named(root, "relation") {
        if relation.attribute("type") != Some(FOREIGN_KEY_RELATION) {
            continue;
        }
        let (Some(fk_ref), Some(pk_ref)) = (relation.attribute("fk-ref"), relation.attribute("pk-ref"))
        else {
            debug!("Skipping relation without fk-ref/pk-ref");
            continue;
        };
        let source = TableId::new(fk_ref);
        let target = TableId::new(pk_ref);

        let Some(primary) = schema.table(&target) else {
            debug!(pk_ref; "Skipping relation to unknown entity");
            continue;
        };
        let column = format!("{}_id", primary.name());
        let target_column = primary
            .declared_columns()
            .iter()
            .find(|column| column.is_primary_key())
            .map_or(FALLBACK_PRIMARY_KEY, Column::name)
            .to_string();

        if !schema.add_foreign_key(&source, &target, column, target_column) {
            debug!(fk_ref; "Skipping relation from unknown entity");
        }
    }

    Ok(schema)
}
