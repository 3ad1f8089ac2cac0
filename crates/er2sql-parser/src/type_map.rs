//! Declared-type resolution tables for the formats that carry loose type names.
//!
//! Entity-Relationship XML keeps its declared types verbatim and has no table
//! here.

/// Type used when nothing can be resolved.
pub const DEFAULT_TYPE: &str = "VARCHAR(255)";

/// GraphML mapping, matched by substring in this order.
const GRAPHML_TYPES: &[(&str, &str)] = &[
    ("int", "INTEGER"),
    ("str", "VARCHAR(255)"),
    ("date", "DATE"),
    ("bool", "BOOLEAN"),
];

/// draw.io mapping, matched exactly (case-insensitive).
const DRAWIO_TYPES: &[(&str, &str)] = &[
    ("int", "INTEGER"),
    ("integer", "INTEGER"),
    ("str", "VARCHAR(255)"),
    ("string", "VARCHAR(255)"),
    ("text", "TEXT"),
    ("date", "DATE"),
    ("datetime", "TIMESTAMP"),
    ("bool", "BOOLEAN"),
    ("float", "FLOAT"),
    ("number", "NUMERIC"),
];

/// Resolves a GraphML attribute type: the first table key contained in the
/// lowercased declaration wins.
pub(crate) fn graphml_type(declared: &str) -> &'static str {
    let declared = declared.to_lowercase();
    GRAPHML_TYPES
        .iter()
        .find(|(key, _)| declared.contains(key))
        .map_or(DEFAULT_TYPE, |&(_, sql)| sql)
}

/// Resolves a draw.io column type by exact, case-insensitive lookup.
pub(crate) fn drawio_type(declared: &str) -> &'static str {
    DRAWIO_TYPES
        .iter()
        .find(|(key, _)| declared.eq_ignore_ascii_case(key))
        .map_or(DEFAULT_TYPE, |&(_, sql)| sql)
}
