//! Diagram format selection.

use std::{fmt, path::Path};

use er2sql_core::schema::Schema;

use crate::{drawio, erd, error::ParseError, graphml};

/// The supported diagram source formats.
///
/// Each variant owns its own grammar, default-type table and identifier
/// scheme; [`DiagramFormat::parse_schema`] dispatches to the matching parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramFormat {
    /// Entity-Relationship XML (`.erd`).
    EntityRelationship,
    /// yFiles GraphML (`.graphml`).
    GraphMl,
    /// draw.io / diagrams.net XML (`.xml`).
    DrawIo,
}

impl DiagramFormat {
    /// All formats, in extension-lookup order.
    pub const ALL: [DiagramFormat; 3] = [
        DiagramFormat::EntityRelationship,
        DiagramFormat::GraphMl,
        DiagramFormat::DrawIo,
    ];

    /// Returns the file extension (without the dot) handled by this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DiagramFormat::EntityRelationship => "erd",
            DiagramFormat::GraphMl => "graphml",
            DiagramFormat::DrawIo => "xml",
        }
    }

    /// Looks up a format by file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }

    /// Looks up a format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Parses a document of this format into a [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the document is not well-formed XML.
    pub fn parse_schema(&self, source: &str) -> Result<Schema, ParseError> {
        match self {
            DiagramFormat::EntityRelationship => erd::parse_schema(source),
            DiagramFormat::GraphMl => graphml::parse_schema(source),
            DiagramFormat::DrawIo => drawio::parse_schema(source),
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagramFormat::EntityRelationship => "Entity-Relationship XML",
            DiagramFormat::GraphMl => "GraphML",
            DiagramFormat::DrawIo => "draw.io XML",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(
            DiagramFormat::from_extension("erd"),
            Some(DiagramFormat::EntityRelationship)
        );
        assert_eq!(
            DiagramFormat::from_extension("GraphML"),
            Some(DiagramFormat::GraphMl)
        );
        assert_eq!(DiagramFormat::from_extension("xml"), Some(DiagramFormat::DrawIo));
        assert_eq!(DiagramFormat::from_extension("json"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            DiagramFormat::from_path("/tmp/model.graphml"),
            Some(DiagramFormat::GraphMl)
        );
        assert_eq!(DiagramFormat::from_path("model"), None);
        assert_eq!(DiagramFormat::from_path("model.sql"), None);
    }
}
