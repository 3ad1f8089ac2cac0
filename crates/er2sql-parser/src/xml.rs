//! Shared XML helpers for the format parsers.
//!
//! Elements are matched by local name only, so exports with and without the
//! GraphML, yFiles or draw.io namespaces are handled alike.

use roxmltree::{Document, Node};

use crate::error::{Diagnostic, ErrorCode, ParseError};

/// Parses `source` into a read-only XML document.
///
/// # Errors
///
/// Returns [`ErrorCode::E001`] when the document is not well-formed.
pub(crate) fn parse_document(source: &str) -> Result<Document<'_>, ParseError> {
    Document::parse(source).map_err(|err| {
        Diagnostic::error(format!("malformed XML document: {err}"))
            .with_code(ErrorCode::E001)
            .with_help("check that the file is a complete, well-formed XML export")
            .into()
    })
}

/// Iterates the descendants of `node` (excluding `node` itself) whose local
/// tag name is `name`, in document order.
pub(crate) fn descendants_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// Returns the native id of `node`, or a positional fallback `<kind>#<index>`
/// when the attribute is missing.
pub(crate) fn native_id(node: Node<'_, '_>, kind: &str, index: usize) -> String {
    match node.attribute("id") {
        Some(id) => id.to_string(),
        None => format!("{kind}#{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendants_ignore_namespaces() {
        let doc = parse_document(
            r#"<g:graphml xmlns:g="http://graphml.graphdrawing.org/xmlns">
                <g:node id="a"/><node id="b"/>
            </g:graphml>"#,
        )
        .unwrap();

        let ids: Vec<_> = descendants_named(doc.root_element(), "node")
            .filter_map(|node| node.attribute("id"))
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_document("<open>").unwrap_err();
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_native_id_fallback() {
        let doc = parse_document(r#"<r><e id="x"/><e/></r>"#).unwrap();
        let nodes: Vec<_> = descendants_named(doc.root_element(), "e").collect();

        assert_eq!(native_id(nodes[0], "entity", 0), "x");
        assert_eq!(native_id(nodes[1], "entity", 1), "entity#1");
    }
}
