//! Registry XML parsing shared by the article and precedent extractors.

use roxmltree::{Document, Node, ParsingOptions};

use crate::RegistryError;

/// Parse a registry body, tolerating a leading BOM and a `<!DOCTYPE>` declaration.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<Document<'_>, RegistryError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Concatenated text and CDATA children of `node`; comments and child elements are skipped.
pub(crate) fn own_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|c| c.text())
        .collect()
}
