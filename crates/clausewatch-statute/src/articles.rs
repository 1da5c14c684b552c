//! Article extraction from registry statute XML.
//!
//! # Document shape
//!
//! ```text
//! <조문단위>                 article unit (repeats)
//!   <조문여부>조문</조문여부>  unit type; anything but "조문" (e.g. "전문") is skipped
//!   <조문내용>...</조문내용>  primary text, usually already numbered
//!   <항>                     paragraph (0..n, may be nested anywhere under the unit)
//!     <항내용>...</항내용>
//!     <호>                   item (0..n)
//!       <호내용>...</호내용>
//! ```
//!
//! Extraction is all-or-nothing per document: a tree that fails to parse yields
//! an empty list, never a truncated one.

use clausewatch_core::{Article, RawStatuteDocument};
use roxmltree::Node;
use tracing::{debug, warn};

use crate::RegistryError;
use crate::xml::{own_text, parse_document};

const ARTICLE_UNIT: &str = "조문단위";
const UNIT_KIND: &str = "조문여부";
const ARTICLE_KIND: &str = "조문";
const ARTICLE_BODY: &str = "조문내용";
const PARAGRAPH: &str = "항";
const PARAGRAPH_BODY: &str = "항내용";
const ITEM: &str = "호";
const ITEM_BODY: &str = "호내용";

/// Indent prefix marking an item line beneath its paragraph.
const ITEM_INDENT: &str = "  ";

/// Extract articles in document order.
///
/// `None` (no document fetched) and malformed documents both yield an empty list.
pub fn extract_articles(document: Option<&RawStatuteDocument>) -> Vec<Article> {
    let Some(document) = document else {
        return Vec::new();
    };

    match parse_articles(document.as_bytes()) {
        Ok(articles) => {
            debug!(count = articles.len(), "extracted articles");
            articles
        }
        Err(e) => {
            warn!(error = %e, bytes = document.len(), "statute XML parse failed");
            Vec::new()
        }
    }
}

fn parse_articles(bytes: &[u8]) -> Result<Vec<Article>, RegistryError> {
    let doc = parse_document(bytes)?;

    let articles = doc
        .descendants()
        .filter(|n| n.has_tag_name(ARTICLE_UNIT))
        .filter_map(article_from_unit)
        .collect();
    Ok(articles)
}

fn article_from_unit(unit: Node<'_, '_>) -> Option<Article> {
    if let Some(kind) = child(unit, UNIT_KIND) {
        if own_text(kind).trim() != ARTICLE_KIND {
            return None;
        }
    }

    let full_text = child_text(unit, ARTICLE_BODY)?;

    let subclause_texts = unit
        .descendants()
        .filter(|n| n.has_tag_name(PARAGRAPH))
        .filter_map(paragraph_text)
        .collect();

    Some(Article {
        full_text,
        subclause_texts,
    })
}

/// Paragraph body followed by one indented line per item.
///
/// A paragraph with items but no body of its own still yields its item lines.
fn paragraph_text(paragraph: Node<'_, '_>) -> Option<String> {
    let mut text = child_text(paragraph, PARAGRAPH_BODY).unwrap_or_default();

    for item in paragraph.descendants().filter(|n| n.has_tag_name(ITEM)) {
        if let Some(item_text) = child_text(item, ITEM_BODY) {
            text.push('\n');
            text.push_str(ITEM_INDENT);
            text.push_str(&item_text);
        }
    }

    (!text.is_empty()).then_some(text)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

/// Trimmed text of a direct child element, `None` if absent or blank.
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    let text = own_text(child(node, name)?);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
