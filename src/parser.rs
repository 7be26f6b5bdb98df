//! HTML parsing seam.
//!
//! The pipeline never touches `dom_query` parsing directly; it asks a
//! [`DocumentParser`] for a tree, for an independent deep copy of it, and
//! for the page's declared meta-type.

use dom_query::{Document, Selection};

use crate::dom;
use crate::error::Result;

/// Turns raw HTML into a tree and classifies trees.
pub trait DocumentParser: Send + Sync {
    /// Parse HTML text into a document tree.
    fn parse(&self, html: &str) -> Result<Document>;

    /// Independent deep copy of a tree. Mutating the copy must never affect
    /// the original and vice versa.
    fn deep_clone(&self, doc: &Document) -> Document {
        dom::clone_document(doc)
    }

    /// The page's self-declared content type (e.g. `"article"`), or empty.
    fn get_meta_type(&self, doc: &Document) -> String;
}

/// `dom_query`-backed parser. Parsing is lenient and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomParser;

impl DocumentParser for DomParser {
    fn parse(&self, html: &str) -> Result<Document> {
        Ok(dom::parse(html))
    }

    fn get_meta_type(&self, doc: &Document) -> String {
        doc.select("meta[property='og:type'], meta[name='og:type']")
            .nodes()
            .first()
            .and_then(|node| dom::get_attribute(&Selection::from(*node), "content"))
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_type_from_open_graph() {
        let parser = DomParser;
        let doc = parser
            .parse(r#"<html><head><meta property="og:type" content=" Article "></head></html>"#)
            .unwrap();
        assert_eq!(parser.get_meta_type(&doc), "article");
    }

    #[test]
    fn test_meta_type_missing_is_empty() {
        let parser = DomParser;
        let doc = parser.parse("<html><body><p>x</p></body></html>").unwrap();
        assert_eq!(parser.get_meta_type(&doc), "");
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let parser = DomParser;
        let doc = parser.parse(r#"<div id="a"><script>x()</script><p>text</p></div>"#).unwrap();
        let raw = parser.deep_clone(&doc);

        doc.select("script").remove();

        assert!(doc.select("script").is_empty());
        assert!(raw.select("script").exists());
    }

    #[test]
    fn test_parse_accepts_empty_input() {
        let parser = DomParser;
        assert!(parser.parse("").is_ok());
    }
}
