//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` used by the parser, cleaner, extractor and
//! formatter, so every stage reads attributes and text the same way.

pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Attribute value trimmed, `None` when missing or blank.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `id`, `class` and `name` joined by spaces, for boilerplate pattern checks.
#[must_use]
pub fn attribute_signature(sel: &Selection) -> String {
    ["id", "class", "name"]
        .iter()
        .filter_map(|name| get_attribute(sel, name))
        .collect::<Vec<_>>()
        .join(" ")
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// `StrTendril` is reference-counted; call `.to_string()` only when owned
/// storage is needed.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Manipulation ===

/// Remove elements but keep their children (unwrap)
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}

/// Replace each element with its children.
pub fn unwrap(sel: &Selection) {
    for node in sel.nodes().iter().rev() {
        let el = Selection::from(*node);
        el.replace_with_html(el.inner_html());
    }
}

/// Rename element tag
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

/// Deep copy of a whole document, independent of the original.
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Table parts the HTML parser drops when they appear outside a table.
const TABLE_PARTS: &[&str] = &["tbody", "thead", "tfoot", "tr", "td", "th", "caption", "colgroup"];

/// Deep copy of an element (with descendants) as a new document.
///
/// The copy is reachable through [`top_element`]. Table parts are copied
/// with their enclosing `table`; `html`/`body` come back as a `div`.
#[must_use]
pub fn clone_element(sel: &Selection) -> Document {
    let Some(node) = sel.nodes().first() else {
        return Document::from("");
    };
    let mut current = Selection::from(*node);

    while tag_name(&current).is_some_and(|t| TABLE_PARTS.contains(&t.as_str())) {
        let parent = current.parent();
        if parent.is_empty() {
            break;
        }
        current = parent;
    }

    match tag_name(&current).as_deref() {
        Some("html" | "body") => Document::from(format!("<div>{}</div>", current.inner_html())),
        _ => Document::from(outer_html(&current)),
    }
}

/// The root element of a document produced by [`clone_element`].
#[must_use]
pub fn top_element(doc: &Document) -> Selection<'_> {
    doc.select_single("body > *")
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_helpers() {
        let doc = parse(r#"<div id="main" class="story body" data-x="  "><p>x</p></div>"#);
        let div = doc.select("div");

        assert_eq!(get_attribute(&div, "id"), Some("main".to_string()));
        assert_eq!(non_empty_attribute(&div, "data-x"), None);
        assert_eq!(attribute_signature(&div), "main story body");
        assert_eq!(get_attribute(&div, "missing"), None);
    }

    #[test]
    fn test_strip_tags_keep_content() {
        let doc = parse(r#"<div>before <b>bold</b> after</div>"#);
        let div = doc.select("div");

        strip_tags(&div, &["b"]);

        assert_eq!(text_content(&div), "before bold after".into());
        assert!(doc.select("b").is_empty());
    }

    #[test]
    fn test_unwrap_single_element() {
        let doc = parse(r#"<p>a <em id="x">b <em>c</em></em> <em id="y">d</em></p>"#);
        unwrap(&doc.select("#x"));

        assert_eq!(text_content(&doc.select("p")), "a b c d".into());
        assert!(doc.select("#x").is_empty());
        assert_eq!(doc.select("em").length(), 2);
    }

    #[test]
    fn test_rename_element() {
        let doc = parse(r#"<div id="test">content</div>"#);
        rename(&doc.select("#test"), "p");

        assert!(doc.select("p#test").exists());
        assert!(doc.select("div#test").is_empty());
    }

    #[test]
    fn test_clone_element_is_body_child() {
        let doc = parse(r#"<section><div id="node"><p>one</p><p>two</p></div></section>"#);
        let copy = clone_element(&doc.select("#node"));

        let top = top_element(&copy);
        assert_eq!(tag_name(&top), Some("div".to_string()));
        assert_eq!(top.select("p").length(), 2);

        copy.select("p").remove();
        assert_eq!(doc.select("#node p").length(), 2);
    }

    #[test]
    fn test_clone_element_table_part_keeps_table() {
        let doc = parse(r#"<table id="t"><tr><td><p>cell text</p></td></tr></table>"#);
        let copy = clone_element(&doc.select("td"));

        assert_eq!(tag_name(&top_element(&copy)), Some("table".to_string()));
        assert!(copy.select("td p").exists());
    }

    #[test]
    fn test_clone_element_body_becomes_div() {
        let doc = parse(r#"<html><body><p>one</p><p>two</p></body></html>"#);
        let copy = clone_element(&doc.select("body"));

        let top = top_element(&copy);
        assert_eq!(tag_name(&top), Some("div".to_string()));
        assert_eq!(top.children().length(), 2);
    }

    #[test]
    fn test_clone_document() {
        let doc = parse(r#"<div id="original">content</div>"#);
        let cloned = clone_document(&doc);

        assert_eq!(doc.select("#original").text(), cloned.select("#original").text());

        cloned.select("#original").set_attr("id", "cloned");
        assert_eq!(doc.select("#original").attr("id"), Some("original".into()));
        assert_eq!(cloned.select("#cloned").attr("id"), Some("cloned".into()));
    }

    #[test]
    fn test_tag_name_and_text() {
        let doc = parse(r#"<article>text <span>nested</span> more</article>"#);
        let article = doc.select("article");

        assert_eq!(tag_name(&article), Some("article".to_string()));
        assert_eq!(text_content(&article), "text nested more".into());
        assert!(outer_html(&article).contains("<span>"));
    }
}
