//! Boilerplate removal before best-node selection.

use dom_query::{Document, Selection};

use crate::article::Article;
use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::{BAD_TAG_NAMES, BLOCK_CHILD_SELECTOR, CAPTION, GOOGLE_AD, SOCIAL_WIDGET, STRIP_SELECTOR};

/// Produces the cleaned working tree of an article.
pub trait DocumentCleaner: Send + Sync {
    /// Clean `article.doc()` and return the result. The article's own tree is
    /// left as it was.
    fn clean(&self, article: &Article) -> Result<Document>;
}

/// Removes scripts, navigation, ads, social widgets and comment blocks, then
/// normalises inline markup so paragraphs score well.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDocumentCleaner;

impl DocumentCleaner for StandardDocumentCleaner {
    fn clean(&self, article: &Article) -> Result<Document> {
        let doc = article
            .doc()
            .ok_or_else(|| Error::Extraction("no document to clean".to_string()))?;
        let cleaned = dom::clone_document(doc);
        clean_document(&cleaned);
        Ok(cleaned)
    }
}

/// Clean a tree in place.
pub fn clean_document(doc: &Document) {
    clean_body_classes(doc);
    clean_article_tags(doc);
    clean_em_tags(doc);
    remove_drop_caps(doc);
    doc.select(STRIP_SELECTOR).remove();
    remove_matching(doc, |signature| {
        BAD_TAG_NAMES.is_match(signature)
            || CAPTION.is_match(signature)
            || GOOGLE_AD.is_match(signature)
            || SOCIAL_WIDGET.is_match(signature)
    });
    clean_para_spans(doc);
    div_to_para(doc);
}

/// `body` classes often carry section names that trip the boilerplate patterns.
fn clean_body_classes(doc: &Document) {
    doc.select("body").remove_attr("class");
}

fn clean_article_tags(doc: &Document) {
    let articles = doc.select("article");
    for attr in ["id", "name", "class"] {
        articles.remove_attr(attr);
    }
}

/// Unwrap `em` that do not hold images.
fn clean_em_tags(doc: &Document) {
    let ems = doc.select("em").nodes().to_vec();
    for node in ems.into_iter().rev() {
        let em = Selection::from(node);
        if em.select("img").is_empty() {
            dom::unwrap(&em);
        }
    }
}

fn remove_drop_caps(doc: &Document) {
    dom::unwrap(&doc.select("span[class~='dropcap'], span[class~='drop_cap']"));
}

/// Remove `body` descendants whose id/class/name matches `is_bad`.
fn remove_matching(doc: &Document, is_bad: impl Fn(&str) -> bool) {
    let nodes = doc.select("body [id], body [class], body [name]").nodes().to_vec();
    for node in nodes {
        let sel = Selection::from(node);
        let signature = dom::attribute_signature(&sel);
        if !signature.is_empty() && is_bad(&signature) {
            sel.remove();
        }
    }
}

fn clean_para_spans(doc: &Document) {
    for node in doc.select("p").nodes() {
        dom::strip_tags(&Selection::from(*node), &["span"]);
    }
}

/// Turn `div`s that only hold inline content into paragraphs.
fn div_to_para(doc: &Document) {
    let divs = doc.select("div").nodes().to_vec();
    for node in divs.into_iter().rev() {
        let div = Selection::from(node);
        if div.select(BLOCK_CHILD_SELECTOR).is_empty() && !dom::text_content(&div).trim().is_empty() {
            dom::rename(&div, "p");
        }
    }
}
