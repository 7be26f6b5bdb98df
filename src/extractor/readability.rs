//! Readability-backed best node selection via `dom_smoothie`.
//!
//! Metadata and images come from the standard extractor; only the body
//! node is delegated to Readability.

use std::collections::HashSet;

use dom_query::Document;
use dom_smoothie::Readability;

use super::{ContentExtractor, StandardContentExtractor};
use crate::article::Article;
use crate::config::Configuration;
use crate::dom;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ReadabilityContentExtractor {
    standard: StandardContentExtractor,
}

impl ReadabilityContentExtractor {
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        Self {
            standard: StandardContentExtractor::new(config),
        }
    }
}

impl ContentExtractor for ReadabilityContentExtractor {
    fn get_title(&self, article: &Article) -> Result<String> {
        self.standard.get_title(article)
    }

    fn get_authors(&self, article: &Article) -> Result<Vec<String>> {
        self.standard.get_authors(article)
    }

    fn get_meta_lang(&self, article: &Article) -> Result<String> {
        self.standard.get_meta_lang(article)
    }

    fn get_favicon(&self, article: &Article) -> Result<String> {
        self.standard.get_favicon(article)
    }

    fn get_meta_description(&self, article: &Article) -> Result<String> {
        self.standard.get_meta_description(article)
    }

    fn get_canonical_link(&self, article: &Article) -> Result<String> {
        self.standard.get_canonical_link(article)
    }

    fn extract_tags(&self, article: &Article) -> Result<HashSet<String>> {
        self.standard.extract_tags(article)
    }

    fn get_meta_keywords(&self, article: &Article) -> Result<String> {
        self.standard.get_meta_keywords(article)
    }

    fn calculate_best_node(&self, article: &Article) -> Result<Option<Document>> {
        let Some(doc) = article.doc() else {
            return Ok(None);
        };

        let mut reader = Readability::with_document(dom::clone_document(doc), None, None)
            .map_err(|e| Error::Extraction(format!("readability setup: {e}")))?;

        // Readability refuses pages it cannot find a body in; that is "no best node"
        let parsed = match reader.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(url = article.url(), error = %e, "readability found no content");
                return Ok(None);
            }
        };

        let content = parsed.content.to_string();
        if content.trim().is_empty() {
            return Ok(None);
        }

        let node = Document::from(format!("<div>{content}</div>"));
        let has_text = !dom::text_content(&dom::top_element(&node)).trim().is_empty();
        Ok(has_text.then_some(node))
    }

    fn post_cleanup(&self, article: &Article) -> Result<Document> {
        self.standard.post_cleanup(article)
    }

    fn get_top_image_url(&self, article: &Article) -> Result<String> {
        self.standard.get_top_image_url(article)
    }

    fn get_image_urls(&self, article: &Article) -> Result<Vec<String>> {
        self.standard.get_image_urls(article)
    }
}
