//! Content extraction.
//!
//! [`ContentExtractor`] is the seam the article pipeline talks to. Every
//! method reads the article's current state and returns a value; none of
//! them mutate the article.
//!
//! # Module Structure
//!
//! - `metadata`: title, authors, language, links, tags, raw keywords
//! - `content`: best node scoring and post cleanup
//! - `media`: declared image URLs
//! - `readability`: Readability-backed best node (feature `readability`)

pub mod content;
pub mod media;
pub mod metadata;
#[cfg(feature = "readability")]
pub mod readability;

use std::collections::HashSet;
use std::sync::Arc;

use dom_query::Document;

use crate::article::Article;
use crate::config::{Configuration, ExtractorStrategy};
use crate::error::{Error, Result};
use crate::stopwords::StopWords;

#[cfg(feature = "readability")]
pub use readability::ReadabilityContentExtractor;

/// Extraction of metadata, body and images from an article's trees.
///
/// Metadata methods read `article.doc()` before cleaning. Image methods read
/// `article.raw_doc()`. Missing trees yield empty values.
pub trait ContentExtractor: Send + Sync {
    fn get_title(&self, article: &Article) -> Result<String>;

    fn get_authors(&self, article: &Article) -> Result<Vec<String>>;

    fn get_meta_lang(&self, article: &Article) -> Result<String>;

    fn get_favicon(&self, article: &Article) -> Result<String>;

    fn get_meta_description(&self, article: &Article) -> Result<String>;

    fn get_canonical_link(&self, article: &Article) -> Result<String>;

    fn extract_tags(&self, article: &Article) -> Result<HashSet<String>>;

    /// Raw comma-delimited keywords field.
    fn get_meta_keywords(&self, article: &Article) -> Result<String>;

    /// The node most likely to hold the body, as an independent document, or
    /// `None` when the page has no such node.
    fn calculate_best_node(&self, article: &Article) -> Result<Option<Document>>;

    /// Final structural cleanup of `article.top_node()`.
    fn post_cleanup(&self, article: &Article) -> Result<Document>;

    fn get_top_image_url(&self, article: &Article) -> Result<String>;

    fn get_image_urls(&self, article: &Article) -> Result<Vec<String>>;
}

/// Build the extractor selected by `config.extractor`.
#[must_use]
pub fn for_config(config: &Configuration) -> Arc<dyn ContentExtractor> {
    match config.extractor {
        ExtractorStrategy::Standard => Arc::new(StandardContentExtractor::new(config)),
        #[cfg(feature = "readability")]
        ExtractorStrategy::Readability => Arc::new(ReadabilityContentExtractor::new(config)),
        #[cfg(not(feature = "readability"))]
        ExtractorStrategy::Readability => {
            tracing::warn!("readability feature disabled, using standard extractor");
            Arc::new(StandardContentExtractor::new(config))
        }
    }
}

/// Stopword-density extractor.
#[derive(Debug, Clone)]
pub struct StandardContentExtractor {
    stopwords: StopWords,
}

impl StandardContentExtractor {
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        Self {
            stopwords: StopWords::for_language(&config.language),
        }
    }

    fn with_doc<T: Default>(article: &Article, f: impl FnOnce(&Document) -> T) -> T {
        article.doc().map(f).unwrap_or_default()
    }
}

impl ContentExtractor for StandardContentExtractor {
    fn get_title(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, metadata::title))
    }

    fn get_authors(&self, article: &Article) -> Result<Vec<String>> {
        Ok(Self::with_doc(article, metadata::authors))
    }

    fn get_meta_lang(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, metadata::meta_lang))
    }

    fn get_favicon(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, metadata::favicon))
    }

    fn get_meta_description(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, metadata::meta_description))
    }

    fn get_canonical_link(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, |doc| metadata::canonical_link(doc, article.url())))
    }

    fn extract_tags(&self, article: &Article) -> Result<HashSet<String>> {
        Ok(Self::with_doc(article, metadata::tags))
    }

    fn get_meta_keywords(&self, article: &Article) -> Result<String> {
        Ok(Self::with_doc(article, metadata::meta_keywords))
    }

    fn calculate_best_node(&self, article: &Article) -> Result<Option<Document>> {
        Ok(article.doc().and_then(|doc| content::best_node(doc, &self.stopwords)))
    }

    fn post_cleanup(&self, article: &Article) -> Result<Document> {
        article
            .top_node()
            .map(content::post_cleanup)
            .ok_or_else(|| Error::Extraction("post cleanup without a top node".to_string()))
    }

    fn get_top_image_url(&self, article: &Article) -> Result<String> {
        Ok(article
            .raw_doc()
            .map(|doc| media::top_image_url(doc, article.url()))
            .unwrap_or_default())
    }

    fn get_image_urls(&self, article: &Article) -> Result<Vec<String>> {
        Ok(article
            .raw_doc()
            .map(|doc| media::image_urls(&doc.select("html"), article.url()))
            .unwrap_or_default())
    }
}

