//! Policy configuration for the article pipeline.
//!
//! The `Configuration` struct bundles field length limits, validity
//! thresholds, storage location and the extractor strategy. It is supplied
//! once per article and never mutated by the pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which best-node selection strategy the article uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorStrategy {
    /// Stopword-density scoring over paragraph candidates.
    #[default]
    Standard,
    /// Readability (`dom_smoothie`) content selection. Requires the
    /// `readability` feature; falls back to `Standard` without it.
    Readability,
}

/// Configuration for the article pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, or load a partial TOML file with
/// [`Configuration::from_file`].
///
/// # Example
///
/// ```rust
/// use rs_newspaper::Configuration;
///
/// let config = Configuration {
///     max_authors: 2,
///     min_word_count: 150,
///     ..Configuration::default()
/// };
/// assert_eq!(config.max_authors, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Minimum number of whitespace-delimited words for a valid body.
    ///
    /// Default: `300`
    pub min_word_count: usize,

    /// Minimum number of period-delimited sentences for a valid body.
    ///
    /// Default: `7`
    pub min_sent_count: usize,

    /// How far below `min_word_count` a page declaring `og:type = article`
    /// may fall and still be accepted.
    ///
    /// Default: `50`
    pub meta_type_word_slack: usize,

    /// Maximum title length (characters).
    ///
    /// Default: `200`
    pub max_title: usize,

    /// Maximum text length (characters), before the reserved margin.
    ///
    /// Default: `100000`
    pub max_text: usize,

    /// Characters held back from `max_text` for a caller-appended marker.
    ///
    /// Default: `5`
    pub text_reserved_margin: usize,

    /// Maximum number of stored keywords.
    ///
    /// Default: `35`
    pub max_keywords: usize,

    /// Maximum number of stored authors.
    ///
    /// Default: `10`
    pub max_authors: usize,

    /// Maximum summary length (characters).
    ///
    /// Default: `5000`
    pub max_summary: usize,

    /// Number of sentences in the extractive summary.
    ///
    /// Default: `5`
    pub summary_sentences: usize,

    /// Number of keywords the NLP engine ranks per text.
    ///
    /// Default: `10`
    pub keyword_count: usize,

    /// Article language (ISO 639-1), used for stopword selection.
    ///
    /// Default: `"en"`
    pub language: String,

    /// Directory holding per-article scratch files.
    ///
    /// Default: `<tmp>/newspaper_scraper/article_resources`
    pub local_storage_path: PathBuf,

    /// User agent sent by the HTTP fetcher.
    pub browser_user_agent: String,

    /// Default download timeout in seconds.
    ///
    /// Default: `7`
    pub request_timeout_secs: u64,

    /// Allow the fallback image scraper to fetch candidate images.
    ///
    /// Default: `true`
    pub fetch_images: bool,

    /// Maximum number of candidate images fetched by the fallback scraper.
    ///
    /// Default: `10`
    pub max_image_probes: usize,

    /// Images with a smaller pixel area are never chosen as top image.
    ///
    /// Default: `5000`
    pub min_image_area: u64,

    /// Best-node selection strategy.
    ///
    /// Default: `ExtractorStrategy::Standard`
    pub extractor: ExtractorStrategy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_word_count: 300,
            min_sent_count: 7,
            meta_type_word_slack: 50,
            max_title: 200,
            max_text: 100_000,
            text_reserved_margin: 5,
            max_keywords: 35,
            max_authors: 10,
            max_summary: 5000,
            summary_sentences: 5,
            keyword_count: 10,
            language: "en".to_string(),
            local_storage_path: std::env::temp_dir()
                .join("newspaper_scraper")
                .join("article_resources"),
            browser_user_agent: concat!("rs-newspaper/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 7,
            fetch_images: true,
            max_image_probes: 10,
            min_image_area: 5000,
            extractor: ExtractorStrategy::Standard,
        }
    }
}

impl Configuration {
    /// Parse a (possibly partial) TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Effective maximum text length once the reserved margin is held back.
    #[must_use]
    pub fn text_limit(&self) -> usize {
        self.max_text.saturating_sub(self.text_reserved_margin)
    }

    /// Word count needed by pages that declare themselves articles.
    #[must_use]
    pub fn meta_article_min_words(&self) -> usize {
        self.min_word_count.saturating_sub(self.meta_type_word_slack)
    }

    /// Default download timeout.
    #[must_use]
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let config = Configuration::default();

        assert_eq!(config.min_word_count, 300);
        assert_eq!(config.min_sent_count, 7);
        assert_eq!(config.max_title, 200);
        assert_eq!(config.max_text, 100_000);
        assert_eq!(config.text_reserved_margin, 5);
        assert_eq!(config.max_keywords, 35);
        assert_eq!(config.max_authors, 10);
        assert_eq!(config.max_summary, 5000);
        assert_eq!(config.language, "en");
        assert_eq!(config.request_timeout_secs, 7);
        assert!(config.fetch_images);
        assert_eq!(config.extractor, ExtractorStrategy::Standard);
    }

    #[test]
    fn test_derived_limits() {
        let config = Configuration::default();
        assert_eq!(config.text_limit(), 99_995);
        assert_eq!(config.meta_article_min_words(), 250);

        let tiny = Configuration {
            max_text: 3,
            min_word_count: 10,
            ..Configuration::default()
        };
        assert_eq!(tiny.text_limit(), 0);
        assert_eq!(tiny.meta_article_min_words(), 0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Configuration::from_toml_str(
            r#"
            max_authors = 2
            language = "de"
            extractor = "readability"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_authors, 2);
        assert_eq!(config.language, "de");
        assert_eq!(config.extractor, ExtractorStrategy::Readability);
        assert_eq!(config.min_word_count, 300);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Configuration::from_toml_str("max_authors = \"many\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Configuration::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
