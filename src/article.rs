//! The article pipeline: `download → parse → nlp`.
//!
//! An [`Article`] owns every piece of state for one page. Collaborators
//! ([`Components`]) are shared trait objects chosen at construction; they read
//! the article and hand values back, and only the article assigns its own
//! fields.
//!
//! # Example
//!
//! ```rust
//! use rs_newspaper::Article;
//!
//! let html = r#"<html><head><title>Council approves budget | Daily Planet</title></head>
//!     <body><div><p>The council said that it would review the plan again in the
//!     spring, and the mayor agreed that it was the best way to move forward.</p></div></body></html>"#;
//!
//! let mut article = Article::new("https://example.com/news/council-approves-budget")?;
//! article.set_html(html);
//! article.parse()?;
//!
//! assert_eq!(article.title(), "Council approves budget");
//! assert!(article.text().starts_with("The council said"));
//! # Ok::<(), rs_newspaper::Error>(())
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use dom_query::Document;
use serde_json::Value;

use crate::candidate::ParseCandidate;
use crate::cleaner::{DocumentCleaner, StandardDocumentCleaner};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::extractor::{self, ContentExtractor};
use crate::formatter::{OutputFormatter, StandardOutputFormatter};
use crate::images::{ImageScraper, StandardImageScraper};
use crate::network::{Fetcher, HttpFetcher};
use crate::nlp::{NlpEngine, StandardNlp};
use crate::parser::{DocumentParser, DomParser};
use crate::resources::{LocalStorage, ResourceRegistry};
use crate::result::{ArticleRecord, MediaRef};
use crate::text;
use crate::urls;
use crate::videos::{StandardVideoExtractor, VideoExtractor};

/// URL fragments of galleries, slideshows and other mostly-visual pages.
const MEDIA_NEWS_MARKERS: &[&str] = &["/video", "/slide", "/gallery", "/powerpoint", "/fashion", "/glamour", "/cloth"];

/// The collaborator set an article runs its stages with.
#[derive(Clone)]
pub struct Components {
    pub fetcher: Arc<dyn Fetcher>,
    pub parser: Arc<dyn DocumentParser>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub cleaner: Arc<dyn DocumentCleaner>,
    pub formatter: Arc<dyn OutputFormatter>,
    pub videos: Arc<dyn VideoExtractor>,
    pub images: Arc<dyn ImageScraper>,
    pub nlp: Arc<dyn NlpEngine>,
    pub resources: Arc<dyn ResourceRegistry>,
}

impl Components {
    /// Standard collaborators with an HTTP fetcher.
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.browser_user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Standard collaborators around a caller-provided fetcher.
    #[must_use]
    pub fn with_fetcher(config: &Configuration, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            images: Arc::new(StandardImageScraper::new(Arc::clone(&fetcher), config)),
            fetcher,
            parser: Arc::new(DomParser),
            extractor: extractor::for_config(config),
            cleaner: Arc::new(StandardDocumentCleaner),
            formatter: Arc::new(StandardOutputFormatter::new(&config.language)),
            videos: Arc::new(StandardVideoExtractor),
            nlp: Arc::new(StandardNlp::new(
                &config.language,
                config.keyword_count,
                config.summary_sentences,
            )),
            resources: Arc::new(LocalStorage::new(config.local_storage_path.clone())),
        }
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Components").finish_non_exhaustive()
    }
}

/// Optional construction inputs for an [`Article`].
#[derive(Debug)]
pub struct ArticleBuilder {
    url: String,
    title: String,
    source_url: Option<String>,
    config: Configuration,
    components: Option<Components>,
}

impl ArticleBuilder {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            source_url: None,
            config: Configuration::default(),
            components: None,
        }
    }

    /// A title known up front; kept unless parsing extracts a non-empty one.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard collaborators.
    #[must_use]
    pub fn components(mut self, components: Components) -> Self {
        self.components = Some(components);
        self
    }

    /// Validate the URLs and create the article.
    pub fn build(self) -> Result<Article> {
        let url = text::fix_unicode(self.url.trim());
        if url.is_empty() {
            return Err(Error::Validation("empty url".to_string()));
        }

        let source_url = match self.source_url {
            Some(given) => {
                let given = text::fix_unicode(given.trim());
                if urls::source_of(&given).is_none() {
                    return Err(Error::Validation(format!("malformed source url {given:?}")));
                }
                given
            }
            None => urls::source_of(&url)
                .ok_or_else(|| Error::Validation(format!("cannot derive a source url from {url:?}")))?,
        };

        let components = match self.components {
            Some(components) => components,
            None => Components::from_config(&self.config)?,
        };

        let title = text::fix_unicode(&self.title);
        Ok(Article {
            url: urls::prepare_url(&url, Some(&source_url)),
            title,
            source_url,
            config: self.config,
            components,
            final_url: String::new(),
            link_hash: String::new(),
            text: String::new(),
            summary: String::new(),
            keywords: Vec::new(),
            authors: Vec::new(),
            tags: HashSet::new(),
            top_img: String::new(),
            imgs: Vec::new(),
            movies: Vec::new(),
            meta_lang: String::new(),
            meta_description: String::new(),
            meta_favicon: String::new(),
            meta_keywords: Vec::new(),
            canonical_link: String::new(),
            html: String::new(),
            html_supplied: false,
            doc: None,
            raw_doc: None,
            top_node: None,
            is_downloaded: false,
            is_parsed: false,
            additional_data: HashMap::new(),
        })
    }
}

/// One news article and everything extracted from it.
///
/// Not `Send`: the parsed trees are single-threaded. Build one article per
/// worker thread; collaborators are shared.
pub struct Article {
    url: String,
    title: String,
    source_url: String,
    final_url: String,
    link_hash: String,
    text: String,
    summary: String,
    keywords: Vec<String>,
    authors: Vec<String>,
    tags: HashSet<String>,
    top_img: String,
    imgs: Vec<String>,
    movies: Vec<MediaRef>,
    meta_lang: String,
    meta_description: String,
    meta_favicon: String,
    meta_keywords: Vec<String>,
    canonical_link: String,
    html: String,
    html_supplied: bool,
    doc: Option<Document>,
    raw_doc: Option<Document>,
    top_node: Option<Document>,
    is_downloaded: bool,
    is_parsed: bool,
    additional_data: HashMap<String, Value>,
    config: Configuration,
    components: Components,
}

impl std::fmt::Debug for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Article")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("link_hash", &self.link_hash)
            .field("is_downloaded", &self.is_downloaded)
            .field("is_parsed", &self.is_parsed)
            .finish_non_exhaustive()
    }
}

impl Article {
    /// Article with the default configuration and standard collaborators.
    pub fn new(url: &str) -> Result<Self> {
        ArticleBuilder::new(url).build()
    }

    #[must_use]
    pub fn builder(url: impl Into<String>) -> ArticleBuilder {
        ArticleBuilder::new(url)
    }

    // === Stages ===

    /// Fetch the page with the configured timeout.
    pub fn download(&mut self) -> Result<()> {
        self.download_with_timeout(self.config.request_timeout())
    }

    /// Fetch the page. Failures propagate; nothing is retried.
    pub fn download_with_timeout(&mut self, timeout: Duration) -> Result<()> {
        let html = self.components.fetcher.get_html(&self.url, timeout)?;
        self.html = html;
        self.html_supplied = false;
        self.is_downloaded = true;
        Ok(())
    }

    /// Supply already-fetched HTML instead of downloading. Empty input is ignored.
    pub fn set_html(&mut self, html: impl Into<String>) {
        let html = html.into();
        if html.is_empty() {
            return;
        }
        self.html = html;
        self.html_supplied = true;
        self.is_downloaded = true;
    }

    /// Extract metadata, body text and images from the downloaded HTML.
    pub fn parse(&mut self) -> Result<()> {
        if !self.is_downloaded {
            return Err(Error::Precondition("parse() called before download()".to_string()));
        }
        let c = self.components.clone();

        let doc = c.parser.parse(&self.html)?;
        self.raw_doc = Some(c.parser.deep_clone(&doc));
        self.doc = Some(doc);

        let candidate = if self.html_supplied {
            ParseCandidate::from_raw(&self.url, &self.html)
        } else {
            ParseCandidate::from_url(&self.url)
        };
        self.final_url = candidate.url;
        self.link_hash = candidate.link_hash;

        // held back until the body is done, see the assignments below
        let title = c.extractor.get_title(self)?;
        let authors = c.extractor.get_authors(self)?;

        self.meta_lang = c.extractor.get_meta_lang(self)?;
        self.meta_favicon = c.extractor.get_favicon(self)?;
        self.meta_description = c.extractor.get_meta_description(self)?;
        self.canonical_link = c.extractor.get_canonical_link(self)?;
        self.tags = c.extractor.extract_tags(self)?;

        let raw_keywords = c.extractor.get_meta_keywords(self)?;
        self.meta_keywords = raw_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        // cleaning drops nodes the metadata reads above still needed
        let cleaned = c.cleaner.clean(self)?;
        self.doc = Some(cleaned);

        self.top_node = c.extractor.calculate_best_node(self)?;
        let mut body = String::new();
        if self.top_node.is_some() {
            match c.videos.get_videos(self) {
                Ok(movies) => self.movies = movies,
                Err(e) => tracing::warn!(url = %self.url, error = %e, "video detection failed"),
            }
            let top_node = c.extractor.post_cleanup(self)?;
            self.top_node = Some(top_node);
            body = c.formatter.get_formatted_text(self)?;
        } else {
            tracing::debug!(url = %self.url, "no best node found");
        }

        self.set_title(&title);
        self.set_authors(&authors);
        self.set_text(&body);
        let seed = self.meta_keywords.clone();
        self.set_keywords(&seed);

        c.resources.release(&self.link_hash);

        if self.raw_doc.is_some() {
            let top_img = c.extractor.get_top_image_url(self)?;
            self.set_top_img(&top_img);
            let imgs = c.extractor.get_image_urls(self)?;
            self.set_imgs(&imgs);
        }

        if self.top_img.is_empty() && self.config.fetch_images {
            self.resolve_fallback_image(c.images.as_ref());
        }

        self.is_parsed = true;
        Ok(())
    }

    /// Keywords and summary from the parsed text.
    pub fn nlp(&mut self) -> Result<()> {
        if !self.is_downloaded || !self.is_parsed {
            return Err(Error::Precondition("nlp() called before download() and parse()".to_string()));
        }
        let nlp = Arc::clone(&self.components.nlp);

        let keywords: BTreeSet<String> = nlp
            .keywords(&self.text)
            .into_keys()
            .chain(nlp.keywords(&self.title).into_keys())
            .collect();
        self.set_keywords(&keywords);

        let summary = nlp.summarize(&self.title, &self.text).join("\n");
        self.set_summary(&summary);
        Ok(())
    }

    /// `download`, `parse` and `nlp` in sequence.
    pub fn build(&mut self) -> Result<()> {
        self.download()?;
        self.parse()?;
        self.nlp()
    }

    fn resolve_fallback_image(&mut self, images: &dyn ImageScraper) {
        match images.largest_image_url(self) {
            Ok(url) => self.set_top_img(&url),
            Err(e) => tracing::warn!(url = %self.url, error = %e, "fallback image resolution failed"),
        }
    }

    // === Checks ===

    /// Whether the URL looks like a news article.
    #[must_use]
    pub fn is_valid_url(&self) -> bool {
        urls::valid_url(&self.url)
    }

    /// Whether the parsed body looks like a real article.
    pub fn is_valid_body(&self) -> Result<bool> {
        if !self.is_parsed {
            return Err(Error::Precondition("is_valid_body() called before parse()".to_string()));
        }

        let word_count = text::word_count(&self.text);
        let sentence_count = text::sentence_count(&self.text);
        let meta_type = self
            .raw_doc
            .as_ref()
            .map(|doc| self.components.parser.get_meta_type(doc))
            .unwrap_or_default();

        if meta_type == "article" && word_count >= self.config.meta_article_min_words() {
            tracing::debug!(url = %self.url, "{} verified for article and wc", self.url);
            return Ok(true);
        }
        if !self.is_media_news() && self.text.is_empty() {
            tracing::debug!(url = %self.url, "{} caught for no media no text", self.url);
            return Ok(false);
        }
        if self.title.is_empty() || self.title.split_whitespace().count() < 2 {
            tracing::debug!(url = %self.url, "{} caught for bad title", self.url);
            return Ok(false);
        }
        if word_count < self.config.min_word_count {
            tracing::debug!(url = %self.url, word_count, "{} caught for word cnt", self.url);
            return Ok(false);
        }
        if sentence_count < self.config.min_sent_count {
            tracing::debug!(url = %self.url, sentence_count, "{} caught for sent cnt", self.url);
            return Ok(false);
        }
        if self.html.is_empty() {
            tracing::debug!(url = %self.url, "{} caught for no html", self.url);
            return Ok(false);
        }

        tracing::debug!(url = %self.url, "{} verified for default true", self.url);
        Ok(true)
    }

    /// Whether the URL points at mostly-visual content.
    #[must_use]
    pub fn is_media_news(&self) -> bool {
        MEDIA_NEWS_MARKERS.iter().any(|m| self.url.contains(m))
    }

    /// The link hash, once parsed.
    pub fn get_key(&self) -> Result<&str> {
        if !self.is_parsed {
            return Err(Error::Precondition("get_key() called before parse()".to_string()));
        }
        Ok(&self.link_hash)
    }

    // === Setters ===

    /// Truncate, normalise, and keep only non-empty results.
    fn normalized(value: &str, max_chars: usize) -> Option<String> {
        let value = text::fix_unicode(text::truncate_chars(value, max_chars));
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn normalized_list<I, S>(values: I, max_items: usize, max_chars: usize) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list: Vec<String> = values
            .into_iter()
            .take(max_items)
            .filter_map(|v| Self::normalized(v.as_ref(), max_chars))
            .collect();
        (!list.is_empty()).then_some(list)
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(v) = Self::normalized(title, self.config.max_title) {
            self.title = v;
        }
    }

    pub fn set_text(&mut self, text: &str) {
        if let Some(v) = Self::normalized(text, self.config.text_limit()) {
            self.text = v;
        }
    }

    pub fn set_summary(&mut self, summary: &str) {
        if let Some(v) = Self::normalized(summary, self.config.max_summary) {
            self.summary = v;
        }
    }

    /// Keep the first `max_keywords` entries. An empty list changes nothing.
    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(list) = Self::normalized_list(keywords, self.config.max_keywords, self.config.max_title) {
            self.keywords = list;
        }
    }

    /// Keep the first `max_authors` entries. An empty list changes nothing.
    pub fn set_authors<I, S>(&mut self, authors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(list) = Self::normalized_list(authors, self.config.max_authors, self.config.max_title) {
            self.authors = list;
        }
    }

    /// [`set_keywords`](Self::set_keywords) for dynamically typed input.
    pub fn set_keywords_json(&mut self, keywords: &Value) -> Result<()> {
        let list = json_strings(keywords, "keywords")?;
        self.set_keywords(&list);
        Ok(())
    }

    /// [`set_authors`](Self::set_authors) for dynamically typed input.
    pub fn set_authors_json(&mut self, authors: &Value) -> Result<()> {
        let list = json_strings(authors, "authors")?;
        self.set_authors(&list);
        Ok(())
    }

    pub fn set_top_img(&mut self, src: &str) {
        let src = text::fix_unicode(src.trim());
        if !src.is_empty() {
            self.top_img = src;
        }
    }

    pub fn set_imgs<S: AsRef<str>>(&mut self, imgs: &[S]) {
        let list: Vec<String> = imgs
            .iter()
            .map(|s| text::fix_unicode(s.as_ref().trim()))
            .filter(|s| !s.is_empty())
            .collect();
        if !list.is_empty() {
            self.imgs = list;
        }
    }

    // === Getters ===

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// Raw link hash; empty before parsing. See [`get_key`](Self::get_key).
    #[must_use]
    pub fn link_hash(&self) -> &str {
        &self.link_hash
    }

    /// Plain body text, empty when extraction found nothing.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    #[must_use]
    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn top_img(&self) -> &str {
        &self.top_img
    }

    #[must_use]
    pub fn imgs(&self) -> &[String] {
        &self.imgs
    }

    #[must_use]
    pub fn movies(&self) -> &[MediaRef] {
        &self.movies
    }

    #[must_use]
    pub fn meta_lang(&self) -> &str {
        &self.meta_lang
    }

    #[must_use]
    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    #[must_use]
    pub fn meta_favicon(&self) -> &str {
        &self.meta_favicon
    }

    #[must_use]
    pub fn meta_keywords(&self) -> &[String] {
        &self.meta_keywords
    }

    #[must_use]
    pub fn canonical_link(&self) -> &str {
        &self.canonical_link
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Working tree; cleaned once `parse()` has run.
    #[must_use]
    pub fn doc(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// Untouched tree as parsed.
    #[must_use]
    pub fn raw_doc(&self) -> Option<&Document> {
        self.raw_doc.as_ref()
    }

    /// Best content node, see [`crate::dom::top_element`].
    #[must_use]
    pub fn top_node(&self) -> Option<&Document> {
        self.top_node.as_ref()
    }

    #[must_use]
    pub fn is_downloaded(&self) -> bool {
        self.is_downloaded
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Caller-owned extension fields. The pipeline never reads or writes them.
    #[must_use]
    pub fn additional_data(&self) -> &HashMap<String, Value> {
        &self.additional_data
    }

    pub fn additional_data_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.additional_data
    }

    /// Serializable snapshot of the extracted fields.
    #[must_use]
    pub fn to_record(&self) -> ArticleRecord {
        ArticleRecord {
            url: self.url.clone(),
            source_url: self.source_url.clone(),
            final_url: self.final_url.clone(),
            link_hash: self.link_hash.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            summary: self.summary.clone(),
            keywords: self.keywords.clone(),
            authors: self.authors.clone(),
            tags: self.tags.iter().cloned().collect(),
            top_img: self.top_img.clone(),
            imgs: self.imgs.clone(),
            movies: self.movies.clone(),
            meta_lang: self.meta_lang.clone(),
            meta_description: self.meta_description.clone(),
            meta_favicon: self.meta_favicon.clone(),
            meta_keywords: self.meta_keywords.clone(),
            canonical_link: self.canonical_link.clone(),
        }
    }
}

/// Strings of a JSON array of strings; any other shape is a type error.
fn json_strings(value: &Value, field: &str) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(Error::TypeArgument(format!("{field} must be a list, got {value}")));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::TypeArgument(format!("{field} entries must be strings, got {other}"))),
        })
        .collect()
}
