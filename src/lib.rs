//! # rs-newspaper
//!
//! News article scraping: download a page, extract its title, authors, body
//! text, images, videos and page metadata, then derive keywords and a summary.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_newspaper::Article;
//!
//! let html = r#"<html><head><title>Storm closes the harbour</title></head>
//! <body><div><p>The harbour was closed on Monday after the storm, and it will stay
//! closed until the wind has dropped to a safe level for the boats.</p></div></body></html>"#;
//!
//! let mut article = Article::new("https://example.com/2024/01/08/storm-closes-harbour")?;
//! article.set_html(html);
//! article.parse()?;
//! article.nlp()?;
//!
//! println!("Title: {}", article.title());
//! println!("Keywords: {:?}", article.keywords());
//! # Ok::<(), rs_newspaper::Error>(())
//! ```
//!
//! ## Stages
//!
//! - **download**: fetch the HTML through a [`network::Fetcher`]
//! - **parse**: metadata, cleaning, best node, body text, images and videos
//! - **nlp**: keywords and an extractive summary
//!
//! Every stage is driven by a [`Components`] set of trait objects, so any of
//! the fetcher, parser, extractor, cleaner, formatter, video detector, image
//! scraper, NLP engine or resource registry can be replaced.

mod error;
mod patterns;

/// The article pipeline.
pub mod article;

/// Parse candidate (final URL and link hash).
pub mod candidate;

/// Boilerplate removal.
pub mod cleaner;

/// Pipeline configuration.
pub mod config;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Content, metadata and image extraction.
pub mod extractor;

/// Plain-text rendering of the best node.
pub mod formatter;

/// Fallback top-image resolution.
pub mod images;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// HTTP fetching.
pub mod network;

/// Keywords and summaries.
pub mod nlp;

/// HTML parsing seam.
pub mod parser;

/// Queue-driven worker.
pub mod queue;

/// Per-article downloaded resources.
pub mod resources;

/// Serializable article records.
pub mod result;

/// Stopword lists.
pub mod stopwords;

/// Text normalization.
pub mod text;

/// URL utilities for validation, resolution, and normalization.
pub mod urls;

/// Embedded video detection.
pub mod videos;

// Public API - re-exports
pub use article::{Article, ArticleBuilder, Components};
pub use config::{Configuration, ExtractorStrategy};
pub use error::{Error, Result};
pub use queue::{ParsedMessage, WorkMessage, Worker};
pub use result::{ArticleRecord, MediaRef};
