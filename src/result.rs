//! Output types: detected media and the serializable article record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An embedded media reference found in the article body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Embed source URL.
    pub src: String,

    /// Provider name (e.g. `"youtube"`), or empty if unknown.
    pub provider: String,

    /// Declared width in pixels.
    pub width: Option<u32>,

    /// Declared height in pixels.
    pub height: Option<u32>,

    /// Element kind the embed was found in (`iframe`, `embed`, `object`, `video`).
    pub embed_type: String,

    /// Outer HTML of the embed element.
    pub embed_code: String,
}

/// Snapshot of an article's extracted fields.
///
/// `text` is always a plain string, empty when extraction degraded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub source_url: String,
    pub final_url: String,
    pub link_hash: String,
    pub title: String,
    pub text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    /// Sorted for stable output.
    pub tags: BTreeSet<String>,
    pub top_img: String,
    pub imgs: Vec<String>,
    pub movies: Vec<MediaRef>,
    pub meta_lang: String,
    pub meta_description: String,
    pub meta_favicon: String,
    pub meta_keywords: Vec<String>,
    pub canonical_link: String,
}
