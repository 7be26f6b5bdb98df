//! Image URLs declared by the page.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::urls;

/// Sources consulted for the top image, in priority order: `(selector, attribute)`.
const TOP_IMAGE_SOURCES: &[(&str, &str)] = &[
    ("meta[property='og:image']", "content"),
    ("link[rel='image_src']", "href"),
    ("meta[name='twitter:image'], meta[property='twitter:image']", "content"),
];

/// Declared top image, resolved against `article_url`.
#[must_use]
pub fn top_image_url(doc: &Document, article_url: &str) -> String {
    TOP_IMAGE_SOURCES
        .iter()
        .find_map(|(selector, attr)| {
            doc.select(selector)
                .nodes()
                .iter()
                .find_map(|node| dom::non_empty_attribute(&Selection::from(*node), attr))
        })
        .map(|src| urls::resolve(article_url, &src))
        .unwrap_or_default()
}

/// Every `img[src]` under `root`, resolved and de-duplicated in document order.
#[must_use]
pub fn image_urls(root: &Selection, article_url: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    root.select("img[src]")
        .nodes()
        .iter()
        .filter_map(|node| dom::non_empty_attribute(&Selection::from(*node), "src"))
        .map(|src| urls::resolve(article_url, &src))
        .filter(|src| !src.is_empty() && seen.insert(src.clone()))
        .collect()
}
