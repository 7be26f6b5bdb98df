//! Embedded video detection in the top node.

use std::collections::HashSet;

use dom_query::Selection;

use crate::article::Article;
use crate::dom;
use crate::error::Result;
use crate::patterns::VIDEO_PROVIDERS;
use crate::result::MediaRef;
use crate::urls;

const EMBED_SELECTOR: &str = "iframe, embed, object, video";

/// Finds embedded media in an article's top node.
pub trait VideoExtractor: Send + Sync {
    fn get_videos(&self, article: &Article) -> Result<Vec<MediaRef>>;
}

/// Matches embeds against a fixed list of providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardVideoExtractor;

impl VideoExtractor for StandardVideoExtractor {
    fn get_videos(&self, article: &Article) -> Result<Vec<MediaRef>> {
        let Some(top_node) = article.top_node() else {
            return Ok(Vec::new());
        };
        Ok(collect_videos(&dom::top_element(top_node), article.url()))
    }
}

/// Source URL of an embed element.
fn embed_src(el: &Selection, embed_type: &str) -> Option<String> {
    match embed_type {
        "object" => dom::non_empty_attribute(el, "data")
            .or_else(|| {
                el.select("param[name='movie'], param[name='src']")
                    .nodes()
                    .iter()
                    .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "value"))
            })
            .or_else(|| {
                el.select("embed[src]")
                    .nodes()
                    .iter()
                    .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "src"))
            }),
        "video" => dom::non_empty_attribute(el, "src").or_else(|| {
            el.select("source[src]")
                .nodes()
                .iter()
                .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "src"))
        }),
        _ => dom::non_empty_attribute(el, "src"),
    }
}

fn provider_of(src: &str) -> Option<&'static str> {
    let lowered = src.to_lowercase();
    VIDEO_PROVIDERS
        .iter()
        .find(|p| lowered.contains(*p))
        .map(|p| if *p == "youtu.be" { "youtube" } else { *p })
}

fn dimension(el: &Selection, name: &str) -> Option<u32> {
    dom::get_attribute(el, name).and_then(|v| v.trim().trim_end_matches("px").parse().ok())
}

/// Known-provider embeds under `root`, de-duplicated by source.
#[must_use]
pub fn collect_videos(root: &Selection, base_url: &str) -> Vec<MediaRef> {
    let mut seen = HashSet::new();
    let mut movies = Vec::new();

    for node in root.select(EMBED_SELECTOR).nodes() {
        let el = Selection::from(*node);
        let embed_type = dom::tag_name(&el).unwrap_or_default();

        // embeds nested in an object are reported with the object
        if embed_type == "embed" && tag_parent_is(&el, "object") {
            continue;
        }

        let Some(raw_src) = embed_src(&el, &embed_type) else {
            continue;
        };
        let src = urls::resolve(base_url, &raw_src);
        let Some(provider) = provider_of(&src) else {
            continue;
        };
        if !seen.insert(src.clone()) {
            continue;
        }

        movies.push(MediaRef {
            src,
            provider: provider.to_string(),
            width: dimension(&el, "width"),
            height: dimension(&el, "height"),
            embed_code: dom::outer_html(&el).to_string(),
            embed_type,
        });
    }

    movies
}

fn tag_parent_is(el: &Selection, tag: &str) -> bool {
    dom::tag_name(&el.parent()).as_deref() == Some(tag)
}
