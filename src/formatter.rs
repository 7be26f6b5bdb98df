//! Plain-text rendering of the top node.

use dom_query::{Document, Selection};

use crate::article::Article;
use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::content::{score_of, SCORE_ATTR};
use crate::stopwords::StopWords;
use crate::text;

/// Inline markup replaced by its text before rendering.
const INLINE_TAGS: &[&str] = &["a", "b", "strong", "i", "em", "u", "span", "font", "sup", "sub", "small", "mark", "abbr", "cite", "time"];

/// Blocks checked for enough prose to keep.
const SHORT_BLOCK_SELECTOR: &str = "p, div, li, ul, ol, h1, h2, h3, h4, h5, h6, blockquote, section";

/// Minimum stopwords for a block to count as prose.
const MIN_BLOCK_STOPWORDS: usize = 3;

/// Renders an article's top node as plain text.
pub trait OutputFormatter: Send + Sync {
    fn get_formatted_text(&self, article: &Article) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct StandardOutputFormatter {
    stopwords: StopWords,
}

impl StandardOutputFormatter {
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: StopWords::for_language(language),
        }
    }

    /// Render a best-node document.
    #[must_use]
    pub fn format(&self, top_node: &Document) -> String {
        let work = dom::clone_document(top_node);
        let top = dom::top_element(&work);
        if top.is_empty() {
            return String::new();
        }

        remove_negative_scores(&top);
        dom::strip_tags(&top, INLINE_TAGS);
        self.remove_short_blocks(&top);
        convert_to_text(&top)
    }

    fn remove_short_blocks(&self, top: &Selection) {
        let blocks = top.select(SHORT_BLOCK_SELECTOR).nodes().to_vec();
        for node in blocks.into_iter().rev() {
            let block = Selection::from(node);
            let has_embed = block.select("object, embed, iframe, video").exists();
            if !has_embed && self.stopwords.count(&dom::text_content(&block)) < MIN_BLOCK_STOPWORDS {
                block.remove();
            }
        }
    }
}

impl OutputFormatter for StandardOutputFormatter {
    fn get_formatted_text(&self, article: &Article) -> Result<String> {
        let top_node = article
            .top_node()
            .ok_or_else(|| Error::Extraction("formatting without a top node".to_string()))?;
        Ok(self.format(top_node))
    }
}

fn remove_negative_scores(top: &Selection) {
    let scored = top.select(&format!("[{SCORE_ATTR}]")).nodes().to_vec();
    for node in scored {
        let el = Selection::from(node);
        if score_of(&el) < 0.0 {
            el.remove();
        }
    }
}

/// Whitespace-collapsed text of each child block, separated by blank lines.
fn convert_to_text(top: &Selection) -> String {
    let children = top.children();
    if children.is_empty() {
        return text::collapse_whitespace(&dom::text_content(top));
    }

    let mut blocks: Vec<String> = Vec::new();
    for node in children.nodes() {
        let block = text::collapse_whitespace(&dom::text_content(&Selection::from(*node)));
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    blocks.join("\n\n")
}
