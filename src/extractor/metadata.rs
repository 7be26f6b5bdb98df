//! HTML Meta Tag Extraction
//!
//! Title, authors, language, favicon, description, canonical link, tags and
//! raw keywords read from an untouched (pre-cleaning) document.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{AUTHOR_ATTR_VALUES, BYLINE_PREFIX, BYLINE_SPLIT, TAG_HREF_SELECTOR, TITLE_DELIMITERS};
use crate::text;
use crate::urls;

/// Elements whose text is a byline.
const BYLINE_SELECTOR: &str = "[itemprop='author'], [rel='author'], .byline, .author";

/// Content of the first `meta` matching `selector`, trimmed and non-empty.
fn meta_content(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector)
        .nodes()
        .iter()
        .find_map(|node| dom::non_empty_attribute(&Selection::from(*node), "content"))
}

/// `href` of the first `link` matching `selector`, trimmed and non-empty.
fn link_href(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector)
        .nodes()
        .iter()
        .find_map(|node| dom::non_empty_attribute(&Selection::from(*node), "href"))
}

fn first_text(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector).nodes().iter().find_map(|node| {
        let value = text::collapse_whitespace(&dom::text_content(&Selection::from(*node)));
        (!value.is_empty()).then_some(value)
    })
}

// ============================================================
// TITLE
// ============================================================

/// Headline of the page.
///
/// `<title>` wins over `og:title`, which wins over the first `<h1>`. Site
/// names glued on with a delimiter are dropped by keeping the longest part.
#[must_use]
pub fn title(doc: &Document) -> String {
    let raw = first_text(doc, "title")
        .or_else(|| meta_content(doc, "meta[property='og:title'], meta[name='og:title']"))
        .or_else(|| first_text(doc, "h1"))
        .unwrap_or_default();

    split_title(&text::collapse_whitespace(&raw))
}

/// Keep the longest part of a delimited title.
fn split_title(title: &str) -> String {
    for delimiter in TITLE_DELIMITERS {
        if !title.contains(delimiter) {
            continue;
        }
        let longest = title
            .split(delimiter)
            .map(str::trim)
            .max_by_key(|part| part.chars().count())
            .unwrap_or(title);
        return longest.to_string();
    }
    title.to_string()
}

// ============================================================
// AUTHORS
// ============================================================

/// A plausible person name: 2 to 5 words, each starting with a letter.
fn is_name(candidate: &str) -> bool {
    let words: Vec<&str> = candidate.split_whitespace().collect();
    (2..=5).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_alphabetic))
}

/// Split a byline into candidate names.
fn byline_names(byline: &str) -> Vec<String> {
    let stripped = BYLINE_PREFIX.replace(byline.trim(), "");
    BYLINE_SPLIT
        .split(&stripped)
        .map(text::collapse_whitespace)
        .filter(|name| is_name(name))
        .collect()
}

/// Author names in document order, de-duplicated case-insensitively.
#[must_use]
pub fn authors(doc: &Document) -> Vec<String> {
    let mut bylines: Vec<String> = Vec::new();

    for value in AUTHOR_ATTR_VALUES {
        let selector = format!("meta[name='{value}'], meta[property='{value}'], meta[itemprop='{value}']");
        for node in doc.select(&selector).nodes() {
            if let Some(content) = dom::non_empty_attribute(&Selection::from(*node), "content") {
                bylines.push(content);
            }
        }
    }

    for node in doc.select(BYLINE_SELECTOR).nodes() {
        let el = Selection::from(*node);
        if dom::tag_name(&el).as_deref() == Some("meta") {
            continue;
        }
        let value = text::collapse_whitespace(&dom::text_content(&el));
        if !value.is_empty() {
            bylines.push(value);
        }
    }

    let mut seen = HashSet::new();
    bylines
        .iter()
        .flat_map(|b| byline_names(b))
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}

// ============================================================
// OTHER META FIELDS
// ============================================================

/// Two-letter language code from `<html lang>`, `Content-Language` or
/// `og:locale`, or empty.
#[must_use]
pub fn meta_lang(doc: &Document) -> String {
    let declared = doc
        .select("html")
        .nodes()
        .first()
        .and_then(|node| dom::non_empty_attribute(&Selection::from(*node), "lang"))
        .or_else(|| meta_content(doc, "meta[http-equiv='Content-Language'], meta[http-equiv='content-language']"))
        .or_else(|| meta_content(doc, "meta[property='og:locale']"));

    declared
        .map(|value| value.chars().take(2).collect::<String>())
        .filter(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|code| code.to_lowercase())
        .unwrap_or_default()
}

/// Favicon `href` as declared.
#[must_use]
pub fn favicon(doc: &Document) -> String {
    link_href(doc, "link[rel~='icon']").unwrap_or_default()
}

#[must_use]
pub fn meta_description(doc: &Document) -> String {
    meta_content(doc, "meta[name='description']")
        .or_else(|| meta_content(doc, "meta[property='og:description']"))
        .unwrap_or_default()
}

/// Canonical URL resolved against `article_url`.
#[must_use]
pub fn canonical_link(doc: &Document, article_url: &str) -> String {
    link_href(doc, "link[rel='canonical']")
        .or_else(|| meta_content(doc, "meta[property='og:url']"))
        .map(|href| urls::resolve(article_url, &href))
        .unwrap_or_default()
}

/// Tag names from `rel=tag` anchors, or from tag-style hrefs when there are none.
#[must_use]
pub fn tags(doc: &Document) -> HashSet<String> {
    let mut anchors = doc.select("a[rel='tag']");
    if anchors.is_empty() {
        anchors = doc.select(TAG_HREF_SELECTOR);
    }

    anchors
        .nodes()
        .iter()
        .map(|node| text::collapse_whitespace(&dom::text_content(&Selection::from(*node))))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Raw comma-delimited `meta[name=keywords]` value.
#[must_use]
pub fn meta_keywords(doc: &Document) -> String {
    meta_content(doc, "meta[name='keywords']").unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_title_tag_and_strips_site_name() {
        let doc = dom::parse(
            r#"<html><head><title>Council approves new budget | Daily Planet</title>
            <meta property="og:title" content="OG title"></head><body><h1>H1</h1></body></html>"#,
        );
        assert_eq!(title(&doc), "Council approves new budget");
    }

    #[test]
    fn test_title_falls_back_to_og_then_h1() {
        let og = dom::parse(r#"<html><head><meta property="og:title" content="Open Graph headline"></head></html>"#);
        assert_eq!(title(&og), "Open Graph headline");

        let h1 = dom::parse("<html><body><h1>  Heading   only </h1></body></html>");
        assert_eq!(title(&h1), "Heading only");

        assert_eq!(title(&dom::parse("<p>nothing</p>")), "");
    }

    #[test]
    fn test_authors_from_meta_and_byline() {
        let doc = dom::parse(
            r#"<html><head><meta name="author" content="Jane Doe"></head><body>
            <div class="byline">By Jane Doe and John Smith</div>
            <span rel="author">Staff</span></body></html>"#,
        );
        assert_eq!(authors(&doc), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn test_name_filter() {
        assert!(is_name("Ann Lee"));
        assert!(!is_name("Staff"));
        assert!(!is_name("12 March 2024"));
        assert!(!is_name("one two three four five six"));
    }

    #[test]
    fn test_meta_lang_sources() {
        let html_lang = dom::parse(r#"<html lang="en-US"><body></body></html>"#);
        assert_eq!(meta_lang(&html_lang), "en");

        let locale = dom::parse(r#"<html><head><meta property="og:locale" content="fr_FR"></head></html>"#);
        assert_eq!(meta_lang(&locale), "fr");

        let bogus = dom::parse(r#"<html lang="1x"><body></body></html>"#);
        assert_eq!(meta_lang(&bogus), "");
    }

    #[test]
    fn test_links_and_description() {
        let doc = dom::parse(
            r#"<html><head>
            <link rel="shortcut icon" href="/favicon.ico">
            <link rel="canonical" href="/news/story">
            <meta property="og:description" content="OG summary">
            </head></html>"#,
        );
        assert_eq!(favicon(&doc), "/favicon.ico");
        assert_eq!(canonical_link(&doc, "https://example.com/x?y=1"), "https://example.com/news/story");
        assert_eq!(meta_description(&doc), "OG summary");
    }

    #[test]
    fn test_tags_rel_and_href_fallback() {
        let rel = dom::parse(r#"<a rel="tag" href="/x">Politics</a><a href="/tag/y">Ignored</a>"#);
        assert_eq!(tags(&rel), HashSet::from(["Politics".to_string()]));

        let href = dom::parse(r#"<a href="/tag/economy">Economy</a><a href="/about">About</a>"#);
        assert_eq!(tags(&href), HashSet::from(["Economy".to_string()]));
    }

    #[test]
    fn test_meta_keywords_raw() {
        let doc = dom::parse(r#"<meta name="keywords" content="budget, council ,city">"#);
        assert_eq!(meta_keywords(&doc), "budget, council ,city");
    }
}
