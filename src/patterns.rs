//! Compiled regex patterns and selectors shared by the cleaner and extractor.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// id/class/name values of nodes that never hold article body text.
///
/// Anchored alternatives (`^side$`, `^inset$`, `^print$`, `^fn$`) only match
/// the whole attribute value so compound names such as `inside-story` survive.
pub static BAD_TAG_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^side$|combx|retweet|mediaarticlerelated|menucontainer|navbar|storytopbar-bucket|utility-bar|inline-share-tools|comment|popularquestions|contact|\bfoot\b|footer|footnote|cnn_strycaptiontxt|cnn_html_slideshow|cnn_strylftcntnt|^links$|meta$|shoutbox|sponsor|^tags$|socialnetworking|cnnstryhghlght|cnn_stryspcvbx|^inset$|pagetools|post-attributes|welcome_form|contenttools2|the_answers|communitypromo|runaroundleft|subscribe|vcard|articleheadings|^date$|^print$|popup|author-dropdown|^tools$|socialtools|byline|konafilter|breadcrumbs|^fn$|wp-caption-text|legende|ajoutvideo|timestamp|js_replies)",
    )
    .expect("BAD_TAG_NAMES regex")
});

/// Caption containers.
pub static CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^caption$").expect("CAPTION regex"));

/// Ad slots.
pub static GOOGLE_AD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)google").expect("GOOGLE_AD regex"));

/// Social widgets. Matches `facebook` / `twitter` unless prefixed by a dash
/// (`share-facebook` style ids are handled by `BAD_TAG_NAMES`).
pub static SOCIAL_WIDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[^-])(facebook|twitter)|facebook-broadcasting").expect("SOCIAL_WIDGET regex")
});

/// Elements whose presence under a `div` keeps it from becoming a paragraph.
pub const BLOCK_CHILD_SELECTOR: &str = "blockquote, dl, div, img, ol, p, pre, table, ul";

/// Elements removed outright by the cleaner.
pub const STRIP_SELECTOR: &str =
    "script, style, noscript, form, nav, aside, footer, template, link[rel='stylesheet'], button, select, textarea";

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Attribute values that mark author bylines.
pub const AUTHOR_ATTR_VALUES: &[&str] = &["author", "byline", "dc.creator", "byl"];

/// Leading "By" in a byline.
pub static BYLINE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(written\s+)?by[:\s]+").expect("BYLINE_PREFIX regex"));

/// Separators between names in a byline.
pub static BYLINE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(,|\band\b|&|\||/|;)\s*").expect("BYLINE_SPLIT regex"));

/// Site delimiters inside `<title>`; the longest part is the headline.
pub const TITLE_DELIMITERS: &[&str] = &[" | ", " - ", " – ", " — ", " » ", ": "];

/// Tag-link hrefs used when no `rel=tag` anchors exist.
pub const TAG_HREF_SELECTOR: &str =
    "a[href*='/tag/'], a[href*='/tags/'], a[href*='/topic/'], a[href*='?keyword=']";

// =============================================================================
// Media Patterns
// =============================================================================

/// Known embed providers, checked as substrings of the embed source.
pub const VIDEO_PROVIDERS: &[&str] = &["youtube", "youtu.be", "vimeo", "dailymotion", "kewego", "twitch", "facebook"];

/// Image URLs that are almost never article images.
pub static IMAGE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(sprite|icon|logo|avatar|pixel|spacer|blank\.gif|1x1|badge|button)")
        .expect("IMAGE_NOISE regex")
});
