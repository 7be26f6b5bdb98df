//! End-to-end pipeline tests over synthetic news pages.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rs_newspaper::network::Fetcher;
use rs_newspaper::{Article, Components, Configuration, Error, Result};

const ARTICLE_URL: &str = "https://example.com/2024/01/08/harbour-closed";

const P1: &str = "The harbour was closed on Monday morning after a storm brought strong winds and high waves \
    to the coast, and officials said that it would stay closed until the weather had improved enough for the \
    boats to leave safely.";
const P2: &str = "Fishermen who rely on the harbour told reporters that they had lost several days of work, but \
    most of them agreed that the decision was the right one given the damage that the storm had already done \
    to the old pier.";
const P3: &str = "The council has promised to publish a report on the repairs by the end of the month, and the \
    mayor said that the town would look at ways to protect the harbour from storms like this one in the years \
    to come.";

fn page() -> String {
    let body: String = [P1, P2, P3, P1, P2, P3, P1, P2, P3]
        .iter()
        .map(|p| format!("<p>{p}</p>\n"))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en-GB">
<head>
    <title>Harbour closed after storm | Coast Times</title>
    <meta name="author" content="Jane Doe">
    <meta name="description" content="The harbour is closed until further notice.">
    <meta name="keywords" content="storm, harbour">
    <meta property="og:image" content="/img/lead.jpg">
    <link rel="canonical" href="/2024/01/08/harbour-closed">
    <link rel="icon" href="/favicon.ico">
</head>
<body class="article-page">
    <nav><a href="/">Home</a> <a href="/world">World</a></nav>
    <div id="story">
        {body}
        <p><iframe src="https://www.youtube.com/embed/abc123" width="560" height="315"></iframe></p>
        <img src="/img/pier.jpg" alt="The old pier">
    </div>
    <div id="comments"><p>I think that the council should have done this much sooner than it did.</p></div>
    <footer>Copyright Coast Times</footer>
</body>
</html>"#
    )
}

/// Serves canned pages; anything else fails like an unreachable host.
struct CannedFetcher {
    pages: HashMap<String, String>,
}

impl CannedFetcher {
    fn with(url: &str, html: &str) -> Arc<Self> {
        Arc::new(Self {
            pages: HashMap::from([(url.to_string(), html.to_string())]),
        })
    }
}

impl Fetcher for CannedFetcher {
    fn get_html(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.pages.get(url).cloned().ok_or_else(|| Error::Fetch {
            url: url.to_string(),
            reason: "not found".to_string(),
        })
    }

    fn get_bytes(&self, url: &str, _timeout: Duration, _limit: usize) -> Result<Vec<u8>> {
        Err(Error::Fetch {
            url: url.to_string(),
            reason: "no images here".to_string(),
        })
    }
}

fn config() -> Configuration {
    Configuration {
        fetch_images: false,
        local_storage_path: std::env::temp_dir().join("rs_newspaper_pipeline_tests"),
        ..Configuration::default()
    }
}

fn article_from(html: &str) -> Article {
    let config = config();
    let components = Components::with_fetcher(&config, CannedFetcher::with(ARTICLE_URL, html));
    Article::builder(ARTICLE_URL)
        .config(config)
        .components(components)
        .build()
        .unwrap()
}

#[test]
fn test_parse_extracts_metadata() {
    let mut article = article_from("");
    article.set_html(page());
    article.parse().unwrap();

    assert_eq!(article.title(), "Harbour closed after storm");
    assert_eq!(article.authors(), ["Jane Doe"]);
    assert_eq!(article.meta_lang(), "en");
    assert_eq!(article.meta_description(), "The harbour is closed until further notice.");
    assert_eq!(article.meta_favicon(), "/favicon.ico");
    assert_eq!(article.canonical_link(), ARTICLE_URL);
    assert_eq!(article.meta_keywords(), ["storm", "harbour"]);
    assert_eq!(article.keywords(), ["storm", "harbour"]);
}

#[test]
fn test_parse_extracts_body_without_boilerplate() {
    let mut article = article_from("");
    article.set_html(page());
    article.parse().unwrap();

    let text = article.text();
    assert!(text.starts_with("The harbour was closed on Monday morning"), "{text}");
    assert!(text.contains("\n\n"));
    assert!(!text.contains("Home"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("much sooner"));
    assert!(article.is_valid_body().unwrap());
}

#[test]
fn test_parse_extracts_media() {
    let mut article = article_from("");
    article.set_html(page());
    article.parse().unwrap();

    assert_eq!(article.top_img(), "https://example.com/img/lead.jpg");
    assert_eq!(article.imgs(), ["https://example.com/img/pier.jpg"]);

    let movies = article.movies();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].provider, "youtube");
    assert_eq!(movies[0].src, "https://www.youtube.com/embed/abc123");
    assert_eq!(movies[0].width, Some(560));
}

#[test]
fn test_build_downloads_parses_and_summarizes() {
    let mut article = article_from(&page());
    article.build().unwrap();

    assert!(article.is_downloaded());
    assert!(article.is_parsed());
    assert!(!article.summary().is_empty());
    assert!(article.keywords().iter().any(|k| k == "harbour"));

    let mut sorted = article.keywords().to_vec();
    sorted.sort();
    assert_eq!(article.keywords(), sorted.as_slice());
}

#[test]
fn test_build_stops_on_download_failure() {
    let config = config();
    let components = Components::with_fetcher(&config, CannedFetcher::with("https://example.com/other", "<p>x</p>"));
    let mut article = Article::builder(ARTICLE_URL)
        .config(config)
        .components(components)
        .build()
        .unwrap();

    assert!(matches!(article.build(), Err(Error::Fetch { .. })));
    assert!(!article.is_parsed());
}

#[test]
fn test_title_given_up_front_survives_empty_extraction() {
    let config = config();
    let components = Components::with_fetcher(&config, CannedFetcher::with(ARTICLE_URL, ""));
    let mut article = Article::builder(ARTICLE_URL)
        .title("Harbour closed")
        .config(config)
        .components(components)
        .build()
        .unwrap();

    article.set_html(r#"<html><body><div><a href="/">Home</a></div></body></html>"#);
    article.parse().unwrap();

    assert_eq!(article.title(), "Harbour closed");
    assert_eq!(article.text(), "");
    assert!(!article.is_valid_body().unwrap());
}

#[test]
fn test_record_serializes() {
    let mut article = article_from("");
    article.set_html(page());
    article.parse().unwrap();

    let record = article.to_record();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["title"], "Harbour closed after storm");
    assert_eq!(json["link_hash"], article.get_key().unwrap());
    assert_eq!(json["movies"][0]["provider"], "youtube");
}
