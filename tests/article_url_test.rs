//! URL handling through the public article API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rs_newspaper::{Article, Error};

#[test]
fn test_article_urls_are_normalized() {
    let article = Article::builder("/2024/05/02/markets-rally?src=rss#comments")
        .source_url("https://finance.example.com")
        .build()
        .unwrap();

    assert_eq!(article.url(), "https://finance.example.com/2024/05/02/markets-rally?src=rss");
    assert_eq!(article.source_url(), "https://finance.example.com");
    assert!(article.is_valid_url());
}

#[test]
fn test_redirect_wrappers_are_unwrapped() {
    let article = Article::builder("https://out.tracker.net/click?url=https%3A%2F%2Fexample.com%2Fnews%2Fstory")
        .source_url("https://example.com")
        .build()
        .unwrap();

    assert_eq!(article.url(), "https://example.com/news/story");
}

#[test]
fn test_non_article_urls() {
    for url in [
        "https://example.com/about/team",
        "https://example.com/photos/cat.png",
        "https://example.com/",
    ] {
        assert!(!Article::new(url).unwrap().is_valid_url(), "{url}");
    }
}

#[test]
fn test_unusable_urls_are_rejected() {
    assert!(matches!(Article::new("   "), Err(Error::Validation(_))));
    assert!(matches!(Article::new("relative/path"), Err(Error::Validation(_))));
}
