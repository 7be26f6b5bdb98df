//! Parse candidates: the `(final_url, link_hash)` pair a parse works against.

use sha2::{Digest, Sha256};

use crate::urls;

/// Resolved identity of the page being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCandidate {
    /// URL the content is attributed to.
    pub url: String,
    /// Stable identifier for deduplication and scratch-file naming.
    pub link_hash: String,
}

impl ParseCandidate {
    /// Candidate for HTML that is already at hand: hashed by content.
    #[must_use]
    pub fn from_raw(url: &str, html: &str) -> Self {
        Self {
            url: canonical(url),
            link_hash: hex_digest(html.as_bytes()),
        }
    }

    /// Candidate resolved purely from the URL: hashed by the prepared URL.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let final_url = canonical(url);
        let link_hash = hex_digest(final_url.as_bytes());
        Self {
            url: final_url,
            link_hash,
        }
    }
}

/// Prepared URL without tracking arguments.
fn canonical(url: &str) -> String {
    urls::remove_args(&urls::prepare_url(url, None))
}

fn hex_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_candidate_hashes_content() {
        let a = ParseCandidate::from_raw("http://example.com/a", "<p>one</p>");
        let b = ParseCandidate::from_raw("http://example.com/b", "<p>one</p>");
        let c = ParseCandidate::from_raw("http://example.com/a", "<p>two</p>");

        assert_eq!(a.link_hash, b.link_hash);
        assert_ne!(a.link_hash, c.link_hash);
        assert_eq!(a.link_hash.len(), 64);
    }

    #[test]
    fn test_url_candidate_is_stable() {
        let a = ParseCandidate::from_url("http://example.com/story?ref=x");
        let b = ParseCandidate::from_url("http://example.com/story");

        assert_eq!(a.url, "http://example.com/story");
        assert_eq!(a, b);
    }
}
