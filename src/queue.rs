//! Queue-driven worker.
//!
//! Consumes JSON [`WorkMessage`]s, downloads and parses each article and
//! publishes a JSON [`ParsedMessage`] with its text and images. Transport is a
//! pair of `std::sync::mpsc` channels; wire them to a broker from the outside.
//!
//! Delivery is at-most-once: a message that cannot be decoded or whose
//! article fails is logged and dropped.

use std::sync::mpsc::{Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::article::{Article, Components};
use crate::config::Configuration;
use crate::error::Result;

/// One article to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkMessage {
    pub url: String,
    /// Language override for this article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
}

/// Processed article as published downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Plain body text; empty when extraction found nothing.
    pub article: String,
    pub image_links: Vec<String>,
    pub url: String,
}

/// Runs messages through the pipeline with shared collaborators.
#[derive(Debug, Clone)]
pub struct Worker {
    config: Configuration,
    components: Components,
}

impl Worker {
    /// Worker with standard collaborators.
    pub fn new(config: Configuration) -> Result<Self> {
        let components = Components::from_config(&config)?;
        Ok(Self { config, components })
    }

    #[must_use]
    pub fn with_components(config: Configuration, components: Components) -> Self {
        Self { config, components }
    }

    /// Decode one message, then download and parse its article.
    pub fn process_message(&self, raw: &str) -> Result<ParsedMessage> {
        let message: WorkMessage = serde_json::from_str(raw)?;

        let mut config = self.config.clone();
        let mut components = self.components.clone();
        if let Some(lng) = message.lng.as_deref().filter(|l| !l.is_empty()) {
            if lng != config.language {
                config.language = lng.to_string();
                // language-bound collaborators follow the override
                let fresh = Components::with_fetcher(&config, components.fetcher.clone());
                components.extractor = fresh.extractor;
                components.formatter = fresh.formatter;
                components.nlp = fresh.nlp;
            }
        }

        let mut article = Article::builder(message.url.as_str())
            .config(config)
            .components(components)
            .build()?;
        article.download()?;
        article.parse()?;

        Ok(ParsedMessage {
            article: article.text().to_string(),
            image_links: article.imgs().to_vec(),
            url: article.url().to_string(),
        })
    }

    /// Process messages until `rx` closes or `tx` is dropped. Returns the
    /// number of articles published.
    pub fn run(&self, rx: &Receiver<String>, tx: &Sender<String>) -> usize {
        let mut published = 0;
        for raw in rx {
            let parsed = match self.process_message(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping message");
                    continue;
                }
            };
            let payload = match serde_json::to_string(&parsed) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(url = %parsed.url, error = %e, "cannot encode result");
                    continue;
                }
            };
            if tx.send(payload).is_err() {
                tracing::info!("output channel closed, stopping");
                break;
            }
            published += 1;
            tracing::debug!(url = %parsed.url, "published");
        }
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_message_language_is_optional() {
        let m: WorkMessage = serde_json::from_str(r#"{"url": "http://example.com/a"}"#).unwrap();
        assert_eq!(m.lng, None);

        let m: WorkMessage = serde_json::from_str(r#"{"url": "http://example.com/a", "lng": "de"}"#).unwrap();
        assert_eq!(m.lng.as_deref(), Some("de"));
    }

    #[test]
    fn test_work_message_requires_url() {
        assert!(serde_json::from_str::<WorkMessage>(r#"{"lng": "de"}"#).is_err());
    }
}
