//! Error types for rs-newspaper.
//!
//! This module defines the error types returned by the article pipeline
//! and its collaborators.

/// Error type for article pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The article URL (or its derived source URL) is malformed.
    #[error("Invalid article url: {0}")]
    Validation(String),

    /// A pipeline stage was invoked out of order.
    #[error("Stage invoked out of order: {0}")]
    Precondition(String),

    /// A list setter received something other than an ordered sequence.
    #[error("Expected a list: {0}")]
    TypeArgument(String),

    /// Network fetch failed. Never retried by the pipeline.
    #[error("Fetch failed for {url}: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Transport or status description.
        reason: String,
    },

    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// A content extractor, cleaner or formatter failed.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Image resolution failed (unsupported format, no candidates, decode error).
    #[error("Image resolution failed: {0}")]
    Image(String),

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
