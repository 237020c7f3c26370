//! Error types for the scrape → rewrite → store pipeline.
//!
//! Every failure aborts the current run. The only condition the pipeline
//! treats as benign is a duplicate story, which is reported through
//! [`crate::store::SaveOutcome::Duplicate`] rather than as an error.

use thiserror::Error;

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, StoryError>;

/// Main error type for a pipeline run.
#[derive(Error, Debug)]
pub enum StoryError {
    /// HTTP request or body read failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed body could not be decoded as an Atom feed
    #[error("Feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),

    /// A page was fetched but did not contain an element we rely on
    #[error("Missing <{element}> in {source_url}")]
    MissingElement {
        source_url: String,
        element: &'static str,
    },

    /// Query or connection failure against PostgreSQL
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A configured or discovered URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl StoryError {
    pub fn missing(source_url: impl Into<String>, element: &'static str) -> Self {
        StoryError::MissingElement {
            source_url: source_url.into(),
            element,
        }
    }
}
