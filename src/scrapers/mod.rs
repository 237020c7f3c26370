//! Story sources.
//!
//! Each genre is fed by two sources. All of them return
//! [`ScrapedStory`](crate::models::ScrapedStory) values and fetch strictly
//! one request at a time.
//!
//! | Source | Module | Method | Used for |
//! |--------|--------|--------|----------|
//! | Reddit top posts | [`reddit`] | Atom feed | both genres |
//! | Web search | [`search`] | Result page scraping, then each hit | paranormal |
//! | CrimeReads | [`blog`] | HTML listing scraping | true crime |
//!
//! Failures are not retried: a failed request or a page missing an element
//! we rely on ends the run.

use crate::error::Result;
use reqwest::Client;

pub mod blog;
pub mod reddit;
pub mod search;

/// Sent on every request; Reddit rejects the default client agent.
pub const USER_AGENT: &str = "Mozilla/5.0";

pub const DEFAULT_REDDIT_BASE: &str = "https://www.reddit.com";
pub const DEFAULT_SEARCH_BASE: &str = "https://www.google.com";
pub const DEFAULT_BLOG_URL: &str = "https://crimereads.com/category/true-crime/";

/// Where each source lives. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub reddit_base: String,
    pub search_base: String,
    pub blog_url: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            reddit_base: DEFAULT_REDDIT_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            blog_url: DEFAULT_BLOG_URL.to_string(),
        }
    }
}

/// Shared HTTP client. No timeout beyond the client defaults.
pub fn http_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String> {
    Ok(client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?)
}
