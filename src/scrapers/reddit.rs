//! Reddit top-posts feed.
//!
//! Every subreddit publishes its current top posts as an Atom feed at
//! `https://www.reddit.com/r/{channel}/top/.rss`. Each `<entry>` becomes one
//! story: the entry title, and the summary flattened to plain text.
//!
//! Reddit ships post bodies as escaped HTML in `<content type="html">`,
//! wrapped in a `div.md` and followed by "submitted by" boilerplate. Only the
//! `div.md` text is kept when it is present.

use super::{Sources, get_text};
use crate::error::{Result, StoryError};
use crate::models::ScrapedStory;
use crate::utils::{html_fragment_text, normalize_whitespace};
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, info, instrument};

static POST_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.md").unwrap());

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Feed URL for a subreddit's top posts.
pub fn feed_url(reddit_base: &str, channel: &str) -> String {
    format!("{}/r/{}/top/.rss", reddit_base.trim_end_matches('/'), channel)
}

/// Fetch the top posts of `channel`.
#[instrument(level = "info", skip(client, sources))]
pub async fn fetch_feed(
    client: &Client,
    sources: &Sources,
    channel: &str,
) -> Result<Vec<ScrapedStory>> {
    let url = feed_url(&sources.reddit_base, channel);
    let xml = get_text(client, &url).await?;
    let stories = parse_feed(&xml, &url)?;

    info!(count = stories.len(), source = %url, "Fetched feed entries");
    Ok(stories)
}

/// Parse an Atom feed into stories, tagging each with `source`.
///
/// An entry without a title is an error. An entry with neither summary nor
/// content gets an empty summary.
pub fn parse_feed(xml: &str, source: &str) -> Result<Vec<ScrapedStory>> {
    let feed: AtomFeed = quick_xml::de::from_str(xml)?;

    feed.entries
        .into_iter()
        .map(|entry| -> Result<ScrapedStory> {
            let title = entry
                .title
                .map(|t| normalize_whitespace(&t.value))
                .ok_or_else(|| StoryError::missing(source, "title"))?;
            let summary = entry
                .summary
                .or(entry.content)
                .map(|s| summary_text(&s.value))
                .unwrap_or_default();
            debug!(%title, "Parsed feed entry");

            Ok(ScrapedStory {
                source: source.to_string(),
                title,
                summary,
            })
        })
        .collect()
}

/// Plain text of an HTML summary, preferring the post body.
fn summary_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    match fragment.select(&POST_BODY).next() {
        Some(body) => normalize_whitespace(&body.text().join(" ")),
        None => html_fragment_text(html),
    }
}
