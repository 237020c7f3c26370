//! General web search source.
//!
//! Runs one query against the search provider's HTML results page, keeps the
//! first `num_results` organic hits, then fetches each hit in turn and keeps
//! its `<title>` and the text of its first three paragraphs.
//!
//! # Result Links
//!
//! Result pages link hits in two shapes, both understood here:
//!
//! - redirect links: `/url?q=https://example.com/story&sa=U&...`
//! - direct links: `https://example.com/story`
//!
//! Links back to the provider itself (same origin, or any `google.` host)
//! are navigation, not results, and are skipped. Hits are not
//! de-duplicated.

use super::{Sources, get_text};
use crate::error::{Result, StoryError};
use crate::models::ScrapedStory;
use crate::utils::element_text;
use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Paragraphs kept from each result page.
const PARAGRAPHS_PER_PAGE: usize = 3;

/// Title used when a result page has none.
pub const NO_TITLE: &str = "No title";

/// Results-page URL for `query`.
pub fn search_url(search_base: &str, query: &str, num_results: usize) -> String {
    format!(
        "{}/search?q={}&num={}&hl=en",
        search_base.trim_end_matches('/'),
        urlencoding::encode(query),
        num_results
    )
}

/// Search for `query` and scrape up to `num_results` hits.
#[instrument(level = "info", skip(client, sources))]
pub async fn scrape(
    client: &Client,
    sources: &Sources,
    query: &str,
    num_results: usize,
) -> Result<Vec<ScrapedStory>> {
    let urls = search(client, sources, query, num_results).await?;

    let stories: Vec<ScrapedStory> = stream::iter(urls)
        .then(|url| async move {
            let story = fetch_page(client, &url).await?;
            debug!(%url, title = %story.title, "Fetched search result");
            Ok::<_, StoryError>(story)
        })
        .try_collect()
        .await?;

    info!(count = stories.len(), "Fetched search result pages");
    Ok(stories)
}

/// Run the query and return the first `num_results` result URLs.
#[instrument(level = "info", skip(client, sources))]
pub async fn search(
    client: &Client,
    sources: &Sources,
    query: &str,
    num_results: usize,
) -> Result<Vec<String>> {
    let url = search_url(&sources.search_base, query, num_results);
    let html = get_text(client, &url).await?;
    let base = Url::parse(&sources.search_base)?;
    let urls = parse_results(&html, &base, num_results);

    info!(count = urls.len(), "Indexed search results");
    debug!(urls = ?urls, "Search result URLs");
    Ok(urls)
}

/// Extract result URLs from a results page served from `base`.
pub fn parse_results(html: &str, base: &Url, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| result_target(href, base))
        .take(limit)
        .collect()
}

/// Resolve one `href` from a results page to the hit it points at, if any.
fn result_target(href: &str, base: &Url) -> Option<String> {
    let resolved = base.join(href).ok()?;

    let target = if resolved.origin() == base.origin() {
        if resolved.path() != "/url" {
            return None;
        }
        let q = resolved
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())?;
        Url::parse(&q).ok()?
    } else {
        resolved
    };

    let is_web = matches!(target.scheme(), "http" | "https");
    let is_provider = target.origin() == base.origin()
        || target.host_str().is_some_and(|h| h.contains("google."));
    (is_web && !is_provider).then(|| target.to_string())
}

/// Fetch one result page.
///
/// The page is parsed whatever its status; error pages simply yield their own
/// title and paragraphs.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<ScrapedStory> {
    let body = client.get(url).send().await?.text().await?;
    let story = parse_page(&body, url);
    info!(bytes = body.len(), "Parsed result page");
    Ok(story)
}

/// Title and leading paragraphs of a result page.
pub fn parse_page(html: &str, url: &str) -> ScrapedStory {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let summary = document
        .select(&PARAGRAPH)
        .take(PARAGRAPHS_PER_PAGE)
        .map(element_text)
        .join(" ");

    ScrapedStory {
        source: url.to_string(),
        title,
        summary,
    }
}
