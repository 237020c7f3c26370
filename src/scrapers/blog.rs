//! CrimeReads true-crime listing.
//!
//! The category page at `https://crimereads.com/category/true-crime/` lists
//! recent pieces as `<article>` cards. The first five cards are used; each
//! yields its `<h2>` heading and its first `<p>` teaser.
//!
//! A card without a heading or teaser means the page layout changed, so it
//! is an error rather than a silently skipped story.

use super::{Sources, get_text};
use crate::error::{Result, StoryError};
use crate::models::ScrapedStory;
use crate::utils::element_text;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static TEASER: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Cards read from the listing.
const MAX_ARTICLES: usize = 5;

/// Fetch the listing and return its first five stories.
#[instrument(level = "info", skip_all, fields(url = %sources.blog_url))]
pub async fn fetch_blog(client: &Client, sources: &Sources) -> Result<Vec<ScrapedStory>> {
    let html = get_text(client, &sources.blog_url).await?;
    let stories = parse_listing(&html, &sources.blog_url)?;

    info!(count = stories.len(), "Fetched blog stories");
    Ok(stories)
}

/// Parse a listing page served from `source`.
pub fn parse_listing(html: &str, source: &str) -> Result<Vec<ScrapedStory>> {
    let document = Html::parse_document(html);
    let mut stories = Vec::new();

    for article in document.select(&ARTICLE).take(MAX_ARTICLES) {
        let title = article
            .select(&HEADING)
            .next()
            .map(element_text)
            .ok_or_else(|| StoryError::missing(source, "h2"))?;
        let summary = article
            .select(&TEASER)
            .next()
            .map(element_text)
            .ok_or_else(|| StoryError::missing(source, "p"))?;

        debug!(%title, "Parsed blog article");
        stories.push(ScrapedStory {
            source: source.to_string(),
            title,
            summary,
        });
    }

    Ok(stories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn card(n: usize) -> String {
        format!(
            r#"<article class="post"><a href="/p{n}"><h2>Case {n}</h2></a>
               <div class="excerpt"><p>The trail went cold in {n}.</p><p>ignored</p></div></article>"#
        )
    }

    #[test]
    fn test_parse_listing_takes_first_five() {
        let html = format!(
            "<html><body>{}</body></html>",
            (1..=7).map(card).collect::<String>()
        );
        let stories = parse_listing(&html, "blog").unwrap();

        assert_eq!(stories.len(), 5);
        assert_eq!(stories[0].title, "Case 1");
        assert_eq!(stories[0].summary, "The trail went cold in 1.");
        assert_eq!(stories[4].text(), "Case 5: The trail went cold in 5.");
    }

    #[test]
    fn test_parse_listing_empty_page() {
        assert!(parse_listing("<html><body></body></html>", "blog").unwrap().is_empty());
    }

    #[test]
    fn test_parse_listing_missing_heading_fails() {
        let html = "<article><p>No heading here.</p></article>";
        let err = parse_listing(html, "blog").unwrap_err();
        assert!(matches!(err, StoryError::MissingElement { element: "h2", .. }));
    }

    #[test]
    fn test_parse_listing_missing_teaser_fails() {
        let html = format!("{}<article><h2>Bare</h2></article>", card(1));
        let err = parse_listing(&html, "blog").unwrap_err();
        assert!(matches!(err, StoryError::MissingElement { element: "p", .. }));
    }

    #[test]
    fn test_parse_listing_ignores_broken_cards_past_the_fifth() {
        let html = format!(
            "{}<article>broken</article>",
            (1..=5).map(card).collect::<String>()
        );
        assert_eq!(parse_listing(&html, "blog").unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_fetch_blog_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/category/true-crime/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(card(3)))
            .mount(&server)
            .await;

        let sources = Sources {
            blog_url: format!("{}/category/true-crime/", server.uri()),
            ..Sources::default()
        };
        let client = crate::scrapers::http_client().unwrap();
        let stories = fetch_blog(&client, &sources).await.unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].source, sources.blog_url);
    }
}
