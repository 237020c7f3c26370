//! One pass of the scrape → rewrite → store flow.
//!
//! A run picks a genre, pulls every story from that genre's two sources,
//! rewrites each one into the narration template and stores it unless the
//! exact text is already there.
//!
//! | Genre | Feed channel | Second source |
//! |-------|--------------|---------------|
//! | paranormal | `r/Paranormal` | web search for `paranormal ghost stories` |
//! | true crime | `r/TrueCrime` | CrimeReads listing |

use crate::error::Result;
use crate::models::{Genre, ScrapedStory};
use crate::rewrite::rewrite;
use crate::scrapers::{Sources, blog, reddit, search};
use crate::store::{SaveOutcome, StoryStore};
use rand::Rng;
use reqwest::Client;
use tracing::{debug, info, instrument};

pub const PARANORMAL_CHANNEL: &str = "Paranormal";
pub const TRUE_CRIME_CHANNEL: &str = "TrueCrime";
pub const PARANORMAL_QUERY: &str = "paranormal ghost stories";
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sources: Sources,
    /// Skip the random pick and use this genre.
    pub genre: Option<Genre>,
    /// Hits kept from the web search.
    pub search_results: usize,
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub saved: usize,
    pub duplicates: usize,
}

/// Pick one of the two genres uniformly.
pub fn pick_genre<R: Rng>(rng: &mut R) -> Genre {
    Genre::ALL[rng.random_range(0..Genre::ALL.len())]
}

/// Fetch every story for `genre`: feed entries first, then the second
/// source.
#[instrument(level = "info", skip(client, config))]
pub async fn fetch_for_genre(
    client: &Client,
    config: &RunConfig,
    genre: Genre,
) -> Result<Vec<ScrapedStory>> {
    let sources = &config.sources;
    let mut stories = Vec::new();

    match genre {
        Genre::Paranormal => {
            stories.extend(reddit::fetch_feed(client, sources, PARANORMAL_CHANNEL).await?);
            stories.extend(
                search::scrape(client, sources, PARANORMAL_QUERY, config.search_results).await?,
            );
        }
        Genre::TrueCrime => {
            stories.extend(reddit::fetch_feed(client, sources, TRUE_CRIME_CHANNEL).await?);
            stories.extend(blog::fetch_blog(client, sources).await?);
        }
    }

    info!(count = stories.len(), "Fetched stories for genre");
    Ok(stories)
}

/// Rewrite and store every story, in order.
#[instrument(level = "info", skip_all, fields(%genre, count = stories.len()))]
pub async fn store_stories<S, R>(
    store: &S,
    genre: Genre,
    stories: &[ScrapedStory],
    rng: &mut R,
) -> Result<RunSummary>
where
    S: StoryStore,
    R: Rng,
{
    let mut summary = RunSummary {
        fetched: stories.len(),
        ..RunSummary::default()
    };

    for story in stories {
        let rewritten = rewrite(&story.text(), rng).to_string();
        debug!(source = %story.source, "Rewrote story");

        match store.save(genre, &rewritten).await? {
            SaveOutcome::Inserted(_) => summary.saved += 1,
            SaveOutcome::Duplicate => summary.duplicates += 1,
        }
    }

    Ok(summary)
}

/// One full pass: pick a genre, fetch, rewrite, store.
#[instrument(level = "info", skip_all)]
pub async fn run<S, R>(
    client: &Client,
    store: &S,
    config: &RunConfig,
    rng: &mut R,
) -> Result<RunSummary>
where
    S: StoryStore,
    R: Rng,
{
    let genre = config.genre.unwrap_or_else(|| pick_genre(rng));
    info!(%genre, "Selected genre");

    let stories = fetch_for_genre(client, config, genre).await?;
    let summary = store_stories(store, genre, &stories, rng).await?;

    info!(
        %genre,
        fetched = summary.fetched,
        saved = summary.saved,
        duplicates = summary.duplicates,
        "Run complete"
    );
    Ok(summary)
}
