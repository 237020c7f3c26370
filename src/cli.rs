//! Command-line interface definitions for reel_stories.
//!
//! The binary is meant to be run argument-free from a scheduler. Every option
//! falls back to an environment variable or a default; only the database URL
//! has to come from somewhere.

use crate::models::Genre;
use crate::pipeline::{DEFAULT_SEARCH_RESULTS, RunConfig};
use crate::scrapers::{DEFAULT_BLOG_URL, DEFAULT_REDDIT_BASE, DEFAULT_SEARCH_BASE, Sources};
use clap::Parser;

/// Command-line arguments for one scrape-and-store pass.
///
/// # Examples
///
/// ```sh
/// # Usual scheduled invocation
/// DATABASE_URL=postgres://localhost/stories reel_stories
///
/// # Force a genre
/// reel_stories --genre true-crime
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Use this genre instead of picking one at random
    #[arg(short, long, env = "STORY_GENRE", value_enum)]
    pub genre: Option<Genre>,

    /// Number of web search hits to scrape
    #[arg(long, env = "SEARCH_RESULTS", default_value_t = DEFAULT_SEARCH_RESULTS)]
    pub search_results: usize,

    /// Base URL of the Reddit feed host
    #[arg(long, env = "REDDIT_BASE", default_value = DEFAULT_REDDIT_BASE)]
    pub reddit_base: String,

    /// Base URL of the web search provider
    #[arg(long, env = "SEARCH_BASE", default_value = DEFAULT_SEARCH_BASE)]
    pub search_base: String,

    /// True-crime blog listing page
    #[arg(long, env = "BLOG_URL", default_value = DEFAULT_BLOG_URL)]
    pub blog_url: String,
}

impl Cli {
    /// Per-run settings derived from the arguments.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            sources: Sources {
                reddit_base: self.reddit_base.clone(),
                search_base: self.search_base.clone(),
                blog_url: self.blog_url.clone(),
            },
            genre: self.genre,
            search_results: self.search_results,
        }
    }
}
