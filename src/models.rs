//! Data models shared by the scrapers, the rewriter and the store.
//!
//! - [`Genre`]: the two content categories a run can pick from
//! - [`ScrapedStory`]: a raw `(title, summary)` item from any source
//! - [`Story`]: a rewritten story as persisted in the `stories` table

use clap::ValueEnum;
use std::fmt;

/// Content category driving which sources are scraped.
///
/// The stored form is the human text (`"paranormal"`, `"true crime"`), which
/// is also what [`fmt::Display`] prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Genre {
    Paranormal,
    #[value(name = "true-crime", alias = "true crime", alias = "truecrime")]
    TrueCrime,
}

impl Genre {
    /// Every genre a run may pick, in selection order.
    pub const ALL: [Genre; 2] = [Genre::Paranormal, Genre::TrueCrime];

    /// The text written to the `genre` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Paranormal => "paranormal",
            Genre::TrueCrime => "true crime",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw item as scraped from a feed, a search result page or a blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedStory {
    /// Where the item came from (feed URL, page URL or blog URL).
    pub source: String,
    /// Entry title, page `<title>` or article heading.
    pub title: String,
    /// Entry summary, leading paragraphs or article teaser.
    pub summary: String,
}

impl ScrapedStory {
    /// The text handed to the rewriter: `"{title}: {summary}"`.
    pub fn text(&self) -> String {
        format!("{}: {}", self.title, self.summary)
    }
}

/// A rewritten story as stored.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Story {
    pub id: i32,
    pub genre: String,
    #[sqlx(rename = "story")]
    pub text: String,
}
