//! Duplicate-checked story storage.
//!
//! Stories live in a single PostgreSQL table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS stories (
//!     id SERIAL PRIMARY KEY,
//!     genre TEXT,
//!     story TEXT
//! )
//! ```
//!
//! Story text is unique. [`Store::save`] first looks for an exact match and
//! skips the insert when one exists; a unique index on `md5(story)` backs
//! that check so a concurrent writer that slips between the lookup and the
//! insert gets [`SaveOutcome::Duplicate`] instead of a second row.

use crate::error::Result;
use crate::models::{Genre, Story};
use crate::utils::truncate_for_log;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info, instrument};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS stories (
    id SERIAL PRIMARY KEY,
    genre TEXT,
    story TEXT
)";

// Hashing keeps long stories under the btree row size limit.
const CREATE_UNIQUE_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS stories_story_md5_key ON stories (md5(story))";

/// Result of trying to store a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The story was new and has been written.
    Inserted(Story),
    /// A story with exactly the same text already exists; nothing was written.
    Duplicate,
}

/// Storage seam used by the pipeline.
pub trait StoryStore {
    /// Whether a story with exactly this text is already stored.
    async fn exists(&self, text: &str) -> Result<bool>;

    /// Store `text` under `genre` unless it is already present.
    async fn save(&self, genre: Genre, text: &str) -> Result<SaveOutcome>;
}

/// PostgreSQL-backed [`StoryStore`] holding one connection for the whole run.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Open the connection and make sure the schema exists.
    #[instrument(level = "info", skip_all)]
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        info!("Connected to story database");

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create the `stories` table and its uniqueness index if absent.
    #[instrument(level = "info", skip_all)]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_UNIQUE_INDEX).execute(&self.pool).await?;
        debug!("Schema ready");
        Ok(())
    }

    /// Close the connection. Pending statements finish first.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Closed story database connection");
    }
}

impl StoryStore for Store {
    async fn exists(&self, text: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stories WHERE story = $1")
            .bind(text)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    #[instrument(level = "info", skip_all, fields(%genre))]
    async fn save(&self, genre: Genre, text: &str) -> Result<SaveOutcome> {
        if self.exists(text).await? {
            info!("Duplicate story found, not saving");
            return Ok(SaveOutcome::Duplicate);
        }

        let inserted = sqlx::query_as::<_, Story>(
            "INSERT INTO stories (genre, story) VALUES ($1, $2)
             ON CONFLICT ((md5(story))) DO NOTHING
             RETURNING id, genre, story",
        )
        .bind(genre.as_str())
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(story) => {
                info!(
                    id = story.id,
                    genre = %story.genre,
                    snippet = %truncate_for_log(&story.text, 30),
                    "Saved new story"
                );
                Ok(SaveOutcome::Inserted(story))
            }
            None => {
                info!("Story was stored concurrently, not saving");
                Ok(SaveOutcome::Duplicate)
            }
        }
    }
}
