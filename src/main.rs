//! # reel_stories
//!
//! Scrapes paranormal and true crime stories, rewrites each one into a
//! short-video narration script, and stores the scripts in PostgreSQL.
//!
//! ## Usage
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/stories reel_stories
//! ```
//!
//! ## Architecture
//!
//! Each invocation is one sequential pass:
//! 1. **Genre**: pick `paranormal` or `true crime` at random
//! 2. **Fetching**: pull stories from the genre's feed and second source
//! 3. **Rewriting**: wrap each story as hook, body, twist, call to action
//! 4. **Storing**: insert each script unless the exact text already exists

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod pipeline;
mod rewrite;
mod scrapers;
mod store;
mod utils;

use cli::Cli;
use store::Store;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("reel_stories starting up");

    let args = Cli::parse();
    let config = args.run_config();
    debug!(?config, "Parsed CLI arguments");

    let client = scrapers::http_client()?;
    let store = Store::connect(&args.database_url).await?;
    let mut rng = rand::rng();

    let result = pipeline::run(&client, &store, &config, &mut rng).await;
    store.close().await;
    let summary = result?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        fetched = summary.fetched,
        saved = summary.saved,
        duplicates = summary.duplicates,
        "Execution complete"
    );

    Ok(())
}
