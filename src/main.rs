//! # Habr Scraper
//!
//! Fetches one Habr listing page, extracts the articles on it, keeps the ones
//! matching a keyword set, and saves them as a timestamped JSON file.
//!
//! ## Usage
//!
//! ```sh
//! habr_scraper                       # articles stream, default keywords
//! habr_scraper --stream news -k rust # news stream, custom keyword
//! ```
//!
//! ## Pipeline
//!
//! 1. **Fetching**: GET the listing page for the chosen stream
//! 2. **Extracting**: parse each listing item into an article record
//! 3. **Filtering**: keep records whose title, preview, or tags mention a keyword
//! 4. **Full text** (opt-in): fetch each matching article page, one at a time
//! 5. **Output**: write the records to `{output_dir}/{file_name}_{timestamp}.json`

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod filter;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScraperConfig;
use filter::KeywordSet;
use scrapers::habr::HabrScraper;
use utils::{absolute_path, ensure_writable_dir};

#[tokio::main(flavor = "current_thread")]
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
    info!("habr_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match ScraperConfig::resolve(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    info!(
        domain = %config.domain,
        stream = %config.stream,
        keywords = ?config.keywords,
        full_text = config.full_text,
        "Configuration resolved"
    );

    // Early check: fail before any network traffic if the output can't be written
    let output_dir = absolute_path([config.output_dir.as_str()])?;
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let keywords = KeywordSet::new(&config.keywords);
    if keywords.is_empty() {
        warn!("No keywords configured; every article will be kept");
    }
    let scraper = HabrScraper::new(&config.domain, keywords, config.stream)?
        .with_full_text(config.full_text);
    debug!(%scraper, "Scraper ready");

    let articles = match scraper.scrape().await {
        Ok(articles) => articles,
        Err(e) => {
            error!(error = %e, "Scrape failed");
            return Err(e.into());
        }
    };
    info!(count = articles.len(), "Articles matched");

    if articles.is_empty() {
        warn!("No articles matched the keywords; nothing to save");
    } else {
        let path = HabrScraper::save_to_json_file(&output_dir, &config.file_name, &articles).await?;
        info!(path = %path.display(), "Saved articles");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
