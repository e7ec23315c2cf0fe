//! Command-line interface definitions for the Habr scraper.
//!
//! Every option is optional. Running without flags scrapes the `articles`
//! stream of habr.com for the default keywords and writes the result under
//! `habr_scraper_output/`.

use crate::models::StreamKind;
use clap::Parser;

/// Command-line arguments.
///
/// Values given here override the YAML config file, which overrides the
/// built-in defaults.
///
/// # Examples
///
/// ```sh
/// # Defaults
/// habr_scraper
///
/// # News stream, custom keywords, with article bodies
/// habr_scraper --stream news -k rust -k linux --full-text
///
/// # Settings from a file
/// habr_scraper --config ./habr.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Site to scrape
    #[arg(long, env = "HABR_DOMAIN")]
    pub domain: Option<String>,

    /// Listing page to scrape
    #[arg(long, value_enum, env = "HABR_STREAM")]
    pub stream: Option<StreamKind>,

    /// Keyword to filter by (repeatable); no keywords means keep everything
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Output directory for the JSON file
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output file name, without extension
    #[arg(short, long)]
    pub file_name: Option<String>,

    /// Also fetch the full text of every matching article (`--full-text=false` turns it off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub full_text: Option<bool>,
}
