//! Run configuration: built-in defaults, an optional YAML file, and CLI overrides.
//!
//! ```yaml
//! domain: https://habr.com
//! stream: news
//! keywords: [rust, linux]
//! output_dir: habr_scraper_output
//! file_name: habr
//! full_text: false
//! ```
//!
//! Any key may be left out.

use crate::cli::Cli;
use crate::error::Result;
use crate::models::StreamKind;
use crate::scrapers::habr::DEFAULT_DOMAIN;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

pub const DEFAULT_KEYWORDS: &[&str] = &["дизайн", "фото", "web", "python"];
pub const DEFAULT_OUTPUT_DIR: &str = "habr_scraper_output";
pub const DEFAULT_FILE_NAME: &str = "habr";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub domain: String,
    pub stream: StreamKind,
    pub keywords: Vec<String>,
    pub output_dir: String,
    pub file_name: String,
    pub full_text: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            stream: StreamKind::Articles,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            full_text: false,
        }
    }
}

impl ScraperConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded configuration");
        Ok(config)
    }

    /// Apply the values given on the command line.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(domain) = &cli.domain {
            self.domain = domain.clone();
        }
        if let Some(stream) = cli.stream {
            self.stream = stream;
        }
        if !cli.keywords.is_empty() {
            self.keywords = cli.keywords.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(name) = &cli.file_name {
            self.file_name = name.clone();
        }
        if let Some(full_text) = cli.full_text {
            self.full_text = full_text;
        }
        self
    }

    /// Resolve the effective configuration for this run.
    pub async fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(Path::new(path)).await?,
            None => Self::default(),
        };
        Ok(base.merge_cli(cli))
    }
}
