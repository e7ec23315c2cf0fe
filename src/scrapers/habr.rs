//! Habr listing-page scraper.
//!
//! One run is a single sequential pipeline:
//!
//! 1. **Fetch**: GET `{domain}{stream path}` with a browser-like client
//! 2. **Extract**: turn every listing item into an [`ArticleRecord`]
//! 3. **Filter**: keep the records matching the [`KeywordSet`]
//! 4. **Full text** (opt-in): GET each surviving article page, one at a time
//!
//! Saving is a separate step, see [`HabrScraper::save_to_json_file`].

use crate::error::{Result, ScrapeError};
use crate::extract::ArticleExtractor;
use crate::filter::KeywordSet;
use crate::models::{ArticleRecord, StreamKind};
use crate::outputs::json;
use crate::scrapers::{browser_client, fetch_html, join_site_path};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_DOMAIN: &str = "https://habr.com";

pub struct HabrScraper {
    client: Client,
    domain: Url,
    keywords: KeywordSet,
    stream: StreamKind,
    full_text: bool,
    extractor: ArticleExtractor,
}

impl HabrScraper {
    pub fn new(domain: &str, keywords: KeywordSet, stream: StreamKind) -> Result<Self> {
        let domain = Url::parse(domain)?;
        Ok(Self {
            client: browser_client()?,
            extractor: ArticleExtractor::new(&domain)?,
            domain,
            keywords,
            stream,
            full_text: false,
        })
    }

    /// Also fetch every matching article's page to fill in `full_text`.
    ///
    /// Costs one extra request per matching article.
    pub fn with_full_text(mut self, enabled: bool) -> Self {
        self.full_text = enabled;
        self
    }

    /// URL of the listing page for the configured stream: `{domain}{stream path}`.
    pub fn listing_url(&self) -> Result<Url> {
        join_site_path(&self.domain, self.stream.path())
    }

    /// Fetch the listing page body.
    #[instrument(level = "info", skip(self), fields(stream = %self.stream))]
    pub async fn send_request(&self) -> Result<String> {
        let url = self.listing_url()?;
        info!(%url, "Requesting listing page");
        fetch_html(&self.client, url.as_str()).await
    }

    /// Extract and filter the articles of an already fetched listing page.
    pub fn scrape_document(&self, html: &str) -> Vec<ArticleRecord> {
        let articles = self.extractor.extract_articles(html);
        let total = articles.len();
        let matching = self.keywords.filter(articles);
        info!(
            total,
            matching = matching.len(),
            keywords = ?self.keywords.keywords(),
            "Filtered articles by keywords"
        );
        matching
    }

    /// Run the whole pipeline: fetch, extract, filter, and optionally fetch full text.
    #[instrument(level = "info", skip(self), fields(domain = %self.domain, stream = %self.stream, full_text = self.full_text))]
    pub async fn scrape(&self) -> Result<Vec<ArticleRecord>> {
        let html = self.send_request().await?;
        let articles = self.scrape_document(&html);

        if !self.full_text {
            return Ok(articles);
        }

        let mut with_text = Vec::with_capacity(articles.len());
        for article in articles {
            with_text.push(self.fetch_full_text(article).await?);
        }
        Ok(with_text)
    }

    /// Fetch one article page and attach its body to the record.
    ///
    /// A page without a recognizable body leaves the record unchanged.
    #[instrument(level = "info", skip_all, fields(url = %article.url))]
    pub async fn fetch_full_text(&self, article: ArticleRecord) -> Result<ArticleRecord> {
        let html = fetch_html(&self.client, &article.url).await?;
        match self.extractor.extract_full_text(&html) {
            Ok(text) => {
                debug!(preview = %truncate_for_log(&text, 120), "Fetched full text");
                Ok(article.with_full_text(text))
            }
            Err(e @ ScrapeError::MissingElement { .. }) => {
                warn!(error = %e, "Article page has no body; leaving full_text empty");
                Ok(article)
            }
            Err(e) => Err(e),
        }
    }

    /// Save articles to `{output_dir}/{file_name}_{timestamp}.json`.
    pub async fn save_to_json_file(
        output_dir: &Path,
        file_name: &str,
        articles: &[ArticleRecord],
    ) -> Result<PathBuf> {
        json::save_articles(articles, output_dir, file_name).await
    }
}

impl fmt::Display for HabrScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Url: {}\nStream: {}\nKeywords: {:?}",
            self.domain,
            self.stream,
            self.keywords.keywords()
        )
    }
}
