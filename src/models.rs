//! Data models for scraped Habr articles.
//!
//! - [`ArticleRecord`]: one article extracted from a listing page
//! - [`StreamKind`]: which listing page of the site to scrape
//!
//! Serialized field names follow the output JSON schema (`time`, `prev_img`),
//! hence the `serde(rename)` attributes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One article as it appears in a listing page.
///
/// Every field comes from a single `<article>` fragment, except `full_text`,
/// which is only filled in when the article page itself is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The article headline.
    pub title: String,
    /// Publication timestamp, ISO-8601, taken verbatim from the page.
    #[serde(rename = "time")]
    pub published_at: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// Lead paragraphs shown in the listing.
    pub preview_text: String,
    /// Body of the article page, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Username of the author; empty when the listing omits it.
    pub author: String,
    /// Lead image shown in the listing, if any.
    #[serde(rename = "prev_img")]
    pub preview_image_url: Option<String>,
    /// Hub names the article is published in, in page order.
    pub tags: Vec<String>,
}

impl ArticleRecord {
    /// Return a copy of this record carrying the given full text.
    pub fn with_full_text(self, full_text: String) -> Self {
        Self {
            full_text: Some(full_text),
            ..self
        }
    }
}

/// Listing pages the scraper knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    #[default]
    Articles,
    Posts,
    News,
    Feed,
}

impl StreamKind {
    /// Path of the listing page relative to the site domain.
    pub fn path(self) -> &'static str {
        match self {
            StreamKind::Articles => "/ru/articles/",
            StreamKind::Posts => "/ru/posts/",
            StreamKind::News => "/ru/news/",
            StreamKind::Feed => "/ru/feed/",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Articles => "articles",
            StreamKind::Posts => "posts",
            StreamKind::News => "news",
            StreamKind::Feed => "feed",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
