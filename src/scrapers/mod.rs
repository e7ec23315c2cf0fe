//! HTTP plumbing shared by the scrapers.
//!
//! Habr serves a reduced page (or refuses) to obvious bots, so every client is
//! built with a randomized desktop Chrome User-Agent and the headers a browser
//! would send along with it.
//!
//! # Submodules
//!
//! - [`habr`]: the listing-page scraper (fetch, extract, filter, save)

pub mod habr;

use crate::error::Result;
use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

const WINDOWS_PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; WOW64",
    "Windows NT 6.3; Win64; x64",
    "Windows NT 6.1; Win64; x64",
];

/// Append a site-absolute path (`/ru/articles/`) to a base URL.
///
/// Unlike [`Url::join`], a path already on the base is kept:
/// `https://mirror.example.org/habr` + `/ru/news/` gives
/// `https://mirror.example.org/habr/ru/news/`. Query and fragment of the base
/// are dropped.
pub fn join_site_path(base: &Url, path: &str) -> Result<Url> {
    let mut root = base.clone();
    root.set_query(None);
    root.set_fragment(None);
    let prefix = root.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{prefix}/{}", path.trim_start_matches('/')))?)
}

/// Build a plausible Chrome-on-Windows User-Agent string.
pub fn random_user_agent() -> String {
    let mut rng = rng();
    let platform = WINDOWS_PLATFORMS[rng.random_range(0..WINDOWS_PLATFORMS.len())];
    let major: u32 = rng.random_range(110..=131);
    let build: u32 = rng.random_range(5000..=6800);
    let patch: u32 = rng.random_range(0..=200);
    format!(
        "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.{build}.{patch} Safari/537.36"
    )
}

/// Build an HTTP client that looks like a desktop browser.
#[instrument(level = "debug")]
pub fn browser_client() -> Result<Client> {
    let user_agent = random_user_agent();
    debug!(%user_agent, "Using spoofed User-Agent");

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
    );

    Ok(Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .build()?)
}

/// GET a page and return its body, failing on a non-success status.
#[instrument(level = "info", skip(client))]
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}
