//! JSON output of scraped articles.
//!
//! # Output Path
//!
//! ```text
//! output_dir/
//! └── {file_name}_{YYYY-MM-DD_HH-MM-SS}.json
//! ```
//!
//! The file is a pretty-printed array (4-space indent) with non-ASCII text
//! written verbatim.

use crate::error::{Result, ScrapeError};
use crate::models::ArticleRecord;
use crate::utils::make_dir;
use chrono::Local;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Check that a file name is a plain, non-empty name with no extension.
///
/// The file always lands directly in the output directory, so directory
/// parts (`out/habr`, `/tmp/habr`) are rejected along with dots.
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(ScrapeError::EmptyFileName);
    }
    let path = Path::new(file_name);
    if file_name.contains(['/', '\\']) || path.is_absolute() || path.components().count() != 1 {
        return Err(ScrapeError::FileNameHasPath(file_name.to_string()));
    }
    if file_name.contains('.') {
        return Err(ScrapeError::FileNameHasExtension(file_name.to_string()));
    }
    Ok(())
}

/// Serialize articles as a pretty JSON array with a 4-space indent.
pub fn to_pretty_json(articles: &[ArticleRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    articles.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write articles to `{output_dir}/{file_name}_{timestamp}.json`.
///
/// Validation happens before anything touches the filesystem. The output
/// directory is created if needed.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// - [`ScrapeError::EmptyData`] when `articles` is empty
/// - [`ScrapeError::EmptyFileName`], [`ScrapeError::FileNameHasPath`] or
///   [`ScrapeError::FileNameHasExtension`] for a bad file name
/// - I/O and serialization failures
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), %file_name, count = articles.len()))]
pub async fn save_articles(
    articles: &[ArticleRecord],
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    validate_file_name(file_name)?;
    if articles.is_empty() {
        return Err(ScrapeError::EmptyData);
    }

    let json = to_pretty_json(articles)?;

    make_dir(output_dir).await?;
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let path = output_dir.join(format!("{file_name}_{timestamp}.json"));

    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote articles JSON");

    Ok(path)
}
