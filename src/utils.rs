//! Path and directory helpers, plus small string utilities for logging.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Join path segments and make the result absolute against the current directory.
///
/// The path does not have to exist.
pub fn absolute_path<I, P>(segments: I) -> io::Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let joined: PathBuf = segments.into_iter().collect();
    std::path::absolute(joined)
}

/// Create a directory and its parents; an existing directory is left alone.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn make_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await?;
    debug!("Directory ready");
    Ok(())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> io::Result<()> {
    make_dir(path).await?;
    let probe_path = path.join("..__probe_write__");
    fs::write(&probe_path, b"").await?;
    let _ = fs::remove_file(&probe_path).await;
    info!("Output directory is writable");
    Ok(())
}

/// Truncate a string for logging purposes.
///
/// Cuts on a character boundary and appends `"…(+N bytes)"`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
