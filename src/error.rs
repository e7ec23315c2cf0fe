//! Error type shared by every stage of the scrape pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("File name cannot be empty")]
    EmptyFileName,

    #[error("File name must not contain extension or dots, got {0:?}; the .json extension is added automatically")]
    FileNameHasExtension(String),

    #[error("File name must be a plain name without directories, got {0:?}")]
    FileNameHasPath(String),

    #[error("Data cannot be empty")]
    EmptyData,

    #[error("Missing required element: {field}")]
    MissingElement { field: &'static str },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
