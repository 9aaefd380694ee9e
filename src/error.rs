//! Error types for notegen.

use thiserror::Error;

/// Library-level error type for notegen operations.
#[derive(Error, Debug)]
pub enum NotegenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Web search failed: {0}")]
    Search(String),

    #[error("Page crawl failed: {0}")]
    Crawl(String),

    #[error("Image search failed: {0}")]
    ImageSearch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for notegen operations.
pub type Result<T> = std::result::Result<T, NotegenError>;
