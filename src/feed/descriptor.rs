use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the feed descriptor file.
#[derive(Debug, Error)]
pub enum FeedFileError {
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in feed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Declared format of a feed.
///
/// Unrecognised type strings are kept in [`FeedType::Other`] so the caller
/// can report them instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FeedType {
    Rss,
    Other(String),
}

impl From<String> for FeedType {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("rss") {
            FeedType::Rss
        } else {
            FeedType::Other(value)
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedType::Rss => f.write_str("rss"),
            FeedType::Other(name) => f.write_str(name),
        }
    }
}

/// A feed to search: its format, a display name and where to fetch it.
///
/// Field names in the JSON file follow the `{"site", "link", "type"}` layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feed {
    #[serde(rename = "type")]
    pub feed_type: FeedType,
    #[serde(rename = "site")]
    pub name: String,
    #[serde(rename = "link")]
    pub uri: String,
}

impl Feed {
    pub fn rss(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            feed_type: FeedType::Rss,
            name: name.into(),
            uri: uri.into(),
        }
    }
}

/// Reads the feed descriptor file at `path`.
///
/// The file is a JSON array; an empty array is valid and yields no feeds.
pub fn load_feeds(path: &Path) -> Result<Vec<Feed>, FeedFileError> {
    let content = std::fs::read_to_string(path)?;
    let feeds = parse_feeds(&content)?;
    tracing::debug!(path = %path.display(), count = feeds.len(), "Loaded feed descriptors");
    Ok(feeds)
}

fn parse_feeds(content: &str) -> Result<Vec<Feed>, FeedFileError> {
    Ok(serde_json::from_str(content)?)
}
