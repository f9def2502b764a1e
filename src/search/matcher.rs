use crate::feed::{Feed, FetchError};
use futures::future::BoxFuture;
use std::fmt;
use thiserror::Error;

/// Which item field a search term matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Title,
    Description,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Title => "Title",
            MatchField::Description => "Description",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One matched field and its full content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub field: MatchField,
    pub content: String,
}

impl SearchResult {
    pub fn new(field: MatchField, content: impl Into<String>) -> Self {
        Self {
            field,
            content: content.into(),
        }
    }
}

/// Broad category of a [`MatchError`], for callers that only need to branch
/// on what went wrong rather than inspect the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Decode,
    Pattern,
}

/// Errors that abort a single [`Matcher::match_term`] call.
///
/// No variant carries partial results: a failed call yields nothing.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The feed descriptor has an empty URI
    #[error("no feed URI provided")]
    MissingUri,
    /// The feed could not be downloaded
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The body was not a well-formed RSS document
    #[error("Decode error: {0}")]
    Decode(String),
    /// The search term is not a valid regular expression
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::MissingUri => ErrorKind::Configuration,
            MatchError::Fetch(_) => ErrorKind::Network,
            MatchError::Decode(_) => ErrorKind::Decode,
            MatchError::Pattern(_) => ErrorKind::Pattern,
        }
    }
}

/// A searcher for one feed format.
///
/// Each implementation owns the descriptor of the feed it searches. Calls are
/// independent: nothing retrieved during one call is visible to another, so
/// a matcher can be shared across tasks.
pub trait Matcher: Send + Sync {
    /// The feed this matcher searches.
    fn feed(&self) -> &Feed;

    /// Retrieves the feed and returns every field matching `term`, a regular
    /// expression, in document order.
    ///
    /// An empty vector means nothing matched. Any failure discards whatever
    /// was matched so far.
    fn match_term<'a>(&'a self, term: &'a str)
        -> BoxFuture<'a, Result<Vec<SearchResult>, MatchError>>;
}
