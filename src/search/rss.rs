use crate::feed::{fetch_feed, parse_document, Document, Feed, MAX_FEED_SIZE};
use crate::search::matcher::{MatchError, MatchField, Matcher, SearchResult};
use futures::future::{BoxFuture, FutureExt};
use regex::Regex;

/// Searches an RSS 2.0 feed fetched over HTTP.
#[derive(Debug, Clone)]
pub struct RssMatcher {
    feed: Feed,
    client: reqwest::Client,
    max_feed_size: usize,
}

impl RssMatcher {
    pub fn new(feed: Feed, client: reqwest::Client) -> Self {
        Self {
            feed,
            client,
            max_feed_size: MAX_FEED_SIZE,
        }
    }

    /// Overrides the response body cap (defaults to [`MAX_FEED_SIZE`]).
    pub fn with_max_feed_size(mut self, max_feed_size: usize) -> Self {
        self.max_feed_size = max_feed_size;
        self
    }

    /// Downloads and fully decodes the feed.
    ///
    /// An empty URI fails before any request is made.
    pub(crate) async fn retrieve(&self) -> Result<Document, MatchError> {
        if self.feed.uri.trim().is_empty() {
            return Err(MatchError::MissingUri);
        }

        let bytes = fetch_feed(&self.client, &self.feed.uri, self.max_feed_size).await?;

        parse_document(&bytes).map_err(|e| MatchError::Decode(format!("{:#}", e)))
    }
}

impl Matcher for RssMatcher {
    fn feed(&self) -> &Feed {
        &self.feed
    }

    fn match_term<'a>(
        &'a self,
        term: &'a str,
    ) -> BoxFuture<'a, Result<Vec<SearchResult>, MatchError>> {
        async move {
            tracing::info!(
                feed_type = %self.feed.feed_type,
                site = %self.feed.name,
                uri = %self.feed.uri,
                "Searching feed"
            );

            let document = self.retrieve().await?;
            let pattern = Regex::new(term)?;
            let results = scan(&document, &pattern);

            tracing::debug!(
                site = %self.feed.name,
                items = document.channel.items.len(),
                matches = results.len(),
                "Feed search complete"
            );
            Ok(results)
        }
        .boxed()
    }
}

/// Tests every item's title, then its description, against `pattern`.
///
/// Results follow item order; an item yields zero, one or two results.
pub fn scan(document: &Document, pattern: &Regex) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for item in &document.channel.items {
        if pattern.is_match(&item.title) {
            results.push(SearchResult::new(MatchField::Title, item.title.as_str()));
        }
        if pattern.is_match(&item.description) {
            results.push(SearchResult::new(
                MatchField::Description,
                item.description.as_str(),
            ));
        }
    }

    results
}
