use crate::feed::{Feed, MAX_FEED_SIZE};
use crate::search::matcher::{MatchError, Matcher, SearchResult};
use crate::search::registry::build_matcher;
use futures::stream::{self, StreamExt};

/// Tuning for a multi-feed search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of feeds searched at once (values below 1 act as 1)
    pub max_concurrent: usize,
    /// Response body cap passed to every matcher
    pub max_feed_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 10,
            max_feed_size: MAX_FEED_SIZE,
        }
    }
}

/// Outcome of searching one feed.
#[derive(Debug)]
pub struct FeedOutcome {
    /// The descriptor that was searched
    pub feed: Feed,
    /// Matches in document order, or the error that aborted the search
    pub result: Result<Vec<SearchResult>, MatchError>,
}

/// Searches every feed for `term` concurrently.
///
/// Feeds whose type has no matcher are skipped. A failing feed is logged and
/// reported in its [`FeedOutcome`]; it never stops the others.
///
/// # Returns
///
/// One [`FeedOutcome`] per searched feed, in completion order, not input order.
pub async fn run(
    client: &reqwest::Client,
    feeds: &[Feed],
    term: &str,
    options: &SearchOptions,
) -> Vec<FeedOutcome> {
    let matchers: Vec<_> = feeds
        .iter()
        .filter_map(|feed| build_matcher(feed.clone(), client, options))
        .collect();

    let skipped = feeds.len() - matchers.len();
    if skipped > 0 {
        tracing::info!(skipped = skipped, "Skipping feeds with unsupported types");
    }

    if matchers.is_empty() {
        return Vec::new();
    }

    stream::iter(matchers)
        .map(|matcher| async move {
            let result = matcher.match_term(term).await;

            match &result {
                Ok(results) => tracing::debug!(
                    site = %matcher.feed().name,
                    matches = results.len(),
                    "Feed searched"
                ),
                Err(e) => tracing::warn!(
                    site = %matcher.feed().name,
                    uri = %matcher.feed().uri,
                    error = %e,
                    "Feed search failed"
                ),
            }

            FeedOutcome {
                feed: matcher.feed().clone(),
                result,
            }
        })
        .buffer_unordered(options.max_concurrent.max(1))
        .collect()
        .await
}
