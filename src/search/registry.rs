use crate::feed::{Feed, FeedType};
use crate::search::matcher::Matcher;
use crate::search::rss::RssMatcher;
use crate::search::runner::SearchOptions;

/// Builds the matcher for a feed's declared type.
///
/// Returns `None` for types this build cannot search; the caller decides
/// whether that is fatal.
pub fn build_matcher(
    feed: Feed,
    client: &reqwest::Client,
    options: &SearchOptions,
) -> Option<Box<dyn Matcher>> {
    match &feed.feed_type {
        FeedType::Rss => Some(Box::new(
            RssMatcher::new(feed, client.clone()).with_max_feed_size(options.max_feed_size),
        )),
        FeedType::Other(name) => {
            tracing::warn!(
                feed_type = %name,
                site = %feed.name,
                "No matcher for feed type, skipping"
            );
            None
        }
    }
}
