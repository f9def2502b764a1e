//! Searching feeds for a regular expression.
//!
//! Every feed format implements [`Matcher`]. Callers hold matchers as
//! `Box<dyn Matcher>` and never need to know the format behind them:
//!
//! - [`matcher`] - The [`Matcher`] trait, [`SearchResult`] and [`MatchError`]
//! - [`rss`] - [`RssMatcher`], which fetches and scans RSS 2.0 feeds
//! - [`registry`] - Maps a feed's declared type to its matcher
//! - [`runner`] - Runs matchers for many feeds concurrently
//! - [`display`] - Plain-text output of results
//!
//! # Example
//!
//! ```ignore
//! use feedsearch::feed::Feed;
//! use feedsearch::search::{Matcher, RssMatcher};
//!
//! let matcher = RssMatcher::new(Feed::rss("npr", "http://www.npr.org/rss/rss.php?id=1001"), client);
//! for result in matcher.match_term("president").await? {
//!     println!("{}: {}", result.field, result.content);
//! }
//! ```

mod display;
mod matcher;
mod registry;
mod rss;
mod runner;

pub use display::write_results;
pub use matcher::{ErrorKind, MatchError, MatchField, Matcher, SearchResult};
pub use registry::build_matcher;
pub use rss::{scan, RssMatcher};
pub use runner::{run, FeedOutcome, SearchOptions};
