//! Feed descriptors, retrieval and the RSS document model.
//!
//! - [`descriptor`] - Which feeds to search, loaded from a JSON file
//! - [`fetcher`] - Single-shot HTTP retrieval with a body size cap
//! - [`document`] - Event-driven decoding of RSS XML into [`Document`]
//!
//! Nothing here knows about search terms; see [`crate::search`].

mod descriptor;
mod document;
mod fetcher;

pub use descriptor::{load_feeds, Feed, FeedFileError, FeedType};
pub use document::{parse_document, Channel, Document, Image, Item};
pub use fetcher::{fetch_feed, FetchError, MAX_FEED_SIZE};
