//! Search RSS feeds for a regular expression.
//!
//! ```text
//! feeds.json → Feed → Matcher → fetch → Document → scan → SearchResult
//! ```
//!
//! - [`feed`]: Feed descriptors, HTTP retrieval and the RSS document model
//! - [`search`]: The [`search::Matcher`] trait, the RSS matcher and the
//!   concurrent runner
//! - [`config`]: Optional TOML configuration for the command-line tool

pub mod config;
pub mod feed;
pub mod search;
