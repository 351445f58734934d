// crates/feed-parser/src/lib.rs
//! Tolerant RSS feed parser
//!
//! This crate reads the three RSS grammars into one model:
//! - RSS 2.0 feeds
//! - RSS 0.9x feeds (same layout as 2.0)
//! - RSS 1.0 / RDF feeds, whose items sit beside the channel
//!
//! The grammar is picked from the document's root element, not from a
//! version tag. Tag names are matched case-insensitively and unknown tags
//! are skipped. A parse either yields a complete [`Feed`] or an error.
//!
//! # Example
//!
//! ```rust
//! use syndic_feed_parser::{parse_from_bytes, FeedVersion};
//!
//! let rss = br#"<?xml version="1.0"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>My Podcast</title>
//!     <item>
//!       <title>Episode 1</title>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let feed = parse_from_bytes(rss).expect("Failed to parse feed");
//! assert_eq!(feed.version(), FeedVersion::Rss20);
//! println!("Feed: {:?} with {} episodes", feed.title(), feed.item_count());
//! syndic_feed_parser::release(feed);
//! ```

mod config;
mod document;
mod error;
mod feed;
mod fields;
mod grammar;
mod parser;

use std::path::Path;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES};
pub use error::{ConfigError, ConfigResult, FeedError, FeedResult, ValidationError};
pub use feed::{Feed, FeedVersion, Item};
pub use fields::{ChannelField, ItemField};
pub use parser::FeedParser;

/// Parses a feed from an XML byte buffer with the default configuration
pub fn parse_from_bytes(data: &[u8]) -> FeedResult<Feed> {
    FeedParser::default().parse_bytes(data)
}

/// Parses a feed file with the default configuration
pub fn parse_from_file(path: impl AsRef<Path>) -> FeedResult<Feed> {
    FeedParser::default().parse_file(path)
}

/// Releases a feed and everything it owns
pub fn release(feed: Feed) {
    feed.release();
}
