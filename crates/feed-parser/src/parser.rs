// crates/feed-parser/src/parser.rs
//! Feed parsing entry points and version dispatch

use crate::config::ParserConfig;
use crate::document::Document;
use crate::error::{FeedError, FeedResult};
use crate::feed::Feed;
use crate::grammar::Grammar;
use std::fs;
use std::path::Path;

/// Feed parser
///
/// Holds only its configuration, so one parser can be shared freely
/// across threads; every call builds and drops its own document tree.
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    config: ParserConfig,
}

impl FeedParser {
    /// Creates a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a feed from a string
    pub fn parse(content: &str) -> FeedResult<Feed> {
        Self::default().parse_str(content)
    }

    /// Parses a feed from a string with this parser's configuration
    pub fn parse_str(&self, content: &str) -> FeedResult<Feed> {
        self.parse_bytes(content.as_bytes())
    }

    /// Parses a feed from raw bytes
    pub fn parse_bytes(&self, data: &[u8]) -> FeedResult<Feed> {
        let doc = Document::parse(data, &self.config)?;
        log::trace!("Built document tree with {} nodes", doc.node_count());
        self.read_document(&doc)
    }

    /// Reads and parses a feed file
    ///
    /// An unreadable file is reported as malformed input, the same as a
    /// file whose contents cannot be built into a tree. Files larger than
    /// `max_input_bytes` are rejected before being read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> FeedResult<Feed> {
        let path = path.as_ref();
        let unreadable =
            |e: std::io::Error| FeedError::MalformedInput(format!("cannot read {}: {}", path.display(), e));

        let size = fs::metadata(path).map_err(unreadable)?.len();
        if size > self.config.max_input_bytes as u64 {
            log::warn!(
                "Rejecting {} ({} bytes, limit {})",
                path.display(),
                size,
                self.config.max_input_bytes
            );
            return Err(FeedError::MalformedInput(format!(
                "{} is {} bytes, limit is {}",
                path.display(),
                size,
                self.config.max_input_bytes
            )));
        }

        let data = fs::read(path).map_err(unreadable)?;
        self.parse_bytes(&data)
    }

    /// Selects a grammar from the first recognized top-level element
    fn read_document(&self, doc: &Document) -> FeedResult<Feed> {
        let mut first_seen = None;

        for node in doc.top_level() {
            let Some(name) = node.name() else {
                continue;
            };
            first_seen.get_or_insert(name);

            if let Some(grammar) = Grammar::detect(node) {
                log::debug!("Detected {:?} from root element <{}>", grammar, name);
                let feed = grammar.read(node, self.config.trim_whitespace)?;
                log::debug!(
                    "Parsed {} feed with {} items",
                    feed.version(),
                    feed.item_count()
                );
                return Ok(feed);
            }
        }

        Err(FeedError::UnsupportedFormat(format!(
            "unrecognized root element <{}>",
            first_seen.unwrap_or_default()
        )))
    }
}
