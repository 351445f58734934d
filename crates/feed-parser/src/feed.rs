// crates/feed-parser/src/feed.rs
//! Feed data structures

use crate::fields::{ChannelField, FieldTarget, ItemField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RSS grammar a feed was read with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedVersion {
    /// RSS 0.90 - 0.94 (read with the RSS 2.0 grammar)
    Rss09x,
    /// RSS 1.0 / RDF
    Rss10,
    /// RSS 2.0
    Rss20,
}

impl FeedVersion {
    /// Short version label
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedVersion::Rss09x => "0.9x",
            FeedVersion::Rss10 => "1.0",
            FeedVersion::Rss20 => "2.0",
        }
    }
}

impl std::fmt::Display for FeedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSS {}", self.as_str())
    }
}

/// A parsed feed with channel metadata and items
///
/// A `Feed` only exists fully built: the parser either returns one with
/// every field settled or returns an error. All text is owned, so nothing
/// here refers back to the document it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    version: FeedVersion,
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    language: Option<String>,
    pubdate: Option<String>,
    lastbuilddate: Option<String>,
    generator: Option<String>,
    docs: Option<String>,
    managingeditor: Option<String>,
    webmaster: Option<String>,
    copyright: Option<String>,
    ttl: Option<String>,
    items: Vec<Item>,
}

impl Feed {
    pub(crate) fn new(version: FeedVersion, items: Vec<Item>) -> Self {
        Self {
            version,
            title: None,
            link: None,
            description: None,
            language: None,
            pubdate: None,
            lastbuilddate: None,
            generator: None,
            docs: None,
            managingeditor: None,
            webmaster: None,
            copyright: None,
            ttl: None,
            items,
        }
    }

    pub(crate) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Grammar the feed was read with
    pub fn version(&self) -> FeedVersion {
        self.version
    }

    /// Channel title text
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Channel link URL
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Channel description text
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Language code
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Raw `pubDate` text
    pub fn pubdate(&self) -> Option<&str> {
        self.pubdate.as_deref()
    }

    /// Raw `lastBuildDate` text
    pub fn lastbuilddate(&self) -> Option<&str> {
        self.lastbuilddate.as_deref()
    }

    /// Name of the program that generated the feed
    pub fn generator(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    /// URL of the format documentation
    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    /// Managing editor contact
    pub fn managingeditor(&self) -> Option<&str> {
        self.managingeditor.as_deref()
    }

    /// Webmaster contact
    pub fn webmaster(&self) -> Option<&str> {
        self.webmaster.as_deref()
    }

    /// Copyright notice
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Raw `ttl` text
    pub fn ttl(&self) -> Option<&str> {
        self.ttl.as_deref()
    }

    /// Items in document order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumes the feed, keeping only its items
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Returns the number of items in the feed
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the feed has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Channel publication date, if present and parseable
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.pubdate.as_deref().and_then(parse_date)
    }

    /// Channel last build date, if present and parseable
    pub fn last_built(&self) -> Option<DateTime<Utc>> {
        self.lastbuilddate.as_deref().and_then(parse_date)
    }

    /// Cache lifetime in minutes, if `ttl` is a valid number
    pub fn ttl_minutes(&self) -> Option<u32> {
        self.ttl.as_deref().and_then(|ttl| ttl.trim().parse().ok())
    }

    /// Sorts items by publication date (newest first)
    ///
    /// Items without a parseable date go last, in their original order.
    pub fn sort_by_date(&mut self) {
        self.items
            .sort_by(|a, b| match (b.published(), a.published()) {
                (Some(b_date), Some(a_date)) => b_date.cmp(&a_date),
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (None, None) => std::cmp::Ordering::Equal,
            });
    }

    /// Releases the feed and everything it owns
    pub fn release(self) {
        log::trace!("Releasing feed with {} items", self.items.len());
        drop(self);
    }
}

impl FieldTarget for Feed {
    type Field = ChannelField;

    fn field_for(tag: &str) -> Option<ChannelField> {
        ChannelField::from_tag(tag)
    }

    fn slot(&mut self, field: ChannelField) -> &mut Option<String> {
        match field {
            ChannelField::Title => &mut self.title,
            ChannelField::Link => &mut self.link,
            ChannelField::Description => &mut self.description,
            ChannelField::Language => &mut self.language,
            ChannelField::PubDate => &mut self.pubdate,
            ChannelField::LastBuildDate => &mut self.lastbuilddate,
            ChannelField::Generator => &mut self.generator,
            ChannelField::Docs => &mut self.docs,
            ChannelField::ManagingEditor => &mut self.managingeditor,
            ChannelField::WebMaster => &mut self.webmaster,
            ChannelField::Copyright => &mut self.copyright,
            ChannelField::Ttl => &mut self.ttl,
        }
    }
}

/// A single feed entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    category: Option<String>,
    pubdate: Option<String>,
    guid: Option<String>,
}

impl Item {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Item title text
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Item link URL
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Item description text
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Category name
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Raw `pubDate` text
    pub fn pubdate(&self) -> Option<&str> {
        self.pubdate.as_deref()
    }

    /// Unique identifier (GUID)
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// Publication date, if present and parseable
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.pubdate.as_deref().and_then(parse_date)
    }
}

impl FieldTarget for Item {
    type Field = ItemField;

    fn field_for(tag: &str) -> Option<ItemField> {
        ItemField::from_tag(tag)
    }

    fn slot(&mut self, field: ItemField) -> &mut Option<String> {
        match field {
            ItemField::Title => &mut self.title,
            ItemField::Link => &mut self.link,
            ItemField::Description => &mut self.description,
            ItemField::Category => &mut self.category,
            ItemField::PubDate => &mut self.pubdate,
            ItemField::Guid => &mut self.guid,
        }
    }
}

/// RSS dates are RFC 2822; RDF feeds often carry W3CDTF (RFC 3339) instead.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
