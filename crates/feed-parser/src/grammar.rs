// crates/feed-parser/src/grammar.rs
//! RSS grammar handlers
//!
//! RSS 2.0 and 0.9x nest items inside `<channel>`; RSS 1.0 places them
//! beside it, as direct children of `<rdf:RDF>`. Both size the item list
//! with [`is_item`] before filling it with that same predicate, so the
//! count and the contents cannot disagree.

use crate::document::NodeRef;
use crate::error::{FeedError, FeedResult};
use crate::feed::{Feed, FeedVersion, Item};
use crate::fields::apply_field;

/// The grammars a root element can select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `<rdf:RDF>` with items as siblings of the channel
    Rss10,
    /// `<rss>` with items nested in the channel, reported as this version
    Rss2(FeedVersion),
}

impl Grammar {
    /// Selects a grammar from a top-level element, if it is recognized
    pub fn detect(root: NodeRef<'_>) -> Option<Self> {
        match root.local_name()? {
            "RDF" => Some(Grammar::Rss10),
            "rss" => Some(Grammar::Rss2(declared_version(root))),
            _ => None,
        }
    }

    /// Reads a feed from `root` with this grammar
    pub fn read(self, root: NodeRef<'_>, trim: bool) -> FeedResult<Feed> {
        match self {
            Grammar::Rss10 => read_rss_1_0(root, trim),
            Grammar::Rss2(version) => read_rss_2_0(root, version, trim),
        }
    }
}

/// The `version` attribute only changes what is reported, never how
/// the document is read.
fn declared_version(root: NodeRef<'_>) -> FeedVersion {
    match root.attribute("version") {
        Some(v) if v.trim().starts_with("0.9") => FeedVersion::Rss09x,
        _ => FeedVersion::Rss20,
    }
}

fn has_tag(node: NodeRef<'_>, tag: &str) -> bool {
    node.local_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// The one predicate used for both counting and extracting items
pub(crate) fn is_item(node: NodeRef<'_>) -> bool {
    has_tag(node, "item")
}

fn is_channel(node: NodeRef<'_>) -> bool {
    has_tag(node, "channel")
}

fn find_channel<'d>(root: NodeRef<'d>) -> FeedResult<NodeRef<'d>> {
    root.child_elements()
        .find(|child| is_channel(*child))
        .ok_or(FeedError::MissingChannel)
}

fn count_items(parent: NodeRef<'_>) -> usize {
    parent.children().filter(|child| is_item(*child)).count()
}

fn read_item(element: NodeRef<'_>, trim: bool) -> Item {
    let mut item = Item::new();
    for child in element.child_elements() {
        apply_field(&mut item, child, trim);
    }
    item
}

fn read_rss_2_0(root: NodeRef<'_>, version: FeedVersion, trim: bool) -> FeedResult<Feed> {
    let channel = find_channel(root)?;

    let capacity = count_items(channel);
    let mut feed = Feed::new(version, Vec::with_capacity(capacity));

    for child in channel.child_elements() {
        if is_item(child) {
            feed.push_item(read_item(child, trim));
        } else if !apply_field(&mut feed, child, trim) {
            log::trace!("Ignoring channel element <{}>", child.name().unwrap_or_default());
        }
    }

    debug_assert_eq!(feed.item_count(), capacity);
    Ok(feed)
}

fn read_rss_1_0(root: NodeRef<'_>, trim: bool) -> FeedResult<Feed> {
    let capacity = count_items(root);
    let channel = find_channel(root)?;

    let mut feed = Feed::new(FeedVersion::Rss10, Vec::with_capacity(capacity));

    // Items never live inside an RDF channel; anything named item there
    // is not a channel field either and falls through as unknown.
    for child in channel.child_elements() {
        if !apply_field(&mut feed, child, trim) {
            log::trace!("Ignoring channel element <{}>", child.name().unwrap_or_default());
        }
    }

    for child in root.children().filter(|child| is_item(*child)) {
        feed.push_item(read_item(child, trim));
    }

    debug_assert_eq!(feed.item_count(), capacity);
    Ok(feed)
}
