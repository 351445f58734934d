// crates/feed-parser/src/fields.rs
//! Tag-to-field tables shared by both grammars
//!
//! Each table maps a lowercase tag name to a field slot. Lookups compare
//! the element's local name ASCII case-insensitively, so `pubDate`,
//! `pubdate` and `dc:PUBDATE` all land in the same slot.

use crate::document::NodeRef;

/// Channel-level metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelField {
    Title,
    Link,
    Description,
    Language,
    PubDate,
    LastBuildDate,
    Generator,
    Docs,
    ManagingEditor,
    WebMaster,
    Copyright,
    Ttl,
}

const CHANNEL_FIELDS: &[(&str, ChannelField)] = &[
    ("title", ChannelField::Title),
    ("link", ChannelField::Link),
    ("description", ChannelField::Description),
    ("language", ChannelField::Language),
    ("pubdate", ChannelField::PubDate),
    ("lastbuilddate", ChannelField::LastBuildDate),
    ("generator", ChannelField::Generator),
    ("docs", ChannelField::Docs),
    ("managingeditor", ChannelField::ManagingEditor),
    ("webmaster", ChannelField::WebMaster),
    ("copyright", ChannelField::Copyright),
    ("ttl", ChannelField::Ttl),
];

/// Per-entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Title,
    Link,
    Description,
    Category,
    PubDate,
    Guid,
}

const ITEM_FIELDS: &[(&str, ItemField)] = &[
    ("title", ItemField::Title),
    ("link", ItemField::Link),
    ("description", ItemField::Description),
    ("category", ItemField::Category),
    ("pubdate", ItemField::PubDate),
    ("guid", ItemField::Guid),
];

fn lookup<F: Copy>(table: &[(&str, F)], tag: &str) -> Option<F> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|&(_, field)| field)
}

impl ChannelField {
    /// Maps a tag name to its channel field
    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(CHANNEL_FIELDS, tag)
    }
}

impl ItemField {
    /// Maps a tag name to its item field
    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(ITEM_FIELDS, tag)
    }
}

/// A model type whose optional string fields are filled from child elements
pub(crate) trait FieldTarget {
    type Field: Copy;

    fn field_for(tag: &str) -> Option<Self::Field>;

    fn slot(&mut self, field: Self::Field) -> &mut Option<String>;
}

/// Copies an element's text into the matching field of `target`
///
/// Only the element's first child is read. An element with no children
/// leaves the field alone; one whose first child is markup rather than
/// text or CDATA clears it. Returns false when the tag is not a known field.
pub(crate) fn apply_field<T: FieldTarget>(target: &mut T, element: NodeRef<'_>, trim: bool) -> bool {
    let Some(field) = element.local_name().and_then(T::field_for) else {
        return false;
    };

    let Some(first) = element.first_child() else {
        return true;
    };

    let Some(text) = first.content() else {
        *target.slot(field) = None;
        return true;
    };

    let value = if trim { text.trim() } else { text };
    if trim && value.is_empty() {
        return true;
    }

    *target.slot(field) = Some(value.to_string());
    true
}
