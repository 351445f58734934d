// crates/feed-parser/src/document.rs
//! Generic XML node tree
//!
//! The feed grammars only ever look at element names, direct children
//! and the first child's text, so the tree keeps exactly that: an arena
//! of element, text, CDATA and comment nodes built from `quick-xml`
//! events. Namespace prefixes are kept but never resolved; an undeclared
//! prefix such as `rdf:` is accepted.

use crate::config::ParserConfig;
use crate::error::{FeedError, FeedResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Index of a node inside its [`Document`]
pub type NodeId = usize;

/// What a node is, along with the data it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with its qualified and local name
    Element {
        name: String,
        local_name: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data with entities already expanded
    Text(String),
    /// A CDATA section
    CData(String),
    /// A comment
    Comment(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// A parsed XML document
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    top_level: Vec<NodeId>,
}

impl Document {
    /// Builds a tree from raw bytes
    ///
    /// Fails with [`FeedError::MalformedInput`] when the input exceeds the
    /// configured limits, is not well-formed, or has no root element.
    pub fn parse(data: &[u8], config: &ParserConfig) -> FeedResult<Self> {
        if data.len() > config.max_input_bytes {
            log::warn!(
                "Rejecting {} byte input (limit {})",
                data.len(),
                config.max_input_bytes
            );
            return Err(FeedError::MalformedInput(format!(
                "input is {} bytes, limit is {}",
                data.len(),
                config.max_input_bytes
            )));
        }

        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = true;

        let mut doc = Document {
            nodes: Vec::new(),
            top_level: Vec::new(),
        };
        let mut open: Vec<NodeId> = Vec::new();
        // Once a DOCTYPE is seen, entities it may declare are left as
        // written instead of failing the whole document.
        let mut lenient_entities = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    doc.check_depth(open.len() + 1, config)?;
                    let kind = element_kind(&reader, &e, lenient_entities)?;
                    let id = doc.attach(kind, &open);
                    open.push(id);
                }
                Event::Empty(e) => {
                    doc.check_depth(open.len() + 1, config)?;
                    let kind = element_kind(&reader, &e, lenient_entities)?;
                    doc.attach(kind, &open);
                }
                Event::End(_) => {
                    if open.pop().is_none() {
                        return Err(FeedError::MalformedInput(
                            "closing tag without matching opening tag".to_string(),
                        ));
                    }
                }
                Event::Text(e) => {
                    let raw = reader.decoder().decode(&e)?;
                    let text = unescape(&raw, lenient_entities)?;
                    if open.is_empty() {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Err(FeedError::MalformedInput(
                            "text content outside of the root element".to_string(),
                        ));
                    }
                    doc.attach(NodeKind::Text(text.into_owned()), &open);
                }
                Event::CData(e) => {
                    if open.is_empty() {
                        return Err(FeedError::MalformedInput(
                            "CDATA section outside of the root element".to_string(),
                        ));
                    }
                    let text = reader.decoder().decode(&e)?.into_owned();
                    doc.attach(NodeKind::CData(text), &open);
                }
                Event::Comment(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    doc.attach(NodeKind::Comment(text), &open);
                }
                Event::DocType(_) => lenient_entities = true,
                Event::Eof => break,
                // Declarations and processing instructions carry nothing
                // the grammars read.
                _ => {}
            }
        }

        if let Some(&unclosed) = open.last() {
            let name = doc.node(unclosed).name().unwrap_or_default().to_string();
            return Err(FeedError::MalformedInput(format!(
                "unexpected end of input inside <{}>",
                name
            )));
        }

        if doc.root_element().is_none() {
            return Err(FeedError::MalformedInput(
                "document has no root element".to_string(),
            ));
        }

        Ok(doc)
    }

    /// Top-level nodes in document order
    pub fn top_level(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.top_level.iter().map(move |&id| self.node(id))
    }

    /// The first top-level element
    pub fn root_element(&self) -> Option<NodeRef<'_>> {
        self.top_level().find(|node| node.is_element())
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    fn attach(&mut self, kind: NodeKind, open: &[NodeId]) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            children: Vec::new(),
        });

        match open.last() {
            Some(&parent) => self.nodes[parent].children.push(id),
            None => self.top_level.push(id),
        }

        id
    }

    fn check_depth(&self, depth: usize, config: &ParserConfig) -> FeedResult<()> {
        if depth > config.max_depth {
            log::warn!("Rejecting document nested deeper than {}", config.max_depth);
            return Err(FeedError::MalformedInput(format!(
                "element nesting exceeds depth limit of {}",
                config.max_depth
            )));
        }
        Ok(())
    }
}

fn element_kind(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    lenient_entities: bool,
) -> FeedResult<NodeKind> {
    let decoder = reader.decoder();
    let name = decoder.decode(e.name().as_ref())?.into_owned();
    let local_name = decoder.decode(e.local_name().as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decoder.decode(attr.key.as_ref())?.into_owned();
        let raw = decoder.decode(&attr.value)?;
        let value = unescape(&raw, lenient_entities)?.into_owned();
        attributes.push((key, value));
    }

    Ok(NodeKind::Element {
        name,
        local_name,
        attributes,
    })
}

/// Expands entity and character references in decoded text
///
/// In lenient mode a named entity that is not one of the predefined five
/// is kept verbatim; broken character references still fail.
fn unescape(raw: &str, lenient: bool) -> FeedResult<Cow<'_, str>> {
    let malformed = |e: quick_xml::escape::EscapeError| FeedError::MalformedInput(e.to_string());

    if !lenient {
        return quick_xml::escape::unescape(raw).map_err(malformed);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find(';') else {
            return Err(FeedError::MalformedInput(
                "unterminated entity reference".to_string(),
            ));
        };

        let reference = &tail[..=end];
        match quick_xml::escape::unescape(reference) {
            Ok(value) => out.push_str(&value),
            Err(_) if !reference.starts_with("&#") => {
                log::trace!("Keeping undeclared entity {} verbatim", reference);
                out.push_str(reference);
            }
            Err(e) => return Err(malformed(e)),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

/// A borrowed handle to one node of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'d> {
    doc: &'d Document,
    id: NodeId,
}

impl<'d> NodeRef<'d> {
    /// The node's kind and data
    pub fn kind(&self) -> &'d NodeKind {
        &self.doc.nodes[self.id].kind
    }

    /// Returns true for element nodes
    pub fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element { .. })
    }

    /// Qualified element name, including any prefix
    pub fn name(&self) -> Option<&'d str> {
        match self.kind() {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Element name with any prefix removed
    pub fn local_name(&self) -> Option<&'d str> {
        match self.kind() {
            NodeKind::Element { local_name, .. } => Some(local_name),
            _ => None,
        }
    }

    /// Looks up an attribute by its qualified name
    pub fn attribute(&self, key: &str) -> Option<&'d str> {
        match self.kind() {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Textual content of a text or CDATA node
    pub fn content(&self) -> Option<&'d str> {
        match self.kind() {
            NodeKind::Text(text) | NodeKind::CData(text) => Some(text),
            _ => None,
        }
    }

    /// Direct children in document order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'d>> + 'd {
        let doc = self.doc;
        doc.nodes[self.id]
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// The first direct child, of any kind
    pub fn first_child(&self) -> Option<NodeRef<'d>> {
        self.children().next()
    }

    /// Direct element children in document order
    pub fn child_elements(&self) -> impl Iterator<Item = NodeRef<'d>> + 'd {
        self.children().filter(|child| child.is_element())
    }
}
