//! Element tree of one export document.
//!
//! Only elements and their attributes are kept: the Jahia export stores all
//! content in attribute values, so text nodes, comments and processing
//! instructions are dropped while reading.
//!
//! Elements live in a flat arena in document order. Each element records the
//! index one past its last descendant, so "all descendants named X" is a scan
//! over a contiguous range instead of a recursive walk.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Index of an element inside its [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// One past the last descendant in document order.
    end: usize,
}

impl Element {
    /// Attribute value, or `""` when absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    nodes: Vec<Element>,
}

impl XmlDocument {
    /// Build the element tree of `text`.
    ///
    /// Unclosed elements at end of input are closed implicitly; mismatched
    /// end tags are reported by the reader.
    pub fn parse(text: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(text);
        let mut doc = Self::default();
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let id = doc.push(&e, open.last().copied());
                    open.push(id);
                }
                Event::Empty(e) => {
                    let id = doc.push(&e, open.last().copied());
                    doc.close(id);
                }
                Event::End(_) => {
                    if let Some(id) = open.pop() {
                        doc.close(id);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        while let Some(id) = open.pop() {
            doc.close(id);
        }
        Ok(doc)
    }

    fn push(&mut self, start: &BytesStart<'_>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let attributes = start
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = match attr.unescape_value() {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                };
                (key, value)
            })
            .collect();

        self.nodes.push(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            parent,
            children: Vec::new(),
            end: id.0 + 1,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    #[inline]
    fn close(&mut self, id: NodeId) {
        self.nodes[id.0].end = self.nodes.len();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Document element, `None` for an empty document.
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    #[inline]
    pub fn attr(&self, id: NodeId, name: &str) -> &str {
        self.nodes[id.0].attr(name)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Element children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// Element children named `tag`.
    pub fn children_by_tag<'a>(
        &'a self,
        id: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id).filter(move |&child| self.name(child) == tag)
    }

    /// Every descendant of `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (id.0 + 1..self.nodes[id.0].end).map(NodeId)
    }

    /// Descendants of `id` named `tag`, in document order.
    pub fn descendants_by_tag<'a>(
        &'a self,
        id: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(id)
            .filter(move |&node| self.name(node) == tag)
    }

    /// Every element named `tag`, the document element included.
    pub fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(move |&node| self.name(node) == tag)
    }

    /// Closest proper ancestor of `id` named `tag`.
    pub fn nearest_ancestor(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.name(node) == tag {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// `attr` of the first descendant of `id` named `tag`, or `""`.
    pub fn get_attribute(&self, id: NodeId, tag: &str, attr: &str) -> &str {
        self.descendants_by_tag(id, tag)
            .next()
            .map_or("", |node| self.attr(node, attr))
    }

    /// `attr` of the first element named `tag` anywhere in the document.
    pub fn first_attribute(&self, tag: &str, attr: &str) -> &str {
        self.elements_by_tag(tag)
            .next()
            .map_or("", |node| self.attr(node, attr))
    }
}
