//! Read-only configuration DOM.
//!
//! A [`Document`] owns an arena of elements addressed by index; a [`Node`]
//! is a cheap copyable handle into that arena, lifetime-bound to the
//! document. Parsing uses `quick-xml` and keeps element names, attributes
//! (entity-unescaped) and child order; text content, comments and processing
//! instructions are skipped, since this DOM exists to read flatly-typed
//! configuration files, not to round-trip arbitrary XML.
//!
//! # Example
//!
//! ```rust
//! use confxml::document::{for_each_child_named, Document};
//!
//! let doc = Document::parse_str(r#"<config><item id="1"/><item id="2"/></config>"#).unwrap();
//! let config = doc.first_node("config");
//!
//! let mut ids = Vec::new();
//! for_each_child_named(config, "item", |item| {
//!     ids.push(item.attribute("id").unwrap().to_string());
//! });
//! assert_eq!(ids, ["1", "2"]);
//! ```

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use std::io::BufRead;
use std::str;

/// One element in the document arena.
#[derive(Debug)]
struct Element {
    name: String,
    /// Attributes in document order; duplicates are kept as written.
    attributes: Vec<(String, String)>,
    /// Child element ids in document order.
    children: Vec<usize>,
    parent: Option<usize>,
}

/// An immutable parsed XML document.
///
/// Elements live in a single arena and are addressed by index, so [`Node`]
/// handles stay valid exactly as long as the document they borrow from.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    /// Top-level element ids in document order.
    roots: Vec<usize>,
}

impl Document {
    /// Parses a document from a string slice.
    pub fn parse_str(text: &str) -> Result<Document> {
        Self::parse_reader(text.as_bytes())
    }

    /// Parses a document from any buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Document> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut doc = Document {
            elements: Vec::new(),
            roots: Vec::new(),
        };
        let mut stack: Vec<usize> = Vec::new();
        let mut buf = Vec::with_capacity(4096);

        loop {
            buf.clear();
            match xml_reader.read_event_into(&mut buf)? {
                XmlEvent::Start(ref e) => {
                    let id = doc.push_element(e, stack.last().copied())?;
                    stack.push(id);
                }
                XmlEvent::Empty(ref e) => {
                    doc.push_element(e, stack.last().copied())?;
                }
                XmlEvent::End(_) => {
                    // Name mismatches were already rejected by the reader.
                    stack.pop();
                }
                XmlEvent::Eof => {
                    if let Some(&open) = stack.last() {
                        return Err(Error::UnclosedElement(doc.elements[open].name.clone()));
                    }
                    break;
                }
                // Text, CDATA, comments, declarations and PIs are skipped.
                _ => {}
            }
        }

        Ok(doc)
    }

    /// Appends a new element to the arena, attached under `parent`.
    fn push_element(&mut self, e: &BytesStart<'_>, parent: Option<usize>) -> Result<usize> {
        let name = str::from_utf8(e.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.to_string();
            attributes.push((key, value));
        }

        let id = self.elements.len();
        self.elements.push(Element {
            name,
            attributes,
            children: Vec::new(),
            parent,
        });
        match parent {
            Some(p) => self.elements[p].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Returns the first top-level element, if any.
    pub fn root(&self) -> Option<Node<'_>> {
        self.roots.first().map(|&id| self.node(id))
    }

    /// Returns the first top-level element with the given name.
    pub fn first_node(&self, name: &str) -> Option<Node<'_>> {
        self.roots
            .iter()
            .map(|&id| self.node(id))
            .find(|n| n.name() == name)
    }

    /// Iterates over all top-level elements in document order.
    pub fn roots(&self) -> impl Iterator<Item = Node<'_>> {
        self.roots.iter().map(|&id| self.node(id))
    }

    fn node(&self, id: usize) -> Node<'_> {
        Node { doc: self, id }
    }
}

/// A handle to one element of a [`Document`].
///
/// Copyable and non-owning; all accessors borrow from the document.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: usize,
}

impl<'doc> Node<'doc> {
    fn element(&self) -> &'doc Element {
        &self.doc.elements[self.id]
    }

    /// The element's tag name.
    pub fn name(&self) -> &'doc str {
        &self.element().name
    }

    /// All attributes as name/value pairs, in document order.
    pub fn attributes(&self) -> &'doc [(String, String)] {
        &self.element().attributes
    }

    /// The value of the first attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&'doc str> {
        self.element()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The first child element, if any.
    pub fn first_child(&self) -> Option<Node<'doc>> {
        self.element()
            .children
            .first()
            .map(|&id| self.doc.node(id))
    }

    /// The first child element with the given tag name.
    pub fn first_child_named(&self, name: &str) -> Option<Node<'doc>> {
        self.children().find(|c| c.name() == name)
    }

    /// The next sibling element in document order.
    pub fn next_sibling(&self) -> Option<Node<'doc>> {
        let siblings = self.sibling_ids();
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| self.doc.node(id))
    }

    /// The next sibling element with the given tag name.
    pub fn next_sibling_named(&self, name: &str) -> Option<Node<'doc>> {
        let mut current = self.next_sibling();
        while let Some(node) = current {
            if node.name() == name {
                return Some(node);
            }
            current = node.next_sibling();
        }
        None
    }

    /// The parent element, or `None` for a top-level element.
    pub fn parent(&self) -> Option<Node<'doc>> {
        self.element().parent.map(|id| self.doc.node(id))
    }

    /// Iterates over child elements in document order.
    pub fn children(&self) -> Children<'doc> {
        Children {
            doc: self.doc,
            ids: &self.element().children,
            pos: 0,
        }
    }

    /// Iterates over child elements with the given tag name, in document order.
    pub fn children_named<'n>(&self, name: &'n str) -> ChildrenNamed<'doc, 'n> {
        ChildrenNamed {
            inner: self.children(),
            name,
        }
    }

    fn sibling_ids(&self) -> &'doc [usize] {
        match self.element().parent {
            Some(p) => &self.doc.elements[p].children,
            None => &self.doc.roots,
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("attributes", &self.attributes())
            .finish()
    }
}

/// Iterator over the child elements of a node.
pub struct Children<'doc> {
    doc: &'doc Document,
    ids: &'doc [usize],
    pos: usize,
}

impl<'doc> Iterator for Children<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Node<'doc>> {
        let id = *self.ids.get(self.pos)?;
        self.pos += 1;
        Some(self.doc.node(id))
    }
}

/// Iterator over the child elements of a node with a fixed tag name.
pub struct ChildrenNamed<'doc, 'n> {
    inner: Children<'doc>,
    name: &'n str,
}

impl<'doc> Iterator for ChildrenNamed<'doc, '_> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Node<'doc>> {
        self.inner.find(|n| n.name() == self.name)
    }
}

/// Invokes `fun` once per child element of `parent`, in document order.
///
/// An absent parent is an empty sequence: the action is never invoked and
/// no error is raised.
pub fn for_each_child<'doc, F>(parent: Option<Node<'doc>>, fun: F)
where
    F: FnMut(Node<'doc>),
{
    if let Some(parent) = parent {
        parent.children().for_each(fun);
    }
}

/// Invokes `fun` once per child element of `parent` whose tag name equals
/// `name`, in document order. An absent parent yields zero invocations.
pub fn for_each_child_named<'doc, F>(parent: Option<Node<'doc>>, name: &str, fun: F)
where
    F: FnMut(Node<'doc>),
{
    if let Some(parent) = parent {
        parent.children_named(name).for_each(fun);
    }
}
