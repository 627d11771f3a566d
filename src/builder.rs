//! Programmatic XML tree construction and serialization.
//!
//! [`XmlNode`] is a plain owned tree: a name, a map of attributes, and child
//! nodes held by value. Build it up by direct mutation, then serialize with
//! [`XmlNode::save`], [`XmlNode::write`] or [`XmlNode::to_xml_string`]. The
//! builder is independent of the read path in [`crate::document`]; the two
//! only meet when a saved file is parsed back.
//!
//! # Example
//!
//! ```rust
//! use confxml::builder::XmlNode;
//!
//! let mut root = XmlNode::new("config");
//! root.set_attribute("version", "1");
//!
//! let mut server = XmlNode::new("server");
//! server.set_attribute("port", "8080");
//! root.add_child(server);
//!
//! let xml = root.to_xml_string().unwrap();
//! assert!(xml.contains("<server port=\"8080\"/>"));
//! ```

use crate::convert::ToXmlText;
use crate::error::Result;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// An owned, mutable XML element tree.
///
/// The name is fixed at construction; `attributes` and `nodes` may be
/// mutated freely up to the moment of serialization. Serialization is a pure
/// read and is deterministic: attributes render in map order, children in
/// stored order, so equal trees produce byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    /// Attribute name to value; rendered in map (sorted) order.
    pub attributes: BTreeMap<String, String>,
    /// Child elements, rendered depth-first in stored order.
    pub nodes: Vec<XmlNode>,
}

impl XmlNode {
    /// Creates an element with the given tag name and no attributes or
    /// children.
    pub fn new(name: impl Into<String>) -> Self {
        XmlNode {
            name: name.into(),
            attributes: BTreeMap::new(),
            nodes: Vec::new(),
        }
    }

    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets (or replaces) an attribute from raw strings.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Sets (or replaces) an attribute from any [`ToXmlText`] value.
    pub fn set_attribute_value<T: ToXmlText + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) {
        self.attributes.insert(name.into(), value.to_xml_text());
    }

    /// Appends a child element, returning a reference to it for further
    /// population.
    pub fn add_child(&mut self, child: XmlNode) -> &mut XmlNode {
        self.nodes.push(child);
        self.nodes.last_mut().unwrap()
    }

    /// Serializes the tree to a string.
    ///
    /// No XML declaration or DOCTYPE is emitted; output is indented with two
    /// spaces per level and attribute values are entity-escaped.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(String::from_utf8(buffer).expect("generated XML should be valid UTF-8"))
    }

    /// Serializes the tree into any `Write` implementation.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);
        self.write_element(&mut xml_writer)
    }

    /// Serializes the tree to a file at `path`, truncating any existing
    /// file. I/O failures are surfaced as [`crate::Error::Io`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Materializes this node and, depth-first pre-order, its subtree.
    fn write_element<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.nodes.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.nodes {
                child.write_element(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }
        Ok(())
    }
}
