//! Typed convenience utilities for configuration-style XML.
//!
//! This crate reduces the boilerplate of reading simple, flatly-typed
//! configuration XML: iterating child nodes by tag name, converting
//! attribute strings into typed values (numbers, booleans, bit vectors,
//! strings, lists and small fixed arrays), supplying defaults on missing or
//! malformed attributes, and building/serializing XML trees
//! programmatically.
//!
//! # Reading
//!
//! ```rust
//! use confxml::attr::{get_attribute, get_attribute_or};
//! use confxml::document::{for_each_child_named, Document};
//!
//! let doc = Document::parse_str(r#"
//!     <config>
//!       <server host="example.com" port="8080"/>
//!       <server host="backup.example.com"/>
//!     </config>"#).unwrap();
//!
//! let config = doc.first_node("config");
//! for_each_child_named(config, "server", |server| {
//!     let host: String = get_attribute(Some(server), "host").unwrap();
//!     let port: u16 = get_attribute_or(Some(server), "port", 80);
//!     println!("{host}:{port}");
//! });
//! ```
//!
//! # Writing
//!
//! ```rust,no_run
//! use confxml::builder::XmlNode;
//!
//! let mut root = XmlNode::new("config");
//! let server = root.add_child(XmlNode::new("server"));
//! server.set_attribute("host", "example.com");
//! server.set_attribute_value("port", &8080u16);
//! root.save("config.xml").unwrap();
//! ```
//!
//! # Module structure
//!
//! - [`convert`] - String-to-value conversion ([`convert::FromXmlText`]) and
//!   the reverse ([`convert::ToXmlText`])
//! - [`document`] - Arena-backed read-only DOM and child iteration
//! - [`attr`] - Typed attribute access and property maps
//! - [`builder`] - Owned XML tree construction and serialization
//! - [`error`] - Error types
//!
//! # Error handling
//!
//! Call sites choose, per attribute, whether malformed configuration is
//! fatal (`get_attribute`), silently defaulted (`get_attribute_or`), or
//! handled by a bespoke grammar rule with a failure callback
//! (`get_attribute_with`). Strict failures carry the element and attribute
//! names for diagnostics.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod attr;
pub mod builder;
pub mod convert;
pub mod document;
pub mod error;

// Re-export commonly used types at the crate root
pub use attr::{
    extract_properties, get_attribute, get_attribute_or, get_attribute_with, property,
    property_or, PropertyMap,
};
pub use builder::XmlNode;
pub use convert::{convert, convert_or, convert_with_rule, BitArray, Bits6, FromXmlText, ToXmlText};
pub use document::{for_each_child, for_each_child_named, Document, Node};
pub use error::{AttributeFailure, Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
