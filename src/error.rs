//! Error types for the confxml library.

use thiserror::Error;

/// What went wrong while looking up an attribute.
///
/// Strict and defaulted call sites treat all three causes identically; the
/// distinction exists for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFailure {
    /// The node the attribute was requested from does not exist
    MissingNode,
    /// The node exists but carries no attribute of that name
    MissingAttribute,
    /// The attribute exists but its value could not be converted
    MalformedValue,
}

impl std::fmt::Display for AttributeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeFailure::MissingNode => write!(f, "node is missing"),
            AttributeFailure::MissingAttribute => write!(f, "attribute is missing"),
            AttributeFailure::MalformedValue => write!(f, "value is malformed"),
        }
    }
}

/// Errors that can occur when working with configuration XML.
#[derive(Error, Debug)]
pub enum Error {
    /// A string could not be fully consumed as the requested type
    #[error("cannot convert {value:?} to {target}")]
    Conversion {
        /// Name of the requested target type
        target: &'static str,
        /// The raw text that failed to convert
        value: String,
    },

    /// An attribute lookup or conversion failed
    #[error("bad attribute {attribute:?} of element {element:?}: {cause}")]
    BadAttribute {
        /// Name of the element the attribute was requested from
        /// (empty when the element itself was absent)
        element: String,
        /// Name of the requested attribute
        attribute: String,
        /// Which of the three lookup stages failed
        cause: AttributeFailure,
    },

    /// A required element was absent
    #[error("bad element {0:?}")]
    BadElement(String),

    /// The input ended while an element was still open
    #[error("unclosed element {0:?}")]
    UnclosedElement(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type alias for confxml operations.
pub type Result<T> = std::result::Result<T, Error>;
