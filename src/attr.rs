//! Typed attribute access and property-map extraction.
//!
//! Every lookup takes an `Option<Node>` so that "the node is absent" is an
//! ordinary input rather than a panic: configuration loaders routinely chain
//! `first_child_named` straight into an attribute read. Call sites pick, per
//! attribute, whether malformed configuration is fatal ([`get_attribute`]),
//! silently defaulted ([`get_attribute_or`]) or handled by bespoke logic
//! ([`get_attribute_with`]).
//!
//! # Example
//!
//! ```rust
//! use confxml::attr::{get_attribute, get_attribute_or};
//! use confxml::document::Document;
//!
//! let doc = Document::parse_str(r#"<server port="8080"/>"#).unwrap();
//! let server = doc.first_node("server");
//!
//! let port: u16 = get_attribute(server, "port").unwrap();
//! assert_eq!(port, 8080);
//!
//! let retries: u32 = get_attribute_or(server, "retries", 3);
//! assert_eq!(retries, 3);
//! ```

use crate::convert::{convert, FromXmlText};
use crate::document::Node;
use crate::error::{AttributeFailure, Error, Result};
use std::collections::BTreeMap;

/// All attributes of a single node, decoupled from the live document.
pub type PropertyMap = BTreeMap<String, String>;

fn bad_attribute(element: &str, attribute: &str, cause: AttributeFailure) -> Error {
    Error::BadAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        cause,
    }
}

/// Looks up attribute `name` on `node` and converts its value to `T`.
///
/// Fails with [`Error::BadAttribute`] when the node is absent, the attribute
/// is absent, or the value does not convert; the error records the element
/// and attribute names plus which stage failed.
pub fn get_attribute<T: FromXmlText>(node: Option<Node<'_>>, name: &str) -> Result<T> {
    let node = node.ok_or_else(|| bad_attribute("", name, AttributeFailure::MissingNode))?;
    let value = node
        .attribute(name)
        .ok_or_else(|| bad_attribute(node.name(), name, AttributeFailure::MissingAttribute))?;
    convert::<T>(value)
        .map_err(|_| bad_attribute(node.name(), name, AttributeFailure::MalformedValue))
}

/// Like [`get_attribute`], but returns `default` in every failure case.
pub fn get_attribute_or<T: FromXmlText>(node: Option<Node<'_>>, name: &str, default: T) -> T {
    get_attribute(node, name).unwrap_or(default)
}

/// Looks up attribute `name` and parses its raw value with an arbitrary
/// grammar rule.
///
/// On a missing node, a missing attribute, or rule rejection, `on_failure`
/// receives the corresponding [`Error`] and the result is `None`. Pass
/// `drop` as the callback to ignore failures:
///
/// ```rust
/// use confxml::attr::get_attribute_with;
/// use confxml::document::Document;
///
/// let doc = Document::parse_str(r#"<n pair="11.11;22.22"/>"#).unwrap();
/// let pair = get_attribute_with(doc.root(), "pair", |s| {
///     let (a, b) = s.split_once(';')?;
///     Some((a.parse::<f64>().ok()?, b.parse::<f64>().ok()?))
/// }, drop);
/// assert_eq!(pair, Some((11.11, 22.22)));
/// ```
pub fn get_attribute_with<T, R, C>(
    node: Option<Node<'_>>,
    name: &str,
    rule: R,
    on_failure: C,
) -> Option<T>
where
    R: FnOnce(&str) -> Option<T>,
    C: FnOnce(Error),
{
    let node = match node {
        Some(node) => node,
        None => {
            on_failure(bad_attribute("", name, AttributeFailure::MissingNode));
            return None;
        }
    };
    let value = match node.attribute(name) {
        Some(value) => value,
        None => {
            on_failure(bad_attribute(
                node.name(),
                name,
                AttributeFailure::MissingAttribute,
            ));
            return None;
        }
    };
    match rule(value) {
        Some(parsed) => Some(parsed),
        None => {
            on_failure(bad_attribute(
                node.name(),
                name,
                AttributeFailure::MalformedValue,
            ));
            None
        }
    }
}

/// Copies every attribute of `node` into a fresh [`PropertyMap`].
///
/// Duplicate attribute names resolve last-wins; an absent node yields an
/// empty map.
pub fn extract_properties(node: Option<Node<'_>>) -> PropertyMap {
    let mut properties = PropertyMap::new();
    if let Some(node) = node {
        for (name, value) in node.attributes() {
            properties.insert(name.clone(), value.clone());
        }
    }
    properties
}

/// Typed lookup of `name` in an extracted property map.
pub fn property<T: FromXmlText>(properties: &PropertyMap, name: &str) -> Result<T> {
    let value = properties
        .get(name)
        .ok_or_else(|| bad_attribute("", name, AttributeFailure::MissingAttribute))?;
    convert::<T>(value).map_err(|_| bad_attribute("", name, AttributeFailure::MalformedValue))
}

/// Like [`property`], but returns `default` when the key is absent or the
/// value does not convert.
pub fn property_or<T: FromXmlText>(properties: &PropertyMap, name: &str, default: T) -> T {
    property(properties, name).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Bits6;
    use crate::document::Document;

    const FIXTURE: &str = r#"<testconfig>
  <test str="test" double="1.0" int="7" flags="010110" sizes="1, 2, 3"/>
  <special special_vals="11.11;22.22"/>
</testconfig>"#;

    fn parse() -> Document {
        Document::parse_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_get_attribute_string() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");
        let value: String = get_attribute(node, "str").unwrap();
        assert_eq!(value, "test");
    }

    #[test]
    fn test_get_attribute_double() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");
        let value: f64 = get_attribute(node, "double").unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_get_attribute_typed_values() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");

        let flags: Bits6 = get_attribute(node, "flags").unwrap();
        assert_eq!(flags.0, [false, true, false, true, true, false]);

        let sizes: Vec<u32> = get_attribute(node, "sizes").unwrap();
        assert_eq!(sizes, vec![1, 2, 3]);

        let triple: [u32; 3] = get_attribute(node, "sizes").unwrap();
        assert_eq!(triple, [1, 2, 3]);
    }

    #[test]
    fn test_get_attribute_failures_carry_context() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");

        match get_attribute::<f64>(node, "str") {
            Err(Error::BadAttribute {
                element,
                attribute,
                cause,
            }) => {
                assert_eq!(element, "test");
                assert_eq!(attribute, "str");
                assert_eq!(cause, AttributeFailure::MalformedValue);
            }
            other => panic!("expected BadAttribute, got {:?}", other.map(|_| ())),
        }

        match get_attribute::<f64>(node, "nope") {
            Err(Error::BadAttribute { cause, .. }) => {
                assert_eq!(cause, AttributeFailure::MissingAttribute);
            }
            other => panic!("expected BadAttribute, got {:?}", other.map(|_| ())),
        }

        let absent = doc.root().unwrap().first_child_named("err_node");
        match get_attribute::<String>(absent, "str") {
            Err(Error::BadAttribute { element, cause, .. }) => {
                assert_eq!(element, "");
                assert_eq!(cause, AttributeFailure::MissingNode);
            }
            other => panic!("expected BadAttribute, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_get_attribute_defaulted() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");

        // Absent attribute falls back
        let value: String = get_attribute_or(node, "nope", "test".to_string());
        assert_eq!(value, "test");

        // Malformed value falls back
        let value: f64 = get_attribute_or(node, "str", 1.0);
        assert_eq!(value, 1.0);

        // Absent node falls back
        let absent = doc.root().unwrap().first_child_named("err_node");
        let value: String = get_attribute_or(absent, "str", "test".to_string());
        assert_eq!(value, "test");

        // Present and well-formed does not
        let value: f64 = get_attribute_or(node, "double", 9.0);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_get_attribute_with_rule() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("special");

        let pair = get_attribute_with(
            node,
            "special_vals",
            |s| {
                let (a, b) = s.split_once(';')?;
                Some((a.parse::<f64>().ok()?, b.parse::<f64>().ok()?))
            },
            drop,
        );
        assert_eq!(pair, Some((11.11, 22.22)));
    }

    #[test]
    fn test_get_attribute_with_rule_failure_callback() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("special");

        let mut seen = None;
        let result: Option<f64> = get_attribute_with(
            node,
            "special_vals",
            |s| s.parse::<f64>().ok(),
            |err| seen = Some(err),
        );
        assert!(result.is_none());
        assert!(matches!(
            seen,
            Some(Error::BadAttribute {
                cause: AttributeFailure::MalformedValue,
                ..
            })
        ));

        let mut seen = None;
        let absent = doc.root().unwrap().first_child_named("err_node");
        let result: Option<f64> =
            get_attribute_with(absent, "x", |s| s.parse::<f64>().ok(), |err| seen = Some(err));
        assert!(result.is_none());
        assert!(matches!(
            seen,
            Some(Error::BadAttribute {
                cause: AttributeFailure::MissingNode,
                ..
            })
        ));
    }

    #[test]
    fn test_extract_properties() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");

        let properties = extract_properties(node);
        assert_eq!(properties.len(), 5);
        assert_eq!(properties.get("str").map(String::as_str), Some("test"));
        assert_eq!(properties.get("double").map(String::as_str), Some("1.0"));

        assert!(extract_properties(None).is_empty());
    }

    #[test]
    fn test_property_lookup() {
        let doc = parse();
        let node = doc.root().unwrap().first_child_named("test");
        let properties = extract_properties(node);

        let value: f64 = property(&properties, "double").unwrap();
        assert_eq!(value, 1.0);
        assert!(property::<f64>(&properties, "nope").is_err());

        assert_eq!(property_or(&properties, "int", 0u32), 7);
        assert_eq!(property_or(&properties, "nope", 0u32), 0);
        assert_eq!(property_or(&properties, "str", 5.0f64), 5.0);
    }
}
