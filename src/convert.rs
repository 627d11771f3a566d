//! Typed conversion between raw attribute text and Rust values.
//!
//! The read direction is the [`FromXmlText`] trait together with the
//! [`convert`] / [`convert_or`] / [`convert_with_rule`] entry points; the
//! write direction is [`ToXmlText`]. A conversion either fully consumes the
//! (whitespace-trimmed) input and yields a value, or it fails — partial
//! parses are never accepted.
//!
//! # Example
//!
//! ```rust
//! use confxml::convert::{convert, convert_or, Bits6};
//!
//! assert_eq!(convert::<f64>("1.5").unwrap(), 1.5);
//! assert_eq!(convert_or::<f64>("garbage", 1.0), 1.0);
//!
//! let bits: Bits6 = convert("010110").unwrap();
//! assert!(bits.0[1]);
//!
//! let sizes: Vec<u32> = convert("1, 2, 3").unwrap();
//! assert_eq!(sizes, vec![1, 2, 3]);
//! ```

use crate::error::{Error, Result};

/// Builds the conversion error for a failed parse of `value` as `T`.
fn conversion_error<T>(value: &str) -> Error {
    Error::Conversion {
        target: std::any::type_name::<T>(),
        value: value.to_string(),
    }
}

/// Types that can be produced from the raw text of an XML attribute.
pub trait FromXmlText: Sized {
    /// Converts the raw text into a value, consuming all of it.
    fn from_xml_text(text: &str) -> Result<Self>;
}

/// Converts `text` into a `T`, failing with [`Error::Conversion`] when the
/// text cannot be fully consumed as a `T`.
pub fn convert<T: FromXmlText>(text: &str) -> Result<T> {
    T::from_xml_text(text)
}

/// Converts `text` into a `T`, returning `default` instead of failing.
pub fn convert_or<T: FromXmlText>(text: &str, default: T) -> T {
    T::from_xml_text(text).unwrap_or(default)
}

/// Parses `text` against an arbitrary caller-supplied grammar rule.
///
/// A rule is any closure that inspects the text and either yields a value or
/// rejects it. This keeps ad-hoc micro-grammars (say, two semicolon-separated
/// numbers) out of the trait surface:
///
/// ```rust
/// use confxml::convert::convert_with_rule;
///
/// let pair = convert_with_rule("11.11;22.22", |s| {
///     let (a, b) = s.split_once(';')?;
///     Some((a.trim().parse::<f64>().ok()?, b.trim().parse::<f64>().ok()?))
/// });
/// assert_eq!(pair, Some((11.11, 22.22)));
/// ```
pub fn convert_with_rule<T, R>(text: &str, rule: R) -> Option<T>
where
    R: FnOnce(&str) -> Option<T>,
{
    rule(text)
}

impl FromXmlText for String {
    fn from_xml_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl FromXmlText for bool {
    fn from_xml_text(text: &str) -> Result<Self> {
        match text.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(conversion_error::<bool>(text)),
        }
    }
}

macro_rules! impl_from_xml_text_via_from_str {
    ($($t:ty),*) => {$(
        impl FromXmlText for $t {
            fn from_xml_text(text: &str) -> Result<Self> {
                text.trim()
                    .parse::<$t>()
                    .map_err(|_| conversion_error::<$t>(text))
            }
        }
    )*};
}

impl_from_xml_text_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// A fixed-length bit vector written as a digit string, e.g. `"010110"`.
///
/// Input must be exactly `N` characters of `'0'` or `'1'` (after trimming);
/// anything else, including a wrong-length string, is a conversion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitArray<const N: usize>(pub [bool; N]);

impl<const N: usize> Default for BitArray<N> {
    fn default() -> Self {
        BitArray([false; N])
    }
}

/// The six-flag bit vector used throughout configuration files.
pub type Bits6 = BitArray<6>;

impl<const N: usize> FromXmlText for BitArray<N> {
    fn from_xml_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.len() != N {
            return Err(conversion_error::<Self>(text));
        }
        let mut bits = [false; N];
        for (i, ch) in trimmed.chars().enumerate() {
            match ch {
                '0' => bits[i] = false,
                '1' => bits[i] = true,
                _ => return Err(conversion_error::<Self>(text)),
            }
        }
        Ok(BitArray(bits))
    }
}

/// Splits a comma-separated list into trimmed tokens.
///
/// An empty or all-whitespace input yields no tokens at all, so that an
/// absent list converts to an empty sequence rather than one empty token.
fn split_list(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::trim).collect()
}

impl<T: FromXmlText> FromXmlText for Vec<T> {
    fn from_xml_text(text: &str) -> Result<Self> {
        split_list(text)
            .into_iter()
            .map(T::from_xml_text)
            .collect()
    }
}

impl<T: FromXmlText, const N: usize> FromXmlText for [T; N] {
    fn from_xml_text(text: &str) -> Result<Self> {
        let items = Vec::<T>::from_xml_text(text)?;
        // Token count must match the array length exactly.
        items
            .try_into()
            .map_err(|_| conversion_error::<Self>(text))
    }
}

/// Types that can be rendered as XML attribute text.
///
/// Round-trips with [`FromXmlText`]: sequences join with commas, bit arrays
/// render as digit strings, scalars use their `Display` form.
pub trait ToXmlText {
    /// Renders the value as attribute text.
    fn to_xml_text(&self) -> String;
}

macro_rules! impl_to_xml_text_via_display {
    ($($t:ty),*) => {$(
        impl ToXmlText for $t {
            fn to_xml_text(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

impl_to_xml_text_via_display!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl ToXmlText for String {
    fn to_xml_text(&self) -> String {
        self.clone()
    }
}

impl ToXmlText for &str {
    fn to_xml_text(&self) -> String {
        (*self).to_string()
    }
}

impl<T: ToXmlText> ToXmlText for Vec<T> {
    fn to_xml_text(&self) -> String {
        self.as_slice().to_xml_text()
    }
}

impl<T: ToXmlText> ToXmlText for [T] {
    fn to_xml_text(&self) -> String {
        self.iter()
            .map(ToXmlText::to_xml_text)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: ToXmlText, const N: usize> ToXmlText for [T; N] {
    fn to_xml_text(&self) -> String {
        self.as_slice().to_xml_text()
    }
}

impl<const N: usize> ToXmlText for BitArray<N> {
    fn to_xml_text(&self) -> String {
        self.0.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}
