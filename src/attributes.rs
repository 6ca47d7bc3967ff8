//! Attribute values and insertion-ordered attribute maps

use crate::error::{Error, ErrorKind, Result};
use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;
use std::fmt;

/// An attribute value: string, boolean or integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    String(String),
    Bool(bool),
    Int(i64),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for AttrValue {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self> {
                    i64::try_from(value)
                        .map(Self::Int)
                        .map_err(|_| invalid(value))
                }
            }
        )*
    };
}

impl_try_from_wide_int!(u64, usize, isize, i128, u128);

/// Only finite, integral floats have an attribute form.
impl TryFrom<f64> for AttrValue {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(invalid(value));
        }
        // outside i64
        if value < -9_223_372_036_854_775_808.0 || value >= 9_223_372_036_854_775_808.0 {
            return Err(invalid(value));
        }
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
        let int = value as i64;
        Ok(Self::Int(int))
    }
}

fn invalid(value: impl fmt::Display) -> Error {
    Error::new(ErrorKind::InvalidAttributeValue {
        value: value.to_string(),
    })
}

/// Attribute keys and values in the order the caller supplied them.
///
/// Keys stay snake_case here; they are camelCased when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Chainable insert.
    ///
    /// ```
    /// use twiml::Attributes;
    ///
    /// let attrs = Attributes::new().with("finish_on_key", "#").with("transcribe", true);
    /// assert_eq!(attrs.keys().collect::<Vec<_>>(), ["finish_on_key", "transcribe"]);
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Chainable insert for values that may not convert, such as floats.
    pub fn try_with<V>(mut self, key: impl Into<String>, value: V) -> Result<Self>
    where
        V: TryInto<AttrValue, Error = Error>,
    {
        let key = key.into();
        let value = value.try_into().map_err(|e| {
            let message = format!("{} for key {key}", e.message());
            Error::with_message(e.kind().clone(), message)
        })?;
        self.0.insert(key, value);
        Ok(self)
    }

    /// Inserts a value; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, AttrValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, AttrValue> {
        self.0.keys()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttrValue);
    type IntoIter = IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(AttrValue::from(true).to_string(), "true");
        assert_eq!(AttrValue::from(false).to_string(), "false");
        assert_eq!(AttrValue::from(5).to_string(), "5");
        assert_eq!(AttrValue::from(-12_i64).to_string(), "-12");
        assert_eq!(AttrValue::from("#").to_string(), "#");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let attrs = Attributes::new()
            .with("timeout", 10)
            .with("action", "/menu")
            .with("num_digits", 1);
        let keys: Vec<_> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["timeout", "action", "num_digits"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut attrs = Attributes::new().with("a", 1).with("b", 2);
        let previous = attrs.insert("a", 3);
        assert_eq!(previous, Some(AttrValue::Int(1)));
        let pairs: Vec<_> = attrs.iter().map(|(k, v)| (k.as_str(), v.to_string())).collect();
        assert_eq!(pairs, [("a", "3".to_string()), ("b", "2".to_string())]);
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(AttrValue::try_from(4.0).ok(), Some(AttrValue::Int(4)));
        let err = AttrValue::try_from(1.5).err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::InvalidAttributeValue { .. })
        ));
        assert!(AttrValue::try_from(f64::NAN).is_err());
        assert!(AttrValue::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_wide_int_conversion() {
        assert_eq!(AttrValue::try_from(7_usize).ok(), Some(AttrValue::Int(7)));
        assert!(AttrValue::try_from(u64::MAX).is_err());
    }

    #[test]
    fn test_try_with_names_the_key() {
        let err = Attributes::new().try_with("timeout", 2.5).err();
        let message = err.map(|e| e.message().to_string()).unwrap_or_default();
        assert!(message.contains("timeout"));
        assert!(message.contains("2.5"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let attrs: Attributes = [("voice", "alice"), ("language", "en-GB")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("voice").and_then(AttrValue::as_str), Some("alice"));
    }
}
