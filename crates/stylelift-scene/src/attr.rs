//! Tri-state node attributes.
//!
//! The host reports some attributes as "mixed" when a text run or a
//! multi-part shape has more than one value. That is neither a missing
//! attribute nor a real value, so it gets its own variant.

use serde::{Deserialize, Deserializer};

/// An optional node attribute that may also be reported as mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr<T> {
    /// The host did not report the attribute.
    Absent,
    /// The attribute has several differing values.
    Mixed,
    /// A single representative value.
    Value(T),
}

impl<T> Default for Attr<T> {
    fn default() -> Self {
        Attr::Absent
    }
}

impl<T> Attr<T> {
    /// The value, if there is exactly one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Absent | Attr::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Attr::Mixed)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Attr::Absent)
    }

    pub fn as_ref(&self) -> Attr<&T> {
        match self {
            Attr::Absent => Attr::Absent,
            Attr::Mixed => Attr::Mixed,
            Attr::Value(v) => Attr::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Absent => Attr::Absent,
            Attr::Mixed => Attr::Mixed,
            Attr::Value(v) => Attr::Value(f(v)),
        }
    }
}

impl<T: Copy> Attr<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

/// The marker string the host serializes for a mixed value.
pub const MIXED_MARKER: &str = "mixed";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttr<T> {
    Value(T),
    Marker(String),
    Null(()),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAttr::<T>::deserialize(deserializer)? {
            RawAttr::Value(v) => Ok(Attr::Value(v)),
            RawAttr::Marker(m) if m == MIXED_MARKER => Ok(Attr::Mixed),
            RawAttr::Marker(m) => Err(serde::de::Error::custom(format!(
                "unexpected attribute value '{m}'"
            ))),
            RawAttr::Null(()) => Ok(Attr::Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        size: Attr<f64>,
    }

    fn load(json: &str) -> Attr<f64> {
        serde_json::from_str::<Holder>(json).unwrap().size
    }

    #[test]
    fn test_missing_is_absent() {
        assert_eq!(load("{}"), Attr::Absent);
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(load(r#"{"size": null}"#), Attr::Absent);
    }

    #[test]
    fn test_mixed_marker() {
        assert_eq!(load(r#"{"size": "mixed"}"#), Attr::Mixed);
    }

    #[test]
    fn test_value() {
        assert_eq!(load(r#"{"size": 14.5}"#), Attr::Value(14.5));
    }

    #[test]
    fn test_other_string_is_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"size": "large"}"#).is_err());
    }

    #[test]
    fn test_value_accessor_ignores_mixed() {
        assert_eq!(Attr::<f64>::Mixed.get(), None);
        assert_eq!(Attr::Value(3.0).get(), Some(3.0));
    }
}
