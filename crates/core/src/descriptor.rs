//! Query descriptors.
//!
//! A descriptor is either a media query string used as-is, or a structured
//! description of media features that the normalizer turns into a string.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Value of a single media feature in a structured descriptor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FeatureValue {
    /// `true` renders the bare feature, `false` renders `not <feature>`.
    Bool(bool),
    /// Numbers on width/height features are rendered in pixels.
    Number(f64),
    /// Rendered verbatim, e.g. `"landscape"` or `"16/9"`.
    Text(String),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{}", b),
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Bool(b)
    }
}

impl From<f64> for FeatureValue {
    fn from(n: f64) -> Self {
        FeatureValue::Number(n)
    }
}

impl From<i32> for FeatureValue {
    fn from(n: i32) -> Self {
        FeatureValue::Number(n as f64)
    }
}

impl From<u32> for FeatureValue {
    fn from(n: u32) -> Self {
        FeatureValue::Number(n as f64)
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        FeatureValue::Text(s.into())
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        FeatureValue::Text(s)
    }
}

/// An ordered set of media features, e.g. `{ screen: true, maxWidth: 1000 }`.
///
/// Feature names are camelCase. Order is kept so the normalized string is
/// stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<(String, FeatureValue)>,
}

impl FeatureSet {
    /// Creates an empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a feature and returns the set (builder style).
    pub fn with(mut self, feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.push(feature, value);
        self
    }

    /// Appends a feature.
    pub fn push(&mut self, feature: impl Into<String>, value: impl Into<FeatureValue>) {
        self.features.push((feature.into(), value.into()));
    }

    /// Iterates over features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<K: Into<String>, V: Into<FeatureValue>> FromIterator<(K, V)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            features: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A media query as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum QueryDescriptor {
    /// A media query string, passed through unchanged.
    Raw(String),
    /// A list of feature sets; matches when any of them matches.
    AnyOf(Vec<FeatureSet>),
    /// A single feature set; matches when all features match.
    Features(FeatureSet),
}

impl QueryDescriptor {
    /// Returns the raw query string if this is a raw descriptor.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            QueryDescriptor::Raw(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for QueryDescriptor {
    fn from(s: &str) -> Self {
        QueryDescriptor::Raw(s.into())
    }
}

impl From<String> for QueryDescriptor {
    fn from(s: String) -> Self {
        QueryDescriptor::Raw(s)
    }
}

impl From<FeatureSet> for QueryDescriptor {
    fn from(features: FeatureSet) -> Self {
        QueryDescriptor::Features(features)
    }
}

impl From<Vec<FeatureSet>> for QueryDescriptor {
    fn from(sets: Vec<FeatureSet>) -> Self {
        QueryDescriptor::AnyOf(sets)
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::{FeatureSet, FeatureValue};
    use alloc::string::String;
    use core::fmt;
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

    struct FeatureSetVisitor;

    impl<'de> Visitor<'de> for FeatureSetVisitor {
        type Value = FeatureSet;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of media feature names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FeatureSet, A::Error> {
            // Keep the source order, a HashMap would scramble the query string
            let mut set = FeatureSet::new();
            while let Some((key, value)) = map.next_entry::<String, FeatureValue>()? {
                set.push(key, value);
            }
            Ok(set)
        }
    }

    impl<'de> Deserialize<'de> for FeatureSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(FeatureSetVisitor)
        }
    }
}
