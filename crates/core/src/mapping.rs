//! Query mapping: logical names to descriptors.

use crate::descriptor::QueryDescriptor;
use crate::error::{Error, Result};
use alloc::string::String;
use alloc::vec::Vec;

/// Maps unique logical names (`"sm"`, `"lg"`) to query descriptors.
///
/// Iteration follows insertion order, which is the order subscriptions are
/// opened in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryMapping {
    entries: Vec<(String, QueryDescriptor)>,
}

impl QueryMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Fails if the name is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: impl Into<QueryDescriptor>,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::duplicate_query(name));
        }
        self.entries.push((name, descriptor.into()));
        Ok(())
    }

    /// Builds a mapping from `(name, descriptor)` pairs, rejecting duplicates.
    pub fn try_from_iter<I, K, D>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<QueryDescriptor>,
    {
        let mut mapping = Self::new();
        for (name, descriptor) in iter {
            mapping.insert(name, descriptor)?;
        }
        Ok(mapping)
    }

    /// Returns the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&QueryDescriptor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterates over entries in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryDescriptor)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Iterates over logical names in mapping order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::QueryMapping;
    use crate::descriptor::QueryDescriptor;
    use alloc::string::String;
    use core::fmt;
    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

    struct QueryMappingVisitor;

    impl<'de> Visitor<'de> for QueryMappingVisitor {
        type Value = QueryMapping;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of query names to media queries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<QueryMapping, A::Error> {
            let mut mapping = QueryMapping::new();
            while let Some((name, descriptor)) = map.next_entry::<String, QueryDescriptor>()? {
                mapping.insert(name, descriptor).map_err(de::Error::custom)?;
            }
            Ok(mapping)
        }
    }

    impl<'de> Deserialize<'de> for QueryMapping {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(QueryMappingVisitor)
        }
    }
}
