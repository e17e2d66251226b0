//! Aggregated match state.

use alloc::string::String;
use hashbrown::HashMap;

/// Logical query names mapped to whether the query currently matches.
///
/// Rebuilt wholesale on every change; never patched entry by entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchState {
    matches: HashMap<String, bool>,
}

impl MatchState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with every name mapped to `true`.
    ///
    /// This is the placeholder used when no query-capable environment exists
    /// and no default was supplied.
    pub fn all_matching<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().map(|name| (name, true)).collect()
    }

    /// Sets the match flag for `name`.
    pub fn insert(&mut self, name: impl Into<String>, matches: bool) {
        self.matches.insert(name.into(), matches);
    }

    /// Returns the match flag for `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.matches.get(name).copied()
    }

    /// Returns true if `name` is present and matching.
    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Returns true if every entry matches. An empty state matches vacuously.
    pub fn matches_all(&self) -> bool {
        self.matches.values().all(|&m| m)
    }

    /// Returns true if at least one entry matches.
    pub fn matches_any(&self) -> bool {
        self.matches.values().any(|&m| m)
    }

    /// Returns true if this state has exactly the given set of names.
    pub fn has_keys<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        let mut count = 0;
        for name in names {
            if !self.matches.contains_key(name) {
                return false;
            }
            count += 1;
        }
        count == self.matches.len()
    }

    /// Iterates over `(name, matches)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.matches.iter().map(|(k, &v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for MatchState {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
