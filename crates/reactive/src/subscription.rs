//! Per-query subscription records.

use crate::source::{ChangeHandler, ListenerToken, MediaQueryList};
use alloc::string::String;

/// An open media query owned by one `Media` instance.
///
/// Holds the logical name, the normalized query string, the live query list
/// and the token of the change handler registered on it.
pub struct QuerySubscription<L: MediaQueryList> {
    name: String,
    query: String,
    list: L,
    token: Option<ListenerToken>,
}

impl<L: MediaQueryList> QuerySubscription<L> {
    /// Registers `handler` on `list` and wraps the result.
    pub fn attach(name: String, query: String, list: L, handler: ChangeHandler) -> Self {
        let token = list.register(handler);
        Self {
            name,
            query,
            list,
            token: Some(token),
        }
    }

    /// Logical name of the entry.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized media query string.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current match flag as reported by the query list.
    #[inline]
    pub fn matches(&self) -> bool {
        self.list.matches()
    }

    /// Returns whether the change handler is still registered.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Unregisters the change handler.
    ///
    /// Only the first call reaches the query list; later calls return false.
    pub fn release(&mut self) -> bool {
        match self.token.take() {
            Some(token) => self.list.unregister(token),
            None => false,
        }
    }
}

impl<L: MediaQueryList> Drop for QuerySubscription<L> {
    fn drop(&mut self) {
        self.release();
    }
}
