//! Handler registry.
//!
//! Stores callbacks under numeric tokens so they can be removed later.
//! Used both by query lists (change handlers) and by `Media` (re-render
//! observers).

use alloc::rc::Rc;
use alloc::vec::Vec;

/// Token returned on registration, used to unregister.
pub type Token = u64;

/// Callbacks keyed by token, dispatched in registration order.
pub struct Registry<H: ?Sized> {
    entries: Vec<(Token, Rc<H>)>,
    next_token: Token,
}

impl<H: ?Sized> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Registry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 1,
        }
    }

    /// Registers a handler and returns its token.
    pub fn register(&mut self, handler: Rc<H>) -> Token {
        let token = self.next_token;
        self.next_token += 1;
        self.entries.push((token, handler));
        token
    }

    /// Removes a handler.
    ///
    /// Returns true if the token was found and removed.
    pub fn unregister(&mut self, token: Token) -> bool {
        self.remove(token).is_some()
    }

    /// Removes a handler and returns it.
    pub fn remove(&mut self, token: Token) -> Option<Rc<H>> {
        let index = self.entries.iter().position(|(t, _)| *t == token)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the registered handlers.
    ///
    /// Callers dispatch on the snapshot so handlers may register or
    /// unregister while being called.
    pub fn snapshot(&self) -> Vec<Rc<H>> {
        self.entries.iter().map(|(_, h)| h.clone()).collect()
    }

    /// Returns true if `token` is registered.
    pub fn contains(&self, token: Token) -> bool {
        self.entries.iter().any(|(t, _)| *t == token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every handler.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    type Handler = dyn Fn(i32);

    #[test]
    fn test_register_assigns_increasing_tokens() {
        let mut registry: Registry<Handler> = Registry::new();

        let t1 = registry.register(Rc::new(|_: i32| {}));
        let t2 = registry.register(Rc::new(|_: i32| {}));

        assert_eq!(t1, 1);
        assert_eq!(t2, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister() {
        let mut registry: Registry<Handler> = Registry::new();

        let token = registry.register(Rc::new(|_: i32| {}));
        assert!(registry.contains(token));

        assert!(registry.unregister(token));
        assert!(registry.is_empty());

        assert!(!registry.unregister(token)); // Already removed
    }

    #[test]
    fn test_remove_returns_handler() {
        let mut registry: Registry<Handler> = Registry::new();
        let hits = Rc::new(RefCell::new(0));
        let hits_clone = hits.clone();

        let token = registry.register(Rc::new(move |x: i32| *hits_clone.borrow_mut() += x));
        let handler = registry.remove(token).unwrap();
        handler(3);

        assert_eq!(*hits.borrow(), 3);
        assert!(registry.remove(token).is_none());
    }

    #[test]
    fn test_snapshot_dispatch_order() {
        let mut registry: Registry<Handler> = Registry::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        registry.register(Rc::new(move |x: i32| l1.borrow_mut().push(x)));
        let l2 = log.clone();
        registry.register(Rc::new(move |x: i32| l2.borrow_mut().push(x * 10)));

        for handler in registry.snapshot() {
            handler(2);
        }

        assert_eq!(*log.borrow(), alloc::vec![2, 20]);
    }

    #[test]
    fn test_tokens_not_reused_after_clear() {
        let mut registry: Registry<Handler> = Registry::new();

        registry.register(Rc::new(|_: i32| {}));
        registry.register(Rc::new(|_: i32| {}));
        registry.clear();
        assert!(registry.is_empty());

        let token = registry.register(Rc::new(|_: i32| {}));
        assert_eq!(token, 3);
    }
}
