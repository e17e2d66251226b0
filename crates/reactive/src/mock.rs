//! In-memory query lists for tests.

use crate::registry::Registry;
use crate::source::{ChangeHandler, ListenerToken, MediaQueryList, MediaQuerySource};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;

struct ListState {
    matches: bool,
    handlers: Registry<dyn Fn()>,
}

/// A query list whose match flag is flipped by the test.
#[derive(Clone)]
pub struct MockList {
    state: Rc<RefCell<ListState>>,
}

impl MockList {
    pub fn new(matches: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(ListState {
                matches,
                handlers: Registry::new(),
            })),
        }
    }

    /// Sets the flag without notifying.
    pub fn set_matches(&self, matches: bool) {
        self.state.borrow_mut().matches = matches;
    }

    /// Calls every registered handler.
    pub fn fire(&self) {
        let handlers = self.state.borrow().handlers.snapshot();
        for handler in handlers {
            handler();
        }
    }

    /// Sets the flag and notifies.
    pub fn change(&self, matches: bool) {
        self.set_matches(matches);
        self.fire();
    }

    pub fn handler_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }
}

impl MediaQueryList for MockList {
    fn matches(&self) -> bool {
        self.state.borrow().matches
    }

    fn register(&self, handler: ChangeHandler) -> ListenerToken {
        self.state.borrow_mut().handlers.register(handler)
    }

    fn unregister(&self, token: ListenerToken) -> bool {
        self.state.borrow_mut().handlers.unregister(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "matchMedia failed: {}", self.0)
    }
}

/// Hands out one `MockList` per query string.
pub struct MockSource {
    lists: RefCell<HashMap<String, MockList>>,
    default_matches: bool,
    fail_on: Option<String>,
    opened: RefCell<Vec<String>>,
}

impl MockSource {
    /// Every query reports `matches`.
    pub fn uniform(matches: bool) -> Self {
        Self {
            lists: RefCell::new(HashMap::new()),
            default_matches: matches,
            fail_on: None,
            opened: RefCell::new(Vec::new()),
        }
    }

    /// Queries report the given flags, anything else reports false.
    pub fn with_matches<'a>(matches: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let source = Self::uniform(false);
        for (query, flag) in matches {
            source
                .lists
                .borrow_mut()
                .insert(query.into(), MockList::new(flag));
        }
        source
    }

    /// Opening `query` fails.
    pub fn failing_on(mut self, query: &str) -> Self {
        self.fail_on = Some(query.into());
        self
    }

    /// Returns the list for `query`, creating it if needed.
    pub fn list(&self, query: &str) -> MockList {
        self.lists
            .borrow_mut()
            .entry(query.into())
            .or_insert_with(|| MockList::new(self.default_matches))
            .clone()
    }

    /// Query strings in the order they were opened.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    /// Total handlers still registered across all lists.
    pub fn handler_count(&self) -> usize {
        self.lists.borrow().values().map(|l| l.handler_count()).sum()
    }
}

impl MediaQuerySource for MockSource {
    type List = MockList;
    type Error = MockError;

    fn open(&self, query: &str) -> Result<MockList, MockError> {
        if self.fail_on.as_deref() == Some(query) {
            return Err(MockError(query.into()));
        }
        self.opened.borrow_mut().push(query.into());
        Ok(self.list(query))
    }
}
