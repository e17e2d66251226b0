//! Platform query subscription facility.
//!
//! The adapter never talks to a host API directly. A `MediaQuerySource`
//! opens query lists, and each `MediaQueryList` reports its current match
//! flag and accepts change handlers through `register`/`unregister`.
//! Whether such a facility exists at all is decided by the caller and
//! passed in as an `Environment`.

use crate::registry::Token;
use alloc::rc::Rc;

/// Token identifying a registered change handler.
pub type ListenerToken = Token;

/// Callback invoked by a query list when its match flag flips.
pub type ChangeHandler = Rc<dyn Fn()>;

/// A live media query.
pub trait MediaQueryList {
    /// Returns whether the query matches right now.
    fn matches(&self) -> bool;

    /// Registers a change handler.
    fn register(&self, handler: ChangeHandler) -> ListenerToken;

    /// Removes a change handler.
    ///
    /// Returns true if the token was registered.
    fn unregister(&self, token: ListenerToken) -> bool;
}

/// Opens media query lists for query strings.
pub trait MediaQuerySource {
    type List: MediaQueryList;
    /// Host error, handed back to the caller unchanged.
    type Error;

    fn open(&self, query: &str) -> Result<Self::List, Self::Error>;
}

impl<S: MediaQuerySource + ?Sized> MediaQuerySource for &S {
    type List = S::List;
    type Error = S::Error;

    fn open(&self, query: &str) -> Result<Self::List, Self::Error> {
        (**self).open(query)
    }
}

/// Whether a query subscription facility is available.
pub enum Environment<S> {
    /// Queries can be opened and observed.
    Interactive(S),
    /// No facility, e.g. server-side rendering. Default match state is used.
    Headless,
}

impl<S> Environment<S> {
    /// Returns true for `Interactive`.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Environment::Interactive(_))
    }
}

impl<S> From<Option<S>> for Environment<S> {
    fn from(source: Option<S>) -> Self {
        match source {
            Some(source) => Environment::Interactive(source),
            None => Environment::Headless,
        }
    }
}
