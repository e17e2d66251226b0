//! The `Media` adapter.
//!
//! Mounting normalizes every descriptor, opens one query list per entry and
//! registers a shared change handler on each. Any change re-reads every
//! list and rebuilds the match state from scratch, then notifies observers.
//! Unmounting unregisters every handler; handlers that still fire afterwards
//! do nothing.

use crate::registry::{Registry, Token};
use crate::render::{Child, Producer, RenderStrategy};
use crate::source::{ChangeHandler, Environment, MediaQueryList, MediaQuerySource};
use crate::subscription::QuerySubscription;
use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use breakpoint_core::{Error, MatchState, MediaQueryNormalizer, Normalize, QueryMapping};
use core::cell::RefCell;
use core::fmt;

/// Identifier for a re-render observer.
pub type ObserverId = Token;

/// Callback invoked with the new match state after each re-aggregation.
pub type Observer = dyn Fn(&MatchState);

/// Mount failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError<E> {
    /// Bad construction input or unnormalizable descriptor.
    Config(Error),
    /// The query facility failed; the host error is passed through as-is.
    Host(E),
}

impl<E> From<Error> for MediaError<E> {
    fn from(err: Error) -> Self {
        MediaError::Config(err)
    }
}

impl<E: fmt::Display> fmt::Display for MediaError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Config(err) => write!(f, "{}", err),
            MediaError::Host(err) => write!(f, "{}", err),
        }
    }
}

/// Construction inputs for `Media`.
///
/// ```ignore
/// let options = MediaOptions::new()
///     .queries(queries)
///     .default_matches(defaults)
///     .children(|m: &MatchState| m.is_match("sm"));
/// ```
pub struct MediaOptions<V> {
    queries: Option<QueryMapping>,
    default_matches: Option<MatchState>,
    child: Option<Child<V>>,
    render: Option<Producer<V>>,
}

impl<V> Default for MediaOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MediaOptions<V> {
    pub fn new() -> Self {
        Self {
            queries: None,
            default_matches: None,
            child: None,
            render: None,
        }
    }

    /// Sets the query mapping (required).
    pub fn queries(mut self, queries: QueryMapping) -> Self {
        self.queries = Some(queries);
        self
    }

    /// Sets the state used when no query facility is available.
    pub fn default_matches(mut self, matches: MatchState) -> Self {
        self.default_matches = Some(matches);
        self
    }

    /// Sets a function as the sole child.
    pub fn children<F>(mut self, producer: F) -> Self
    where
        F: Fn(&MatchState) -> V + 'static,
    {
        self.child = Some(Child::Producer(Box::new(producer)));
        self
    }

    /// Sets the child content explicitly.
    pub fn child(mut self, child: Child<V>) -> Self {
        self.child = Some(child);
        self
    }

    /// Sets the render option.
    pub fn render<F>(mut self, producer: F) -> Self
    where
        F: Fn(&MatchState) -> V + 'static,
    {
        self.render = Some(Box::new(producer));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Mounting,
    /// Subscriptions are live.
    Mounted,
    /// No query facility; the default state is final.
    Headless,
    Unmounted,
}

struct Shared<L: MediaQueryList> {
    subscriptions: Vec<QuerySubscription<L>>,
    matches: MatchState,
    phase: Phase,
}

impl<L: MediaQueryList> Shared<L> {
    /// Rebuilds the match state from every subscription.
    ///
    /// Returns false unless subscriptions are live, leaving the state
    /// untouched.
    fn reaggregate(&mut self) -> bool {
        if self.phase != Phase::Mounted {
            return false;
        }
        self.matches = aggregate(&self.subscriptions);
        true
    }
}

/// Builds a match state from the current flag of every subscription.
pub fn aggregate<L: MediaQueryList>(subscriptions: &[QuerySubscription<L>]) -> MatchState {
    subscriptions
        .iter()
        .map(|sub| (sub.name(), sub.matches()))
        .collect()
}

/// Exposes media query match state to a single consumer.
pub struct Media<L: MediaQueryList, V> {
    shared: Rc<RefCell<Shared<L>>>,
    observers: Rc<RefCell<Registry<Observer>>>,
    strategy: RenderStrategy<V>,
    interactive: bool,
    default_supplied: bool,
}

impl<L: MediaQueryList + 'static, V> Media<L, V> {
    /// Mounts with the default normalizer.
    pub fn mount<S>(
        options: MediaOptions<V>,
        environment: Environment<S>,
    ) -> Result<Self, MediaError<S::Error>>
    where
        S: MediaQuerySource<List = L>,
    {
        Self::mount_with(options, environment, &MediaQueryNormalizer)
    }

    /// Mounts with a custom normalizer.
    ///
    /// On failure every subscription opened so far is released before the
    /// error is returned.
    pub fn mount_with<S, N>(
        options: MediaOptions<V>,
        environment: Environment<S>,
        normalizer: &N,
    ) -> Result<Self, MediaError<S::Error>>
    where
        S: MediaQuerySource<List = L>,
        N: Normalize + ?Sized,
    {
        let MediaOptions {
            queries,
            default_matches,
            child,
            render,
        } = options;

        let queries = queries.ok_or(Error::MissingQueries)?;
        if queries.is_empty() {
            return Err(Error::EmptyQueries.into());
        }

        let default_supplied = default_matches.is_some();
        let placeholder =
            default_matches.unwrap_or_else(|| MatchState::all_matching(queries.names()));

        let media = Self {
            shared: Rc::new(RefCell::new(Shared {
                subscriptions: Vec::new(),
                matches: placeholder,
                phase: Phase::Mounting,
            })),
            observers: Rc::new(RefCell::new(Registry::new())),
            strategy: RenderStrategy::resolve(child, render),
            interactive: environment.is_interactive(),
            default_supplied,
        };

        let source = match environment {
            Environment::Interactive(source) => source,
            Environment::Headless => {
                media.shared.borrow_mut().phase = Phase::Headless;
                return Ok(media);
            }
        };

        let handler = change_handler(
            Rc::downgrade(&media.shared),
            Rc::downgrade(&media.observers),
        );

        // Dropping `subscriptions` on an early return releases what was opened
        let mut subscriptions = Vec::with_capacity(queries.len());
        for (name, descriptor) in queries.iter() {
            let query = normalizer
                .normalize(descriptor)
                .map_err(|err| err.in_query(name))?;
            let list = source.open(&query).map_err(MediaError::Host)?;
            subscriptions.push(QuerySubscription::attach(
                String::from(name),
                query,
                list,
                handler.clone(),
            ));
        }

        {
            let mut shared = media.shared.borrow_mut();
            shared.subscriptions = subscriptions;
            shared.phase = Phase::Mounted;
            shared.reaggregate();
        }

        Ok(media)
    }
}

impl<L: MediaQueryList, V> Media<L, V> {
    /// Returns the current match state.
    pub fn matches(&self) -> MatchState {
        self.shared.borrow().matches.clone()
    }

    /// Returns true if subscriptions were opened.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Returns true until `unmount` is called.
    pub fn is_mounted(&self) -> bool {
        matches!(
            self.shared.borrow().phase,
            Phase::Mounted | Phase::Headless
        )
    }

    /// Returns `(name, normalized query)` for each open subscription, in
    /// mapping order.
    pub fn query_strings(&self) -> Vec<(String, String)> {
        self.shared
            .borrow()
            .subscriptions
            .iter()
            .map(|sub| (String::from(sub.name()), String::from(sub.query())))
            .collect()
    }

    /// Number of subscriptions with a registered change handler.
    pub fn active_subscriptions(&self) -> usize {
        self.shared
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.is_active())
            .count()
    }

    /// Name of the selected render strategy.
    pub fn strategy_kind(&self) -> &'static str {
        self.strategy.kind()
    }

    /// Registers a callback run after every re-aggregation.
    pub fn on_change<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&MatchState) + 'static,
    {
        self.observers.borrow_mut().register(Rc::new(observer))
    }

    /// Removes an observer.
    ///
    /// Returns true if it was registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.borrow_mut().unregister(id)
    }

    /// Runs one re-aggregation pass and notifies observers.
    ///
    /// Does nothing for a headless mount or once unmounted.
    pub fn refresh(&self) {
        refresh(&self.shared, &self.observers);
    }

    /// Produces output for the current state, `None` when nothing renders.
    pub fn render(&self) -> Option<V> {
        let matches = self.shared.borrow().matches.clone();
        self.strategy
            .invoke(&matches, self.interactive || self.default_supplied)
    }

    /// Releases every subscription and drops all observers.
    ///
    /// Safe to call more than once. The last match state stays readable.
    pub fn unmount(&self) {
        let subscriptions = {
            let mut shared = self.shared.borrow_mut();
            if shared.phase == Phase::Unmounted {
                return;
            }
            shared.phase = Phase::Unmounted;
            core::mem::take(&mut shared.subscriptions)
        };

        for mut sub in subscriptions {
            sub.release();
        }
        self.observers.borrow_mut().clear();
    }
}

impl<L: MediaQueryList, V> Drop for Media<L, V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn refresh<L: MediaQueryList>(
    shared: &RefCell<Shared<L>>,
    observers: &RefCell<Registry<Observer>>,
) {
    let matches = {
        let mut shared = shared.borrow_mut();
        if !shared.reaggregate() {
            return;
        }
        shared.matches.clone()
    };

    let callbacks = observers.borrow().snapshot();
    for callback in callbacks {
        // An earlier observer may have unmounted
        if shared.borrow().phase != Phase::Mounted {
            return;
        }
        callback(&matches);
    }
}

fn change_handler<L: MediaQueryList + 'static>(
    shared: Weak<RefCell<Shared<L>>>,
    observers: Weak<RefCell<Registry<Observer>>>,
) -> ChangeHandler {
    Rc::new(move || {
        if let (Some(shared), Some(observers)) = (shared.upgrade(), observers.upgrade()) {
            refresh(&shared, &observers);
        }
    })
}
