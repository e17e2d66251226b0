//! Render strategies.
//!
//! A `Media` hands its match state to exactly one consumer, chosen once at
//! construction from the caller's child content and render option.

use alloc::boxed::Box;
use breakpoint_core::MatchState;

/// A function from match state to output.
pub type Producer<V> = Box<dyn Fn(&MatchState) -> V>;

/// A concrete child element that accepts the match state as a prop.
pub trait MergeMatches<V> {
    /// Returns a copy of the element with `matches` merged into its props.
    fn merge_matches(&self, matches: &MatchState) -> V;
}

impl<V, F> MergeMatches<V> for F
where
    F: Fn(&MatchState) -> V,
{
    fn merge_matches(&self, matches: &MatchState) -> V {
        self(matches)
    }
}

/// Child content as supplied by the caller.
pub enum Child<V> {
    /// A function as the sole child.
    Producer(Producer<V>),
    /// A single non-function child element.
    Element(Box<dyn MergeMatches<V>>),
    /// Several children. Never rendered by `Media` itself.
    Many,
}

/// The consumer selected for a `Media` instance.
pub enum RenderStrategy<V> {
    /// Function child, invoked on every render.
    Children(Producer<V>),
    /// Render option, invoked only when real or caller-supplied state exists.
    Render(Producer<V>),
    /// Single element child, cloned with the match state as a prop.
    Element(Box<dyn MergeMatches<V>>),
    /// Nothing to render.
    Nothing,
}

impl<V> RenderStrategy<V> {
    /// Picks the strategy from the caller's inputs.
    ///
    /// A function child wins over a render option. A single element child
    /// is used as-is. With several children or none, the render option is
    /// used if present.
    pub fn resolve(child: Option<Child<V>>, render: Option<Producer<V>>) -> Self {
        match (child, render) {
            (Some(Child::Producer(f)), _) => RenderStrategy::Children(f),
            (Some(Child::Element(e)), _) => RenderStrategy::Element(e),
            (Some(Child::Many), Some(f)) | (None, Some(f)) => RenderStrategy::Render(f),
            (Some(Child::Many), None) | (None, None) => RenderStrategy::Nothing,
        }
    }

    /// Produces output for `matches`.
    ///
    /// `has_state` is false only for the headless placeholder state; the
    /// render option is skipped in that case.
    pub fn invoke(&self, matches: &MatchState, has_state: bool) -> Option<V> {
        match self {
            RenderStrategy::Children(f) => Some(f(matches)),
            RenderStrategy::Render(f) if has_state => Some(f(matches)),
            RenderStrategy::Render(_) => None,
            RenderStrategy::Element(e) => Some(e.merge_matches(matches)),
            RenderStrategy::Nothing => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderStrategy::Children(_) => "children",
            RenderStrategy::Render(_) => "render",
            RenderStrategy::Element(_) => "element",
            RenderStrategy::Nothing => "nothing",
        }
    }
}
