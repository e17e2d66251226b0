//! Breakpoint Reactive - Media query match state for view code.
//!
//! This crate turns a mapping of logical names to media queries into a
//! single match state that is kept current as queries start or stop
//! matching, and hands it to one render consumer.
//!
//! # Core Concepts
//!
//! - `MediaQuerySource` / `MediaQueryList`: The platform query facility
//! - `Environment`: Whether that facility exists (it does not during SSR)
//! - `Media`: Opens subscriptions, aggregates match state, tears down
//! - `RenderStrategy`: Function child, render option or element child
//!
//! # Example
//!
//! ```ignore
//! use breakpoint_core::QueryMapping;
//! use breakpoint_reactive::{Environment, Media, MediaOptions};
//!
//! let queries = QueryMapping::try_from_iter([
//!     ("sm", "(max-width: 1000px)"),
//!     ("lg", "(max-width: 2000px)"),
//! ])?;
//!
//! let media = Media::mount(
//!     MediaOptions::new()
//!         .queries(queries)
//!         .children(|m| if m.is_match("sm") { "small" } else { "large" }),
//!     Environment::Interactive(source),
//! )?;
//!
//! media.on_change(|_| schedule_rerender());
//! let output = media.render();
//! ```

#![no_std]

extern crate alloc;

pub mod media;
pub mod registry;
pub mod render;
pub mod source;
pub mod subscription;

#[cfg(test)]
mod mock;

pub use media::{aggregate, Media, MediaError, MediaOptions, ObserverId};
pub use registry::{Registry, Token};
pub use render::{Child, MergeMatches, Producer, RenderStrategy};
pub use source::{ChangeHandler, Environment, ListenerToken, MediaQueryList, MediaQuerySource};
pub use subscription::QuerySubscription;

// Re-export the data model
pub use breakpoint_core::{
    Error, FeatureSet, FeatureValue, MatchState, MediaQueryNormalizer, Normalize, QueryDescriptor,
    QueryMapping,
};
