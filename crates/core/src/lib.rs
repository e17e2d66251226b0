//! Breakpoint Core - Data model and query normalization for Breakpoint.
//!
//! This crate provides the types shared by every Breakpoint layer:
//!
//! - `QueryDescriptor`: A raw media query string or a structured descriptor
//! - `QueryMapping`: Logical names mapped to descriptors, in insertion order
//! - `MatchState`: Logical names mapped to their current match boolean
//! - `Normalize`: Turns a descriptor into a canonical media query string
//! - `Error`: Configuration errors
//!
//! # Example
//!
//! ```rust
//! use breakpoint_core::{FeatureSet, MediaQueryNormalizer, Normalize, QueryDescriptor, QueryMapping};
//!
//! let mut queries = QueryMapping::new();
//! queries.insert("sm", "(max-width: 1000px)").unwrap();
//! queries
//!     .insert("lg", FeatureSet::new().with("maxWidth", 2000))
//!     .unwrap();
//!
//! let normalizer = MediaQueryNormalizer;
//! let lg = queries.get("lg").unwrap();
//! assert_eq!(normalizer.normalize(lg).unwrap(), "(max-width: 2000px)");
//! ```

#![no_std]

extern crate alloc;

mod descriptor;
mod error;
mod mapping;
pub mod normalize;
mod state;

pub use descriptor::{FeatureSet, FeatureValue, QueryDescriptor};
pub use error::{Error, Result};
pub use mapping::QueryMapping;
pub use normalize::{MediaQueryNormalizer, Normalize};
pub use state::MatchState;
