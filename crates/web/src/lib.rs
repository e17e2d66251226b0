//! Breakpoint Web - WASM bindings for Breakpoint.
//!
//! This crate exposes media query match state to JavaScript view code,
//! backed by `window.matchMedia`. Outside the browser (server rendering)
//! it falls back to the caller's default matches.
//!
//! # Core Components
//!
//! - `JsMedia` (exported as `Media`): The adapter class
//! - `WindowSource` / `WindowQueryList`: `matchMedia` query facility
//! - `probe`: Detects whether `matchMedia` is available
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import { Media } from 'breakpoint';
//!
//! const media = new Media({
//!   queries: { small: '(max-width: 599px)', print: { print: true } },
//!   render: matches => (matches.small ? compactView() : fullView()),
//! });
//!
//! media.subscribe(() => mount(media.render()));
//! ```

extern crate alloc;

pub mod convert;
pub mod media;
mod trace;
pub mod window;

pub use convert::{js_to_match_state, js_to_queries, match_state_to_js};
pub use media::JsMedia;
pub use window::{probe, WindowQueryList, WindowSource};
