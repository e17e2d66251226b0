//! Debug logging to the browser console.
//!
//! Compiled in only with the `trace` feature on wasm32; otherwise the
//! message closure is never evaluated.

#[cfg(all(target_arch = "wasm32", feature = "trace"))]
use wasm_bindgen::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "trace"))]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn debug(s: &str);
}

#[inline]
pub(crate) fn trace<F>(message: F)
where
    F: FnOnce() -> alloc::string::String,
{
    #[cfg(all(target_arch = "wasm32", feature = "trace"))]
    {
        debug(&alloc::format!("[breakpoint] {}", message()));
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "trace")))]
    {
        let _ = message;
    }
}
