//! `window.matchMedia` backed query facility.

use crate::trace::trace;
use alloc::rc::Rc;
use breakpoint_reactive::{
    ChangeHandler, Environment, ListenerToken, MediaQueryList, MediaQuerySource, Registry,
};
use core::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type Listener = Closure<dyn FnMut(JsValue)>;

/// Detects whether the host can evaluate media queries.
///
/// Returns `Headless` outside the browser main thread (server rendering,
/// workers, native builds).
pub fn probe() -> Environment<WindowSource> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if js_sys::Reflect::has(&window, &JsValue::from_str("matchMedia")).unwrap_or(false) {
                return Environment::Interactive(WindowSource::new(window));
            }
        }
    }
    trace(|| "no matchMedia available, using default matches".into());
    Environment::Headless
}

/// Opens query lists through `window.matchMedia`.
pub struct WindowSource {
    window: web_sys::Window,
}

impl WindowSource {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl MediaQuerySource for WindowSource {
    type List = WindowQueryList;
    type Error = JsValue;

    fn open(&self, query: &str) -> Result<WindowQueryList, JsValue> {
        let list = self
            .window
            .match_media(query)?
            .ok_or_else(|| JsValue::from_str("matchMedia returned null"))?;
        let list = WindowQueryList::new(list);
        trace(|| alloc::format!("opened {} (matches: {})", list.media(), list.matches()));
        Ok(list)
    }
}

/// A browser `MediaQueryList`.
///
/// Every registered handler is wrapped in a JS closure that stays alive
/// until the handler is unregistered.
pub struct WindowQueryList {
    list: web_sys::MediaQueryList,
    listeners: RefCell<Registry<Listener>>,
}

impl WindowQueryList {
    pub fn new(list: web_sys::MediaQueryList) -> Self {
        Self {
            list,
            listeners: RefCell::new(Registry::new()),
        }
    }

    /// The query string as the browser serialized it.
    pub fn media(&self) -> String {
        self.list.media()
    }
}

impl MediaQueryList for WindowQueryList {
    fn matches(&self) -> bool {
        self.list.matches()
    }

    fn register(&self, handler: ChangeHandler) -> ListenerToken {
        let listener: Listener = Closure::new(move |_event: JsValue| handler());
        let callback: &js_sys::Function = listener.as_ref().unchecked_ref();

        // Older Safari only has the deprecated addListener
        if self
            .list
            .add_event_listener_with_callback("change", callback)
            .is_err()
        {
            self.list.add_listener_with_opt_callback(Some(callback)).ok();
        }

        self.listeners.borrow_mut().register(Rc::new(listener))
    }

    fn unregister(&self, token: ListenerToken) -> bool {
        let listener = match self.listeners.borrow_mut().remove(token) {
            Some(listener) => listener,
            None => return false,
        };
        let callback: &js_sys::Function = (*listener).as_ref().unchecked_ref();

        if self
            .list
            .remove_event_listener_with_callback("change", callback)
            .is_err()
        {
            self.list.remove_listener_with_opt_callback(Some(callback)).ok();
        }
        trace(|| alloc::format!("released listener on {}", self.media()));
        true
    }
}
