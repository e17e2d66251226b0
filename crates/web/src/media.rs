//! JavaScript `Media` class.
//!
//! ```javascript
//! import { Media } from 'breakpoint';
//!
//! const media = new Media({
//!   queries: { sm: '(max-width: 1000px)', lg: { maxWidth: 2000 } },
//!   defaultMatches: { sm: true, lg: false },
//!   children: matches => matches.sm ? 'small' : 'large',
//! });
//!
//! const unsubscribe = media.subscribe(() => rerender(media.render()));
//! // on unmount
//! unsubscribe();
//! media.dispose();
//! ```

use crate::convert::{error_to_js, get_option, js_to_match_state, js_to_queries, match_state_to_js};
use crate::trace::trace;
use crate::window::{probe, WindowQueryList, WindowSource};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use breakpoint_core::{Error, MatchState};
use breakpoint_reactive::{Child, Environment, Media, MediaError, MediaOptions, MergeMatches, Producer};
use core::cell::RefCell;
use wasm_bindgen::prelude::*;

/// Output of a JS producer: its return value, or what it threw.
type Rendered = Result<JsValue, JsValue>;

/// A single element child; rendered as a copy with `props.matches` set.
struct ElementChild {
    element: JsValue,
    names: Rc<Vec<String>>,
}

impl MergeMatches<Rendered> for ElementChild {
    fn merge_matches(&self, matches: &MatchState) -> Rendered {
        let element = self.element.unchecked_ref::<js_sys::Object>();
        let clone = js_sys::Object::assign(&js_sys::Object::new(), element);

        let props = js_sys::Object::new();
        let old_props = js_sys::Reflect::get(element, &JsValue::from_str("props"))?;
        if old_props.is_object() {
            js_sys::Object::assign(&props, old_props.unchecked_ref());
        }
        js_sys::Reflect::set(
            &props,
            &JsValue::from_str("matches"),
            &match_state_to_js(matches, &self.names),
        )?;
        js_sys::Reflect::set(&clone, &JsValue::from_str("props"), &props)?;
        Ok(clone.into())
    }
}

fn producer(function: js_sys::Function, names: Rc<Vec<String>>) -> Producer<Rendered> {
    Box::new(move |matches: &MatchState| {
        function.call1(&JsValue::NULL, &match_state_to_js(matches, &names))
    })
}

fn js_to_child(children: JsValue, names: &Rc<Vec<String>>) -> Result<Option<Child<Rendered>>, JsValue> {
    if children.is_null() || children.is_undefined() {
        return Ok(None);
    }
    if let Some(function) = children.dyn_ref::<js_sys::Function>() {
        return Ok(Some(Child::Producer(producer(function.clone(), names.clone()))));
    }
    if js_sys::Array::is_array(&children) {
        // Preact passes an empty array when there are no children
        let len = children.unchecked_ref::<js_sys::Array>().length();
        return Ok(if len == 0 { None } else { Some(Child::Many) });
    }
    if children.is_object() {
        return Ok(Some(Child::Element(Box::new(ElementChild {
            element: children,
            names: names.clone(),
        }))));
    }
    Err(error_to_js(Error::invalid_option(
        "children",
        "expected a function, an element or an array",
    )))
}

fn js_to_render(render: JsValue, names: &Rc<Vec<String>>) -> Result<Option<Producer<Rendered>>, JsValue> {
    if render.is_null() || render.is_undefined() {
        return Ok(None);
    }
    match render.dyn_into::<js_sys::Function>() {
        Ok(function) => Ok(Some(producer(function, names.clone()))),
        Err(_) => Err(error_to_js(Error::invalid_option("render", "expected a function"))),
    }
}

/// Media query match state for JavaScript view code.
#[wasm_bindgen(js_name = Media)]
pub struct JsMedia {
    inner: Rc<Media<WindowQueryList, Rendered>>,
    names: Rc<Vec<String>>,
}

impl JsMedia {
    /// Builds a `Media` against an explicit environment.
    pub fn with_environment(
        options: &JsValue,
        environment: Environment<WindowSource>,
    ) -> Result<JsMedia, JsValue> {
        let queries = js_to_queries(&get_option(options, "queries")?)?;
        let names: Rc<Vec<String>> = Rc::new(queries.names().map(String::from).collect());

        let default_matches = js_to_match_state(&get_option(options, "defaultMatches")?)?;
        let child = js_to_child(get_option(options, "children")?, &names)?;
        let render = js_to_render(get_option(options, "render")?, &names)?;

        let mut media_options = MediaOptions::new().queries(queries);
        if let Some(defaults) = default_matches {
            media_options = media_options.default_matches(defaults);
        }
        if let Some(child) = child {
            media_options = media_options.child(child);
        }
        if let Some(render) = render {
            media_options = media_options.render(render);
        }

        let inner = Media::mount(media_options, environment).map_err(|err| match err {
            MediaError::Config(err) => error_to_js(err),
            MediaError::Host(err) => err,
        })?;

        trace(|| {
            alloc::format!(
                "mounted {} queries (interactive: {}, strategy: {})",
                names.len(),
                inner.is_interactive(),
                inner.strategy_kind()
            )
        });

        Ok(JsMedia {
            inner: Rc::new(inner),
            names,
        })
    }
}

#[wasm_bindgen(js_class = Media)]
impl JsMedia {
    /// Creates a `Media` from `{ queries, defaultMatches?, children?, render? }`.
    ///
    /// Throws on a missing or malformed option, and rethrows whatever
    /// `matchMedia` throws.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsMedia, JsValue> {
        Self::with_environment(&options, probe())
    }

    /// Current match state as `{ name: boolean }`.
    #[wasm_bindgen(getter)]
    pub fn matches(&self) -> JsValue {
        match_state_to_js(&self.inner.matches(), &self.names)
    }

    /// Whether live query subscriptions were opened.
    #[wasm_bindgen(getter, js_name = isInteractive)]
    pub fn is_interactive(&self) -> bool {
        self.inner.is_interactive()
    }

    /// Runs the selected consumer. Returns `null` when nothing renders.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        self.inner.render().unwrap_or(Ok(JsValue::NULL))
    }

    /// Subscribes to match state changes.
    ///
    /// The callback receives the new match state after every change.
    /// Returns an unsubscribe function.
    pub fn subscribe(&self, callback: js_sys::Function) -> js_sys::Function {
        let names = self.names.clone();
        let id = self.inner.on_change(move |matches| {
            callback
                .call1(&JsValue::NULL, &match_state_to_js(matches, &names))
                .ok();
        });

        let inner = Rc::downgrade(&self.inner);
        let called = Rc::new(RefCell::new(false));
        let unsubscribe = Closure::wrap(Box::new(move || {
            let mut c = called.borrow_mut();
            if !*c {
                *c = true;
                if let Some(inner) = inner.upgrade() {
                    inner.remove_observer(id);
                }
            }
        }) as Box<dyn FnMut()>);
        let js_fn: js_sys::Function = unsubscribe.as_ref().unchecked_ref::<js_sys::Function>().clone();
        unsubscribe.forget();
        js_fn
    }

    /// Normalized query string per name.
    #[wasm_bindgen(js_name = queryStrings)]
    pub fn query_strings(&self) -> JsValue {
        let obj = js_sys::Object::new();
        for (name, query) in self.inner.query_strings() {
            js_sys::Reflect::set(&obj, &JsValue::from_str(&name), &JsValue::from_str(&query)).ok();
        }
        obj.into()
    }

    /// Releases every query subscription. Safe to call more than once.
    pub fn dispose(&self) {
        self.inner.unmount();
        trace(|| "disposed".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_object(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = js_sys::Object::new();
        for (key, value) in entries {
            js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
        }
        obj.into()
    }

    fn queries() -> JsValue {
        js_object(&[
            ("sm", JsValue::from_str("(max-width: 1000px)")),
            ("lg", JsValue::from_str("(max-width: 2000px)")),
            ("xl", JsValue::from_str("(max-width: 3000px)")),
        ])
    }

    fn identity() -> JsValue {
        js_sys::Function::new_with_args("matches", "return matches").into()
    }

    fn flag(obj: &JsValue, key: &str) -> Option<bool> {
        js_sys::Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_bool()
    }

    fn headless(options: &JsValue) -> Result<JsMedia, JsValue> {
        JsMedia::with_environment(options, Environment::Headless)
    }

    #[wasm_bindgen_test]
    fn test_headless_children_all_true() {
        let media = headless(&js_object(&[("queries", queries()), ("children", identity())])).unwrap();
        let rendered = media.render().unwrap();

        assert!(!media.is_interactive());
        assert_eq!(flag(&rendered, "sm"), Some(true));
        assert_eq!(flag(&rendered, "lg"), Some(true));
        assert_eq!(flag(&rendered, "xl"), Some(true));
    }

    #[wasm_bindgen_test]
    fn test_headless_default_matches() {
        let defaults = js_object(&[
            ("sm", JsValue::TRUE),
            ("lg", JsValue::FALSE),
            ("xl", JsValue::FALSE),
        ]);
        let media = headless(&js_object(&[
            ("queries", queries()),
            ("defaultMatches", defaults),
            ("children", identity()),
        ]))
        .unwrap();
        let rendered = media.render().unwrap();

        assert_eq!(flag(&rendered, "sm"), Some(true));
        assert_eq!(flag(&rendered, "lg"), Some(false));
        assert_eq!(flag(&rendered, "xl"), Some(false));
    }

    #[wasm_bindgen_test]
    fn test_headless_render_without_default_is_null() {
        let media = headless(&js_object(&[("queries", queries()), ("render", identity())])).unwrap();
        assert!(media.render().unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_element_child_gets_matches_prop() {
        let props = js_object(&[("label", JsValue::from_str("x"))]);
        let element = js_object(&[("type", JsValue::from_str("span")), ("props", props)]);
        let media = headless(&js_object(&[("queries", queries()), ("children", element.clone())])).unwrap();

        let rendered = media.render().unwrap();
        let new_props = js_sys::Reflect::get(&rendered, &JsValue::from_str("props")).unwrap();
        let matches = js_sys::Reflect::get(&new_props, &JsValue::from_str("matches")).unwrap();

        assert_eq!(flag(&matches, "sm"), Some(true));
        assert_eq!(
            js_sys::Reflect::get(&new_props, &JsValue::from_str("label")).unwrap().as_string().as_deref(),
            Some("x")
        );
        // The original element is left untouched
        let old_props = js_sys::Reflect::get(&element, &JsValue::from_str("props")).unwrap();
        assert!(js_sys::Reflect::get(&old_props, &JsValue::from_str("matches")).unwrap().is_undefined());
    }

    #[wasm_bindgen_test]
    fn test_empty_children_array_renders_null() {
        let media = headless(&js_object(&[
            ("queries", queries()),
            ("children", js_sys::Array::new().into()),
        ]))
        .unwrap();
        assert!(media.render().unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_producer_error_is_returned() {
        let throwing: JsValue = js_sys::Function::new_no_args("throw new Error('boom')").into();
        let media = headless(&js_object(&[("queries", queries()), ("children", throwing)])).unwrap();
        assert!(media.render().is_err());
    }

    #[wasm_bindgen_test]
    fn test_missing_queries_throws() {
        let err = headless(&js_object(&[("children", identity())])).err().unwrap();
        assert!(err.as_string().unwrap().contains("queries"));
    }

    #[wasm_bindgen_test]
    fn test_bad_render_option_throws() {
        let result = headless(&js_object(&[("queries", queries()), ("render", JsValue::from_f64(1.0))]));
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_browser_matches() {
        let queries = js_object(&[
            ("always", JsValue::from_str("(min-width: 0px)")),
            ("never", JsValue::from_str("not all")),
        ]);
        let media = JsMedia::new(js_object(&[("queries", queries), ("children", identity())])).unwrap();

        assert!(media.is_interactive());
        let rendered = media.render().unwrap();
        assert_eq!(flag(&rendered, "always"), Some(true));
        assert_eq!(flag(&rendered, "never"), Some(false));

        let strings = media.query_strings();
        assert_eq!(
            js_sys::Reflect::get(&strings, &JsValue::from_str("always")).unwrap().as_string().as_deref(),
            Some("(min-width: 0px)")
        );

        media.dispose();
        media.dispose();
        assert_eq!(flag(&media.matches(), "always"), Some(true));
    }

    #[wasm_bindgen_test]
    fn test_structured_query_in_browser() {
        let structured = js_object(&[("minWidth", JsValue::from_f64(0.0))]);
        let media = JsMedia::new(js_object(&[
            ("queries", js_object(&[("any", structured)])),
            ("children", identity()),
        ]))
        .unwrap();

        let strings = media.query_strings();
        assert_eq!(
            js_sys::Reflect::get(&strings, &JsValue::from_str("any")).unwrap().as_string().as_deref(),
            Some("(min-width: 0px)")
        );
        assert_eq!(flag(&media.matches(), "any"), Some(true));
    }
}
