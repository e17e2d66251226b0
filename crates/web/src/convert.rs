//! Type conversion utilities between JavaScript and Breakpoint types.

use alloc::string::{String, ToString};
use breakpoint_core::{Error, MatchState, QueryMapping};
use wasm_bindgen::prelude::*;

/// Converts a configuration error to a thrown JS value.
pub fn error_to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Converts the `queries` option to a query mapping.
///
/// Accepts a plain object or a `Map` whose values are query strings,
/// feature objects (`{ maxWidth: 1000 }`) or arrays of feature objects.
pub fn js_to_queries(js: &JsValue) -> Result<QueryMapping, JsValue> {
    if js.is_null() || js.is_undefined() {
        return Err(error_to_js(Error::MissingQueries));
    }
    if !js.is_object() || js_sys::Array::is_array(js) {
        return Err(error_to_js(Error::invalid_option(
            "queries",
            "expected an object",
        )));
    }

    serde_wasm_bindgen::from_value(js.clone())
        .map_err(|e| error_to_js(Error::invalid_option("queries", e.to_string())))
}

/// Converts the `defaultMatches` option.
///
/// Returns `None` when the option is absent.
pub fn js_to_match_state(js: &JsValue) -> Result<Option<MatchState>, JsValue> {
    if js.is_null() || js.is_undefined() {
        return Ok(None);
    }
    if !js.is_object() || js_sys::Array::is_array(js) {
        return Err(error_to_js(Error::invalid_option(
            "defaultMatches",
            "expected an object of booleans",
        )));
    }

    let mut state = MatchState::new();
    let entries = js_sys::Object::entries(js.unchecked_ref());
    for entry in entries.iter() {
        let pair: js_sys::Array = entry.unchecked_into();
        let key = pair
            .get(0)
            .as_string()
            .ok_or_else(|| error_to_js(Error::invalid_option("defaultMatches", "expected string keys")))?;
        let value = pair.get(1).as_bool().ok_or_else(|| {
            error_to_js(Error::invalid_option(
                "defaultMatches",
                alloc::format!("expected a boolean for {}", key),
            ))
        })?;
        state.insert(key, value);
    }
    Ok(Some(state))
}

/// Converts a match state to a plain JS object.
///
/// Keys listed in `order` come first, in that order; any other keys
/// follow.
pub fn match_state_to_js(state: &MatchState, order: &[String]) -> JsValue {
    let obj = js_sys::Object::new();
    for name in order {
        if let Some(matches) = state.get(name) {
            js_sys::Reflect::set(&obj, &JsValue::from_str(name), &JsValue::from_bool(matches)).ok();
        }
    }
    for (name, matches) in state.iter() {
        if !order.iter().any(|n| n == name) {
            js_sys::Reflect::set(&obj, &JsValue::from_str(name), &JsValue::from_bool(matches)).ok();
        }
    }
    obj.into()
}

/// Reads a property, treating a missing options object as empty.
pub(crate) fn get_option(options: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    if options.is_null() || options.is_undefined() {
        return Ok(JsValue::UNDEFINED);
    }
    js_sys::Reflect::get(options, &JsValue::from_str(key))
}
