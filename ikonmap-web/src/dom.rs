use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::error_1(&JsValue::from(message));
    } else {
        log::error!("{message}");
    }
}

/// Client size of an element in CSS pixels, `(0, 0)` when it is not mounted.
#[must_use]
pub fn element_size(node: &yew::NodeRef) -> (f64, f64) {
    node.cast::<web_sys::Element>().map_or((0.0, 0.0), |el| {
        (f64::from(el.client_width()), f64::from(el.client_height()))
    })
}
