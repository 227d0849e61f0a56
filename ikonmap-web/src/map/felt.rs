//! wasm-bindgen bindings to `static/js/felt-bridge.js`, which wraps the Felt
//! embedding SDK under `window.ikonMap`.

use super::{FeatureClick, MapService, Subscription};
use crate::dom;
use ikonmap_core::Viewport;
use wasm_bindgen::prelude::*;
use yew::Callback;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ikonMap, js_name = embed, catch)]
    async fn embed_map(container_id: &str, map_id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ikonMap, js_name = setViewport)]
    fn set_viewport(viewport: JsValue);

    #[wasm_bindgen(js_namespace = ikonMap, js_name = selectFeature)]
    fn select_feature(resort_id: Option<String>);

    #[wasm_bindgen(js_namespace = ikonMap, js_name = showOnly)]
    fn show_only(resort_ids: Vec<String>);

    #[wasm_bindgen(js_namespace = ikonMap, js_name = onViewportChange)]
    fn on_viewport_change(handler: &Closure<dyn FnMut(JsValue)>) -> u32;

    #[wasm_bindgen(js_namespace = ikonMap, js_name = onFeatureClick)]
    fn on_feature_click(handler: &Closure<dyn FnMut(JsValue)>) -> u32;

    #[wasm_bindgen(js_namespace = ikonMap, js_name = off)]
    fn off(handle: u32);
}

pub struct FeltBridge {
    map_id: String,
}

impl FeltBridge {
    #[must_use]
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
        }
    }
}

fn listen<T, F>(register: F, handler: Callback<T>) -> Subscription
where
    T: serde::de::DeserializeOwned + 'static,
    F: FnOnce(&Closure<dyn FnMut(JsValue)>) -> u32,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match serde_wasm_bindgen::from_value::<T>(value) {
            Ok(event) => handler.emit(event),
            Err(err) => log::warn!("ignoring malformed map event: {err}"),
        }
    });
    let handle = register(&closure);
    Subscription::new(move || {
        off(handle);
        drop(closure);
    })
}

impl MapService for FeltBridge {
    fn embed(&self, container_id: &str, on_ready: Callback<Result<(), String>>) {
        let container_id = container_id.to_string();
        let map_id = self.map_id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = embed_map(&container_id, &map_id)
                .await
                .map(|_| ())
                .map_err(|err| dom::js_error_message(&err));
            if let Err(msg) = &result {
                log::warn!("map embed failed: {msg}");
                dom::console_error(&format!("Failed to embed map: {msg}"));
            }
            on_ready.emit(result);
        });
    }

    fn set_viewport(&self, viewport: &Viewport) {
        match serde_wasm_bindgen::to_value(viewport) {
            Ok(value) => set_viewport(value),
            Err(err) => log::warn!("could not encode viewport: {err}"),
        }
    }

    fn select_feature(&self, resort_id: Option<&str>) {
        select_feature(resort_id.map(str::to_string));
    }

    fn apply_filter(&self, visible_ids: &[String]) {
        show_only(visible_ids.to_vec());
    }

    fn subscribe_viewport(&self, handler: Callback<Viewport>) -> Subscription {
        listen(on_viewport_change, handler)
    }

    fn subscribe_click(&self, handler: Callback<FeatureClick>) -> Subscription {
        listen(on_feature_click, handler)
    }
}
