//! Google Analytics bridge

use tsm_site::{LogTracker, TrackEvent, Tracker};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Forwards events to a global `gtag` function when the page loaded one, and
/// logs every event either way.
pub struct GtagTracker {
    window: Window,
}

impl GtagTracker {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn gtag(&self) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.window, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }
}

impl Tracker for GtagTracker {
    fn track(&self, event: &TrackEvent) {
        if let Some(gtag) = self.gtag() {
            let params = js_sys::Object::new();
            let _ = js_sys::Reflect::set(
                &params,
                &"event_category".into(),
                &JsValue::from_str(&event.category),
            );
            let _ = js_sys::Reflect::set(
                &params,
                &"event_label".into(),
                &JsValue::from_str(&event.label),
            );
            if let Err(e) = gtag.call3(
                &JsValue::UNDEFINED,
                &JsValue::from_str("event"),
                &JsValue::from_str(&event.action),
                &params,
            ) {
                tracing::warn!("[analytics] gtag threw: {:?}", e);
            }
        }
        LogTracker.track(event);
    }
}
