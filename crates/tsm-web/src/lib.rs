//! Browser entry point for The Skilled Musician site.
//!
//! `start` runs when the wasm module is instantiated. It reads an optional
//! JSON config block from the page, builds a [`Site`] over the live document
//! and wires every listener and observer to it.
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "notification": { "display_ms": 4000 } }
//! </script>
//! <script type="module">
//!   import init, { show_alert } from "./pkg/tsm_web.js";
//!   await init();
//!   show_alert("Welcome back!", "success");
//! </script>
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::Level;
use tsm_site::{Dom, Site, SiteConfig, TrackEvent};
use wasm_bindgen::prelude::*;

mod analytics;
mod dom;
mod events;
mod form;
mod logging;
mod observer;
mod scheduler;

pub use analytics::GtagTracker;
pub use dom::WebDom;
pub use form::WebFormSurface;
pub use logging::ConsoleLayer;
pub use scheduler::WebScheduler;

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Everything the listeners need, shared behind one `Rc`.
pub(crate) struct Page {
    pub(crate) dom: Rc<WebDom>,
    pub(crate) site: Site,
}

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

fn current_page() -> Option<Rc<Page>> {
    PAGE.with(|page| page.borrow().clone())
}

fn load_config(dom: &WebDom) -> SiteConfig {
    let Some(node) = dom.query(&format!("#{}", CONFIG_ELEMENT_ID)) else {
        return SiteConfig::default();
    };
    let text = dom.text(node);
    if text.trim().is_empty() {
        return SiteConfig::default();
    }
    match SiteConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("[start] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            SiteConfig::default()
        }
    }
}

fn on_ready(page: &Rc<Page>) {
    let report = page.site.on_load();
    events::bind(page);
    if let Err(e) = observer::observe_fade_in(page, &report.fade_cards) {
        tracing::warn!("[start] fade-in observer unavailable: {:?}", e);
    }
    if let Err(e) = observer::observe_lazy_images(page, &report.lazy_images) {
        tracing::warn!("[start] lazy image observer unavailable: {:?}", e);
    }
    tracing::info!(
        "[start] page ready: {} cards, {} lazy images, {} wide tables",
        report.fade_cards.len(),
        report.lazy_images.len(),
        report.wide_tables
    );
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    });

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dom = Rc::new(WebDom::new(window.clone())?);
    let config = load_config(&dom);
    let scheduler = Rc::new(WebScheduler::new(window.clone()));
    let site = Site::new(dom.clone(), scheduler, config)
        .with_tracker(Rc::new(GtagTracker::new(window)));

    let page = Rc::new(Page { dom, site });
    PAGE.with(|slot| *slot.borrow_mut() = Some(page.clone()));

    if page.dom.document().ready_state() == "loading" {
        let ready_page = page.clone();
        let mut fired = false;
        events::listen(page.dom.document(), "DOMContentLoaded", move |_| {
            if !fired {
                fired = true;
                on_ready(&ready_page);
            }
        });
    } else {
        on_ready(&page);
    }
    Ok(())
}

/// Show a toast. `kind` is `"success"` or anything else for an error toast.
/// Returns the notification id, or `None` before `start` has run.
#[wasm_bindgen]
pub fn show_alert(message: &str, kind: &str) -> Option<f64> {
    let page = current_page()?;
    Some(page.site.show_alert(message, kind) as f64)
}

/// Dismiss a toast early.
#[wasm_bindgen]
pub fn dismiss_alert(id: f64) -> bool {
    current_page().is_some_and(|page| page.site.notifier().dismiss(id as u64))
}

/// Record an analytics event.
#[wasm_bindgen]
pub fn track_event(category: &str, action: &str, label: &str) {
    let event = TrackEvent::new(category, action, label);
    match current_page() {
        Some(page) => page.site.track(&event),
        None => tracing::debug!("[analytics] dropped before start: {}", event),
    }
}
