//! Intersection observers for the card fade-in and lazy images.

use std::rc::Rc;

use tsm_site::NodeId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::Page;

fn supported(page: &Page) -> bool {
    js_sys::Reflect::has(page.dom.window(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Observer that calls `on_visible` for every element that starts
/// intersecting. Returning true from `on_visible` stops observing it.
fn observer<F>(init: &IntersectionObserverInit, mut on_visible: F) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(&Element) -> bool + 'static,
{
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if on_visible(&target) {
                    observer.unobserve(&target);
                }
            }
        },
    );
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)?;
    callback.forget();
    Ok(observer)
}

fn observe_all(page: &Page, observer: &IntersectionObserver, nodes: &[NodeId]) {
    for node in nodes {
        if let Some(el) = page.dom.element(*node) {
            observer.observe(&el);
        }
    }
}

/// Fade cards in as they scroll into view.
pub(crate) fn observe_fade_in(page: &Rc<Page>, cards: &[NodeId]) -> Result<(), JsValue> {
    if !supported(page) {
        for card in cards {
            page.site.fade_in().on_intersect(*card);
        }
        return Ok(());
    }

    let fade = &page.site.config().fade_in;
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(fade.threshold));
    init.set_root_margin(&fade.root_margin);

    let handler_page = page.clone();
    let observer = observer(&init, move |target| {
        let node = handler_page.dom.register(target);
        handler_page.site.fade_in().on_intersect(node);
        true
    })?;
    observe_all(page, &observer, cards);
    Ok(())
}

/// Swap real image sources in as images scroll into view.
pub(crate) fn observe_lazy_images(page: &Rc<Page>, images: &[NodeId]) -> Result<(), JsValue> {
    if !supported(page) {
        for image in images {
            page.site.lazy_images().on_intersect(*image);
        }
        return Ok(());
    }

    let handler_page = page.clone();
    let observer = observer(&IntersectionObserverInit::new(), move |target| {
        let node = handler_page.dom.register(target);
        handler_page.site.lazy_images().on_intersect(node)
    })?;
    observe_all(page, &observer, images);
    Ok(())
}
