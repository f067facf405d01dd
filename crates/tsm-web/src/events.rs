//! DOM event listeners
//!
//! Every listener closure holds an `Rc<Page>` and is leaked with
//! `Closure::forget`; they live as long as the page does.

use std::rc::Rc;

use tsm_site::{anchor_target, NodeId, SubmitOutcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, HtmlFormElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions,
};

use crate::form::WebFormSurface;
use crate::Page;

type Handler = fn(&Page, NodeId, &Event);

pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!("[events] failed to bind {}: {:?}", event, e);
    }
    closure.forget();
}

/// Bind `handler` to `event` on every element matching `selector`.
fn listen_all(page: &Rc<Page>, selector: &str, event: &str, handler: Handler) -> usize {
    let nodes = page.site.dom().query_all(selector);
    let mut bound = 0;
    for node in nodes {
        let Some(el) = page.dom.element(node) else {
            continue;
        };
        let page = page.clone();
        listen(&el, event, move |ev| handler(&page, node, &ev));
        bound += 1;
    }
    bound
}

fn listen_one(page: &Rc<Page>, selector: &str, event: &str, handler: Handler) {
    let Some(node) = page.site.dom().query(selector) else {
        tracing::debug!("[events] nothing matches {}", selector);
        return;
    };
    if let Some(el) = page.dom.element(node) {
        let page = page.clone();
        listen(&el, event, move |ev| handler(&page, node, &ev));
    }
}

fn event_target(ev: &Event) -> Option<Element> {
    ev.target()?.dyn_into::<Element>().ok()
}

fn scroll_into_view(el: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

fn on_anchor_click(page: &Page, node: NodeId, ev: &Event) {
    let href = page.site.dom().get_attribute(node, "href").unwrap_or_default();
    if anchor_target(&href).is_none() {
        return;
    }
    ev.prevent_default();
    if let Some(el) = page
        .site
        .on_anchor_click(&href)
        .and_then(|target| page.dom.element(target))
    {
        scroll_into_view(&el);
    }
}

fn on_submit(page: &Page, node: NodeId, ev: &Event) {
    ev.prevent_default();
    let form = page
        .dom
        .element(node)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    let surface = WebFormSurface::new(
        page.dom.clone(),
        page.site.config().selectors.clone(),
        form,
    );

    if let SubmitOutcome::Sent { mailto } = page.site.on_submit(&surface) {
        if page.site.config().contact.open_mail_client {
            if let Err(e) = page.dom.window().location().set_href(&mailto) {
                tracing::warn!("[events] could not open mail client: {:?}", e);
            }
        }
    }
}

fn on_scroll_top_click(page: &Page, _node: NodeId, _ev: &Event) {
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    page.dom.window().scroll_to_with_scroll_to_options(&options);
}

/// Attach every page listener. Call once, after [`Site::on_load`](tsm_site::Site::on_load).
pub(crate) fn bind(page: &Rc<Page>) {
    let selectors = page.site.config().selectors.clone();

    listen_one(page, &selectors.menu_trigger, "click", |page, _, _| {
        page.site.on_menu_trigger_click();
    });
    listen_all(page, &selectors.nav_links, "click", |page, _, _| {
        page.site.on_nav_link_click();
    });
    {
        let handler_page = page.clone();
        listen(page.dom.document(), "click", move |ev| {
            if let Some(el) = event_target(&ev) {
                let node = handler_page.dom.register(&el);
                handler_page.site.on_document_click(node);
            }
        });
    }

    listen_all(page, &selectors.anchors, "click", on_anchor_click);
    listen_one(page, &selectors.contact_form, "submit", on_submit);

    listen_all(page, &selectors.form_fields, "blur", |page, node, _| {
        page.site.on_field_blur(node);
    });
    listen_all(page, &selectors.form_fields, "input", |page, node, _| {
        page.site.on_field_input(node);
    });

    {
        let handler_page = page.clone();
        listen(page.dom.window(), "scroll", move |_| {
            let offset = handler_page.dom.window().scroll_y().unwrap_or(0.0);
            handler_page.site.on_scroll(offset);
        });
    }
    if let Some(button) = page.site.scroll_top() {
        if let Some(el) = page.dom.element(button.node()) {
            let handler_page = page.clone();
            let node = button.node();
            listen(&el, "click", move |ev| {
                on_scroll_top_click(&handler_page, node, &ev)
            });
        }
    }

    let buttons = listen_all(page, &selectors.buttons, "click", |page, node, _| {
        page.site.on_button_click(node);
    });
    let social = listen_all(page, &selectors.social_links, "click", |page, node, _| {
        page.site.on_social_click(node);
    });
    let videos = listen_all(page, &selectors.video_placeholders, "click", |page, node, _| {
        page.site.on_video_click(node);
    });

    tracing::debug!(
        "[events] bound {} buttons, {} social links, {} video placeholders",
        buttons,
        social,
        videos
    );
}
