//! `web-sys` backed [`Dom`].
//!
//! Elements handed to the core get a [`NodeId`] stamped onto the JS object
//! under a private property, so an element seen twice (say as a query result
//! and later as an event target) maps back to the same id. [`Dom::remove`]
//! releases the id along with the element.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tsm_site::{Dom, NodeId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Window,
};

const NODE_KEY: &str = "__tsmNodeId";

/// Live browser document
pub struct WebDom {
    window: Window,
    document: Document,
    next_id: Cell<u64>,
    elements: RefCell<HashMap<NodeId, Element>>,
}

impl WebDom {
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            next_id: Cell::new(1),
            elements: RefCell::new(HashMap::new()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Id for `element`, issuing one on first sight.
    pub fn register(&self, element: &Element) -> NodeId {
        let key = JsValue::from_str(NODE_KEY);
        if let Some(id) = js_sys::Reflect::get(element, &key)
            .ok()
            .and_then(|v| v.as_f64())
        {
            let node = NodeId(id as u64);
            if self.elements.borrow().get(&node) == Some(element) {
                return node;
            }
        }

        let node = NodeId(self.next_id.get());
        self.next_id.set(node.0 + 1);
        self.elements.borrow_mut().insert(node, element.clone());
        let _ = js_sys::Reflect::set(element, &key, &JsValue::from_f64(node.0 as f64));
        node
    }

    /// Forget `node`; a later sighting of the same element gets a fresh id.
    fn release(&self, node: NodeId) -> Option<Element> {
        let element = self.elements.borrow_mut().remove(&node)?;
        let _ = js_sys::Reflect::delete_property(&element, &JsValue::from_str(NODE_KEY));
        Some(element)
    }

    /// Elements currently holding an id
    pub fn registered(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.elements.borrow().get(&node).cloned()
    }

    fn html_element(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }
}

fn warn_js(op: &str, err: JsValue) {
    tracing::warn!("[dom] {} failed: {:?}", op, err);
}

impl Dom for WebDom {
    fn query(&self, selector: &str) -> Option<NodeId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|el| self.register(&el)),
            Err(e) => {
                warn_js("query_selector", e);
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                warn_js("query_selector_all", e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.register(&el))
            .collect()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(a), Some(n)) => a.contains(Some(&n)),
            _ => false,
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.is_connected())
    }

    fn create_element(&self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(el) => self.register(&el),
            Err(e) => {
                warn_js("create_element", e);
                NodeId(0)
            }
        }
    }

    fn append_to_head(&self, node: NodeId) {
        if let (Some(head), Some(el)) = (self.document.head(), self.element(node)) {
            if let Err(e) = head.append_child(&el) {
                warn_js("append_to_head", e);
            }
        }
    }

    fn append_to_body(&self, node: NodeId) {
        if let (Some(body), Some(el)) = (self.document.body(), self.element(node)) {
            if let Err(e) = body.append_child(&el) {
                warn_js("append_to_body", e);
            }
        }
    }

    fn remove(&self, node: NodeId) {
        if let Some(el) = self.release(node) {
            el.remove();
        }
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.set_attribute(name, value) {
                warn_js("set_attribute", e);
            }
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.remove_attribute(name) {
                warn_js("remove_attribute", e);
            }
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: NodeId, value: &str) {
        let Some(el) = self.element(node) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn next_sibling_text(&self, node: NodeId) -> Option<String> {
        self.element(node)?.next_element_sibling()?.text_content()
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self
            .html_element(node)?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let Some(el) = self.html_element(node) else {
            return;
        };
        let style = el.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            warn_js("set_style", e);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.class_list().add_1(class) {
                warn_js("add_class", e);
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.class_list().remove_1(class) {
                warn_js("remove_class", e);
            }
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.element(node) else {
            return false;
        };
        el.class_list().toggle(class).unwrap_or_else(|e| {
            warn_js("toggle_class", e);
            false
        })
    }

    fn offset_width(&self, node: NodeId) -> f64 {
        self.html_element(node)
            .map_or(0.0, |el| f64::from(el.offset_width()))
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn location_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }
}
