//! In-memory document for testing.
//!
//! A tiny element tree (`html > head, body`) with attributes, classes, inline
//! styles, text and form values. Layout is faked: widths are whatever the test
//! sets.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::selector::{Compound, Selector};
use super::Dom;
use crate::types::NodeId;

#[derive(Clone, Debug, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    width: f64,
}

/// In-memory [`Dom`] for testing.
pub struct MemoryDom {
    nodes: RefCell<BTreeMap<NodeId, Element>>,
    next_id: Cell<u64>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    viewport_width: Cell<f64>,
    path: RefCell<String>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create an empty document with `html`, `head` and `body`.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            viewport_width: Cell::new(1280.0),
            path: RefCell::new(String::from("/")),
        };
        dom.root = dom.create_element("html");
        dom.head = dom.create_element("head");
        dom.body = dom.create_element("body");
        dom.append_child(dom.root, dom.head);
        dom.append_child(dom.root, dom.body);
        dom
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Attach `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        if !nodes.contains_key(&parent) {
            return;
        }
        if let Some(el) = nodes.get_mut(&child) {
            el.parent = Some(parent);
        } else {
            return;
        }
        if let Some(p) = nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    /// Create an element with attributes and attach it under `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    pub fn set_offset_width(&self, node: NodeId, width: f64) {
        if let Some(el) = self.nodes.borrow_mut().get_mut(&node) {
            el.width = width;
        }
    }

    pub fn set_location_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }

    /// Number of attached children of `node`.
    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes
            .borrow()
            .get(&node)
            .map_or(0, |el| el.children.len())
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes.get_mut(&node).and_then(|el| el.parent.take()) else {
            return;
        };
        if let Some(p) = nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
    }

    fn with_element<R>(&self, node: NodeId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.nodes.borrow().get(&node).map(f)
    }

    fn with_element_mut(&self, node: NodeId, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.nodes.borrow_mut().get_mut(&node) {
            f(el);
        }
    }

    /// Attached elements in document order (pre-order from `html`).
    fn document_order(&self) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = nodes.get(&id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches_compound(el: &Element, compound: &Compound) -> bool {
        if compound.tag.as_deref().is_some_and(|t| t != el.tag) {
            return false;
        }
        if compound
            .id
            .as_deref()
            .is_some_and(|id| el.attrs.get("id").map(String::as_str) != Some(id))
        {
            return false;
        }
        if !compound.classes.iter().all(|c| el.classes.contains(c)) {
            return false;
        }
        compound.attrs.iter().all(|attr| match attr.name.as_str() {
            "class" => {
                let joined = el.classes.join(" ");
                attr.matches((!el.classes.is_empty()).then_some(joined.as_str()))
            }
            name => attr.matches(el.attrs.get(name).map(String::as_str)),
        })
    }

    fn matches_chain(&self, node: NodeId, chain: &[Compound]) -> bool {
        let nodes = self.nodes.borrow();
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        let Some(el) = nodes.get(&node) else {
            return false;
        };
        if !Self::matches_compound(el, last) {
            return false;
        }

        let mut cursor = el.parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(id) = cursor else {
                    return false;
                };
                let Some(anc) = nodes.get(&id) else {
                    return false;
                };
                cursor = anc.parent;
                if Self::matches_compound(anc, compound) {
                    break;
                }
            }
        }
        true
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("[dom] {}", e);
                return Vec::new();
            }
        };
        self.document_order()
            .into_iter()
            .filter(|id| {
                parsed
                    .alternatives()
                    .iter()
                    .any(|chain| self.matches_chain(*id, chain))
            })
            .collect()
    }
}

impl Dom for MemoryDom {
    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(selector)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = nodes.get(&id).and_then(|el| el.parent);
        }
        false
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let id = NodeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.nodes.borrow_mut().insert(
            id,
            Element {
                tag: tag.to_ascii_lowercase(),
                ..Default::default()
            },
        );
        id
    }

    fn append_to_head(&self, node: NodeId) {
        self.append_child(self.head, node);
    }

    fn append_to_body(&self, node: NodeId) {
        self.append_child(self.body, node);
    }

    fn remove(&self, node: NodeId) {
        self.detach(node);
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.with_element(node, |el| match name.as_str() {
            "class" => (!el.classes.is_empty()).then(|| el.classes.join(" ")),
            _ => el.attrs.get(&name).cloned(),
        })
        .flatten()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        self.with_element_mut(node, |el| match name.as_str() {
            "class" => el.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {
                el.attrs.insert(name.clone(), value.to_string());
            }
        });
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        let name = name.to_ascii_lowercase();
        self.with_element_mut(node, |el| match name.as_str() {
            "class" => el.classes.clear(),
            _ => {
                el.attrs.remove(&name);
            }
        });
    }

    fn text(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(el) = nodes.get(&id) {
                out.push_str(&el.text);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    fn set_text(&self, node: NodeId, text: &str) {
        let children = self
            .with_element(node, |el| el.children.clone())
            .unwrap_or_default();
        for child in children {
            self.detach(child);
        }
        self.with_element_mut(node, |el| el.text = text.to_string());
    }

    fn value(&self, node: NodeId) -> String {
        self.with_element(node, |el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, node: NodeId, value: &str) {
        self.with_element_mut(node, |el| el.value = value.to_string());
    }

    fn next_sibling_text(&self, node: NodeId) -> Option<String> {
        let sibling = {
            let nodes = self.nodes.borrow();
            let parent = nodes.get(&node)?.parent?;
            let siblings = &nodes.get(&parent)?.children;
            let pos = siblings.iter().position(|c| *c == node)?;
            *siblings.get(pos + 1)?
        };
        Some(self.text(sibling))
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.with_element(node, |el| el.styles.get(property).cloned())
            .flatten()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        self.with_element_mut(node, |el| {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        });
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_element(node, |el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: NodeId, class: &str) {
        self.with_element_mut(node, |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        self.with_element_mut(node, |el| el.classes.retain(|c| c != class));
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    fn offset_width(&self, node: NodeId) -> f64 {
        self.with_element(node, |el| el.width).unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn location_path(&self) -> String {
        self.path.borrow().clone()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
