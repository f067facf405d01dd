//! Document capability interface
//!
//! The document is the only state store the page has. Handlers reach it
//! exclusively through [`Dom`], which keeps them testable against
//! [`MemoryDom`] and lets the browser front end supply a `web-sys` backed
//! implementation.

mod memory;
mod selector;

pub use memory::MemoryDom;
pub use selector::Selector;

use crate::types::NodeId;

/// Document operations used by the page handlers.
///
/// Lookups that miss return `None`/empty; mutations on unknown or detached
/// nodes are silent no-ops. Nothing here fails under normal DOM availability.
pub trait Dom {
    // ========== Queries ==========

    /// First attached element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<NodeId>;

    /// All attached elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Whether `node` is currently part of the document.
    fn is_attached(&self, node: NodeId) -> bool;

    // ========== Tree mutation ==========

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> NodeId;

    /// Append `node` to the document head.
    fn append_to_head(&self, node: NodeId);

    /// Append `node` to the document body.
    fn append_to_body(&self, node: NodeId);

    /// Detach `node` from the document.
    fn remove(&self, node: NodeId);

    // ========== Attributes and content ==========

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&self, node: NodeId, name: &str);

    /// Text content of the element and its descendants.
    fn text(&self, node: NodeId) -> String;

    fn set_text(&self, node: NodeId, text: &str);

    /// Current form-control value, empty for non-controls.
    fn value(&self, node: NodeId) -> String;

    fn set_value(&self, node: NodeId, value: &str);

    /// Text of the next element sibling, if there is one.
    fn next_sibling_text(&self, node: NodeId) -> Option<String>;

    // ========== Style and classes ==========

    /// Inline style property, `None` when unset.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn set_style(&self, node: NodeId, property: &str, value: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&self, node: NodeId, class: &str);

    fn remove_class(&self, node: NodeId, class: &str);

    /// Flip `class`; returns whether it is now present.
    fn toggle_class(&self, node: NodeId, class: &str) -> bool;

    // ========== Layout ==========

    /// Rendered width of the element in CSS pixels.
    fn offset_width(&self, node: NodeId) -> f64;

    /// Width of the viewport in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Current path of the page URL.
    fn location_path(&self) -> String;
}
