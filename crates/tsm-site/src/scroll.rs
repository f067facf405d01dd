//! In-page anchor scrolling and the floating scroll-to-top button.
//!
//! The actual smooth scrolling is a browser call; this module decides
//! whether and where to scroll, and keeps the button's visibility in step
//! with the scroll offset.

use std::rc::Rc;

use crate::config::ScrollTopConfig;
use crate::dom::Dom;
use crate::types::NodeId;

pub const SCROLL_TOP_ID: &str = "scrollToTopBtn";

/// Selector of the element an in-page link points at.
///
/// `#lessons` gives `Some("#lessons")`; a bare `#` or any other href gives
/// `None` and the browser default is left alone.
pub fn anchor_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Floating button shown once the page has scrolled past a threshold.
pub struct ScrollTopButton {
    dom: Rc<dyn Dom>,
    node: NodeId,
    threshold_px: f64,
}

impl ScrollTopButton {
    /// Create the button and attach it, hidden. Reuses an existing one.
    pub fn create(dom: Rc<dyn Dom>, config: &ScrollTopConfig) -> Self {
        let selector = format!("#{}", SCROLL_TOP_ID);
        let node = match dom.query(&selector) {
            Some(existing) => existing,
            None => {
                let node = dom.create_element("button");
                dom.set_attribute(node, "id", SCROLL_TOP_ID);
                dom.set_text(node, "\u{2191}");
                let styles = [
                    ("position", "fixed"),
                    ("bottom", "30px"),
                    ("right", "30px"),
                    ("background-color", "#8B4513"),
                    ("color", "white"),
                    ("border", "none"),
                    ("border-radius", "50%"),
                    ("width", "50px"),
                    ("height", "50px"),
                    ("font-size", "24px"),
                    ("cursor", "pointer"),
                    ("display", "none"),
                    ("z-index", "999"),
                    ("transition", "all 0.3s ease"),
                    ("box-shadow", "0 4px 8px rgba(0, 0, 0, 0.2)"),
                ];
                for (property, value) in styles {
                    dom.set_style(node, property, value);
                }
                dom.append_to_body(node);
                node
            }
        };

        Self {
            dom,
            node,
            threshold_px: config.threshold_px,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the button should show at vertical offset `offset_y`.
    pub fn should_show(&self, offset_y: f64) -> bool {
        offset_y > self.threshold_px
    }

    /// Sync visibility with the current scroll offset.
    pub fn update(&self, offset_y: f64) -> bool {
        let visible = self.should_show(offset_y);
        let display = if visible { "block" } else { "none" };
        self.dom.set_style(self.node, "display", display);
        visible
    }

    pub fn is_visible(&self) -> bool {
        self.dom.style(self.node, "display").as_deref() == Some("block")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#lessons"), Some("#lessons"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about#team"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn test_button_created_hidden() {
        let dom = Rc::new(MemoryDom::new());
        let button = ScrollTopButton::create(dom.clone(), &ScrollTopConfig::default());

        assert_eq!(dom.query("#scrollToTopBtn"), Some(button.node()));
        assert_eq!(dom.text(button.node()), "\u{2191}");
        assert!(!button.is_visible());
    }

    #[test]
    fn test_button_created_once() {
        let dom = Rc::new(MemoryDom::new());
        let first = ScrollTopButton::create(dom.clone(), &ScrollTopConfig::default());
        let second = ScrollTopButton::create(dom.clone(), &ScrollTopConfig::default());

        assert_eq!(first.node(), second.node());
        assert_eq!(dom.query_all("button").len(), 1);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let dom = Rc::new(MemoryDom::new());
        let button = ScrollTopButton::create(dom, &ScrollTopConfig::default());

        assert!(!button.update(0.0));
        assert!(!button.update(300.0));
        assert!(button.update(300.5));
        assert!(button.is_visible());
        assert!(!button.update(120.0));
        assert!(!button.is_visible());
    }
}
