//! Viewport-triggered effects: card fade-in and lazy image loading.
//!
//! The browser front end owns the `IntersectionObserver`s and calls
//! `on_intersect` for each entry that became visible. Both effects are
//! one-shot per element.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::Dom;
use crate::style::{StyleInjector, ANIMATIONS_BLOCK, ANIMATIONS_CSS};
use crate::types::NodeId;

pub const FADE_IN_ANIMATION: &str = "fadeInUp 0.6s ease forwards";
pub const LAZY_SRC_ATTR: &str = "data-src";

/// Hides cards on load and fades each one in the first time it is seen.
pub struct FadeIn {
    dom: Rc<dyn Dom>,
    styles: StyleInjector,
    selector: String,
    revealed: RefCell<BTreeSet<NodeId>>,
}

impl FadeIn {
    pub fn new(dom: Rc<dyn Dom>, selector: &str) -> Self {
        Self {
            styles: StyleInjector::new(dom.clone()),
            dom,
            selector: selector.to_string(),
            revealed: RefCell::new(BTreeSet::new()),
        }
    }

    /// Hide every card and make sure the keyframes exist.
    ///
    /// Returns the cards to observe.
    pub fn prepare(&self) -> Vec<NodeId> {
        let cards = self.dom.query_all(&self.selector);
        for card in &cards {
            self.dom.set_style(*card, "opacity", "0");
        }
        self.styles.ensure_style_block(ANIMATIONS_BLOCK, ANIMATIONS_CSS);
        cards
    }

    /// Start the fade for `node`. Returns false if it already ran.
    pub fn on_intersect(&self, node: NodeId) -> bool {
        if !self.revealed.borrow_mut().insert(node) {
            return false;
        }
        self.dom.set_style(node, "animation", FADE_IN_ANIMATION);
        true
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.borrow().contains(&node)
    }
}

/// Swaps deferred image sources in when images come into view.
pub struct LazyImages {
    dom: Rc<dyn Dom>,
    selector: String,
}

impl LazyImages {
    pub fn new(dom: Rc<dyn Dom>, selector: &str) -> Self {
        Self {
            dom,
            selector: selector.to_string(),
        }
    }

    /// Images still waiting for their real source.
    pub fn pending(&self) -> Vec<NodeId> {
        self.dom.query_all(&self.selector)
    }

    /// Load the real source. Returns true when the image should no longer be
    /// observed.
    pub fn on_intersect(&self, node: NodeId) -> bool {
        if let Some(src) = self.dom.get_attribute(node, LAZY_SRC_ATTR) {
            self.dom.set_attribute(node, "src", &src);
            self.dom.remove_attribute(node, LAZY_SRC_ATTR);
            tracing::debug!("[reveal] loaded {}", src);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selectors;
    use crate::dom::MemoryDom;

    #[test]
    fn test_prepare_hides_cards() {
        let dom = Rc::new(MemoryDom::new());
        let course = dom.add(dom.body(), "div", &[("class", "course-card")]);
        let value = dom.add(dom.body(), "div", &[("class", "value-card")]);
        let other = dom.add(dom.body(), "div", &[("class", "footer")]);

        let fade = FadeIn::new(dom.clone(), &Selectors::default().cards);
        assert_eq!(fade.prepare(), vec![course, value]);

        assert_eq!(dom.style(course, "opacity").as_deref(), Some("0"));
        assert_eq!(dom.style(value, "opacity").as_deref(), Some("0"));
        assert_eq!(dom.style(other, "opacity"), None);
        assert_eq!(dom.query_all("style[data-animations]").len(), 1);
    }

    #[test]
    fn test_fade_is_one_shot() {
        let dom = Rc::new(MemoryDom::new());
        let card = dom.add(dom.body(), "div", &[("class", "welcome-card")]);
        let fade = FadeIn::new(dom.clone(), ".welcome-card");
        fade.prepare();

        assert!(fade.on_intersect(card));
        assert_eq!(dom.style(card, "animation").as_deref(), Some(FADE_IN_ANIMATION));

        dom.set_style(card, "animation", "");
        assert!(!fade.on_intersect(card));
        assert_eq!(dom.style(card, "animation"), None);
        assert!(fade.is_revealed(card));
    }

    #[test]
    fn test_prepare_twice_injects_once() {
        let dom = Rc::new(MemoryDom::new());
        let fade = FadeIn::new(dom.clone(), ".course-card");
        fade.prepare();
        fade.prepare();
        assert_eq!(dom.query_all("style[data-animations]").len(), 1);
    }

    #[test]
    fn test_lazy_image_swap() {
        let dom = Rc::new(MemoryDom::new());
        let img = dom.add(dom.body(), "img", &[("data-src", "/img/guitar.jpg")]);
        let eager = dom.add(dom.body(), "img", &[("src", "/img/logo.png")]);
        let lazy = LazyImages::new(dom.clone(), "img[data-src]");

        assert_eq!(lazy.pending(), vec![img]);
        assert!(lazy.on_intersect(img));
        assert_eq!(dom.get_attribute(img, "src").as_deref(), Some("/img/guitar.jpg"));
        assert_eq!(dom.get_attribute(img, "data-src"), None);
        assert!(lazy.pending().is_empty());
        assert_eq!(dom.get_attribute(eager, "src").as_deref(), Some("/img/logo.png"));
    }

    #[test]
    fn test_lazy_image_already_loaded() {
        let dom = Rc::new(MemoryDom::new());
        let img = dom.add(dom.body(), "img", &[("src", "a.jpg")]);
        let lazy = LazyImages::new(dom.clone(), "img[data-src]");

        assert!(lazy.on_intersect(img));
        assert_eq!(dom.get_attribute(img, "src").as_deref(), Some("a.jpg"));
    }
}
