//! Named CSS rule blocks, inserted at most once per page.
//!
//! A block named `N` is a `<style data-style-block="N">` element in the head,
//! also tagged `data-N="true"` when `N` is a plain lowercase name. Its
//! presence is the only record that it was inserted.

use std::rc::Rc;

use crate::dom::Dom;

/// Slide in/out keyframes used by notifications
pub const ALERTS_BLOCK: &str = "alerts";

/// Fade-in-up keyframes used by the card reveal
pub const ANIMATIONS_BLOCK: &str = "animations";

pub const ALERTS_CSS: &str = r#"
@keyframes slideIn {
    from { transform: translateX(400px); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(400px); opacity: 0; }
}
"#;

pub const ANIMATIONS_CSS: &str = r#"
@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}
"#;

/// Ensures named style blocks exist exactly once in the document head.
#[derive(Clone)]
pub struct StyleInjector {
    dom: Rc<dyn Dom>,
}

impl StyleInjector {
    pub fn new(dom: Rc<dyn Dom>) -> Self {
        Self { dom }
    }

    /// Insert `css_text` under `name` unless a block with that name exists.
    ///
    /// Returns true if a block was inserted by this call.
    pub fn ensure_style_block(&self, name: &str, css_text: &str) -> bool {
        if self.has_block(name) {
            return false;
        }

        let style = self.dom.create_element("style");
        self.dom.set_text(style, css_text);
        self.dom.set_attribute(style, BLOCK_ATTR, name);
        if let Some(marker) = marker_attribute(name) {
            self.dom.set_attribute(style, &marker, "true");
        }
        self.dom.append_to_head(style);
        tracing::debug!("[style] injected block '{}'", name);
        true
    }

    fn has_block(&self, name: &str) -> bool {
        let marker = marker_attribute(name);
        self.dom.query_all("style").into_iter().any(|style| {
            self.dom.get_attribute(style, BLOCK_ATTR).as_deref() == Some(name)
                || marker
                    .as_deref()
                    .is_some_and(|m| self.dom.get_attribute(style, m).is_some())
        })
    }
}

/// Attribute holding the block name verbatim
pub const BLOCK_ATTR: &str = "data-style-block";

/// `data-<name>`, for lowercase names that are valid inside an attribute name.
fn marker_attribute(name: &str) -> Option<String> {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_'));
    plain.then(|| format!("data-{}", name))
}
