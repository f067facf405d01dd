//! Horizontal overflow for tables wider than the viewport.

use crate::dom::Dom;

/// Let every table matching `selector` that is wider than the viewport
/// scroll horizontally. Returns how many were flagged.
pub fn flag_wide_tables(dom: &dyn Dom, selector: &str) -> usize {
    let viewport = dom.viewport_width();
    let mut flagged = 0;
    for table in dom.query_all(selector) {
        if dom.offset_width(table) > viewport {
            dom.set_style(table, "overflow-x", "auto");
            flagged += 1;
        }
    }
    flagged
}
