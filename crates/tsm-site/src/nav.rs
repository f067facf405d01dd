//! Navigation: the collapsible menu and the active-link marker.

use std::rc::Rc;

use crate::config::Selectors;
use crate::dom::Dom;
use crate::types::NodeId;

pub const ACTIVE_CLASS: &str = "active";

/// Mobile menu opened by the hamburger trigger.
///
/// All operations are no-ops when the menu element is missing.
pub struct Menu {
    dom: Rc<dyn Dom>,
    trigger: String,
    menu: String,
}

impl Menu {
    pub fn new(dom: Rc<dyn Dom>, selectors: &Selectors) -> Self {
        Self {
            dom,
            trigger: selectors.menu_trigger.clone(),
            menu: selectors.menu.clone(),
        }
    }

    fn menu_node(&self) -> Option<NodeId> {
        self.dom.query(&self.menu)
    }

    pub fn is_open(&self) -> bool {
        self.menu_node()
            .is_some_and(|menu| self.dom.has_class(menu, ACTIVE_CLASS))
    }

    /// Flip the menu; returns whether it is now open.
    pub fn toggle(&self) -> bool {
        match self.menu_node() {
            Some(menu) => self.dom.toggle_class(menu, ACTIVE_CLASS),
            None => false,
        }
    }

    pub fn close(&self) {
        if let Some(menu) = self.menu_node() {
            self.dom.remove_class(menu, ACTIVE_CLASS);
        }
    }

    /// Close the menu when a click lands outside both menu and trigger.
    ///
    /// Returns true if this click closed it.
    pub fn on_document_click(&self, target: NodeId) -> bool {
        let Some(menu) = self.menu_node() else {
            return false;
        };
        if !self.dom.has_class(menu, ACTIVE_CLASS) || self.dom.contains(menu, target) {
            return false;
        }
        if let Some(trigger) = self.dom.query(&self.trigger) {
            if self.dom.contains(trigger, target) {
                return false;
            }
        }
        self.dom.remove_class(menu, ACTIVE_CLASS);
        true
    }
}

/// How well `href` names the page at `current_path`.
///
/// 3: exact match. 2: `./<last path segment>`, so `./` names any path
/// ending in `/`. 1: the href, minus any
/// `pages/` prefix, occurs inside the path. 0: no match. Hrefs made only of
/// `/`, `.` and `#` never take the substring rule, so a home link does not
/// light up on every page.
fn match_score(href: &str, current_path: &str) -> u8 {
    if href.is_empty() {
        return 0;
    }
    if href == current_path {
        return 3;
    }
    let last_segment = current_path.rsplit('/').next().unwrap_or("");
    if href.strip_prefix("./") == Some(last_segment) {
        return 2;
    }
    let stripped = href.replace("pages/", "");
    let meaningful = stripped.chars().any(|c| !matches!(c, '/' | '.' | '#'));
    if meaningful && current_path.contains(stripped.as_str()) {
        return 1;
    }
    0
}

/// Pick the one link that names the current page.
///
/// Highest score wins; ties go to the longer href, then to the earlier link.
pub fn active_link_index(hrefs: &[&str], current_path: &str) -> Option<usize> {
    let mut best: Option<(usize, u8, usize)> = None;
    for (index, href) in hrefs.iter().enumerate() {
        let score = match_score(href, current_path);
        if score == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_score, best_len)) => {
                score > best_score || (score == best_score && href.len() > best_len)
            }
        };
        if better {
            best = Some((index, score, href.len()));
        }
    }
    best.map(|(index, _, _)| index)
}

/// Clear `active` on every link matching `selector` and set it on the one
/// naming `current_path`, if any.
pub fn mark_active_link(dom: &dyn Dom, selector: &str, current_path: &str) -> Option<NodeId> {
    let links = dom.query_all(selector);
    let hrefs: Vec<String> = links
        .iter()
        .map(|link| dom.get_attribute(*link, "href").unwrap_or_default())
        .collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    for link in &links {
        dom.remove_class(*link, ACTIVE_CLASS);
    }

    let winner = active_link_index(&href_refs, current_path).map(|i| links[i])?;
    dom.add_class(winner, ACTIVE_CLASS);
    tracing::debug!("[nav] active link for '{}' is {}", current_path, winner);
    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_exact_match_wins() {
        assert_eq!(active_link_index(&["/", "/about"], "/about"), Some(1));
    }

    #[test]
    fn test_root_only_matches_root() {
        assert_eq!(active_link_index(&["/", "/about"], "/"), Some(0));
        assert_eq!(active_link_index(&["/", "/about"], "/contact"), None);
    }

    #[test]
    fn test_relative_segment_match() {
        let hrefs = ["./index.html", "./about.html", "./contact.html"];
        assert_eq!(active_link_index(&hrefs, "/site/about.html"), Some(1));
    }

    #[test]
    fn test_dot_slash_home_link_matches_directory_index() {
        assert_eq!(active_link_index(&["./", "./about.html"], "/"), Some(0));
        assert_eq!(active_link_index(&["./", "./about.html"], "/site/"), Some(0));
        assert_eq!(active_link_index(&["./", "./about.html"], "/site/about.html"), Some(1));
    }

    #[test]
    fn test_pages_prefix_substring_match() {
        let hrefs = ["index.html", "pages/courses.html", "pages/about.html"];
        assert_eq!(active_link_index(&hrefs, "/pages/about.html"), Some(2));
    }

    #[test]
    fn test_longest_href_breaks_ties() {
        let hrefs = ["pages/about", "pages/about-team"];
        assert_eq!(active_link_index(&hrefs, "/pages/about-team.html"), Some(1));
    }

    #[test]
    fn test_first_link_wins_full_tie() {
        assert_eq!(active_link_index(&["/about", "/about"], "/about"), Some(0));
    }

    #[test]
    fn test_empty_href_never_matches() {
        assert_eq!(active_link_index(&["", "#"], "/about"), None);
    }

    fn menu_fixture() -> (Rc<MemoryDom>, Menu, NodeId, NodeId, NodeId) {
        let dom = Rc::new(MemoryDom::new());
        let trigger = dom.add(dom.body(), "button", &[("class", "hamburger")]);
        let nav = dom.add(dom.body(), "ul", &[("class", "nav-menu")]);
        let link = dom.add(nav, "a", &[("href", "/about")]);
        let menu = Menu::new(dom.clone(), &Selectors::default());
        (dom, menu, trigger, nav, link)
    }

    #[test]
    fn test_mark_active_link_marks_exactly_one() {
        let dom = MemoryDom::new();
        let nav = dom.add(dom.body(), "ul", &[("class", "nav-menu")]);
        let home = dom.add(nav, "a", &[("href", "/"), ("class", "active")]);
        let about = dom.add(nav, "a", &[("href", "/about")]);

        let marked = mark_active_link(&dom, ".nav-menu a", "/about");
        assert_eq!(marked, Some(about));
        assert!(dom.has_class(about, ACTIVE_CLASS));
        assert!(!dom.has_class(home, ACTIVE_CLASS));
        assert_eq!(dom.query_all(".nav-menu a.active"), vec![about]);
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let (dom, menu, _, nav, _) = menu_fixture();
        assert!(menu.toggle());
        assert!(dom.has_class(nav, ACTIVE_CLASS));
        assert!(!menu.toggle());

        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_outside_click_closes() {
        let (dom, menu, _, _, _) = menu_fixture();
        let elsewhere = dom.add(dom.body(), "p", &[]);
        menu.toggle();

        assert!(menu.on_document_click(elsewhere));
        assert!(!menu.is_open());
        assert!(!menu.on_document_click(elsewhere));
    }

    #[test]
    fn test_inside_clicks_keep_open() {
        let (_, menu, trigger, nav, link) = menu_fixture();
        menu.toggle();

        assert!(!menu.on_document_click(link));
        assert!(!menu.on_document_click(nav));
        assert!(!menu.on_document_click(trigger));
        assert!(menu.is_open());
    }

    #[test]
    fn test_missing_menu_is_noop() {
        let dom = Rc::new(MemoryDom::new());
        let menu = Menu::new(dom.clone(), &Selectors::default());
        let p = dom.add(dom.body(), "p", &[]);

        assert!(!menu.toggle());
        menu.close();
        assert!(!menu.on_document_click(p));
    }
}
