use super::*;

fn nav_fixture() -> (MemoryDom, NodeId, NodeId, NodeId) {
    let dom = MemoryDom::new();
    let nav = dom.add(dom.body(), "nav", &[("class", "nav-menu")]);
    let home = dom.add(nav, "a", &[("href", "/")]);
    let about = dom.add(nav, "a", &[("href", "/about")]);
    (dom, nav, home, about)
}

#[test]
fn test_create_and_append() {
    let dom = MemoryDom::new();
    let div = dom.create_element("div");
    assert!(!dom.is_attached(div));

    dom.append_to_body(div);
    assert!(dom.is_attached(div));
    assert_eq!(dom.child_count(dom.body()), 1);
}

#[test]
fn test_remove_detaches_subtree() {
    let (dom, nav, home, _) = nav_fixture();
    dom.remove(nav);

    assert!(!dom.is_attached(nav));
    assert!(!dom.is_attached(home));
    assert!(dom.query_all(".nav-menu a").is_empty());
}

#[test]
fn test_query_descendant_in_document_order() {
    let (dom, _, home, about) = nav_fixture();
    assert_eq!(dom.query_all(".nav-menu a"), vec![home, about]);
    assert_eq!(dom.query(".nav-menu a"), Some(home));

    // a link outside the menu does not match
    dom.add(dom.body(), "a", &[("href", "/contact")]);
    assert_eq!(dom.query_all(".nav-menu a").len(), 2);
    assert_eq!(dom.query_all("a").len(), 3);
}

#[test]
fn test_query_attribute_forms() {
    let dom = MemoryDom::new();
    let anchor = dom.add(dom.body(), "a", &[("href", "#lessons")]);
    dom.add(dom.body(), "a", &[("href", "/about")]);
    let img = dom.add(dom.body(), "img", &[("data-src", "/img/piano.jpg")]);

    assert_eq!(dom.query_all("a[href^=\"#\"]"), vec![anchor]);
    assert_eq!(dom.query_all("img[data-src]"), vec![img]);
    assert_eq!(dom.query_all("a[href=\"/about\"]").len(), 1);
}

#[test]
fn test_query_selector_list() {
    let dom = MemoryDom::new();
    let a = dom.add(dom.body(), "div", &[("class", "course-card")]);
    let b = dom.add(dom.body(), "div", &[("class", "value-card")]);
    dom.add(dom.body(), "div", &[("class", "other")]);

    assert_eq!(dom.query_all(".course-card, .value-card"), vec![a, b]);
}

#[test]
fn test_unsupported_selector_matches_nothing() {
    let (dom, _, _, _) = nav_fixture();
    assert!(dom.query_all(".nav-menu > a").is_empty());
    assert_eq!(dom.query("a:first-child"), None);
}

#[test]
fn test_id_and_class_attributes() {
    let dom = MemoryDom::new();
    let form = dom.add(dom.body(), "form", &[("id", "contactForm"), ("class", "card wide")]);

    assert_eq!(dom.query("#contactForm"), Some(form));
    assert!(dom.has_class(form, "card"));
    assert_eq!(dom.get_attribute(form, "class").as_deref(), Some("card wide"));

    dom.remove_class(form, "card");
    assert_eq!(dom.get_attribute(form, "class").as_deref(), Some("wide"));
}

#[test]
fn test_toggle_class() {
    let (dom, nav, _, _) = nav_fixture();
    assert!(dom.toggle_class(nav, "active"));
    assert!(dom.has_class(nav, "active"));
    assert!(!dom.toggle_class(nav, "active"));
    assert!(!dom.has_class(nav, "active"));
}

#[test]
fn test_contains() {
    let (dom, nav, home, _) = nav_fixture();
    assert!(dom.contains(nav, home));
    assert!(dom.contains(nav, nav));
    assert!(!dom.contains(home, nav));
}

#[test]
fn test_text_and_set_text() {
    let (dom, nav, home, about) = nav_fixture();
    dom.set_text(home, "Home");
    dom.set_text(about, "About");
    assert_eq!(dom.text(nav), "HomeAbout");

    dom.set_text(nav, "replaced");
    assert_eq!(dom.text(nav), "replaced");
    assert!(!dom.is_attached(home));
}

#[test]
fn test_next_sibling_text() {
    let dom = MemoryDom::new();
    let card = dom.add(dom.body(), "div", &[("class", "video-placeholder")]);
    let title = dom.add(dom.body(), "h3", &[]);
    dom.set_text(title, "Scales 101");

    assert_eq!(dom.next_sibling_text(card).as_deref(), Some("Scales 101"));
    assert_eq!(dom.next_sibling_text(title), None);
}

#[test]
fn test_style_set_and_clear() {
    let dom = MemoryDom::new();
    let div = dom.add(dom.body(), "div", &[]);
    dom.set_style(div, "opacity", "0");
    assert_eq!(dom.style(div, "opacity").as_deref(), Some("0"));

    dom.set_style(div, "opacity", "");
    assert_eq!(dom.style(div, "opacity"), None);
}

#[test]
fn test_remove_attribute() {
    let dom = MemoryDom::new();
    let img = dom.add(dom.body(), "img", &[("data-src", "a.jpg")]);
    dom.remove_attribute(img, "data-src");
    assert_eq!(dom.get_attribute(img, "data-src"), None);
    assert!(dom.query_all("img[data-src]").is_empty());
}

#[test]
fn test_attribute_names_are_case_insensitive() {
    let dom = MemoryDom::new();
    let div = dom.add(dom.body(), "div", &[]);
    dom.set_attribute(div, "data-Foo", "1");
    assert_eq!(dom.get_attribute(div, "data-Foo").as_deref(), Some("1"));
    assert_eq!(dom.get_attribute(div, "data-foo").as_deref(), Some("1"));
    assert_eq!(dom.query_all("div[data-foo]"), vec![div]);

    dom.remove_attribute(div, "DATA-FOO");
    assert_eq!(dom.get_attribute(div, "data-foo"), None);
}

#[test]
fn test_mutating_unknown_node_is_noop() {
    let dom = MemoryDom::new();
    let ghost = NodeId(9999);
    dom.set_attribute(ghost, "id", "x");
    dom.add_class(ghost, "y");
    dom.remove(ghost);
    assert_eq!(dom.get_attribute(ghost, "id"), None);
    assert!(!dom.is_attached(ghost));
}
