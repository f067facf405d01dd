//! Page wiring
//!
//! [`Site`] owns one instance of every handler and exposes one method per
//! DOM event the page reacts to. The browser front end forwards events here;
//! tests call the same methods against a [`MemoryDom`](crate::MemoryDom).

use std::cell::OnceCell;
use std::rc::Rc;

use crate::analytics::{NoopTracker, TrackEvent, Tracker};
use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::form::{field_border_color, ContactForm, FormSurface, SubmitOutcome, FIELD_OK_COLOR};
use crate::nav::{mark_active_link, Menu};
use crate::notify::{NotificationKind, Notifier};
use crate::reveal::{FadeIn, LazyImages};
use crate::scheduler::Scheduler;
use crate::scroll::{anchor_target, ScrollTopButton};
use crate::tables::flag_wide_tables;
use crate::types::{NodeId, NotificationId};
use crate::video::open_placeholder;

/// What [`Site::on_load`] found and did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub active_link: Option<NodeId>,
    /// Cards hidden and waiting to fade in
    pub fade_cards: Vec<NodeId>,
    /// Images waiting for their real source
    pub lazy_images: Vec<NodeId>,
    pub wide_tables: usize,
}

/// All page behavior bound to one document.
pub struct Site {
    dom: Rc<dyn Dom>,
    tracker: Rc<dyn Tracker>,
    config: SiteConfig,
    notifier: Notifier,
    contact: ContactForm,
    menu: Menu,
    fade_in: FadeIn,
    lazy_images: LazyImages,
    scroll_top: OnceCell<ScrollTopButton>,
}

impl Site {
    pub fn new(dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>, config: SiteConfig) -> Self {
        let notifier = Notifier::new(dom.clone(), scheduler, config.notification.clone());
        let selectors = &config.selectors;
        Self {
            contact: ContactForm::new(notifier.clone(), config.contact.clone()),
            menu: Menu::new(dom.clone(), selectors),
            fade_in: FadeIn::new(dom.clone(), &selectors.cards),
            lazy_images: LazyImages::new(dom.clone(), &selectors.lazy_images),
            notifier,
            tracker: Rc::new(NoopTracker),
            scroll_top: OnceCell::new(),
            dom,
            config,
        }
    }

    /// Replace the default no-op tracker.
    pub fn with_tracker(mut self, tracker: Rc<dyn Tracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn dom(&self) -> &Rc<dyn Dom> {
        &self.dom
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn fade_in(&self) -> &FadeIn {
        &self.fade_in
    }

    pub fn lazy_images(&self) -> &LazyImages {
        &self.lazy_images
    }

    pub fn scroll_top(&self) -> Option<&ScrollTopButton> {
        self.scroll_top.get()
    }

    /// Run every load-time handler.
    pub fn on_load(&self) -> LoadReport {
        let selectors = &self.config.selectors;
        let path = self.dom.location_path();

        let active_link = mark_active_link(self.dom.as_ref(), &selectors.nav_links, &path);
        let fade_cards = self.fade_in.prepare();
        let lazy_images = self.lazy_images.pending();
        self.scroll_top
            .get_or_init(|| ScrollTopButton::create(self.dom.clone(), &self.config.scroll_top));
        let wide_tables = flag_wide_tables(self.dom.as_ref(), &selectors.tables);

        tracing::debug!(
            "[site] loaded {}: {} cards, {} lazy images, {} wide tables",
            path,
            fade_cards.len(),
            lazy_images.len(),
            wide_tables
        );

        LoadReport {
            active_link,
            fade_cards,
            lazy_images,
            wide_tables,
        }
    }

    // ========== Navigation ==========

    pub fn on_menu_trigger_click(&self) -> bool {
        self.menu.toggle()
    }

    pub fn on_nav_link_click(&self) {
        self.menu.close();
    }

    pub fn on_document_click(&self, target: NodeId) -> bool {
        self.menu.on_document_click(target)
    }

    /// Element an in-page link should scroll to, if it exists.
    pub fn on_anchor_click(&self, href: &str) -> Option<NodeId> {
        anchor_target(href).and_then(|selector| self.dom.query(selector))
    }

    pub fn on_scroll(&self, offset_y: f64) -> bool {
        self.scroll_top
            .get()
            .is_some_and(|button| button.update(offset_y))
    }

    // ========== Contact form ==========

    pub fn on_submit(&self, surface: &dyn FormSurface) -> SubmitOutcome {
        self.contact.submit(surface)
    }

    pub fn on_field_blur(&self, field: NodeId) {
        let color = field_border_color(&self.dom.value(field));
        self.dom.set_style(field, "border-color", color);
    }

    pub fn on_field_input(&self, field: NodeId) {
        self.dom.set_style(field, "border-color", FIELD_OK_COLOR);
    }

    // ========== Notifications and tracking ==========

    /// Loose entry point for scripts: any type other than `"success"` shows as an error.
    pub fn show_alert(&self, message: &str, kind: &str) -> NotificationId {
        self.notifier.notify(message, NotificationKind::from_type(kind))
    }

    pub fn track(&self, event: &TrackEvent) {
        self.tracker.track(event);
    }

    pub fn on_button_click(&self, button: NodeId) {
        self.track(&TrackEvent::button_click(&self.dom.text(button)));
    }

    pub fn on_social_click(&self, link: NodeId) {
        let href = self.dom.get_attribute(link, "href");
        self.track(&TrackEvent::social_click(&self.dom.text(link), href.as_deref()));
    }

    pub fn on_video_click(&self, placeholder: NodeId) -> String {
        open_placeholder(self.dom.as_ref(), &self.notifier, placeholder)
    }
}
