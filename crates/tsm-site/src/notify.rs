//! Transient notifications (toasts)
//!
//! A toast is a fixed-position `div` appended to the body as soon as
//! [`Notifier::notify`] is called. Two timers are armed at the same moment:
//!
//! ```text
//! t=0            t=display_ms          t=display_ms+exit_ms
//! |--- visible ---|--- slideOut anim ---| detached
//!                 exit timer            removal timer
//! ```
//!
//! Both handles belong to the [`Notification`], so [`Notifier::dismiss`] can
//! cancel them and detach early.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::config::NotificationConfig;
use crate::dom::Dom;
use crate::scheduler::Scheduler;
use crate::style::{StyleInjector, ALERTS_BLOCK, ALERTS_CSS};
use crate::types::{NodeId, NotificationId, TimerHandle};

/// Visual flavor of a toast
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    #[default]
    Error,
}

impl NotificationKind {
    /// Map a loose type string. Anything other than `"success"` is an error.
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "success" => Self::Success,
            _ => Self::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn color<'a>(&self, config: &'a NotificationConfig) -> &'a str {
        match self {
            Self::Success => &config.success_color,
            Self::Error => &config.error_color,
        }
    }
}

/// A single live toast
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Scheduler clock at creation
    pub created_at: f64,
    pub node: NodeId,
    exit_timer: TimerHandle,
    removal_timer: TimerHandle,
}

impl Notification {
    pub fn timers(&self) -> (TimerHandle, TimerHandle) {
        (self.exit_timer, self.removal_timer)
    }
}

#[derive(Default)]
struct NotifierState {
    next_id: NotificationId,
    active: BTreeMap<NotificationId, Notification>,
}

/// Creates toasts and owns them until they are gone.
#[derive(Clone)]
pub struct Notifier {
    dom: Rc<dyn Dom>,
    scheduler: Rc<dyn Scheduler>,
    styles: StyleInjector,
    config: NotificationConfig,
    state: Rc<RefCell<NotifierState>>,
}

impl Notifier {
    pub fn new(dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>, config: NotificationConfig) -> Self {
        Self {
            styles: StyleInjector::new(dom.clone()),
            dom,
            scheduler,
            config,
            state: Rc::new(RefCell::new(NotifierState::default())),
        }
    }

    /// Show `message` now and schedule its exit and removal.
    pub fn notify(&self, message: &str, kind: NotificationKind) -> NotificationId {
        self.styles.ensure_style_block(ALERTS_BLOCK, ALERTS_CSS);

        let node = self.render(message, kind);
        self.dom.append_to_body(node);

        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            state.next_id
        };

        let exit_timer = {
            let dom = self.dom.clone();
            let slide_out = slide_animation("slideOut", self.config.exit_ms);
            self.scheduler.schedule(
                self.config.display_ms,
                Box::new(move || dom.set_style(node, "animation", &slide_out)),
            )
        };

        let removal_timer = {
            let dom = self.dom.clone();
            let state: Weak<RefCell<NotifierState>> = Rc::downgrade(&self.state);
            self.scheduler.schedule(
                self.config.display_ms.saturating_add(self.config.exit_ms),
                Box::new(move || {
                    dom.remove(node);
                    if let Some(state) = state.upgrade() {
                        state.borrow_mut().active.remove(&id);
                    }
                    tracing::debug!("[notify] removed notification {}", id);
                }),
            )
        };

        let notification = Notification {
            id,
            message: message.to_string(),
            kind,
            created_at: self.scheduler.now_ms(),
            node,
            exit_timer,
            removal_timer,
        };
        self.state.borrow_mut().active.insert(id, notification);
        tracing::debug!("[notify] {} notification {}: {}", kind.as_str(), id, message);

        self.enforce_cap();
        id
    }

    /// Detach a toast now, cancelling its pending timers.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let Some(notification) = self.state.borrow_mut().active.remove(&id) else {
            return false;
        };
        let (exit_timer, removal_timer) = notification.timers();
        self.scheduler.cancel(exit_timer);
        self.scheduler.cancel(removal_timer);
        self.dom.remove(notification.node);
        true
    }

    /// Live toasts, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.state.borrow().active.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn enforce_cap(&self) {
        if self.config.max_visible == 0 {
            return;
        }
        while self.len() > self.config.max_visible {
            let oldest = self.state.borrow().active.keys().next().copied();
            match oldest {
                Some(id) => {
                    self.dismiss(id);
                }
                None => break,
            }
        }
    }

    fn render(&self, message: &str, kind: NotificationKind) -> NodeId {
        let slide_in = slide_animation("slideIn", self.config.exit_ms);
        let node = self.dom.create_element("div");
        self.dom
            .set_attribute(node, "class", &format!("alert alert-{}", kind.as_str()));
        self.dom.set_text(node, message);

        let styles = [
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "16px 24px"),
            ("background-color", kind.color(&self.config)),
            ("color", "white"),
            ("border-radius", "8px"),
            ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.15)"),
            ("z-index", "9999"),
            ("animation", slide_in.as_str()),
            ("font-weight", "600"),
        ];
        for (property, value) in styles {
            self.dom.set_style(node, property, value);
        }
        node
    }
}

/// Slide animations run for `exit_ms`, the gap between exit and removal.
fn slide_animation(name: &str, duration_ms: u32) -> String {
    format!("{} {}s ease", name, f64::from(duration_ms) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::scheduler::ManualScheduler;

    fn setup(config: NotificationConfig) -> (Rc<MemoryDom>, Rc<ManualScheduler>, Notifier) {
        let dom = Rc::new(MemoryDom::new());
        let clock = Rc::new(ManualScheduler::new());
        let notifier = Notifier::new(dom.clone(), clock.clone(), config);
        (dom, clock, notifier)
    }

    #[test]
    fn test_from_type_defaults_to_error() {
        assert_eq!(NotificationKind::from_type("success"), NotificationKind::Success);
        assert_eq!(NotificationKind::from_type("error"), NotificationKind::Error);
        assert_eq!(NotificationKind::from_type("warning"), NotificationKind::Error);
        assert_eq!(NotificationKind::from_type(""), NotificationKind::Error);
    }

    #[test]
    fn test_notify_renders_immediately() {
        let (dom, _, notifier) = setup(NotificationConfig::default());
        notifier.notify("Saved", NotificationKind::Success);

        let alert = dom.query(".alert.alert-success").unwrap();
        assert!(dom.is_attached(alert));
        assert_eq!(dom.text(alert), "Saved");
        assert_eq!(dom.style(alert, "background-color").as_deref(), Some("#27ae60"));
        assert_eq!(dom.style(alert, "animation").as_deref(), Some("slideIn 0.3s ease"));
        assert_eq!(dom.query_all("style[data-alerts]").len(), 1);
    }

    #[test]
    fn test_error_styling() {
        let (dom, _, notifier) = setup(NotificationConfig::default());
        notifier.notify("Nope", NotificationKind::from_type("info"));

        let alert = dom.query(".alert-error").unwrap();
        assert_eq!(dom.style(alert, "background-color").as_deref(), Some("#e74c3c"));
    }

    #[test]
    fn test_lifecycle_timing() {
        let (dom, clock, notifier) = setup(NotificationConfig::default());
        notifier.notify("X", NotificationKind::Success);
        let alert = dom.query(".alert").unwrap();

        clock.advance(4999);
        assert!(dom.is_attached(alert));
        assert_eq!(dom.style(alert, "animation").as_deref(), Some("slideIn 0.3s ease"));

        clock.advance(1);
        assert!(dom.is_attached(alert));
        assert_eq!(dom.style(alert, "animation").as_deref(), Some("slideOut 0.3s ease"));

        clock.advance(299);
        assert!(dom.is_attached(alert));

        clock.advance(1);
        assert!(!dom.is_attached(alert));
        assert!(notifier.is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_slide_animations_follow_exit_ms() {
        let (dom, clock, notifier) = setup(NotificationConfig {
            exit_ms: 1000,
            ..NotificationConfig::default()
        });
        notifier.notify("Slow", NotificationKind::Success);
        let alert = dom.query(".alert").unwrap();
        assert_eq!(dom.style(alert, "animation").as_deref(), Some("slideIn 1s ease"));

        clock.advance(5000);
        assert_eq!(dom.style(alert, "animation").as_deref(), Some("slideOut 1s ease"));

        clock.advance(999);
        assert!(dom.is_attached(alert));
        clock.advance(1);
        assert!(!dom.is_attached(alert));
    }

    #[test]
    fn test_style_block_injected_once() {
        let (dom, _, notifier) = setup(NotificationConfig::default());
        notifier.notify("a", NotificationKind::Success);
        notifier.notify("b", NotificationKind::Error);
        assert_eq!(dom.query_all("style[data-alerts]").len(), 1);
        assert_eq!(dom.query_all(".alert").len(), 2);
    }

    #[test]
    fn test_dismiss_cancels_timers() {
        let (dom, clock, notifier) = setup(NotificationConfig::default());
        let id = notifier.notify("bye", NotificationKind::Success);
        assert_eq!(clock.pending(), 2);

        assert!(notifier.dismiss(id));
        assert!(!notifier.dismiss(id));
        assert!(dom.query(".alert").is_none());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_independent_lifetimes() {
        let (dom, clock, notifier) = setup(NotificationConfig::default());
        notifier.notify("first", NotificationKind::Success);
        clock.advance(2000);
        notifier.notify("second", NotificationKind::Success);

        clock.advance(3300);
        let remaining = notifier.active();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "second");
        assert_eq!(remaining[0].created_at, 2000.0);
        assert_eq!(dom.query_all(".alert").len(), 1);

        clock.advance(2000);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_cap_dismisses_oldest() {
        let config = NotificationConfig {
            max_visible: 2,
            ..Default::default()
        };
        let (dom, clock, notifier) = setup(config);
        notifier.notify("one", NotificationKind::Success);
        notifier.notify("two", NotificationKind::Success);
        notifier.notify("three", NotificationKind::Success);

        let messages: Vec<String> = notifier.active().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(dom.query_all(".alert").len(), 2);
        assert_eq!(clock.pending(), 4);
    }

    #[test]
    fn test_zero_cap_is_unbounded() {
        let config = NotificationConfig {
            max_visible: 0,
            ..Default::default()
        };
        let (_, _, notifier) = setup(config);
        for i in 0..20 {
            notifier.notify(&format!("n{}", i), NotificationKind::Success);
        }
        assert_eq!(notifier.len(), 20);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::scheduler::ManualScheduler;
    use proptest::prelude::*;

    proptest! {
        /// A toast is attached strictly before display+exit and gone at or after it
        #[test]
        fn removal_window(elapsed in 0u64..12_000) {
            let dom = Rc::new(MemoryDom::new());
            let clock = Rc::new(ManualScheduler::new());
            let notifier = Notifier::new(dom.clone(), clock.clone(), NotificationConfig::default());

            notifier.notify("X", NotificationKind::Success);
            let alert = dom.query(".alert").unwrap();
            clock.advance(elapsed);

            if elapsed < 5300 {
                prop_assert!(dom.is_attached(alert));
            } else {
                prop_assert!(!dom.is_attached(alert));
            }
            if elapsed < 5000 {
                let animation = dom.style(alert, "animation");
                prop_assert_eq!(animation.as_deref(), Some("slideIn 0.3s ease"));
            }
        }
    }
}
