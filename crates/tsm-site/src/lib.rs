//! Page Behavior Core for The Skilled Musician site
//!
//! This crate holds every piece of client-side behavior the site has:
//! - Transient notifications (toasts) with timed auto-dismiss
//! - One-shot injection of named CSS rule blocks
//! - Contact form validation and mailto composition
//! - Independent page handlers (menu, active link, scroll, reveal, lazy images,
//!   wide tables, analytics)
//!
//! ## Architecture
//!
//! The document and the timer queue are injected capabilities:
//!
//! - [`dom`]: The [`Dom`] trait plus [`MemoryDom`], an in-memory document
//! - [`scheduler`]: The [`Scheduler`] trait plus [`ManualScheduler`], a fake clock
//!
//! Everything else acts through those two traits, so the whole crate runs on
//! the host in tests. The `tsm-web` crate supplies browser implementations.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tsm_site::{Dom, ManualScheduler, MemoryDom, NotificationKind, Notifier, SiteConfig};
//!
//! let dom = Rc::new(MemoryDom::new());
//! let clock = Rc::new(ManualScheduler::new());
//! let notifier = Notifier::new(dom.clone(), clock.clone(), SiteConfig::default().notification);
//!
//! notifier.notify("Saved", NotificationKind::Success);
//! assert_eq!(dom.query_all(".alert").len(), 1);
//!
//! clock.advance(5300);
//! assert!(dom.query_all(".alert").is_empty());
//! ```

pub mod analytics;
pub mod config;
pub mod dom;
pub mod error;
pub mod form;
pub mod nav;
pub mod notify;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod style;
pub mod tables;
pub mod video;

mod site;
mod types;

pub use analytics::{LogTracker, NoopTracker, TrackEvent, Tracker};
pub use config::{
    ContactConfig, FadeInConfig, NotificationConfig, ScrollTopConfig, Selectors, SiteConfig,
};
pub use dom::{Dom, MemoryDom, Selector};
pub use error::{SiteError, SiteResult, ValidationError};
pub use form::{
    field_border_color, is_valid_email, mailto_uri, validate, ContactForm, DomFormSurface,
    FormSnapshot, FormSurface, SubmitOutcome,
};
pub use nav::{active_link_index, mark_active_link, Menu};
pub use notify::{Notification, NotificationKind, Notifier};
pub use reveal::{FadeIn, LazyImages};
pub use scheduler::{ManualScheduler, Scheduler, Task};
pub use scroll::{anchor_target, ScrollTopButton};
pub use site::{LoadReport, Site};
pub use style::StyleInjector;
pub use types::{NodeId, NotificationId, TimerHandle};
