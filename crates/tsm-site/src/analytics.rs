//! Click tracking
//!
//! Handlers build a [`TrackEvent`] and hand it to whatever [`Tracker`] the
//! page was set up with. The default tracker discards events, so tracking
//! can never break a click.

use std::fmt;

/// Category/action/label triple
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl TrackEvent {
    pub fn new(category: &str, action: &str, label: &str) -> Self {
        Self {
            category: category.to_string(),
            action: action.to_string(),
            label: label.to_string(),
        }
    }

    /// A click on a `.btn`, labelled by its raw text.
    pub fn button_click(text: &str) -> Self {
        Self::new("button", "click", text)
    }

    /// A click on a social link, labelled by its raw text or, when that is
    /// empty, its href.
    pub fn social_click(text: &str, href: Option<&str>) -> Self {
        let label = if text.is_empty() {
            href.unwrap_or_default()
        } else {
            text
        };
        Self::new("social_media", "click", label)
    }
}

impl fmt::Display for TrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.category, self.action, self.label)
    }
}

/// Analytics sink
pub trait Tracker {
    fn track(&self, event: &TrackEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _event: &TrackEvent) {}
}

/// Writes every event to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn track(&self, event: &TrackEvent) {
        tracing::info!("Event tracked: {}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_click() {
        let event = TrackEvent::button_click("Enroll Now");
        assert_eq!(event, TrackEvent::new("button", "click", "Enroll Now"));
        assert_eq!(event.to_string(), "button - click - Enroll Now");

        let event = TrackEvent::button_click("\n  Enroll Now ");
        assert_eq!(event.label, "\n  Enroll Now ");
    }

    #[test]
    fn test_social_click_prefers_text() {
        let event = TrackEvent::social_click("Instagram", Some("https://instagram.com/tsm"));
        assert_eq!(event.label, "Instagram");
        assert_eq!(event.category, "social_media");
    }

    #[test]
    fn test_social_click_falls_back_to_href() {
        let event = TrackEvent::social_click("", Some("https://youtube.com/@tsm"));
        assert_eq!(event.label, "https://youtube.com/@tsm");

        let event = TrackEvent::social_click(" ", Some("https://youtube.com/@tsm"));
        assert_eq!(event.label, " ");

        let event = TrackEvent::social_click("", None);
        assert_eq!(event.label, "");
    }

    #[test]
    fn test_trackers_accept_events() {
        let event = TrackEvent::button_click("Contact");
        NoopTracker.track(&event);
        LogTracker.track(&event);
    }
}
