//! Site configuration
//!
//! Every tunable the page behavior uses, with defaults matching the live
//! site. The browser front end may override any subset from an inline JSON
//! block; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub notification: NotificationConfig,
    pub contact: ContactConfig,
    pub scroll_top: ScrollTopConfig,
    pub fade_in: FadeInConfig,
    pub selectors: Selectors,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> SiteResult<Self> {
        serde_json::from_str(json).map_err(|e| SiteError::Config(e.to_string()))
    }
}

/// Toast timing, look and cap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a toast stays before its exit animation starts
    pub display_ms: u32,
    /// Length of the exit animation; the element is detached after it
    pub exit_ms: u32,
    /// Most toasts visible at once (0 = unbounded)
    pub max_visible: usize,
    pub success_color: String,
    pub error_color: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: 5000,
            exit_ms: 300,
            max_visible: 5,
            success_color: "#27ae60".to_string(),
            error_color: "#e74c3c".to_string(),
        }
    }
}

/// Contact form delivery
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Address placed in the mailto URI
    pub recipient: String,
    /// Hand the mailto URI to the browser after a successful submit
    pub open_mail_client: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "info@theskilledmusician.ke".to_string(),
            open_mail_client: false,
        }
    }
}

/// Floating scroll-to-top button
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTopConfig {
    /// Vertical offset above which the button is shown
    pub threshold_px: f64,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self { threshold_px: 300.0 }
    }
}

/// Intersection options for the card fade-in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".to_string(),
        }
    }
}

/// Selectors and element ids the handlers bind to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub menu_trigger: String,
    pub menu: String,
    pub nav_links: String,
    pub anchors: String,
    pub cards: String,
    pub lazy_images: String,
    pub buttons: String,
    pub social_links: String,
    pub form_fields: String,
    pub tables: String,
    pub video_placeholders: String,
    pub contact_form: String,
    pub field_name: String,
    pub field_email: String,
    pub field_phone: String,
    pub field_subject: String,
    pub field_message: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_trigger: ".hamburger".to_string(),
            menu: ".nav-menu".to_string(),
            nav_links: ".nav-menu a".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            cards: ".course-card, .welcome-card, .instructor-card, .value-card".to_string(),
            lazy_images: "img[data-src]".to_string(),
            buttons: ".btn".to_string(),
            social_links: ".social-card, .social-links a".to_string(),
            form_fields: ".form-group input, .form-group textarea, .form-group select"
                .to_string(),
            tables: "table".to_string(),
            video_placeholders: ".video-placeholder".to_string(),
            contact_form: "#contactForm".to_string(),
            field_name: "#name".to_string(),
            field_email: "#email".to_string(),
            field_phone: "#phone".to_string(),
            field_subject: "#subject".to_string(),
            field_message: "#message".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = SiteConfig::default();
        assert_eq!(config.notification.display_ms, 5000);
        assert_eq!(config.notification.exit_ms, 300);
        assert_eq!(config.scroll_top.threshold_px, 300.0);
        assert_eq!(config.contact.recipient, "info@theskilledmusician.ke");
        assert!(!config.contact.open_mail_client);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(
            r#"{"notification": {"display_ms": 2000}, "contact": {"open_mail_client": true}}"#,
        )
        .unwrap();
        assert_eq!(config.notification.display_ms, 2000);
        assert_eq!(config.notification.exit_ms, 300);
        assert!(config.contact.open_mail_client);
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }
}
