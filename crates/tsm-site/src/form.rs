//! Contact form: validation, mailto composition and the submit flow.

use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{ContactConfig, Selectors};
use crate::dom::Dom;
use crate::error::ValidationError;
use crate::notify::{NotificationKind, Notifier};

/// One `@`, no whitespace, something before it and a dotted domain after.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";

/// Border color for a field that is empty on blur
pub const FIELD_ERROR_COLOR: &str = "#e74c3c";
/// Border color for a filled or edited field
pub const FIELD_OK_COLOR: &str = "#bdc3c7";

/// Field values read at submit time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Check required fields, then the email shape.
pub fn validate(fields: &FormSnapshot) -> Result<(), ValidationError> {
    let required = [&fields.name, &fields.email, &fields.subject, &fields.message];
    if required.iter().any(|value| value.is_empty()) {
        return Err(ValidationError::MissingRequiredField);
    }
    if !is_valid_email(&fields.email) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Build the `mailto:` URI carrying the form contents.
pub fn mailto_uri(recipient: &str, fields: &FormSnapshot) -> String {
    let body = format!(
        "Name: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}",
        fields.name, fields.email, fields.phone, fields.message
    );
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&fields.subject),
        urlencoding::encode(&body)
    )
}

/// Border color a form field gets when it loses focus.
pub fn field_border_color(value: &str) -> &'static str {
    if value.is_empty() {
        FIELD_ERROR_COLOR
    } else {
        FIELD_OK_COLOR
    }
}

/// Where the submit flow reads values from and what it resets.
pub trait FormSurface {
    fn read(&self) -> FormSnapshot;
    fn reset(&self);
}

/// [`FormSurface`] over the five contact fields, located by selector.
pub struct DomFormSurface {
    dom: Rc<dyn Dom>,
    selectors: Selectors,
}

impl DomFormSurface {
    pub fn new(dom: Rc<dyn Dom>, selectors: Selectors) -> Self {
        Self { dom, selectors }
    }

    fn field_selectors(&self) -> [&str; 5] {
        [
            self.selectors.field_name.as_str(),
            self.selectors.field_email.as_str(),
            self.selectors.field_phone.as_str(),
            self.selectors.field_subject.as_str(),
            self.selectors.field_message.as_str(),
        ]
    }

    fn field(&self, selector: &str) -> String {
        self.dom
            .query(selector)
            .map(|node| self.dom.value(node))
            .unwrap_or_default()
    }
}

impl FormSurface for DomFormSurface {
    fn read(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.field(&self.selectors.field_name),
            email: self.field(&self.selectors.field_email),
            phone: self.field(&self.selectors.field_phone),
            subject: self.field(&self.selectors.field_subject),
            message: self.field(&self.selectors.field_message),
        }
    }

    fn reset(&self) {
        for selector in self.field_selectors() {
            if let Some(node) = self.dom.query(selector) {
                self.dom.set_value(node, "");
            }
        }
    }
}

/// Result of one submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the form was reset and this URI composed
    Sent { mailto: String },
    /// Rejected; the form is left as the user typed it
    Rejected(ValidationError),
}

/// Submit flow: validate, report through the notifier, reset on success.
#[derive(Clone)]
pub struct ContactForm {
    notifier: Notifier,
    config: ContactConfig,
}

impl ContactForm {
    pub fn new(notifier: Notifier, config: ContactConfig) -> Self {
        Self { notifier, config }
    }

    pub fn submit(&self, surface: &dyn FormSurface) -> SubmitOutcome {
        let fields = surface.read();

        if let Err(e) = validate(&fields) {
            tracing::debug!("[form] rejected: {:?}", e);
            self.notifier.notify(e.message(), NotificationKind::Error);
            return SubmitOutcome::Rejected(e);
        }

        let mailto = mailto_uri(&self.config.recipient, &fields);
        self.notifier.notify(SUCCESS_MESSAGE, NotificationKind::Success);
        surface.reset();
        tracing::debug!("[form] accepted submission from {}", fields.email);

        SubmitOutcome::Sent { mailto }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }
}
