//! Error types for the site core
//!
//! Two families live here: [`ValidationError`] is what the user sees when the
//! contact form is rejected, [`SiteError`] covers plumbing failures that
//! handlers log and swallow.

/// Contact form rejection reasons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// One of name, email, subject or message is empty
    MissingRequiredField,
    /// The email does not have a `local@domain.tld` shape
    MalformedEmail,
}

impl ValidationError {
    /// Fixed human-readable message shown in the error notification
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "Please fill in all required fields",
            Self::MalformedEmail => "Please enter a valid email address",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by selector parsing or configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// Selector syntax outside the supported subset
    UnsupportedSelector(String),

    /// Configuration could not be parsed
    Config(String),
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedSelector(sel) => write!(f, "unsupported selector: {}", sel),
            Self::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for SiteError {}

/// Result type alias for site operations
pub type SiteResult<T> = Result<T, SiteError>;
