//! Validators for the contact form fields.
//!
//! All validators operate on the raw user input, trim it and check the
//! trimmed value. They never modify the input.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::contact::FormField;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 254;
pub const MESSAGE_MIN_LEN: usize = 2;
pub const MESSAGE_MAX_LEN: usize = 1000;

pub static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").unwrap());

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static SPAM_KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(viagra|cialis|lottery|winner|claim.*prize)\b").unwrap()
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://\S*").unwrap());

/// Common misspellings of mail provider domains and their corrections.
pub const EMAIL_DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("outlok.com", "outlook.com"),
];

/// Substrings a link's host must contain to be accepted in a message.
pub const URL_HOST_ALLOWLIST: &[&str] = &["github", "linkedin", "portfolio"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub message_min_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            message_min_len: MESSAGE_MIN_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Message(#[from] MessageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name is required")]
    Required,
    #[error("Name must be at least {} characters", NAME_MIN_LEN)]
    TooShort,
    #[error("Name must be less than {} characters", NAME_MAX_LEN)]
    TooLong,
    #[error("Name can only contain letters, spaces, hyphens and apostrophes")]
    InvalidCharacters,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidFormat,
    #[error("Email is too long")]
    TooLong,
    /// The domain looks like a misspelling of a well known mail provider.
    ///
    /// The address might still be deliverable, but it is rejected until the
    /// user edits it.
    #[error("Did you mean {suggestion}?")]
    Typo { suggestion: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Message is required")]
    Required,
    #[error("Message must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Message must be less than {} characters", MESSAGE_MAX_LEN)]
    TooLong,
    #[error("Message contains suspicious content")]
    Suspicious,
}

/// Validates `value` with the validator matching `field`.
pub fn validate_field(
    field: FormField,
    value: &str,
    rules: &ValidationRules,
) -> Result<(), FieldError> {
    match field {
        FormField::Name => validate_name(value)?,
        FormField::Email => validate_email(value)?,
        FormField::Message => validate_message_with(value, rules.message_min_len)?,
    }
    Ok(())
}

pub fn validate_name(value: &str) -> Result<(), NameError> {
    let name = value.trim();
    let len = name.chars().count();

    if name.is_empty() {
        Err(NameError::Required)
    } else if len < NAME_MIN_LEN {
        Err(NameError::TooShort)
    } else if len > NAME_MAX_LEN {
        Err(NameError::TooLong)
    } else if !NAME_REGEX.is_match(name) {
        Err(NameError::InvalidCharacters)
    } else {
        Ok(())
    }
}

pub fn validate_email(value: &str) -> Result<(), EmailError> {
    let email = value.trim();

    if email.is_empty() {
        return Err(EmailError::Required);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(EmailError::InvalidFormat);
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(EmailError::TooLong);
    }
    if let Some(suggestion) = suggest_email_correction(email) {
        return Err(EmailError::Typo { suggestion });
    }

    Ok(())
}

/// Returns a corrected address if the domain of `email` is a known typo.
///
/// The local part is kept as entered, the domain comparison is
/// case-insensitive.
pub fn suggest_email_correction(email: &str) -> Option<String> {
    let (local, domain) = email.trim().split_once('@')?;
    let domain = domain.to_lowercase();
    EMAIL_DOMAIN_TYPOS
        .iter()
        .find(|(typo, _)| *typo == domain)
        .map(|(_, correct)| format!("{local}@{correct}"))
}

/// Validates a message using the default minimum length.
pub fn validate_message(value: &str) -> Result<(), MessageError> {
    validate_message_with(value, MESSAGE_MIN_LEN)
}

pub fn validate_message_with(value: &str, min_len: usize) -> Result<(), MessageError> {
    let message = value.trim();
    let len = message.chars().count();

    if message.is_empty() {
        Err(MessageError::Required)
    } else if len < min_len {
        Err(MessageError::TooShort { min: min_len })
    } else if len > MESSAGE_MAX_LEN {
        Err(MessageError::TooLong)
    } else if is_suspicious(message) {
        Err(MessageError::Suspicious)
    } else {
        Ok(())
    }
}

/// Best-effort spam heuristic.
///
/// Flags common spam keywords and links to hosts outside of
/// [`URL_HOST_ALLOWLIST`]. This is a crude denylist and gives no guarantee
/// that an accepted message is harmless.
pub fn is_suspicious(message: &str) -> bool {
    SPAM_KEYWORD_REGEX.is_match(message)
        || URL_REGEX
            .find_iter(message)
            .any(|url| !is_allowed_url(url.as_str()))
}

fn is_allowed_url(url: &str) -> bool {
    Url::parse(url).ok().is_some_and(|url| {
        url.host_str().is_some_and(|host| {
            let host = host.to_lowercase();
            URL_HOST_ALLOWLIST
                .iter()
                .any(|allowed| host.contains(allowed))
        })
    })
}
