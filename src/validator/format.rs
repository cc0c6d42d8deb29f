use crate::patterns::{alphanumeric_regex, email_regex, phone_regex};
use crate::sanitizer::is_safe_url;

use super::{FailureKind, ValidationVerdict};

const MAX_EMAIL_LEN: usize = 254;

/// Fails on empty or whitespace-only values.
pub fn required(value: &str) -> ValidationVerdict {
    if value.trim().is_empty() {
        ValidationVerdict::invalid(FailureKind::Required)
    } else {
        ValidationVerdict::valid()
    }
}

/// RFC 5322-inspired email check: a dot-atom local part, `@`, and a domain
/// of at least two labels.
///
/// ```
/// use request_guard::validator::email;
///
/// assert!(email("ops@example.com").is_valid());
/// assert!(email("").is_valid());
/// assert!(!email("ops@localhost").is_valid());
/// ```
pub fn email(value: &str) -> ValidationVerdict {
    if value.is_empty() {
        return ValidationVerdict::valid();
    }
    if value.len() <= MAX_EMAIL_LEN && email_regex().is_match(value) {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::InvalidEmail)
    }
}

/// Absolute http(s) URL.
pub fn url(value: &str) -> ValidationVerdict {
    if value.is_empty() || is_safe_url(value, &[]) {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::InvalidUrl)
    }
}

/// Phone number: optional leading `+`, digits with spaces, dashes, dots or
/// parentheses, 7 to 20 characters.
pub fn phone(value: &str) -> ValidationVerdict {
    if value.is_empty() || phone_regex().is_match(value) {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::InvalidPhone)
    }
}

/// ASCII letters and digits only.
pub fn alphanumeric(value: &str) -> ValidationVerdict {
    if value.is_empty() || alphanumeric_regex().is_match(value) {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::NotAlphanumeric)
    }
}
