//! Sanitizers for text that is about to be rendered or submitted.
//!
//! Two layers live here:
//! - pure functions ([`strip_tags`], [`escape`], [`sanitize_file_name`],
//!   [`is_safe_url`], [`password_strength`], ...) that never fail and return
//!   safe defaults on malformed input;
//! - the typed [`Sanitizer`] flow that turns a [`Tainted`] form value into a
//!   [`Verified`] one, used by form code that wants a compile-time proof that
//!   a value was checked.

use std::fmt;

use crate::validator::{FailureKind, Validator, ValidatorChain};
use crate::{Tainted, Verified};

mod file_name;
mod json;
mod password;
mod safe_url;
mod text;

pub use file_name::sanitize_file_name;
pub use json::safe_json_parse;
pub use password::{password_strength, PasswordStrength, Strength};
pub use safe_url::is_safe_url;
pub use text::{escape, sanitize_html, sanitize_search_query, strip_tags};

/// Error returned when a tainted value cannot be promoted to `Verified<T>`.
///
/// The message describes the failed rule, never the rejected input.
///
/// # Examples
///
/// ```
/// use request_guard::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::TooLong, "exceeds 10 characters");
/// assert_eq!(error.kind(), SanitizationErrorKind::TooLong);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sanitization failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Input exceeds maximum allowed length.
    TooLong,
    /// Input contains control or non-printable characters.
    ContainsControlChars,
    /// A field validator rejected the cleaned value.
    Rejected(FailureKind),
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong => write!(f, "input too long"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
            Self::Rejected(kind) => write!(f, "rejected: {}", kind),
        }
    }
}

/// Converts tainted values into verified values.
///
/// Implementations validate or clean the input and only then wrap it in
/// `Verified<T>`. Errors must not echo the rejected input.
pub trait Sanitizer<T> {
    /// Sanitizes a tainted value.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input is rejected.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<T>, SanitizationError>;
}

/// Sanitizer for free-text form fields.
///
/// Applied in order:
/// 1. trim surrounding whitespace
/// 2. strip all markup ([`strip_tags`]) and trim again
/// 3. reject control characters
/// 4. enforce a maximum length in characters
/// 5. run the attached validators, rejecting on the first failure
///
/// Empty values pass unless a [`required`](crate::validator::required)
/// validator is attached.
///
/// # Examples
///
/// ```
/// use request_guard::validator::{self, NoSqlInjectionPattern};
/// use request_guard::{FieldSanitizer, Sanitizer, SanitizationErrorKind, Tainted};
/// use request_guard::validator::FailureKind;
///
/// let sanitizer = FieldSanitizer::new(64)
///     .with_validator(validator::required)
///     .with_validator(NoSqlInjectionPattern::default());
///
/// let ok = sanitizer.sanitize(Tainted::new("  <i>Alice</i> ".to_string())).unwrap();
/// assert_eq!(ok.as_ref(), "Alice");
///
/// let err = sanitizer.sanitize(Tainted::new("x' OR 1=1".to_string())).unwrap_err();
/// assert_eq!(err.kind(), SanitizationErrorKind::Rejected(FailureKind::SqlInjectionPattern));
/// ```
pub struct FieldSanitizer {
    max_len: usize,
    validators: ValidatorChain,
}

impl FieldSanitizer {
    /// Creates a field sanitizer with the given maximum length.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is 0.
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 0, "max_len must be greater than 0");
        Self {
            max_len,
            validators: ValidatorChain::new(),
        }
    }

    /// Attaches a validator that runs on the cleaned value.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators = self.validators.with(validator);
        self
    }

    fn is_control_char(c: char) -> bool {
        c.is_control() || c == '\u{007F}'
    }
}

impl fmt::Debug for FieldSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSanitizer")
            .field("max_len", &self.max_len)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Sanitizer<String> for FieldSanitizer {
    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let cleaned = strip_tags(raw.trim());
        let cleaned = cleaned.trim();

        if cleaned.chars().any(Self::is_control_char) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "input contains control or non-printable characters",
            ));
        }

        if cleaned.chars().count() > self.max_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("input exceeds maximum length of {}", self.max_len),
            ));
        }

        let verdict = self.validators.validate(cleaned);
        if let Some(kind) = verdict.failure_kind() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Rejected(kind),
                kind.to_string(),
            ));
        }

        Ok(Verified::new_unchecked(cleaned.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{self, NoXssPattern};

    #[test]
    fn sanitization_error_display() {
        let error = SanitizationError::new(SanitizationErrorKind::TooLong, "over 5");

        let output = error.to_string();
        assert!(output.contains("sanitization failed"));
        assert!(output.contains("input too long"));
        assert!(output.contains("over 5"));
    }

    #[test]
    fn rejected_kind_names_failure() {
        let kind = SanitizationErrorKind::Rejected(FailureKind::InvalidEmail);
        assert_eq!(kind.to_string(), "rejected: invalid email address");
    }

    #[test]
    fn field_sanitizer_trims_and_strips_markup() {
        let sanitizer = FieldSanitizer::new(256);
        let verified = sanitizer
            .sanitize(Tainted::new("  <b>bold</b> move ".to_string()))
            .expect("should succeed");

        assert_eq!(verified.as_ref(), "bold move");
    }

    #[test]
    fn field_sanitizer_drops_script_content() {
        let sanitizer = FieldSanitizer::new(256);
        let verified = sanitizer
            .sanitize(Tainted::new("hi<script>steal()</script>".to_string()))
            .expect("should succeed");

        assert_eq!(verified.as_ref(), "hi");
    }

    #[test]
    fn field_sanitizer_accepts_empty_without_required() {
        let sanitizer = FieldSanitizer::new(10);
        let verified = sanitizer
            .sanitize(Tainted::new("   ".to_string()))
            .expect("empty is allowed");

        assert_eq!(verified.as_ref(), "");
    }

    #[test]
    fn field_sanitizer_required_rejects_empty() {
        let sanitizer = FieldSanitizer::new(10).with_validator(validator::required);
        let error = sanitizer
            .sanitize(Tainted::new(" <br> ".to_string()))
            .unwrap_err();

        assert_eq!(
            error.kind(),
            SanitizationErrorKind::Rejected(FailureKind::Required)
        );
    }

    #[test]
    fn field_sanitizer_rejects_control_chars() {
        let sanitizer = FieldSanitizer::new(256);

        for input in ["a\nb", "a\0b", "a\rb", "a\tb", "a\u{7f}b"] {
            let error = sanitizer.sanitize(Tainted::new(input.to_string())).unwrap_err();
            assert_eq!(error.kind(), SanitizationErrorKind::ContainsControlChars);
        }
    }

    #[test]
    fn field_sanitizer_counts_characters_not_bytes() {
        let sanitizer = FieldSanitizer::new(5);
        assert!(sanitizer.sanitize(Tainted::new("世界世界世".to_string())).is_ok());
        assert!(sanitizer.sanitize(Tainted::new("世界世界世界".to_string())).is_err());
    }

    #[test]
    fn field_sanitizer_too_long_does_not_leak_input() {
        let sanitizer = FieldSanitizer::new(10);
        let secret_input = "SECRET_PASSWORD_12345";

        let error = sanitizer
            .sanitize(Tainted::new(secret_input.to_string()))
            .unwrap_err();

        assert_eq!(error.kind(), SanitizationErrorKind::TooLong);
        let output = error.to_string();
        assert!(!output.contains(secret_input));
        assert!(output.contains("10"));
    }

    #[test]
    fn field_sanitizer_runs_validators_after_cleaning() {
        // The tag is stripped first, so the XSS deny-list sees plain text.
        let sanitizer = FieldSanitizer::new(64).with_validator(NoXssPattern::default());
        assert!(sanitizer
            .sanitize(Tainted::new("<b>fine</b>".to_string()))
            .is_ok());

        let error = sanitizer
            .sanitize(Tainted::new("javascript:alert(1)".to_string()))
            .unwrap_err();
        assert_eq!(
            error.kind(),
            SanitizationErrorKind::Rejected(FailureKind::XssPattern)
        );
    }

    #[test]
    fn field_sanitizer_debug_hides_validators() {
        let sanitizer = FieldSanitizer::new(8).with_validator(validator::email);
        let output = format!("{:?}", sanitizer);

        assert!(output.contains("max_len: 8"));
        assert!(output.contains("validators: 1"));
    }

    #[test]
    #[should_panic(expected = "max_len must be greater than 0")]
    fn field_sanitizer_panics_on_zero_max_len() {
        let _sanitizer = FieldSanitizer::new(0);
    }
}
