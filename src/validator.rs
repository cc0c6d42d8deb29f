//! Field validators used by form code.
//!
//! Every validator maps a field value to a [`ValidationVerdict`]. Failures are
//! returned as data, never as errors, so callers can render field-level
//! messages without interrupting control flow. Empty values are valid for
//! every validator except [`required`]; emptiness is a separate rule so
//! validators compose.
//!
//! # Examples
//!
//! ```
//! use request_guard::validator::{self, FailureKind, Validator, ValidatorChain};
//!
//! let age = ValidatorChain::new()
//!     .with(validator::required)
//!     .with(validator::numeric_range(18.0, 120.0));
//!
//! assert!(age.validate("42").is_valid());
//!
//! let verdict = age.validate("12");
//! assert_eq!(verdict.failure_kind(), Some(FailureKind::OutOfRange));
//! assert_eq!(verdict.detail("min"), Some("18"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

mod bounds;
mod card;
mod format;
mod security;

pub use bounds::{
    date_range, numeric_range, string_length, whitelist, DateRange, NumericRange, StringLength,
    Whitelist,
};
pub use card::credit_card;
pub use format::{alphanumeric, email, phone, required, url};
pub use security::{
    no_sql_injection_pattern, no_xss_pattern, strong_password, NoSqlInjectionPattern,
    NoXssPattern,
};

/// Why a value failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Value is empty but the field is required
    Required,
    /// Not a plausible email address
    InvalidEmail,
    /// Password is missing a length or character-class requirement
    WeakPassword,
    /// Matches the XSS deny-list
    XssPattern,
    /// Matches the SQL-injection deny-list
    SqlInjectionPattern,
    /// Not all digits, or fails the Luhn checksum
    InvalidCreditCard,
    /// Could not be parsed as a number
    NotANumber,
    /// Number outside the allowed range
    OutOfRange,
    /// Character count outside the allowed range
    LengthOutOfRange,
    /// Not one of the allowed values
    NotAllowed,
    /// Could not be parsed as a date
    InvalidDate,
    /// Date outside the allowed range
    DateOutOfRange,
    /// Not an absolute http(s) URL
    InvalidUrl,
    /// Not a plausible phone number
    InvalidPhone,
    /// Contains characters other than ASCII letters and digits
    NotAlphanumeric,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureKind::Required => "this field is required",
            FailureKind::InvalidEmail => "invalid email address",
            FailureKind::WeakPassword => "password does not meet strength requirements",
            FailureKind::XssPattern => "contains potentially unsafe markup",
            FailureKind::SqlInjectionPattern => "contains potentially unsafe SQL",
            FailureKind::InvalidCreditCard => "invalid card number",
            FailureKind::NotANumber => "not a number",
            FailureKind::OutOfRange => "value out of range",
            FailureKind::LengthOutOfRange => "length out of range",
            FailureKind::NotAllowed => "value not allowed",
            FailureKind::InvalidDate => "invalid date",
            FailureKind::DateOutOfRange => "date out of range",
            FailureKind::InvalidUrl => "invalid URL",
            FailureKind::InvalidPhone => "invalid phone number",
            FailureKind::NotAlphanumeric => "only letters and digits are allowed",
        };
        f.write_str(text)
    }
}

/// Outcome of a single validation call.
///
/// `details` carries the context a caller needs to build a message, such as
/// the offending value and the bounds it violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    is_valid: bool,
    failure_kind: Option<FailureKind>,
    details: BTreeMap<String, String>,
}

impl ValidationVerdict {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            failure_kind: None,
            details: BTreeMap::new(),
        }
    }

    /// A failing verdict of the given kind.
    pub fn invalid(kind: FailureKind) -> Self {
        Self {
            is_valid: false,
            failure_kind: Some(kind),
            details: BTreeMap::new(),
        }
    }

    /// Adds a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }

    /// True when the value passed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The failure kind, if the value failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure_kind
    }

    /// All detail entries.
    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    /// Looks up one detail entry.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// A field validator.
///
/// Implemented for plain functions and closures of type
/// `Fn(&str) -> ValidationVerdict`, and for the parameterized validator
/// structs in this module.
pub trait Validator: Send + Sync {
    /// Validates one value.
    fn validate(&self, value: &str) -> ValidationVerdict;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationVerdict + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationVerdict {
        self(value)
    }
}

/// An ordered list of validators; the first failure wins.
#[derive(Default)]
pub struct ValidatorChain {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorChain {
    /// Creates an empty chain, which accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator, builder style.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.push(validator);
        self
    }

    /// Appends a validator.
    pub fn push(&mut self, validator: impl Validator + 'static) {
        self.validators.push(Box::new(validator));
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True if the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for ValidatorChain {
    fn validate(&self, value: &str) -> ValidationVerdict {
        self.validators
            .iter()
            .map(|v| v.validate(value))
            .find(|verdict| !verdict.is_valid())
            .unwrap_or_else(ValidationVerdict::valid)
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_constructors() {
        let ok = ValidationVerdict::valid();
        assert!(ok.is_valid());
        assert!(ok.failure_kind().is_none());
        assert!(ok.details().is_empty());

        let bad = ValidationVerdict::invalid(FailureKind::NotAllowed).with_detail("value", "x");
        assert!(!bad.is_valid());
        assert_eq!(bad.failure_kind(), Some(FailureKind::NotAllowed));
        assert_eq!(bad.detail("value"), Some("x"));
        assert_eq!(bad.detail("missing"), None);
    }

    #[test]
    fn verdict_serializes_for_the_form_layer() {
        let verdict = ValidationVerdict::invalid(FailureKind::LengthOutOfRange)
            .with_detail("max", 10);
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["is_valid"], false);
        assert_eq!(json["failure_kind"], "length_out_of_range");
        assert_eq!(json["details"]["max"], "10");
    }

    #[test]
    fn closures_are_validators() {
        let no_spaces = |value: &str| {
            if value.contains(' ') {
                ValidationVerdict::invalid(FailureKind::NotAllowed)
            } else {
                ValidationVerdict::valid()
            }
        };

        assert!(no_spaces.validate("abc").is_valid());
        assert!(!no_spaces.validate("a b").is_valid());
    }

    #[test]
    fn chain_returns_first_failure() {
        let chain = ValidatorChain::new()
            .with(required)
            .with(email)
            .with(string_length(0, 5));

        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.validate("").failure_kind(),
            Some(FailureKind::Required)
        );
        assert_eq!(
            chain.validate("not-an-email").failure_kind(),
            Some(FailureKind::InvalidEmail)
        );
        assert_eq!(
            chain.validate("a@example.com").failure_kind(),
            Some(FailureKind::LengthOutOfRange)
        );
    }

    #[test]
    fn empty_chain_accepts_everything() {
        let chain = ValidatorChain::new();
        assert!(chain.is_empty());
        assert!(chain.validate("<script>").is_valid());
    }

    #[test]
    fn failure_kind_messages_are_human_readable() {
        assert_eq!(FailureKind::Required.to_string(), "this field is required");
        assert_eq!(FailureKind::InvalidCreditCard.to_string(), "invalid card number");
    }
}
