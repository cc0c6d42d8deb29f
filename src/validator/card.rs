use crate::patterns::luhn_valid;

use super::{FailureKind, ValidationVerdict};

/// Payment card number check.
///
/// Whitespace is removed, the rest must be digits and pass the Luhn
/// checksum. Issuer prefixes and lengths are not checked.
///
/// ```
/// use request_guard::validator::credit_card;
///
/// assert!(credit_card("4532 0151 1283 0366").is_valid());
/// assert!(!credit_card("4532015112830367").is_valid());
/// ```
pub fn credit_card(value: &str) -> ValidationVerdict {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return ValidationVerdict::valid();
    }
    if digits.chars().all(|c| c.is_ascii_digit()) && luhn_valid(&digits) {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::InvalidCreditCard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_luhn_numbers() {
        assert!(credit_card("4532015112830366").is_valid());
        assert!(credit_card("4111111111111111").is_valid());
        assert!(!credit_card("4532015112830367").is_valid());
    }

    #[test]
    fn non_digits_are_rejected() {
        assert_eq!(
            credit_card("4532-0151-1283-0366").failure_kind(),
            Some(FailureKind::InvalidCreditCard)
        );
        assert!(!credit_card("４５３２015112830366").is_valid());
    }

    #[test]
    fn blank_is_left_to_required() {
        assert!(credit_card("   ").is_valid());
    }
}
