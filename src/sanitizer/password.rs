use std::fmt;

use crate::patterns::{PasswordClass, MIN_PASSWORD_LEN, STRONG_PASSWORD_LEN};

/// Coarse strength label for a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// At least one check failed
    Weak,
    /// All checks passed
    Medium,
    /// All checks passed and the password is long
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => write!(f, "weak"),
            Strength::Medium => write!(f, "medium"),
            Strength::Strong => write!(f, "strong"),
        }
    }
}

/// Result of [`password_strength`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    /// True when `issues` is empty
    pub is_valid: bool,
    /// Strength label
    pub strength: Strength,
    /// One human-readable message per failed check
    pub issues: Vec<String>,
}

/// Rates a password.
///
/// Checks, in order: at least 8 characters, then one each of lowercase,
/// uppercase, digit and special character. Valid passwords of 12 or more
/// characters are strong.
///
/// ```
/// use request_guard::sanitizer::{password_strength, Strength};
///
/// assert_eq!(password_strength("Ab1!aaaa").strength, Strength::Medium);
/// assert_eq!(password_strength("Ab1!aaaaaaaa").strength, Strength::Strong);
/// assert_eq!(password_strength("password").issues.len(), 3);
/// ```
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let mut issues = Vec::new();

    if len < MIN_PASSWORD_LEN {
        issues.push(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }
    for class in PasswordClass::ALL {
        if !class.is_present_in(password) {
            issues.push(format!("Password must contain at least one {}", class));
        }
    }

    let is_valid = issues.is_empty();
    let strength = match (is_valid, len >= STRONG_PASSWORD_LEN) {
        (true, true) => Strength::Strong,
        (true, false) => Strength::Medium,
        (false, _) => Strength::Weak,
    };

    PasswordStrength {
        is_valid,
        strength,
        issues,
    }
}
