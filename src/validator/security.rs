use crate::patterns::{
    builtin_sql_injection, builtin_xss, PasswordClass, PatternSet, MIN_PASSWORD_LEN,
};

use super::{FailureKind, ValidationVerdict, Validator};

/// Password policy check with one flag per requirement.
///
/// `details` holds `min_length`, `lowercase`, `uppercase`, `digit` and
/// `special`, each `"pass"` or `"fail"`.
///
/// ```
/// use request_guard::validator::strong_password;
///
/// let verdict = strong_password("abcdefgh1!");
/// assert!(!verdict.is_valid());
/// assert_eq!(verdict.detail("uppercase"), Some("fail"));
/// assert_eq!(verdict.detail("digit"), Some("pass"));
/// ```
pub fn strong_password(value: &str) -> ValidationVerdict {
    if value.is_empty() {
        return ValidationVerdict::valid();
    }

    let mut checks = vec![("min_length", value.chars().count() >= MIN_PASSWORD_LEN)];
    checks.extend(
        PasswordClass::ALL
            .iter()
            .map(|class| (class.key(), class.is_present_in(value))),
    );

    let all_pass = checks.iter().all(|(_, ok)| *ok);
    let verdict = if all_pass {
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(FailureKind::WeakPassword)
    };
    checks.into_iter().fold(verdict, |v, (key, ok)| {
        v.with_detail(key, if ok { "pass" } else { "fail" })
    })
}

fn deny(patterns: &PatternSet, kind: FailureKind, value: &str) -> ValidationVerdict {
    match patterns.first_match(value) {
        Some(name) => ValidationVerdict::invalid(kind).with_detail("pattern", name),
        None => ValidationVerdict::valid(),
    }
}

/// Rejects values matching the built-in XSS deny-list.
pub fn no_xss_pattern(value: &str) -> ValidationVerdict {
    deny(builtin_xss(), FailureKind::XssPattern, value)
}

/// Rejects values matching the built-in SQL-injection deny-list.
pub fn no_sql_injection_pattern(value: &str) -> ValidationVerdict {
    deny(builtin_sql_injection(), FailureKind::SqlInjectionPattern, value)
}

/// XSS deny-list validator over an injected [`PatternSet`].
///
/// `details["pattern"]` names the pattern that matched.
#[derive(Debug, Clone)]
pub struct NoXssPattern {
    patterns: PatternSet,
}

impl NoXssPattern {
    /// Uses the given deny-list instead of the built-in one.
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }
}

impl Default for NoXssPattern {
    fn default() -> Self {
        Self::new(PatternSet::xss())
    }
}

impl Validator for NoXssPattern {
    fn validate(&self, value: &str) -> ValidationVerdict {
        deny(&self.patterns, FailureKind::XssPattern, value)
    }
}

/// SQL-injection deny-list validator over an injected [`PatternSet`].
#[derive(Debug, Clone)]
pub struct NoSqlInjectionPattern {
    patterns: PatternSet,
}

impl NoSqlInjectionPattern {
    /// Uses the given deny-list instead of the built-in one.
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }
}

impl Default for NoSqlInjectionPattern {
    fn default() -> Self {
        Self::new(PatternSet::sql_injection())
    }
}

impl Validator for NoSqlInjectionPattern {
    fn validate(&self, value: &str) -> ValidationVerdict {
        deny(&self.patterns, FailureKind::SqlInjectionPattern, value)
    }
}
