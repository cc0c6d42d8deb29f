//! Pattern library shared by the sanitizers and validators.
//!
//! Everything here is immutable once built. Deny-lists are exposed as
//! [`PatternSet`] values so callers can swap or extend them without touching
//! the validators that consume them.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PatternError;

/// Minimum password length accepted by the strength checks.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Password length at which a valid password is rated strong.
pub const STRONG_PASSWORD_LEN: usize = 12;

/// URL schemes considered safe to navigate to.
pub const SAFE_URL_SCHEMES: &[&str] = &["http", "https"];

/// Characters that count as "special" for password strength.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>_-+=[]\\/;'`~";

const XSS_SOURCES: &[(&str, &str)] = &[
    ("script_tag", r"(?i)<\s*/?\s*script\b"),
    ("javascript_scheme", r"(?i)javascript\s*:"),
    ("event_handler", r"(?i)\bon[a-z]+\s*="),
    ("embedded_object", r"(?i)<\s*(iframe|object|embed)\b"),
    ("eval_call", r"(?i)\beval\s*\("),
];

const SQL_INJECTION_SOURCES: &[(&str, &str)] = &[
    (
        "sql_keyword",
        r"(?i)\b(select|insert|update|delete|drop|create|alter|exec|execute|union|truncate)\b",
    ),
    ("sql_token", r#"(--|;|/\*|\*/|'|")"#),
    (
        "tautology",
        r#"(?i)\b(or|and)\b\s+['"]?\w+['"]?\s*=\s*['"]?\w+"#,
    ),
];

/// A compiled regular expression registered under a name.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    name: String,
    regex: Regex,
}

impl NamedPattern {
    /// Compiles `source` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if `source` is not a valid regular expression.
    pub fn new(name: impl Into<String>, source: &str) -> Result<Self, PatternError> {
        let name = name.into();
        match Regex::new(source) {
            Ok(regex) => Ok(Self { name, regex }),
            Err(e) => Err(PatternError::new(name, e)),
        }
    }

    /// Returns the name the pattern was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered deny-list of named patterns.
///
/// A value is rejected as soon as any pattern matches. The default sets are
/// heuristic: obfuscated payloads will get through, so these are a
/// defense-in-depth layer on top of server-side validation and output
/// escaping.
///
/// # Examples
///
/// ```
/// use request_guard::patterns::PatternSet;
///
/// let xss = PatternSet::xss();
/// assert_eq!(xss.first_match("<img src=x onerror=alert(1)>"), Some("event_handler"));
///
/// let custom = PatternSet::xss().with_pattern("vbscript", r"(?i)vbscript\s*:").unwrap();
/// assert!(custom.is_match("VBScript:msgbox"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<NamedPattern>,
}

impl PatternSet {
    /// Creates an empty set that matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles a set from `(name, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let patterns = sources
            .into_iter()
            .map(|(name, source)| NamedPattern::new(name, source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The built-in XSS deny-list: script tags, the `javascript:` scheme,
    /// inline event handlers, iframe/object/embed tags and `eval(` calls.
    pub fn xss() -> Self {
        builtin_xss().clone()
    }

    /// The built-in SQL-injection deny-list: SQL keywords on word
    /// boundaries, quote/semicolon/comment tokens and `OR`/`AND` tautologies.
    pub fn sql_injection() -> Self {
        builtin_sql_injection().clone()
    }

    fn from_builtin(sources: &[(&str, &str)]) -> Self {
        let patterns = sources
            .iter()
            .filter_map(|(name, source)| NamedPattern::new(*name, source).ok())
            .collect();
        Self { patterns }
    }

    /// Appends a pattern, builder style.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if `source` does not compile.
    pub fn with_pattern(mut self, name: &str, source: &str) -> Result<Self, PatternError> {
        self.patterns.push(NamedPattern::new(name, source)?);
        Ok(self)
    }

    /// Returns the name of the first pattern matching `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(text))
            .map(NamedPattern::name)
    }

    /// Returns true if any pattern matches `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// Iterates over the pattern names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(NamedPattern::name)
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

pub(crate) fn builtin_xss() -> &'static PatternSet {
    static SET: OnceLock<PatternSet> = OnceLock::new();
    SET.get_or_init(|| PatternSet::from_builtin(XSS_SOURCES))
}

pub(crate) fn builtin_sql_injection() -> &'static PatternSet {
    static SET: OnceLock<PatternSet> = OnceLock::new();
    SET.get_or_init(|| PatternSet::from_builtin(SQL_INJECTION_SOURCES))
}

/// Character classes a strong password must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordClass {
    /// `a-z`
    Lowercase,
    /// `A-Z`
    Uppercase,
    /// `0-9`
    Digit,
    /// One of [`PASSWORD_SPECIAL_CHARS`]
    Special,
}

impl PasswordClass {
    /// All classes, in the order issues are reported.
    pub const ALL: [PasswordClass; 4] = [
        PasswordClass::Lowercase,
        PasswordClass::Uppercase,
        PasswordClass::Digit,
        PasswordClass::Special,
    ];

    /// Returns true if `c` belongs to this class.
    pub fn contains(self, c: char) -> bool {
        match self {
            PasswordClass::Lowercase => c.is_ascii_lowercase(),
            PasswordClass::Uppercase => c.is_ascii_uppercase(),
            PasswordClass::Digit => c.is_ascii_digit(),
            PasswordClass::Special => PASSWORD_SPECIAL_CHARS.contains(c),
        }
    }

    /// Returns true if any character of `text` belongs to this class.
    pub fn is_present_in(self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }

    /// Key used for this class in structured validation details.
    pub fn key(self) -> &'static str {
        match self {
            PasswordClass::Lowercase => "lowercase",
            PasswordClass::Uppercase => "uppercase",
            PasswordClass::Digit => "digit",
            PasswordClass::Special => "special",
        }
    }
}

impl fmt::Display for PasswordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordClass::Lowercase => write!(f, "lowercase letter"),
            PasswordClass::Uppercase => write!(f, "uppercase letter"),
            PasswordClass::Digit => write!(f, "number"),
            PasswordClass::Special => write!(f, "special character"),
        }
    }
}

/// Luhn checksum over a string of ASCII digits.
///
/// Every second digit from the right is doubled (minus 9 when the result
/// exceeds 9); the number is valid when the digit sum is a multiple of 10.
/// Returns false for empty input or any non-digit character.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0_u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

fn cached(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("built-in pattern compiles"))
}

pub(crate) fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
}

pub(crate) fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^\+?[0-9][0-9\s\-().]{5,18}[0-9]$")
}

pub(crate) fn alphanumeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^[a-zA-Z0-9]+$")
}

/// Markup tags and HTML comments.
pub(crate) fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?s)<!--.*?-->|</?[a-zA-Z!?][^>]*>")
}

/// Elements whose content is never rendered as text.
pub(crate) fn non_text_element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"(?is)<\s*(script|style)\b[^>]*>.*?<\s*/\s*(script|style)\s*>",
    )
}

/// Elements stripped, content included, by `sanitize_html`.
pub(crate) fn dangerous_element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"(?is)<\s*(script|style|iframe|object|embed|form|textarea)\b[^>]*>.*?<\s*/\s*(script|style|iframe|object|embed|form|textarea)\s*>",
    )
}

/// Void or unterminated dangerous tags left after element removal.
pub(crate) fn dangerous_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"(?is)<\s*/?\s*(script|style|iframe|object|embed|form|textarea|link|meta|base)\b[^>]*>",
    )
}

pub(crate) fn event_handler_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#,
    )
}

pub(crate) fn dangerous_url_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r#"(?i)\s+(href|src|action|formaction|xlink:href)\s*=\s*("\s*(javascript\s*:|vbscript\s*:|data\s*:\s*text/html)[^"]*"|'\s*(javascript\s*:|vbscript\s*:|data\s*:\s*text/html)[^']*'|(javascript\s*:|vbscript\s*:|data\s*:\s*text/html)[^\s>]*)"#,
    )
}
