//! URL classification into public, secure and secure-without-logout.

use std::fmt;

use serde::Serialize;

use crate::config::GuardConfig;

/// Security class of a request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlClass {
    /// No token is attached and failures never sign the user out
    Public,
    /// Token attached, but a 401 never signs the user out
    SecureNoLogout,
    /// Token attached; a genuine 401 signs the user out
    Secure,
}

impl fmt::Display for UrlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlClass::Public => write!(f, "public"),
            UrlClass::SecureNoLogout => write!(f, "secure_no_logout"),
            UrlClass::Secure => write!(f, "secure"),
        }
    }
}

/// Maps a URL to its [`UrlClass`] by substring containment.
///
/// The public list is checked first, then the no-logout list; anything else
/// is [`UrlClass::Secure`]. Matching is plain containment anywhere in the
/// URL, including the query string, so `"/static/"` also matches
/// `"/api/x?next=/static/"`.
///
/// # Examples
///
/// ```
/// use request_guard::{UrlClass, UrlClassifier};
///
/// let classifier = UrlClassifier::new(["/auth/login"], ["/api/v1/ports"]);
///
/// assert_eq!(classifier.classify("https://h/auth/login"), UrlClass::Public);
/// assert_eq!(classifier.classify("https://h/api/v1/ports/7"), UrlClass::SecureNoLogout);
/// assert_eq!(classifier.classify("https://h/api/v1/users"), UrlClass::Secure);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlClassifier {
    public: Vec<String>,
    no_logout: Vec<String>,
    case_insensitive: bool,
}

impl UrlClassifier {
    /// Creates a case-insensitive classifier from the two lists.
    pub fn new<P, N, S, T>(public: P, no_logout: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::build(
            public.into_iter().map(Into::into).collect(),
            no_logout.into_iter().map(Into::into).collect(),
            true,
        )
    }

    /// Creates a classifier from configuration.
    pub fn from_config(config: &GuardConfig) -> Self {
        Self::build(
            config.public_url_substrings.clone(),
            config.no_logout_on_401_substrings.clone(),
            config.case_insensitive_urls,
        )
    }

    fn build(public: Vec<String>, no_logout: Vec<String>, case_insensitive: bool) -> Self {
        let fold = |list: Vec<String>| -> Vec<String> {
            if case_insensitive {
                list.into_iter().map(|s| s.to_lowercase()).collect()
            } else {
                list
            }
        };
        Self {
            public: fold(public),
            no_logout: fold(no_logout),
            case_insensitive,
        }
    }

    /// Classifies a URL.
    pub fn classify(&self, target_url: &str) -> UrlClass {
        let folded;
        let url = if self.case_insensitive {
            folded = target_url.to_lowercase();
            folded.as_str()
        } else {
            target_url
        };

        if contains_any(url, &self.public) {
            UrlClass::Public
        } else if contains_any(url, &self.no_logout) {
            UrlClass::SecureNoLogout
        } else {
            UrlClass::Secure
        }
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

fn contains_any(url: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| url.contains(n.as_str()))
}
