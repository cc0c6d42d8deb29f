//! Static configuration consumed by the request policy.
//!
//! All lists and header values are supplied from outside so deployments can
//! change them without touching the decision logic. [`GuardConfig::default`]
//! carries the values the web client ships with.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

/// Header used to identify the tenant on every request.
pub const DEFAULT_TENANT_HEADER_NAME: &str = "X-Tenant-ID";

/// Tenant identifier sent when none is configured.
pub const DEFAULT_TENANT_HEADER_VALUE: &str = "default";

const DEFAULT_PUBLIC_URL_SUBSTRINGS: &[&str] = &[
    "/auth/login",
    "/auth/validate-otp",
    "/otp/validate",
    "/static/",
    "/assets/",
    "/locales/",
    "/i18n/",
];

const DEFAULT_NO_LOGOUT_ON_401_SUBSTRINGS: &[&str] = &[
    "/api/v1/ports",
    "/api/v1/notifications",
    "/api/v1/preferences",
];

const DEFAULT_AUTH_FAILURE_PHRASES: &[&str] = &[
    "invalid token",
    "expired token",
    "unauthorized",
    "session expired",
];

/// Configuration for [`RequestPolicy`](crate::RequestPolicy).
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Examples
///
/// ```
/// use request_guard::GuardConfig;
///
/// let config = GuardConfig::from_json(r#"{"tenant_header_value": "acme"}"#).unwrap();
/// assert_eq!(config.tenant_header_value, "acme");
/// assert!(config.public_url_substrings.iter().any(|s| s == "/auth/login"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// URL substrings that mark a request as public (no token, no sign-out)
    pub public_url_substrings: Vec<String>,
    /// URL substrings exempt from sign-out on 401
    pub no_logout_on_401_substrings: Vec<String>,
    /// Name of the tenant header attached to every request
    pub tenant_header_name: String,
    /// Value of the tenant header
    pub tenant_header_value: String,
    /// Message fragments that mark a 401 as a genuine session failure
    pub auth_failure_phrases: Vec<String>,
    /// Fold case on both sides when matching URL substrings
    pub case_insensitive_urls: bool,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_url_substrings: owned(DEFAULT_PUBLIC_URL_SUBSTRINGS),
            no_logout_on_401_substrings: owned(DEFAULT_NO_LOGOUT_ON_401_SUBSTRINGS),
            tenant_header_name: DEFAULT_TENANT_HEADER_NAME.to_string(),
            tenant_header_value: DEFAULT_TENANT_HEADER_VALUE.to_string(),
            auth_failure_phrases: owned(DEFAULT_AUTH_FAILURE_PHRASES),
            case_insensitive_urls: true,
        }
    }
}

impl GuardConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or a value fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: GuardConfig = serde_json::from_str(json)
            .map_err(|e| ConfigError::new("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the public URL list.
    pub fn with_public_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_url_substrings = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the no-logout-on-401 list.
    pub fn with_no_logout_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_logout_on_401_substrings = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tenant header name and value.
    pub fn with_tenant_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tenant_header_name = name.into();
        self.tenant_header_value = value.into();
        self
    }

    /// Replaces the auth-failure phrase set.
    pub fn with_auth_failure_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_failure_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Chooses case-sensitive or case-insensitive URL matching.
    pub fn with_case_insensitive_urls(mut self, enabled: bool) -> Self {
        self.case_insensitive_urls = enabled;
        self
    }

    /// Checks the configuration for values that would break the policy.
    ///
    /// Empty list entries are rejected because an empty substring matches
    /// every URL or message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if !is_header_token(&self.tenant_header_name) {
            return Err(ConfigError::new(
                "tenant_header_name",
                "must be a non-empty HTTP header name",
            )
            .into());
        }
        if self.tenant_header_value.trim().is_empty()
            || self.tenant_header_value.contains(['\r', '\n'])
        {
            return Err(ConfigError::new(
                "tenant_header_value",
                "must be non-empty and contain no line breaks",
            )
            .into());
        }
        reject_empty_entries("public_url_substrings", &self.public_url_substrings)?;
        reject_empty_entries(
            "no_logout_on_401_substrings",
            &self.no_logout_on_401_substrings,
        )?;
        reject_empty_entries("auth_failure_phrases", &self.auth_failure_phrases)?;
        Ok(())
    }
}

fn reject_empty_entries(field: &'static str, entries: &[String]) -> Result<(), Error> {
    if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::new(field, "entries must not be empty").into());
    }
    Ok(())
}

fn is_header_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}
