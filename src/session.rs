//! Collaborators owned by the surrounding application and the snapshots the
//! policy takes of them.
//!
//! The policy never mutates session state. It reads a [`TokenState`] and a
//! [`SessionKind`] once per request and may ask the [`SessionTerminator`] to
//! sign the user out.

use std::fmt;

use serde::Serialize;

use crate::Secret;

/// Source of the current access token.
pub trait TokenProvider: Send + Sync {
    /// The current token, if the user has one.
    fn current_token(&self) -> Option<String>;

    /// True if the token can no longer be used.
    fn is_expired(&self, token: &str) -> bool;
}

/// Reports whether the active session is an administrator session.
pub trait SessionInspector: Send + Sync {
    /// True for administrator sessions.
    fn is_admin_session(&self) -> bool;
}

/// Ends the user's session.
///
/// Implementations must be safe to call while other requests are in flight.
pub trait SessionTerminator: Send + Sync {
    /// Clears the session and sends the user back to sign-in.
    fn sign_out(&self);
}

/// Snapshot of the token taken just before a request is authorized.
///
/// # Examples
///
/// ```
/// use request_guard::TokenState;
///
/// let state = TokenState::valid("abc");
/// assert_eq!(state.usable_token(), Some("abc"));
/// assert!(TokenState::expired("abc").usable_token().is_none());
/// assert!(TokenState::absent().usable_token().is_none());
/// ```
#[derive(Debug)]
pub struct TokenState {
    token_value: Option<Secret<String>>,
    is_expired: bool,
}

impl TokenState {
    /// Builds a snapshot from explicit parts.
    pub fn new(token_value: Option<String>, is_expired: bool) -> Self {
        Self {
            token_value: token_value.map(Secret::new),
            is_expired,
        }
    }

    /// No token present.
    pub fn absent() -> Self {
        Self::new(None, false)
    }

    /// A present, unexpired token.
    pub fn valid(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()), false)
    }

    /// A present but expired token.
    pub fn expired(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()), true)
    }

    /// Reads the provider once.
    ///
    /// Expiry is only asked about when a token exists.
    pub fn from_provider(provider: &dyn TokenProvider) -> Self {
        match provider.current_token() {
            Some(token) => {
                let is_expired = provider.is_expired(&token);
                Self::new(Some(token), is_expired)
            }
            None => Self::absent(),
        }
    }

    /// True if a token is present.
    pub fn has_token(&self) -> bool {
        self.token_value.is_some()
    }

    /// True if the token was reported expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired
    }

    /// The token if it is present, non-empty and not expired.
    pub fn usable_token(&self) -> Option<&str> {
        if self.is_expired {
            return None;
        }
        self.token_value
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Kind of the active session.
///
/// Only failure handling looks at this; URL classification does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Administrator session; never signed out by the policy
    Admin,
    /// Regular user session
    Standard,
}

impl SessionKind {
    /// Reads the inspector once.
    pub fn from_inspector(inspector: &dyn SessionInspector) -> Self {
        if inspector.is_admin_session() {
            SessionKind::Admin
        } else {
            SessionKind::Standard
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Admin => write!(f, "admin"),
            SessionKind::Standard => write!(f, "standard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTokens {
        token: Option<&'static str>,
        expired: bool,
        expiry_checks: AtomicUsize,
    }

    impl TokenProvider for FixedTokens {
        fn current_token(&self) -> Option<String> {
            self.token.map(str::to_string)
        }

        fn is_expired(&self, _token: &str) -> bool {
            self.expiry_checks.fetch_add(1, Ordering::SeqCst);
            self.expired
        }
    }

    struct Admin(bool);

    impl SessionInspector for Admin {
        fn is_admin_session(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn from_provider_reads_token_and_expiry() {
        let provider = FixedTokens {
            token: Some("t1"),
            expired: false,
            expiry_checks: AtomicUsize::new(0),
        };
        let state = TokenState::from_provider(&provider);

        assert!(state.has_token());
        assert_eq!(state.usable_token(), Some("t1"));
        assert_eq!(provider.expiry_checks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn from_provider_skips_expiry_without_token() {
        let provider = FixedTokens {
            token: None,
            expired: true,
            expiry_checks: AtomicUsize::new(0),
        };
        let state = TokenState::from_provider(&provider);

        assert!(!state.has_token());
        assert!(!state.is_expired());
        assert_eq!(provider.expiry_checks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn expired_token_is_not_usable() {
        let state = TokenState::expired("t1");
        assert!(state.has_token());
        assert!(state.is_expired());
        assert_eq!(state.usable_token(), None);
    }

    #[test]
    fn empty_token_is_not_usable() {
        assert_eq!(TokenState::valid("").usable_token(), None);
    }

    #[test]
    fn debug_does_not_leak_token() {
        let output = format!("{:?}", TokenState::valid("super-secret-token"));
        assert!(!output.contains("super-secret-token"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn session_kind_from_inspector() {
        assert_eq!(SessionKind::from_inspector(&Admin(true)), SessionKind::Admin);
        assert_eq!(
            SessionKind::from_inspector(&Admin(false)),
            SessionKind::Standard
        );
        assert_eq!(SessionKind::Admin.to_string(), "admin");
    }
}
