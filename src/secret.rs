use std::fmt;

/// Wrapper for credential material such as bearer tokens.
///
/// Token values travel through the authorization policy, the audit trail and
/// `tracing` fields. `Secret<T>` makes sure none of those paths can print them:
/// `Debug` and `Display` always render `[REDACTED]`, and the only way to read
/// the value is [`expose_secret`](Self::expose_secret).
///
/// # Examples
///
/// ```
/// use request_guard::Secret;
///
/// let token = Secret::new("eyJhbGciOi.payload.sig".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "eyJhbGciOi.payload.sig");
/// ```
// Do NOT derive Clone, Copy or Default; a token should be copied only by
// explicitly exposing it.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a credential.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Reads the credential. Keep the result out of logs.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
