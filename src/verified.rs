/// A field value that passed a [`Sanitizer`](crate::Sanitizer).
///
/// There is no public constructor: the only producers are sanitizers in this
/// crate, so holding a `Verified<String>` proves the text went through markup
/// stripping, length limits and the configured validators.
///
/// ```compile_fail
/// use request_guard::Verified;
///
/// let forged = Verified::new_unchecked("data".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Wraps a value that has already been checked by the caller.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
