use std::fmt;

/// A raw form-field value that has not been through a [`Sanitizer`](crate::Sanitizer).
///
/// Form code wraps every user-typed value in `Tainted` as soon as it is read.
/// The only way back to the inner value is a sanitizer, which either returns
/// a [`Verified`](crate::Verified) value or a
/// [`SanitizationError`](crate::SanitizationError).
///
/// # Examples
///
/// ```
/// use request_guard::{FieldSanitizer, Sanitizer, Tainted};
///
/// let comment = Tainted::new("  <b>hello</b>  ".to_string());
/// let verified = FieldSanitizer::new(100).sanitize(comment).expect("plain text survives");
/// assert_eq!(verified.as_ref(), "hello");
/// ```
// Keep the field private and do not add Deref/AsRef/From impls: any of them
// would let raw input skip the sanitizer.
#[derive(Clone)]
pub struct Tainted<T> {
    inner: T,
}

impl<T> Tainted<T> {
    /// Marks a value as untrusted.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Hands the raw value to a sanitizer inside this crate.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
