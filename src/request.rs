use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// HTTP method for an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Patch => write!(f, "PATCH"),
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Header map with case-insensitive names.
///
/// Setting a header removes every existing entry with the same name, so a
/// name appears at most once. Iteration order is insertion order but
/// callers should not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.entries.push((name, value.into()));
    }

    /// Returns the value of a header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes a header, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let mut removed = None;
        self.entries.retain(|(n, v)| {
            if n.eq_ignore_ascii_case(name) {
                removed = Some(v.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of entries whose name matches, ignoring case.
    pub fn count(&self, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .count()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A request on its way to the backend.
///
/// Values are immutable from the policy's point of view: [`with_header`]
/// returns a new request and leaves the original untouched.
///
/// [`with_header`]: OutgoingRequest::with_header
///
/// # Examples
///
/// ```
/// use request_guard::{HttpMethod, OutgoingRequest};
///
/// let original = OutgoingRequest::new(HttpMethod::Get, "https://api.example.com/api/v1/users");
/// let tagged = original.with_header("X-Trace", "1");
///
/// assert!(original.headers().is_empty());
/// assert_eq!(tagged.headers().get("x-trace"), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    method: HttpMethod,
    target_url: String,
    headers: Headers,
    body: Option<String>,
}

impl OutgoingRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, target_url: impl Into<String>) -> Self {
        Self {
            method,
            target_url: target_url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(target_url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, target_url)
    }

    /// Shorthand for a POST request with a body.
    pub fn post(target_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, target_url).with_body(body)
    }

    /// Returns a copy with the header set, replacing any same-named header.
    #[must_use]
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.headers.set(name, value);
        next
    }

    /// Returns a copy without the named header.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.headers.remove(name);
        next
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the target URL.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Returns the headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The target URL with userinfo, query string and fragment removed.
    ///
    /// Used wherever the URL is logged or audited. Borrows unless userinfo
    /// has to be cut out of the middle.
    pub fn redacted_url(&self) -> Cow<'_, str> {
        let end = self
            .target_url
            .find(['?', '#'])
            .unwrap_or(self.target_url.len());
        let url = &self.target_url[..end];

        let authority_start = match url.find("://") {
            Some(i) => i + 3,
            None if url.starts_with("//") => 2,
            None => return Cow::Borrowed(url),
        };
        let authority_end = url[authority_start..]
            .find('/')
            .map_or(url.len(), |i| authority_start + i);
        match url[authority_start..authority_end].rfind('@') {
            Some(at) => Cow::Owned(format!(
                "{}{}",
                &url[..authority_start],
                &url[authority_start + at + 1..]
            )),
            None => Cow::Borrowed(url),
        }
    }
}
