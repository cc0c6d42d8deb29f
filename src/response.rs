use std::fmt;

/// What the transport returned for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The backend answered with a success status
    Success(String),
    /// The request failed
    Failure(Failure),
}

impl ResponseOutcome {
    /// Converts into a `Result`, keeping the failure as the error.
    pub fn into_result(self) -> Result<String, Failure> {
        match self {
            ResponseOutcome::Success(body) => Ok(body),
            ResponseOutcome::Failure(failure) => Err(failure),
        }
    }
}

impl From<Failure> for ResponseOutcome {
    fn from(failure: Failure) -> Self {
        ResponseOutcome::Failure(failure)
    }
}

/// A failed request.
///
/// `status_code` is `None` when no HTTP response arrived at all (DNS, TLS,
/// connection reset, timeout). The interceptor hands this value back to the
/// caller unchanged whatever it decides.
///
/// # Examples
///
/// ```
/// use request_guard::Failure;
///
/// let failure = Failure::http(401, "Session expired");
/// assert_eq!(failure.status_code(), Some(401));
/// assert!(Failure::network("connection reset").is_network());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    status_code: Option<u16>,
    error_message: Option<String>,
}

impl Failure {
    /// Creates a failure from raw parts.
    pub fn new(status_code: Option<u16>, error_message: Option<String>) -> Self {
        Self {
            status_code,
            error_message,
        }
    }

    /// A failure with an HTTP status and message.
    pub fn http(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(Some(status_code), Some(message.into()))
    }

    /// A failure with an HTTP status and no message body.
    pub fn status(status_code: u16) -> Self {
        Self::new(Some(status_code), None)
    }

    /// A network-layer failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(None, Some(message.into()))
    }

    /// The HTTP status, if a response arrived.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True if no HTTP response arrived.
    pub fn is_network(&self) -> bool {
        self.status_code.is_none()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status_code, self.error_message.as_deref()) {
            (Some(code), Some(msg)) => write!(f, "request failed with status {}: {}", code, msg),
            (Some(code), None) => write!(f, "request failed with status {}", code),
            (None, Some(msg)) => write!(f, "network failure: {}", msg),
            (None, None) => write!(f, "network failure"),
        }
    }
}

impl std::error::Error for Failure {}
