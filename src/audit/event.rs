//! Audit event schema.

use std::fmt;

use serde::Serialize;

use crate::classifier::UrlClass;
use crate::policy::{Decision, FailureCategory, FailureOutcome};
use crate::request::{HttpMethod, OutgoingRequest};
use crate::session::SessionKind;

/// A recorded failure decision containing only safe metadata.
///
/// # Example
///
/// ```
/// use request_guard::audit::AuditEvent;
/// use request_guard::{Decision, FailureCategory, HttpMethod, SessionKind, UrlClass};
///
/// let event = AuditEvent::new(
///     HttpMethod::Get,
///     "https://h/api/v1/users",
///     UrlClass::Secure,
///     SessionKind::Standard,
///     FailureCategory::AuthFailure,
///     Decision::SignOut,
/// )
/// .with_status(401);
///
/// assert_eq!(event.decision(), Decision::SignOut);
/// assert!(event.to_string().contains("status=401"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    method: HttpMethod,
    /// Path without query parameters
    redacted_url: String,
    url_class: UrlClass,
    session_kind: SessionKind,
    /// None for network failures
    status_code: Option<u16>,
    category: FailureCategory,
    decision: Decision,
}

impl AuditEvent {
    /// Creates an event with required fields.
    ///
    /// `redacted_url` is stored as given; callers pass
    /// [`OutgoingRequest::redacted_url`] or use [`for_request`](Self::for_request).
    pub fn new(
        method: HttpMethod,
        redacted_url: impl Into<String>,
        url_class: UrlClass,
        session_kind: SessionKind,
        category: FailureCategory,
        decision: Decision,
    ) -> Self {
        Self {
            method,
            redacted_url: redacted_url.into(),
            url_class,
            session_kind,
            status_code: None,
            category,
            decision,
        }
    }

    /// Builds an event from a request and its classified failure.
    pub fn for_request(
        request: &OutgoingRequest,
        url_class: UrlClass,
        session_kind: SessionKind,
        status_code: Option<u16>,
        outcome: FailureOutcome,
    ) -> Self {
        Self {
            method: request.method(),
            redacted_url: request.redacted_url().into_owned(),
            url_class,
            session_kind,
            status_code,
            category: outcome.category,
            decision: outcome.decision,
        }
    }

    /// Sets the HTTP status.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the redacted URL.
    pub fn redacted_url(&self) -> &str {
        &self.redacted_url
    }

    /// Returns the URL class.
    pub fn url_class(&self) -> UrlClass {
        self.url_class
    }

    /// Returns the session kind.
    pub fn session_kind(&self) -> SessionKind {
        self.session_kind
    }

    /// Returns the HTTP status, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns the failure category.
    pub fn category(&self) -> FailureCategory {
        self.category
    }

    /// Returns the decision.
    pub fn decision(&self) -> Decision {
        self.decision
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[decision={}, category={}, method={}, url={}, class={}, session={}",
            self.decision,
            self.category,
            self.method,
            self.redacted_url,
            self.url_class,
            self.session_kind
        )?;

        match self.status_code {
            Some(code) => write!(f, ", status={}", code)?,
            None => write!(f, ", status=<none>")?,
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(category: FailureCategory, decision: Decision) -> FailureOutcome {
        FailureOutcome { category, decision }
    }

    #[test]
    fn for_request_redacts_query() {
        let request = OutgoingRequest::get("https://h/api/v1/users?access_token=abc");
        let event = AuditEvent::for_request(
            &request,
            UrlClass::Secure,
            SessionKind::Standard,
            Some(401),
            outcome(FailureCategory::AuthFailure, Decision::SignOut),
        );

        assert_eq!(event.redacted_url(), "https://h/api/v1/users");
        assert!(!event.to_string().contains("access_token"));

        let request = OutgoingRequest::get("https://svc:hunter2@h/api/v1/users");
        let event = AuditEvent::for_request(
            &request,
            UrlClass::Secure,
            SessionKind::Standard,
            Some(401),
            outcome(FailureCategory::AuthFailure, Decision::SignOut),
        );
        assert!(!event.to_string().contains("hunter2"));
        assert_eq!(event.method(), HttpMethod::Get);
        assert_eq!(event.status_code(), Some(401));
    }

    #[test]
    fn display_marks_network_failures() {
        let event = AuditEvent::new(
            HttpMethod::Post,
            "/api/v1/ports",
            UrlClass::SecureNoLogout,
            SessionKind::Admin,
            FailureCategory::NetworkFailure,
            Decision::PassThrough,
        );

        let display = event.to_string();
        assert!(display.contains("status=<none>"));
        assert!(display.contains("category=network_failure"));
        assert!(display.contains("method=POST"));
        assert!(display.contains("session=admin"));
    }

    #[test]
    fn serializes_with_snake_case_tags() {
        let event = AuditEvent::new(
            HttpMethod::Delete,
            "/api/v1/users/7",
            UrlClass::Secure,
            SessionKind::Standard,
            FailureCategory::BackendAnomaly401,
            Decision::PassThrough,
        )
        .with_status(401);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["method"], "DELETE");
        assert_eq!(json["url_class"], "secure");
        assert_eq!(json["category"], "backend_anomaly_401");
        assert_eq!(json["decision"], "pass_through");
        assert_eq!(json["status_code"], 401);
    }
}
