//! Request authorization and failure classification.
//!
//! Both halves are synchronous and pure: [`RequestPolicy::authorize`] turns
//! a request plus token/session snapshots into the request that goes on the
//! wire, and [`classify_failure`] turns a failure into a [`Decision`]. Side
//! effects (logging, audit, sign-out) belong to the
//! [`Interceptor`](crate::Interceptor).

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::classifier::{UrlClass, UrlClassifier};
use crate::config::GuardConfig;
use crate::error::Error;
use crate::request::OutgoingRequest;
use crate::response::Failure;
use crate::session::{SessionKind, TokenState};

/// Name of the bearer token header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// HTTP status that triggers the sign-out checks.
pub const UNAUTHORIZED: u16 = 401;

/// What to do after a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Hand the failure back to the caller and leave the session alone
    PassThrough,
    /// Sign the user out, then hand the failure back
    SignOut,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::PassThrough => write!(f, "pass_through"),
            Decision::SignOut => write!(f, "sign_out"),
        }
    }
}

/// Which branch of the failure rules matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// No HTTP response arrived
    NetworkFailure,
    /// 401 whose message names a session problem
    AuthFailure,
    /// 401 without a recognizable auth message
    #[serde(rename = "backend_anomaly_401")]
    BackendAnomaly401,
    /// 401 during an administrator session
    #[serde(rename = "admin_bypassed_401")]
    AdminBypassed401,
    /// 401 on a URL exempt from sign-out
    #[serde(rename = "exempt_bypassed_401")]
    ExemptBypassed401,
    /// Any status other than 401
    OtherHttpFailure,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureCategory::NetworkFailure => "network_failure",
            FailureCategory::AuthFailure => "auth_failure",
            FailureCategory::BackendAnomaly401 => "backend_anomaly_401",
            FailureCategory::AdminBypassed401 => "admin_bypassed_401",
            FailureCategory::ExemptBypassed401 => "exempt_bypassed_401",
            FailureCategory::OtherHttpFailure => "other_http_failure",
        };
        f.write_str(text)
    }
}

/// Result of [`classify_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureOutcome {
    /// The matched rule
    pub category: FailureCategory,
    /// The resulting decision
    pub decision: Decision,
}

impl FailureOutcome {
    fn pass(category: FailureCategory) -> Self {
        Self {
            category,
            decision: Decision::PassThrough,
        }
    }
}

/// Decides what a failure means for the session.
///
/// Rules, first match wins:
/// 1. no status: [`FailureCategory::NetworkFailure`]
/// 2. status other than 401: [`FailureCategory::OtherHttpFailure`]
/// 3. admin session: [`FailureCategory::AdminBypassed401`]
/// 4. URL not [`UrlClass::Secure`]: [`FailureCategory::ExemptBypassed401`]
/// 5. message contains an auth phrase, ignoring case:
///    [`FailureCategory::AuthFailure`], the only [`Decision::SignOut`]
/// 6. otherwise [`FailureCategory::BackendAnomaly401`]
///
/// `phrases` must already be lowercase.
///
/// # Examples
///
/// ```
/// use request_guard::{classify_failure, Decision, Failure, FailureCategory, SessionKind, UrlClass};
///
/// let phrases = ["session expired".to_string()];
/// let outcome = classify_failure(
///     UrlClass::Secure,
///     SessionKind::Standard,
///     &Failure::http(401, "Session expired"),
///     &phrases,
/// );
/// assert_eq!(outcome.category, FailureCategory::AuthFailure);
/// assert_eq!(outcome.decision, Decision::SignOut);
/// ```
pub fn classify_failure(
    url_class: UrlClass,
    session_kind: SessionKind,
    failure: &Failure,
    phrases: &[String],
) -> FailureOutcome {
    let Some(status) = failure.status_code() else {
        return FailureOutcome::pass(FailureCategory::NetworkFailure);
    };
    if status != UNAUTHORIZED {
        return FailureOutcome::pass(FailureCategory::OtherHttpFailure);
    }
    if session_kind == SessionKind::Admin {
        return FailureOutcome::pass(FailureCategory::AdminBypassed401);
    }
    // Public requests never get a failure policy; treat a direct call as exempt.
    if url_class != UrlClass::Secure {
        return FailureOutcome::pass(FailureCategory::ExemptBypassed401);
    }

    let message = failure.error_message().unwrap_or_default().to_lowercase();
    if phrases.iter().any(|p| message.contains(p.as_str())) {
        FailureOutcome {
            category: FailureCategory::AuthFailure,
            decision: Decision::SignOut,
        }
    } else {
        FailureOutcome::pass(FailureCategory::BackendAnomaly401)
    }
}

/// Failure handling installed on a non-public request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailurePolicy {
    url_class: UrlClass,
    session_kind: SessionKind,
    phrases: Arc<[String]>,
}

impl FailurePolicy {
    /// The class of the request this policy was installed for.
    pub fn url_class(&self) -> UrlClass {
        self.url_class
    }

    /// The session kind captured at authorization time.
    pub fn session_kind(&self) -> SessionKind {
        self.session_kind
    }

    /// Classifies a failure of the guarded request.
    pub fn decide(&self, failure: &Failure) -> FailureOutcome {
        classify_failure(self.url_class, self.session_kind, failure, &self.phrases)
    }
}

/// The request to send plus how to treat its failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    request: OutgoingRequest,
    url_class: UrlClass,
    token_attached: bool,
    failure_policy: Option<FailurePolicy>,
}

impl Authorization {
    /// The request with tenant and bearer headers applied.
    pub fn request(&self) -> &OutgoingRequest {
        &self.request
    }

    /// The class of the target URL.
    pub fn url_class(&self) -> UrlClass {
        self.url_class
    }

    /// True if a bearer token was attached.
    pub fn token_attached(&self) -> bool {
        self.token_attached
    }

    /// Failure handling; `None` for public requests.
    pub fn failure_policy(&self) -> Option<&FailurePolicy> {
        self.failure_policy.as_ref()
    }

    /// Splits into the request and its failure policy.
    pub fn into_parts(self) -> (OutgoingRequest, Option<FailurePolicy>) {
        (self.request, self.failure_policy)
    }
}

/// Attaches tenant and bearer headers and installs failure handling.
///
/// # Examples
///
/// ```
/// use request_guard::{GuardConfig, OutgoingRequest, RequestPolicy, SessionKind, TokenState};
///
/// let policy = RequestPolicy::new(GuardConfig::default().with_tenant_header("X-Tenant-ID", "acme"))?;
///
/// let auth = policy.authorize(
///     &OutgoingRequest::get("https://h/api/v1/users"),
///     &TokenState::valid("t0k3n"),
///     SessionKind::Standard,
/// );
/// assert_eq!(auth.request().headers().get("authorization"), Some("Bearer t0k3n"));
/// assert_eq!(auth.request().headers().get("x-tenant-id"), Some("acme"));
///
/// let login = policy.authorize(
///     &OutgoingRequest::get("https://h/auth/login"),
///     &TokenState::valid("t0k3n"),
///     SessionKind::Standard,
/// );
/// assert!(!login.request().headers().contains("authorization"));
/// assert!(login.failure_policy().is_none());
/// # Ok::<(), request_guard::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestPolicy {
    classifier: UrlClassifier,
    tenant_header_name: String,
    tenant_header_value: String,
    phrases: Arc<[String]>,
}

impl RequestPolicy {
    /// Builds a policy from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: GuardConfig) -> Result<Self, Error> {
        config.validate()?;
        let classifier = UrlClassifier::from_config(&config);
        let phrases: Arc<[String]> = config
            .auth_failure_phrases
            .iter()
            .map(|p| p.to_lowercase())
            .collect();
        Ok(Self {
            classifier,
            tenant_header_name: config.tenant_header_name,
            tenant_header_value: config.tenant_header_value,
            phrases,
        })
    }

    /// Classifies a URL with the configured lists.
    pub fn classify(&self, target_url: &str) -> UrlClass {
        self.classifier.classify(target_url)
    }

    /// Produces the request to send. The caller's request is not modified.
    pub fn authorize(
        &self,
        request: &OutgoingRequest,
        token: &TokenState,
        session_kind: SessionKind,
    ) -> Authorization {
        let url_class = self.classify(request.target_url());
        // Only the policy decides whether a bearer goes on the wire.
        let tagged = request
            .with_header(&self.tenant_header_name, &self.tenant_header_value)
            .without_header(AUTHORIZATION_HEADER);

        if url_class == UrlClass::Public {
            return Authorization {
                request: tagged,
                url_class,
                token_attached: false,
                failure_policy: None,
            };
        }

        let (request, token_attached) = match token.usable_token() {
            Some(value) => (
                tagged.with_header(AUTHORIZATION_HEADER, format!("Bearer {}", value)),
                true,
            ),
            None => (tagged, false),
        };

        Authorization {
            request,
            url_class,
            token_attached,
            failure_policy: Some(FailurePolicy {
                url_class,
                session_kind,
                phrases: Arc::clone(&self.phrases),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RequestPolicy {
        RequestPolicy::new(GuardConfig::default().with_tenant_header("X-Tenant-ID", "acme"))
            .expect("valid config")
    }

    fn phrases() -> Vec<String> {
        GuardConfig::default().auth_failure_phrases
    }

    #[test]
    fn public_request_gets_tenant_only() {
        let auth = policy().authorize(
            &OutgoingRequest::get("/auth/login"),
            &TokenState::valid("tok"),
            SessionKind::Standard,
        );

        assert_eq!(auth.url_class(), UrlClass::Public);
        assert!(!auth.token_attached());
        assert!(auth.failure_policy().is_none());
        assert_eq!(auth.request().headers().get("X-Tenant-ID"), Some("acme"));
        assert!(!auth.request().headers().contains(AUTHORIZATION_HEADER));
    }

    #[test]
    fn public_request_keeps_other_caller_headers() {
        let request = OutgoingRequest::get("/static/app.js").with_header("Accept", "*/*");
        let auth = policy().authorize(&request, &TokenState::absent(), SessionKind::Standard);
        assert_eq!(auth.request().headers().get("accept"), Some("*/*"));
    }

    #[test]
    fn public_request_strips_caller_authorization() {
        let request =
            OutgoingRequest::get("/auth/login").with_header("Authorization", "Bearer stale");
        let auth = policy().authorize(&request, &TokenState::valid("tok"), SessionKind::Standard);

        assert!(!auth.request().headers().contains(AUTHORIZATION_HEADER));
        assert_eq!(request.headers().get("authorization"), Some("Bearer stale"));
    }

    #[test]
    fn unusable_token_strips_caller_authorization() {
        for token in [TokenState::expired("old"), TokenState::absent(), TokenState::valid("")] {
            let request =
                OutgoingRequest::get("/api/v1/users").with_header("authorization", "Bearer stale");
            let auth = policy().authorize(&request, &token, SessionKind::Standard);

            assert!(!auth.token_attached());
            assert!(!auth.request().headers().contains(AUTHORIZATION_HEADER));
        }
    }

    #[test]
    fn secure_request_gets_exactly_one_bearer() {
        let request =
            OutgoingRequest::get("/api/v1/users").with_header("authorization", "Bearer stale");
        let auth = policy().authorize(&request, &TokenState::valid("fresh"), SessionKind::Standard);

        let headers = auth.request().headers();
        assert_eq!(headers.count(AUTHORIZATION_HEADER), 1);
        assert_eq!(headers.get(AUTHORIZATION_HEADER), Some("Bearer fresh"));
        assert!(auth.token_attached());
        assert_eq!(request.headers().get("authorization"), Some("Bearer stale"));
    }

    #[test]
    fn expired_or_absent_token_is_not_attached() {
        for token in [TokenState::expired("old"), TokenState::absent()] {
            let auth = policy().authorize(
                &OutgoingRequest::get("/api/v1/users"),
                &token,
                SessionKind::Standard,
            );
            assert!(!auth.token_attached());
            assert!(!auth.request().headers().contains(AUTHORIZATION_HEADER));
            assert!(auth.failure_policy().is_some());
        }
    }

    #[test]
    fn tenant_header_replaces_caller_value() {
        let request = OutgoingRequest::get("/api/v1/users").with_header("x-tenant-id", "other");
        let auth = policy().authorize(&request, &TokenState::absent(), SessionKind::Standard);

        assert_eq!(auth.request().headers().count("X-Tenant-ID"), 1);
        assert_eq!(auth.request().headers().get("X-Tenant-ID"), Some("acme"));
    }

    #[test]
    fn failure_policy_captures_class_and_session() {
        let auth = policy().authorize(
            &OutgoingRequest::get("/api/v1/ports/3"),
            &TokenState::valid("t"),
            SessionKind::Admin,
        );
        let failure_policy = auth.failure_policy().expect("non-public");

        assert_eq!(failure_policy.url_class(), UrlClass::SecureNoLogout);
        assert_eq!(failure_policy.session_kind(), SessionKind::Admin);
    }

    #[test]
    fn network_failure_passes_through() {
        let outcome = classify_failure(
            UrlClass::Secure,
            SessionKind::Standard,
            &Failure::network("unauthorized"),
            &phrases(),
        );
        assert_eq!(outcome.category, FailureCategory::NetworkFailure);
        assert_eq!(outcome.decision, Decision::PassThrough);
    }

    #[test]
    fn auth_failure_signs_out() {
        for message in [
            "Invalid Token",
            "token EXPIRED TOKEN here",
            "Unauthorized",
            "Session expired",
        ] {
            let outcome = classify_failure(
                UrlClass::Secure,
                SessionKind::Standard,
                &Failure::http(401, message),
                &phrases(),
            );
            assert_eq!(outcome.decision, Decision::SignOut, "message: {}", message);
        }
    }

    #[test]
    fn admin_401_is_bypassed() {
        let outcome = classify_failure(
            UrlClass::Secure,
            SessionKind::Admin,
            &Failure::http(401, "Session expired"),
            &phrases(),
        );
        assert_eq!(outcome.category, FailureCategory::AdminBypassed401);
        assert_eq!(outcome.decision, Decision::PassThrough);
    }

    #[test]
    fn exempt_url_401_is_bypassed() {
        let outcome = classify_failure(
            UrlClass::SecureNoLogout,
            SessionKind::Standard,
            &Failure::http(401, "Session expired"),
            &phrases(),
        );
        assert_eq!(outcome.category, FailureCategory::ExemptBypassed401);
    }

    #[test]
    fn unrecognized_401_is_anomaly() {
        let outcome = classify_failure(
            UrlClass::Secure,
            SessionKind::Standard,
            &Failure::status(401),
            &phrases(),
        );
        assert_eq!(outcome.category, FailureCategory::BackendAnomaly401);
        assert_eq!(outcome.decision, Decision::PassThrough);
    }

    #[test]
    fn other_statuses_pass_through() {
        for status in [400, 403, 404, 500, 503] {
            let outcome = classify_failure(
                UrlClass::Secure,
                SessionKind::Standard,
                &Failure::http(status, "Session expired"),
                &phrases(),
            );
            assert_eq!(outcome.category, FailureCategory::OtherHttpFailure);
        }
    }

    #[test]
    fn configured_phrases_are_case_folded() {
        let policy = RequestPolicy::new(
            GuardConfig::default().with_auth_failure_phrases(["JWT Revoked"]),
        )
        .unwrap();
        let auth = policy.authorize(
            &OutgoingRequest::get("/api/v1/users"),
            &TokenState::valid("t"),
            SessionKind::Standard,
        );
        let failure_policy = auth.failure_policy().unwrap();

        assert_eq!(
            failure_policy.decide(&Failure::http(401, "jwt revoked")).decision,
            Decision::SignOut
        );
        assert_eq!(
            failure_policy.decide(&Failure::http(401, "Session expired")).decision,
            Decision::PassThrough
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = RequestPolicy::new(GuardConfig::default().with_tenant_header("X-Tenant-ID", ""))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn display_names() {
        assert_eq!(Decision::SignOut.to_string(), "sign_out");
        assert_eq!(
            FailureCategory::BackendAnomaly401.to_string(),
            "backend_anomaly_401"
        );
    }
}
