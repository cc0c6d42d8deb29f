//! The async seam between application code and the network.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::audit::{AuditEvent, AuditTrail};
use crate::logging::RequestLog;
use crate::policy::{Decision, RequestPolicy};
use crate::request::OutgoingRequest;
use crate::response::{Failure, ResponseOutcome};
use crate::session::{
    SessionInspector, SessionKind, SessionTerminator, TokenProvider, TokenState,
};

/// Sends a fully authorized request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and reports the result.
    async fn send(&self, request: OutgoingRequest) -> ResponseOutcome;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: OutgoingRequest) -> ResponseOutcome {
        (**self).send(request).await
    }
}

/// Runs every outgoing request through the [`RequestPolicy`].
///
/// For each call to [`execute`](Self::execute):
/// 1. snapshot the token and session kind
/// 2. authorize the request and log the result
/// 3. await the transport
/// 4. on failure of a non-public request, classify it, log and audit the
///    decision, and call [`SessionTerminator::sign_out`] once if the
///    decision is [`Decision::SignOut`]
///
/// The failure itself is always returned to the caller unchanged. Dropping
/// the future before the transport completes produces no decision.
pub struct Interceptor<T> {
    policy: RequestPolicy,
    transport: T,
    tokens: Arc<dyn TokenProvider>,
    session: Arc<dyn SessionInspector>,
    terminator: Arc<dyn SessionTerminator>,
    audit: Arc<AuditTrail>,
}

impl<T: Transport> Interceptor<T> {
    /// Creates an interceptor with its own [`AuditTrail`] of default capacity.
    pub fn new(
        policy: RequestPolicy,
        transport: T,
        tokens: Arc<dyn TokenProvider>,
        session: Arc<dyn SessionInspector>,
        terminator: Arc<dyn SessionTerminator>,
    ) -> Self {
        Self {
            policy,
            transport,
            tokens,
            session,
            terminator,
            audit: Arc::new(AuditTrail::new()),
        }
    }

    /// Records decisions into `audit` instead, e.g. a trail shared by
    /// several interceptors or one with a different capacity.
    #[must_use]
    pub fn with_audit_trail(mut self, audit: Arc<AuditTrail>) -> Self {
        self.audit = audit;
        self
    }

    /// The policy in use.
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Decisions recorded so far.
    pub fn audit_trail(&self) -> &AuditTrail {
        &self.audit
    }

    /// Authorizes and sends a request.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`Failure`] exactly as received.
    pub async fn execute(&self, request: OutgoingRequest) -> Result<String, Failure> {
        let token = TokenState::from_provider(self.tokens.as_ref());
        let session_kind = SessionKind::from_inspector(self.session.as_ref());

        let authorization = self.policy.authorize(&request, &token, session_kind);
        let url_class = authorization.url_class();
        let log = RequestLog::new(&request);
        log.authorized(url_class, authorization.token_attached());

        let (outgoing, failure_policy) = authorization.into_parts();
        let failure = match self.transport.send(outgoing).await {
            ResponseOutcome::Success(body) => return Ok(body),
            ResponseOutcome::Failure(failure) => failure,
        };

        let Some(failure_policy) = failure_policy else {
            log.public_failure(&failure);
            return Err(failure);
        };

        let outcome = failure_policy.decide(&failure);
        log.decision(&failure, outcome);
        self.audit.record(AuditEvent::for_request(
            &request,
            url_class,
            session_kind,
            failure.status_code(),
            outcome,
        ));

        if outcome.decision == Decision::SignOut {
            self.terminator.sign_out();
        }
        Err(failure)
    }
}

impl<T> fmt::Debug for Interceptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("policy", &self.policy)
            .field("audit_events", &self.audit.len())
            .finish_non_exhaustive()
    }
}
