use std::borrow::Cow;

use crate::classifier::UrlClass;
use crate::policy::{Decision, FailureCategory, FailureOutcome};
use crate::request::{HttpMethod, OutgoingRequest};
use crate::response::Failure;

/// Structured `tracing` events for one request.
///
/// Every event carries the method and the redacted URL. Token values are
/// never passed in, so they cannot end up in a log line.
#[derive(Debug, Clone)]
pub(crate) struct RequestLog<'a> {
    method: HttpMethod,
    url: Cow<'a, str>,
}

impl<'a> RequestLog<'a> {
    pub(crate) fn new(request: &'a OutgoingRequest) -> Self {
        Self {
            method: request.method(),
            url: request.redacted_url(),
        }
    }

    pub(crate) fn authorized(&self, url_class: UrlClass, token_attached: bool) {
        tracing::debug!(
            method = %self.method,
            url = %self.url,
            %url_class,
            token_attached,
            "request authorized"
        );
    }

    pub(crate) fn public_failure(&self, failure: &Failure) {
        tracing::debug!(
            method = %self.method,
            url = %self.url,
            status = failure.status_code(),
            "public request failed"
        );
    }

    pub(crate) fn decision(&self, failure: &Failure, outcome: FailureOutcome) {
        let status = failure.status_code();
        let category = outcome.category;
        match (outcome.decision, category) {
            (Decision::SignOut, _) => tracing::warn!(
                method = %self.method,
                url = %self.url,
                status,
                %category,
                "authentication failure, signing out"
            ),
            (
                Decision::PassThrough,
                FailureCategory::AdminBypassed401
                | FailureCategory::ExemptBypassed401
                | FailureCategory::BackendAnomaly401,
            ) => tracing::info!(
                method = %self.method,
                url = %self.url,
                status,
                %category,
                "401 passed through without sign-out"
            ),
            (Decision::PassThrough, _) => tracing::debug!(
                method = %self.method,
                url = %self.url,
                status,
                %category,
                "request failed"
            ),
        }
    }
}
