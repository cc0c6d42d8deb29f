//! Client-side request security: authorization headers, session sign-out
//! decisions and input sanitization.
//!
//! Two independent halves:
//!
//! - **Request policy**: every outgoing request is classified by URL
//!   ([`UrlClassifier`]), tagged with the tenant header, given a bearer token
//!   when the URL is not public ([`RequestPolicy::authorize`]), and on failure
//!   run through [`classify_failure`] to decide whether the session must end.
//!   The [`Interceptor`] wires this to an async [`Transport`].
//! - **Form input**: pure [`sanitizer`] functions and composable
//!   [`validator`]s, plus the [`Tainted`] to [`Verified`] flow for fields that
//!   need a type-level proof of checking.
//!
//! # Core Types
//!
//! - [`GuardConfig`]: URL lists, tenant header and auth-failure phrases
//! - [`RequestPolicy`]: pure authorization and failure classification
//! - [`Interceptor`]: async orchestration with logging and audit
//! - [`Secret<T>`]: wrapper that redacts tokens in logs and output
//! - [`Tainted<T>`] / [`Verified<T>`]: unchecked and checked form values
//!
//! # Examples
//!
//! ```
//! use request_guard::{
//!     Decision, Failure, GuardConfig, OutgoingRequest, RequestPolicy, SessionKind, TokenState,
//! };
//!
//! let policy = RequestPolicy::new(GuardConfig::default())?;
//! let auth = policy.authorize(
//!     &OutgoingRequest::get("https://app.example.com/api/v1/devices"),
//!     &TokenState::valid("t0k3n"),
//!     SessionKind::Standard,
//! );
//! assert!(auth.token_attached());
//!
//! let outcome = auth
//!     .failure_policy()
//!     .expect("secure request")
//!     .decide(&Failure::http(401, "Invalid token"));
//! assert_eq!(outcome.decision, Decision::SignOut);
//! # Ok::<(), request_guard::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod classifier;
mod config;
mod error;
mod interceptor;
mod logging;
pub mod patterns;
mod policy;
mod request;
mod response;
pub mod sanitizer;
mod secret;
mod session;
mod tainted;
pub mod validator;
mod verified;

pub use classifier::{UrlClass, UrlClassifier};
pub use config::{GuardConfig, DEFAULT_TENANT_HEADER_NAME, DEFAULT_TENANT_HEADER_VALUE};
pub use error::{ConfigError, Error, PatternError};
pub use interceptor::{Interceptor, Transport};
pub use policy::{
    classify_failure, Authorization, Decision, FailureCategory, FailureOutcome, FailurePolicy,
    RequestPolicy, AUTHORIZATION_HEADER, UNAUTHORIZED,
};
pub use request::{Headers, HttpMethod, OutgoingRequest};
pub use response::{Failure, ResponseOutcome};
pub use sanitizer::{FieldSanitizer, SanitizationError, SanitizationErrorKind, Sanitizer};
pub use secret::Secret;
pub use session::{SessionInspector, SessionKind, SessionTerminator, TokenProvider, TokenState};
pub use tainted::Tainted;
pub use verified::Verified;
