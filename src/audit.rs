//! Audit trail of failure decisions.
//!
//! One [`AuditEvent`] is recorded for every failed request that carried a
//! failure policy. Events hold only safe metadata: the method, the URL with
//! userinfo, query and fragment removed, and the decision taken. Tokens and
//! response bodies are never stored. The trail is bounded and drops its
//! oldest events first.

mod event;
mod trail;

pub use event::AuditEvent;
pub use trail::{AuditTrail, DEFAULT_AUDIT_CAPACITY};
