//! In-memory audit trail recorder.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::AuditEvent;
use crate::policy::Decision;

/// Number of events an [`AuditTrail`] keeps unless told otherwise.
pub const DEFAULT_AUDIT_CAPACITY: usize = 1024;

/// Bounded in-memory recorder for audit events.
///
/// Shared by every in-flight request of an
/// [`Interceptor`](crate::Interceptor), so it is `Send + Sync`. Once
/// `capacity` events are held, recording a new one evicts the oldest.
///
/// # Example
///
/// ```
/// use request_guard::audit::{AuditEvent, AuditTrail};
/// use request_guard::{Decision, FailureCategory, HttpMethod, SessionKind, UrlClass};
///
/// let trail = AuditTrail::new();
/// trail.record(AuditEvent::new(
///     HttpMethod::Get,
///     "/api/v1/users",
///     UrlClass::Secure,
///     SessionKind::Standard,
///     FailureCategory::OtherHttpFailure,
///     Decision::PassThrough,
/// ));
///
/// assert_eq!(trail.len(), 1);
/// assert_eq!(trail.sign_out_count(), 0);
/// ```
#[derive(Debug)]
pub struct AuditTrail {
    capacity: usize,
    inner: Mutex<Ring>,
}

#[derive(Debug, Default)]
struct Ring {
    events: VecDeque<AuditEvent>,
    evicted: u64,
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }
}

impl AuditTrail {
    /// Creates an empty trail holding up to [`DEFAULT_AUDIT_CAPACITY`] events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trail holding up to `capacity` events.
    ///
    /// A capacity of zero records nothing and counts every event as evicted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Ring::default()),
        }
    }

    // A panic while holding the lock cannot leave a half-written ring behind,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Maximum number of events held at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records an audit event, evicting the oldest one when full.
    pub fn record(&self, event: AuditEvent) {
        let mut ring = self.lock();
        if self.capacity == 0 {
            ring.evicted += 1;
            return;
        }
        if ring.events.len() == self.capacity {
            ring.events.pop_front();
            ring.evicted += 1;
        }
        ring.events.push_back(event);
    }

    /// Returns a snapshot of the retained events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().events.iter().cloned().collect()
    }

    /// Number of retained sign-out decisions.
    pub fn sign_out_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| e.decision() == Decision::SignOut)
            .count()
    }

    /// Number of events dropped to stay within capacity.
    pub fn evicted(&self) -> u64 {
        self.lock().evicted
    }

    /// Returns the number of retained events.
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    /// Returns true if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Removes and returns the retained events, oldest first.
    pub fn drain(&self) -> Vec<AuditEvent> {
        self.lock().events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::UrlClass;
    use crate::policy::FailureCategory;
    use crate::request::HttpMethod;
    use crate::session::SessionKind;
    use std::sync::Arc;

    fn event(url: &str, decision: Decision) -> AuditEvent {
        AuditEvent::new(
            HttpMethod::Get,
            url,
            UrlClass::Secure,
            SessionKind::Standard,
            FailureCategory::AuthFailure,
            decision,
        )
    }

    #[test]
    fn audit_trail_starts_empty() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn audit_trail_records_in_order() {
        let trail = AuditTrail::new();
        trail.record(event("/a", Decision::SignOut));
        trail.record(event("/b", Decision::PassThrough));

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].redacted_url(), "/a");
        assert_eq!(events[1].redacted_url(), "/b");
        assert_eq!(trail.sign_out_count(), 1);
    }

    #[test]
    fn drain_empties_the_trail() {
        let trail = AuditTrail::new();
        trail.record(event("/a", Decision::PassThrough));

        assert_eq!(trail.drain().len(), 1);
        assert!(trail.is_empty());
    }

    #[test]
    fn full_trail_evicts_oldest() {
        let trail = AuditTrail::with_capacity(3);
        for i in 0..10 {
            trail.record(event(&format!("/{}", i), Decision::PassThrough));
        }

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.evicted(), 7);
        let urls: Vec<_> = trail
            .events()
            .iter()
            .map(|e| e.redacted_url().to_string())
            .collect();
        assert_eq!(urls, ["/7", "/8", "/9"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let trail = AuditTrail::with_capacity(0);
        trail.record(event("/a", Decision::SignOut));

        assert!(trail.is_empty());
        assert_eq!(trail.evicted(), 1);
    }

    #[test]
    fn default_capacity_applies() {
        assert_eq!(AuditTrail::new().capacity(), DEFAULT_AUDIT_CAPACITY);
    }

    #[test]
    fn records_from_many_threads() {
        let trail = Arc::new(AuditTrail::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let trail = Arc::clone(&trail);
                std::thread::spawn(move || {
                    trail.record(event(&format!("/{}", i), Decision::SignOut))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(trail.len(), 8);
        assert_eq!(trail.sign_out_count(), 8);
    }
}
