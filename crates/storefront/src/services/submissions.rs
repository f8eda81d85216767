//! In-flight order submission tracking.
//!
//! Each visitor may have at most one order submission in flight. A second
//! submission that arrives before the first resolves is turned away instead
//! of being sent to the intake endpoint twice.

use std::time::Duration;

use moka::sync::Cache;

/// How long an unreleased in-flight marker survives.
const IN_FLIGHT_TTL: Duration = Duration::from_secs(120);

/// Tracks which visitors have a submission in flight.
#[derive(Clone)]
pub struct SubmissionGuard {
    in_flight: Cache<String, ()>,
}

/// Proof that the holder owns the in-flight slot for a visitor.
///
/// The slot is released when the ticket is dropped.
pub struct SubmissionTicket {
    key: String,
    in_flight: Cache<String, ()>,
}

impl SubmissionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(IN_FLIGHT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            in_flight: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Claim the in-flight slot for `key`.
    ///
    /// Returns `None` if a submission for `key` is already in flight.
    #[must_use]
    pub fn begin(&self, key: impl Into<String>) -> Option<SubmissionTicket> {
        let key = key.into();
        let entry = self.in_flight.entry(key.clone()).or_insert(());
        if !entry.is_fresh() {
            return None;
        }
        Some(SubmissionTicket {
            key,
            in_flight: self.in_flight.clone(),
        })
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.in_flight.invalidate(&self.key);
    }
}
