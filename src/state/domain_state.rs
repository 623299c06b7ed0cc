use std::time::{Duration, Instant};

/// Tracks when a domain was last requested
///
/// One `DomainAccess` exists per netloc in the politeness gate. It is plain
/// data; the gate provides the locking.
#[derive(Debug, Clone, Default)]
pub struct DomainAccess {
    /// Number of requests let through to this domain
    pub request_count: u32,

    /// Timestamp of the last request to this domain
    pub last_access: Option<Instant>,
}

impl DomainAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, min_interval: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_access?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < min_interval {
            Some(min_interval - elapsed)
        } else {
            None
        }
    }

    /// Records that a request was made to this domain
    pub fn record_access(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_access = Some(now);
    }
}
