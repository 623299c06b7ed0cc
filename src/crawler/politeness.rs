//! Per-domain politeness gate
//!
//! Enforces a minimum interval between successive requests to the same
//! domain. The wait is an awaitable delay, so other tasks keep running while
//! one domain cools down.

use crate::config::PolitenessConfig;
use crate::state::DomainAccess;
use crate::url::netloc;
use crate::{UrlError, UrlResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use url::Url;

/// Tracks last access per domain and delays callers that come back too soon
///
/// Each domain has its own async lock, held across that domain's wait.
/// Concurrent callers for one domain therefore queue up and are released at
/// least `min_interval` apart, while callers for other domains proceed
/// without waiting on them.
///
/// Dropping an [`enforce`](Self::enforce) future mid-wait cancels it and
/// leaves the domain's last access time unchanged.
#[derive(Debug)]
pub struct PolitenessGate {
    min_interval: Duration,
    domains: Mutex<HashMap<String, Arc<AsyncMutex<DomainAccess>>>>,
}

impl PolitenessGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            domains: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &PolitenessConfig) -> Self {
        Self::new(config.min_interval())
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until `url`'s domain may be requested again, then records the access
    ///
    /// The first access to a domain never waits. Later accesses wait for
    /// whatever remains of the minimum interval since the previous one.
    ///
    /// # Returns
    ///
    /// * `Ok(Duration)` - How long the caller was held back
    /// * `Err(UrlError)` - The URL has no host to throttle on
    pub async fn enforce(&self, url: &Url) -> UrlResult<Duration> {
        let domain = netloc(url).ok_or_else(|| UrlError::MissingDomain(url.to_string()))?;
        let slot = self.slot(&domain);
        let mut access = slot.lock().await;

        let wait = access.time_until_next_request(self.min_interval, Instant::now());
        if let Some(wait) = wait {
            tracing::debug!("Politeness delay for {}: waiting {:?}", domain, wait);
            tokio::time::sleep(wait).await;
        }

        access.record_access(Instant::now());
        tracing::trace!("Recorded access {} to {}", access.request_count, domain);

        Ok(wait.unwrap_or(Duration::ZERO))
    }

    /// Reports how long [`enforce`](Self::enforce) would wait right now, without recording anything
    pub async fn delay_for(&self, url: &Url) -> UrlResult<Option<Duration>> {
        let domain = netloc(url).ok_or_else(|| UrlError::MissingDomain(url.to_string()))?;
        let slot = match self.existing_slot(&domain) {
            Some(slot) => slot,
            None => return Ok(None),
        };
        let access = slot.lock().await;
        Ok(access.time_until_next_request(self.min_interval, Instant::now()))
    }

    /// Returns a snapshot of a domain's access record, if it has been seen
    pub async fn access(&self, domain: &str) -> Option<DomainAccess> {
        let slot = self.existing_slot(domain)?;
        let access = slot.lock().await;
        Some(access.clone())
    }

    /// Number of domains with a recorded access
    pub fn domain_count(&self) -> usize {
        self.domains
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn slot(&self, domain: &str) -> Arc<AsyncMutex<DomainAccess>> {
        let mut domains = self.domains.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            domains
                .entry(domain.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(DomainAccess::new()))),
        )
    }

    fn existing_slot(&self, domain: &str) -> Option<Arc<AsyncMutex<DomainAccess>>> {
        let domains = self.domains.lock().unwrap_or_else(PoisonError::into_inner);
        domains.get(domain).map(Arc::clone)
    }
}

impl Default for PolitenessGate {
    fn default() -> Self {
        Self::from_config(&PolitenessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_first_access_does_not_wait() {
        let gate = PolitenessGate::new(INTERVAL);
        let start = Instant::now();

        let waited = gate.enforce(&url("https://ics.uci.edu/a")).await.unwrap();

        assert_eq!(waited, Duration::ZERO);
        assert!(start.elapsed() < INTERVAL);
    }

    #[tokio::test]
    async fn test_second_access_waits_for_interval() {
        let gate = PolitenessGate::new(INTERVAL);

        gate.enforce(&url("https://ics.uci.edu/a")).await.unwrap();
        let first = gate.access("ics.uci.edu").await.unwrap();
        let waited = gate.enforce(&url("https://ics.uci.edu/b")).await.unwrap();
        let second_done = Instant::now();

        assert!(waited > Duration::ZERO);
        let first_done = first.last_access.unwrap();
        assert!(second_done.duration_since(first_done) >= INTERVAL);
    }

    #[tokio::test]
    async fn test_no_wait_after_interval_elapsed() {
        let gate = PolitenessGate::new(Duration::from_millis(30));

        gate.enforce(&url("https://ics.uci.edu/a")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let waited = gate.enforce(&url("https://ics.uci.edu/b")).await.unwrap();

        assert_eq!(waited, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_domains_are_independent() {
        let gate = PolitenessGate::new(Duration::from_secs(5));

        gate.enforce(&url("https://ics.uci.edu/")).await.unwrap();
        let start = Instant::now();
        let waited = gate.enforce(&url("https://stat.uci.edu/")).await.unwrap();

        assert_eq!(waited, Duration::ZERO);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(gate.domain_count(), 2);
    }

    #[tokio::test]
    async fn test_port_is_part_of_domain() {
        let gate = PolitenessGate::new(Duration::from_secs(5));

        gate.enforce(&url("http://localhost:8001/")).await.unwrap();
        let waited = gate.enforce(&url("http://localhost:8002/")).await.unwrap();

        assert_eq!(waited, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_delay_for_does_not_record() {
        let gate = PolitenessGate::new(Duration::from_secs(5));
        let page = url("https://ics.uci.edu/");

        assert_eq!(gate.delay_for(&page).await.unwrap(), None);
        assert_eq!(gate.domain_count(), 0);

        gate.enforce(&page).await.unwrap();
        let delay = gate.delay_for(&page).await.unwrap();
        assert!(delay.is_some());
        assert!(delay.unwrap() <= Duration::from_secs(5));

        let access = gate.access("ics.uci.edu").await.unwrap();
        assert_eq!(access.request_count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_same_domain_calls_are_spaced() {
        let gate = Arc::new(PolitenessGate::new(Duration::from_millis(80)));

        let handles: Vec<_> = (0..3)
            .map(|i| {
                let gate = Arc::clone(&gate);
                tokio::spawn(async move {
                    gate.enforce(&url(&format!("https://ics.uci.edu/{}", i)))
                        .await
                        .unwrap();
                    Instant::now()
                })
            })
            .collect();

        let mut finished = Vec::new();
        for handle in handles {
            finished.push(handle.await.unwrap());
        }
        finished.sort();

        // A task's finish instant trails its recorded access by a few microseconds
        for pair in finished.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(75));
        }

        let access = gate.access("ics.uci.edu").await.unwrap();
        assert_eq!(access.request_count, 3);
    }

    #[tokio::test]
    async fn test_cancelled_wait_does_not_record() {
        let gate = PolitenessGate::new(Duration::from_secs(5));
        let page = url("https://ics.uci.edu/");

        gate.enforce(&page).await.unwrap();
        let result =
            tokio::time::timeout(Duration::from_millis(20), gate.enforce(&page)).await;
        assert!(result.is_err());

        let access = gate.access("ics.uci.edu").await.unwrap();
        assert_eq!(access.request_count, 1);
    }

    #[tokio::test]
    async fn test_url_without_host_is_an_error() {
        let gate = PolitenessGate::default();
        let result = gate.enforce(&url("mailto:dean@uci.edu")).await;
        assert!(matches!(result, Err(UrlError::MissingDomain(_))));
    }
}
