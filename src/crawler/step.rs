//! Crawl step orchestration
//!
//! One crawl step runs per fetched page:
//! 1. Wait on the politeness gate for the page's domain
//! 2. Extract candidate links from the page
//! 3. Run each candidate through the URL validator, then the trap detector
//! 4. Hand the survivors back to the caller's frontier

use crate::config::Config;
use crate::crawler::parser::extract_links;
use crate::crawler::{PageResponse, PolitenessGate, TrapDetector};
use crate::state::LinkOutcome;
use crate::url::{parse_url, UrlValidator, Verdict};
use crate::SieveError;
use std::time::Duration;

/// Result of one crawl step, with the fate of every candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Links that passed every policy, in candidate order
    pub accepted: Vec<String>,

    /// Links that were dropped, with the reason
    pub rejected: Vec<(String, LinkOutcome)>,

    /// Time spent waiting on the politeness gate
    pub waited: Duration,
}

impl StepReport {
    /// Number of links extracted from the page
    pub fn candidates(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    /// Number of candidates that ended with `outcome`
    pub fn count(&self, outcome: LinkOutcome) -> usize {
        if outcome.is_accepted() {
            return self.accepted.len();
        }
        self.rejected.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Composes the politeness gate, link extractor, validator and trap detector
///
/// All state lives inside the step's components and is safe to share:
/// wrap a `CrawlStep` in an `Arc` to drive it from several worker tasks.
///
/// # Example
///
/// ```no_run
/// use link_sieve::config::Config;
/// use link_sieve::crawler::{CrawlStep, PageResponse};
///
/// # async fn example() -> link_sieve::Result<()> {
/// let step = CrawlStep::new(&Config::default());
/// let response = PageResponse::ok(r#"<a href="/about">About</a>"#);
/// let links = step.step("https://www.ics.uci.edu/", &response).await?;
/// assert_eq!(links, vec!["https://www.ics.uci.edu/about".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CrawlStep {
    gate: PolitenessGate,
    validator: UrlValidator,
    traps: TrapDetector,
}

impl CrawlStep {
    /// Builds a crawl step with fresh state from the configuration
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            PolitenessGate::from_config(&config.politeness),
            UrlValidator::new(&config.scope),
            TrapDetector::from_config(&config.trap),
        )
    }

    /// Builds a crawl step from explicitly constructed components
    pub fn from_parts(gate: PolitenessGate, validator: UrlValidator, traps: TrapDetector) -> Self {
        Self {
            gate,
            validator,
            traps,
        }
    }

    pub fn gate(&self) -> &PolitenessGate {
        &self.gate
    }

    pub fn validator(&self) -> &UrlValidator {
        &self.validator
    }

    pub fn traps(&self) -> &TrapDetector {
        &self.traps
    }

    /// Runs one crawl step and returns the links worth adding to the frontier
    ///
    /// # Arguments
    ///
    /// * `page_url` - The absolute URL the page was fetched from
    /// * `response` - The fetched page
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Surviving links (empty for non-200 or empty pages)
    /// * `Err(SieveError)` - `page_url` is malformed or has no host
    pub async fn step(
        &self,
        page_url: &str,
        response: &PageResponse,
    ) -> Result<Vec<String>, SieveError> {
        Ok(self.step_with_report(page_url, response).await?.accepted)
    }

    /// Like [`step`](Self::step), but also reports why each dropped link was dropped
    pub async fn step_with_report(
        &self,
        page_url: &str,
        response: &PageResponse,
    ) -> Result<StepReport, SieveError> {
        let page = parse_url(page_url)?;
        let waited = self.gate.enforce(&page).await?;

        let candidates = extract_links(&page, response);
        let mut report = self.filter_links(candidates);
        report.waited = waited;

        tracing::info!(
            "Step {}: {} candidates, {} accepted, {} rejected",
            page_url,
            report.candidates(),
            report.accepted.len(),
            report.rejected.len()
        );

        Ok(report)
    }

    /// Runs candidates through the validator and trap detector, without the politeness wait
    ///
    /// The validator runs first, so rejected or malformed links never
    /// touch the trap detector's visit counts.
    pub fn filter_links<I>(&self, candidates: I) -> StepReport
    where
        I: IntoIterator<Item = String>,
    {
        let mut report = StepReport::default();

        for link in candidates {
            let outcome = self.classify(&link);
            tracing::trace!("{} -> {}", link, outcome);

            if outcome.is_accepted() {
                report.accepted.push(link);
            } else {
                report.rejected.push((link, outcome));
            }
        }

        report
    }

    fn classify(&self, link: &str) -> LinkOutcome {
        match self.validator.check(link) {
            Err(e) => {
                tracing::warn!("Dropping malformed link {:?}: {}", link, e);
                LinkOutcome::Malformed
            }
            Ok(Verdict::Reject(reason)) => LinkOutcome::Rejected(reason),
            Ok(Verdict::Accept) => match self.traps.is_trap(link) {
                Ok(true) => LinkOutcome::Trap,
                Ok(false) => LinkOutcome::Accepted,
                Err(e) => {
                    tracing::warn!("Dropping malformed link {:?}: {}", link, e);
                    LinkOutcome::Malformed
                }
            },
        }
    }
}

impl Default for CrawlStep {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
