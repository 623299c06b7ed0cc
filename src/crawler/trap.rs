//! Crawl-trap detection
//!
//! Calendars, faceted search and session-id URLs can generate unbounded URL
//! spaces. The detector counts visits per base URL (query and fragment
//! dropped) and flags a base URL once it has been seen too often.

use crate::config::TrapConfig;
use crate::state::VisitCounts;
use crate::url::{base_url, parse_url};
use crate::UrlResult;
use url::Url;

/// Flags paths whose shape suggests they were generated
///
/// Disabled unless `path-heuristic = true`, since deep but legitimate
/// paths trip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathHeuristic {
    /// Paths longer than this many bytes are flagged
    pub max_path_length: usize,

    /// A run of this many consecutive non-empty segments is flagged
    pub max_path_segments: usize,
}

impl PathHeuristic {
    /// Returns true if `path` is too long or nests too deeply
    pub fn looks_generated(&self, path: &str) -> bool {
        path.len() > self.max_path_length || longest_segment_run(path) >= self.max_path_segments
    }
}

/// Length of the longest run of consecutive non-empty `/`-separated segments
fn longest_segment_run(path: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for segment in path.split('/').skip(1) {
        if segment.is_empty() {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

/// Stateful trap predicate over candidate links
///
/// Every call to [`is_trap`](Self::is_trap) counts as one visit to the URL's
/// base, including the call that returns `true`. Counts only grow; once a
/// base URL is a trap it stays one for the life of the detector.
///
/// # Examples
///
/// ```
/// use link_sieve::crawler::TrapDetector;
///
/// let detector = TrapDetector::new(3);
/// let verdicts: Vec<bool> = (1..=5)
///     .map(|day| detector.is_trap(&format!("https://ics.uci.edu/calendar?day={}", day)).unwrap())
///     .collect();
/// assert_eq!(verdicts, vec![false, false, false, true, true]);
/// ```
#[derive(Debug)]
pub struct TrapDetector {
    max_visits: u32,
    path_heuristic: Option<PathHeuristic>,
    visits: VisitCounts,
}

impl TrapDetector {
    /// Creates a detector that flags a base URL after `max_visits` visits
    pub fn new(max_visits: u32) -> Self {
        Self {
            max_visits,
            path_heuristic: None,
            visits: VisitCounts::new(),
        }
    }

    pub fn from_config(config: &TrapConfig) -> Self {
        let detector = Self::new(config.max_visits);
        if config.path_heuristic {
            detector.with_path_heuristic(PathHeuristic {
                max_path_length: config.max_path_length,
                max_path_segments: config.max_path_segments,
            })
        } else {
            detector
        }
    }

    /// Enables the path-shape heuristic in addition to visit counting
    pub fn with_path_heuristic(mut self, heuristic: PathHeuristic) -> Self {
        self.path_heuristic = Some(heuristic);
        self
    }

    pub fn max_visits(&self) -> u32 {
        self.max_visits
    }

    pub fn path_heuristic(&self) -> Option<PathHeuristic> {
        self.path_heuristic
    }

    /// Records a visit to `url` and reports whether it looks like a trap
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The base URL has now been seen more than `max_visits` times,
    ///   or the path heuristic is enabled and fires
    /// * `Ok(false)` - Otherwise
    /// * `Err(UrlError)` - The URL cannot be parsed or has no host
    pub fn is_trap(&self, url: &str) -> UrlResult<bool> {
        let parsed = parse_url(url)?;
        self.is_trap_url(&parsed)
    }

    /// [`is_trap`](Self::is_trap) for an already parsed URL
    pub fn is_trap_url(&self, url: &Url) -> UrlResult<bool> {
        let key = base_url(url)?;
        let count = self.visits.increment(&key);

        if count > self.max_visits {
            tracing::debug!("Trap: {} seen {} times", key, count);
            return Ok(true);
        }

        if let Some(heuristic) = &self.path_heuristic {
            if heuristic.looks_generated(url.path()) {
                tracing::debug!("Trap: {} has a generated-looking path", key);
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Returns how many visits `url`'s base has had, without recording one
    pub fn visits(&self, url: &str) -> UrlResult<u32> {
        let parsed = parse_url(url)?;
        Ok(self.visits.get(&base_url(&parsed)?))
    }

    /// Number of distinct base URLs seen
    pub fn tracked_urls(&self) -> usize {
        self.visits.len()
    }
}

impl Default for TrapDetector {
    fn default() -> Self {
        Self::from_config(&TrapConfig::default())
    }
}
