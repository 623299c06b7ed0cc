//! State module for the policies that remember what they have seen
//!
//! # Components
//!
//! - `DomainAccess`: last access time and request count for one domain
//! - `VisitCounts`: per-base-URL visit counters used for trap detection
//! - `LinkOutcome`: what happened to a candidate link during a crawl step

mod domain_state;
mod link_outcome;
mod visit_counts;

// Re-export main types
pub use domain_state::DomainAccess;
pub use link_outcome::LinkOutcome;
pub use visit_counts::VisitCounts;
