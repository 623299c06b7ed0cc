//! Crawler module: the per-page crawl step and its policies
//!
//! This module contains:
//! - Link extraction from fetched pages
//! - The per-domain politeness gate
//! - Crawl-trap detection
//! - The crawl step that composes them
//! - An HTTP adapter producing [`PageResponse`] values

mod fetcher;
mod parser;
mod politeness;
mod step;
mod trap;

pub use fetcher::{build_http_client, fetch_page, PageResponse};
pub use parser::extract_links;
pub use politeness::PolitenessGate;
pub use step::{CrawlStep, StepReport};
pub use trap::{PathHeuristic, TrapDetector};
