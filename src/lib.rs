//! link-sieve: link discovery and crawl control for a focused web crawler
//!
//! Given a fetched page, this crate decides which of its hyperlinks are worth
//! handing to the crawl frontier. Three policies guard the frontier: per-domain
//! politeness throttling, URL scope and format filtering, and crawl-trap detection.

pub mod config;
pub mod crawler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for link-sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
///
/// These are structural faults: the input could not be broken into
/// scheme, host and path. They are never folded into an "invalid" verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("Missing domain in URL: {0}")]
    MissingDomain(String),
}

/// Result type alias for link-sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{extract_links, CrawlStep, PageResponse, PolitenessGate, StepReport, TrapDetector};
pub use state::LinkOutcome;
pub use url::{RejectReason, UrlValidator, Verdict};
