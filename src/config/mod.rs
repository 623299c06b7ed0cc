//! Configuration module for link-sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use link_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-sieve.toml")).unwrap();
//! println!("Trap threshold: {}", config.trap.max_visits);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, PathRestriction, PolitenessConfig, ScopeConfig, TrapConfig,
    DEFAULT_ALLOWED_DOMAINS, DEFAULT_DISALLOWED_EXTENSIONS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
