use crate::config::types::{Config, FetchConfig, PathRestriction, ScopeConfig, TrapConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scope_config(&config.scope)?;
    validate_trap_config(&config.trap)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed-domains must list at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    for restriction in &config.restricted_paths {
        validate_path_restriction(restriction)?;
    }

    for extension in &config.disallowed_extensions {
        validate_extension(extension)?;
    }

    Ok(())
}

fn validate_path_restriction(restriction: &PathRestriction) -> Result<(), ConfigError> {
    validate_domain_string(&restriction.domain)?;

    if !restriction.path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "path-prefix for '{}' must start with '/', got '{}'",
            restriction.domain, restriction.path_prefix
        )));
    }

    Ok(())
}

fn validate_extension(extension: &str) -> Result<(), ConfigError> {
    if extension.is_empty() {
        return Err(ConfigError::Validation(
            "disallowed extension cannot be empty".to_string(),
        ));
    }

    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "disallowed extension '{}' must be ASCII alphanumeric without a leading dot",
            extension
        )));
    }

    Ok(())
}

/// Validates trap detection configuration
fn validate_trap_config(config: &TrapConfig) -> Result<(), ConfigError> {
    if config.max_visits < 1 {
        return Err(ConfigError::Validation(format!(
            "max-visits must be >= 1, got {}",
            config.max_visits
        )));
    }

    if config.max_path_segments < 1 {
        return Err(ConfigError::Validation(format!(
            "max-path-segments must be >= 1, got {}",
            config.max_path_segments
        )));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates a host fragment used for scope matching
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'ics.uci.edu')",
            domain
        )));
    }

    Ok(())
}
