//! URL handling module for link-sieve
//!
//! This module provides netloc and base-URL extraction, scope matching, and the
//! [`UrlValidator`] that decides whether a discovered link is worth crawling.

mod domain;
mod matcher;

use crate::config::{PathRestriction, ScopeConfig};
use crate::{UrlError, UrlResult};
use std::fmt;

// Re-export main functions
pub use domain::{base_url, netloc, parse_url, path_without_params};
pub use matcher::{disallowed_extension, find_fragment};

/// Why the validator turned a URL down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Scheme is neither `http` nor `https`
    Scheme,
    /// Host contains none of the allowed domain fragments
    OutOfScope,
    /// Host is path-restricted and the path is outside the allowed prefix
    RestrictedPath,
    /// Path ends in a disallowed file extension
    Extension,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::OutOfScope => "out_of_scope",
            Self::RestrictedPath => "restricted_path",
            Self::Extension => "extension",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of validating a well-formed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Stateless scope and format filter for candidate links
///
/// Checks run in a fixed order and the first failing check decides the
/// rejection reason:
///
/// 1. Scheme must be `http` or `https`
/// 2. Host must contain one of the allowed domain fragments
/// 3. Path-restricted hosts must stay under their path prefix
/// 4. Path must not end in a disallowed extension
///
/// # Examples
///
/// ```
/// use link_sieve::url::UrlValidator;
///
/// let validator = UrlValidator::default();
/// assert!(validator.is_valid("https://www.ics.uci.edu/page").unwrap());
/// assert!(!validator.is_valid("https://ics.uci.edu/file.PDF").unwrap());
/// assert!(validator.is_valid("not a url").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_domains: Vec<String>,
    restricted_paths: Vec<PathRestriction>,
    disallowed_extensions: Vec<String>,
}

impl UrlValidator {
    pub fn new(scope: &ScopeConfig) -> Self {
        Self {
            allowed_domains: scope
                .allowed_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            restricted_paths: scope
                .restricted_paths
                .iter()
                .map(|r| PathRestriction {
                    domain: r.domain.to_lowercase(),
                    path_prefix: r.path_prefix.clone(),
                })
                .collect(),
            disallowed_extensions: scope
                .disallowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Returns whether `url` should be crawled
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The URL is in scope and of a wanted type
    /// * `Ok(false)` - The URL is well-formed but filtered out
    /// * `Err(UrlError)` - The URL could not be parsed into scheme, host and path
    pub fn is_valid(&self, url: &str) -> UrlResult<bool> {
        self.check(url).map(|verdict| verdict.is_accepted())
    }

    /// Validates `url` and names the reason for any rejection
    pub fn check(&self, url: &str) -> UrlResult<Verdict> {
        let parsed = parse_url(url)?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Ok(Verdict::Reject(RejectReason::Scheme));
        }

        let netloc =
            netloc(&parsed).ok_or_else(|| UrlError::MissingDomain(url.to_string()))?;

        if find_fragment(&netloc, &self.allowed_domains).is_none() {
            return Ok(Verdict::Reject(RejectReason::OutOfScope));
        }

        let path = path_without_params(&parsed);
        let outside_prefix = self
            .restricted_paths
            .iter()
            .any(|r| netloc.contains(&r.domain) && !path.starts_with(&r.path_prefix));
        if outside_prefix {
            return Ok(Verdict::Reject(RejectReason::RestrictedPath));
        }

        if disallowed_extension(path, &self.disallowed_extensions).is_some() {
            return Ok(Verdict::Reject(RejectReason::Extension));
        }

        Ok(Verdict::Accept)
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(&ScopeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UrlValidator {
        UrlValidator::default()
    }

    #[test]
    fn test_accepts_in_scope_page() {
        assert!(validator().is_valid("https://www.ics.uci.edu/page").unwrap());
        assert!(validator().is_valid("http://cs.uci.edu/").unwrap());
        assert!(validator().is_valid("https://www.stat.uci.edu/faculty").unwrap());
        assert!(validator().is_valid("https://informatics.uci.edu/").unwrap());
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        assert_eq!(
            validator().check("ftp://ics.uci.edu/x").unwrap(),
            Verdict::Reject(RejectReason::Scheme)
        );
        assert_eq!(
            validator().check("mailto:someone@ics.uci.edu").unwrap(),
            Verdict::Reject(RejectReason::Scheme)
        );
        assert_eq!(
            validator().check("javascript:void(0)").unwrap(),
            Verdict::Reject(RejectReason::Scheme)
        );
    }

    #[test]
    fn test_rejects_out_of_scope_host() {
        assert_eq!(
            validator().check("https://www.uci.edu/").unwrap(),
            Verdict::Reject(RejectReason::OutOfScope)
        );
        assert_eq!(
            validator().check("https://example.com/ics.uci.edu").unwrap(),
            Verdict::Reject(RejectReason::OutOfScope)
        );
    }

    #[test]
    fn test_substring_scope_is_permissive() {
        assert!(validator()
            .is_valid("https://evil-ics.uci.edu.attacker.com/")
            .unwrap());
    }

    #[test]
    fn test_department_path_restriction() {
        assert_eq!(
            validator().check("https://today.uci.edu/other/path").unwrap(),
            Verdict::Reject(RejectReason::RestrictedPath)
        );
        assert!(validator()
            .is_valid("https://today.uci.edu/department/information_computer_sciences/news")
            .unwrap());
    }

    #[test]
    fn test_department_prefix_requires_trailing_slash() {
        assert!(!validator()
            .is_valid("https://today.uci.edu/department/information_computer_sciences")
            .unwrap());
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        assert_eq!(
            validator().check("https://ics.uci.edu/file.PDF").unwrap(),
            Verdict::Reject(RejectReason::Extension)
        );
        assert!(!validator().is_valid("https://ics.uci.edu/a/b.tar.gz").unwrap());
        assert!(!validator().is_valid("https://ics.uci.edu/pic.JPEG").unwrap());
        assert!(!validator().is_valid("https://ics.uci.edu/data.csv?x=1").unwrap());
    }

    #[test]
    fn test_accepts_html_page() {
        assert!(validator().is_valid("https://ics.uci.edu/page.html").unwrap());
        assert!(validator().is_valid("https://ics.uci.edu/page.php?id=7").unwrap());
    }

    #[test]
    fn test_extension_ignores_path_params() {
        assert_eq!(
            validator()
                .check("https://ics.uci.edu/file.pdf;jsessionid=ABC")
                .unwrap(),
            Verdict::Reject(RejectReason::Extension)
        );
        assert!(validator()
            .is_valid("https://ics.uci.edu/page.html;jsessionid=ABC")
            .unwrap());
    }

    #[test]
    fn test_department_prefix_ignores_path_params() {
        assert!(validator()
            .is_valid("https://today.uci.edu/department/information_computer_sciences/news;s=1")
            .unwrap());
    }

    #[test]
    fn test_userinfo_is_not_part_of_scope() {
        assert_eq!(
            validator().check("http://ics.uci.edu@evil.com/page").unwrap(),
            Verdict::Reject(RejectReason::OutOfScope)
        );
        assert!(validator()
            .is_valid("http://guest@www.ics.uci.edu/page")
            .unwrap());
    }

    #[test]
    fn test_restriction_checked_before_extension() {
        assert_eq!(
            validator().check("https://today.uci.edu/other/file.pdf").unwrap(),
            Verdict::Reject(RejectReason::RestrictedPath)
        );
    }

    #[test]
    fn test_malformed_url_is_a_fault() {
        assert!(matches!(
            validator().is_valid("not a url"),
            Err(UrlError::Parse { .. })
        ));
        assert!(matches!(
            validator().is_valid("http://[::1"),
            Err(UrlError::Parse { .. })
        ));
        assert!(validator().is_valid("").is_err());
    }

    #[test]
    fn test_validator_is_pure() {
        let v = validator();
        for url in [
            "https://www.ics.uci.edu/page",
            "https://today.uci.edu/other/path",
            "https://ics.uci.edu/file.PDF",
        ] {
            let first = v.check(url).unwrap();
            for _ in 0..5 {
                assert_eq!(v.check(url).unwrap(), first);
            }
        }
    }

    #[test]
    fn test_custom_scope() {
        let scope = ScopeConfig {
            allowed_domains: vec!["Example.EDU".to_string()],
            restricted_paths: vec![],
            disallowed_extensions: vec!["TXT".to_string()],
        };
        let v = UrlValidator::new(&scope);

        assert!(v.is_valid("https://www.example.edu/").unwrap());
        assert!(!v.is_valid("https://www.example.edu/readme.txt").unwrap());
        assert!(v.is_valid("https://www.example.edu/file.pdf").unwrap());
        assert!(!v.is_valid("https://ics.uci.edu/").unwrap());
    }

    #[test]
    fn test_reject_reason_display() {
        assert_eq!(RejectReason::Scheme.to_string(), "scheme");
        assert_eq!(RejectReason::OutOfScope.to_string(), "out_of_scope");
        assert_eq!(RejectReason::RestrictedPath.to_string(), "restricted_path");
        assert_eq!(RejectReason::Extension.to_string(), "extension");
    }
}
