use serde::Deserialize;
use std::time::Duration;

/// Host fragments that define the default crawl scope
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "ics.uci.edu",
    "cs.uci.edu",
    "informatics.uci.edu",
    "stat.uci.edu",
    "today.uci.edu",
];

/// Extensions of binary, media, archive and document resources the crawler skips
pub const DEFAULT_DISALLOWED_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2", "mp3",
    "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps", "eps",
    "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe", "bz2",
    "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx",
    "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
];

/// Main configuration structure for link-sieve
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub politeness: PolitenessConfig,
    pub scope: ScopeConfig,
    pub trap: TrapConfig,
    pub fetch: FetchConfig,
}

/// Per-domain request throttling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolitenessConfig {
    /// Minimum time between requests to the same domain (milliseconds)
    #[serde(rename = "min-interval-ms")]
    pub min_interval_ms: u64,
}

impl PolitenessConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 500,
        }
    }
}

/// Crawl scope: which hosts, paths and resource types are followed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Host fragments; a host is in scope when it contains any of them
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Hosts whose pages are only followed under a given path prefix
    #[serde(rename = "restricted-paths")]
    pub restricted_paths: Vec<PathRestriction>,

    /// File extensions (without the dot) that are never followed
    #[serde(rename = "disallowed-extensions")]
    pub disallowed_extensions: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            restricted_paths: vec![PathRestriction {
                domain: "today.uci.edu".to_string(),
                path_prefix: "/department/information_computer_sciences/".to_string(),
            }],
            disallowed_extensions: DEFAULT_DISALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// A host fragment whose links must stay under one path prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathRestriction {
    /// Host fragment this restriction applies to
    pub domain: String,

    /// Required path prefix (e.g., "/department/information_computer_sciences/")
    #[serde(rename = "path-prefix")]
    pub path_prefix: String,
}

/// Crawl-trap detection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrapConfig {
    /// A base URL seen more often than this is treated as a trap
    #[serde(rename = "max-visits")]
    pub max_visits: u32,

    /// Enables the path-shape heuristic (off by default)
    #[serde(rename = "path-heuristic")]
    pub path_heuristic: bool,

    /// Paths longer than this are traps when the heuristic is enabled
    #[serde(rename = "max-path-length")]
    pub max_path_length: usize,

    /// Runs of this many consecutive path segments are traps when the heuristic is enabled
    #[serde(rename = "max-path-segments")]
    pub max_path_segments: usize,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            max_visits: 3,
            path_heuristic: false,
            max_path_length: 100,
            max_path_segments: 5,
        }
    }
}

/// Settings for the command-line HTTP fetch adapter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("link-sieve/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}
