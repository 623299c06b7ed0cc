//! Outcome definitions for candidate links
//!
//! Every link extracted during a crawl step ends in exactly one of these states.
use crate::url::RejectReason;
use std::fmt;

/// What a crawl step decided about one candidate link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkOutcome {
    /// Passed every policy and is handed to the frontier
    Accepted,

    /// Turned down by the URL validator
    Rejected(RejectReason),

    /// Base URL has been seen too often (or its path looks generated)
    Trap,

    /// Could not be parsed into scheme, host and path
    Malformed,
}

impl LinkOutcome {
    /// Returns true if the link goes to the frontier
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns true if a policy filtered the link out
    ///
    /// Malformed links are faults, not policy decisions, and are excluded.
    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Trap)
    }

    /// Short label for logs and command-line output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected(reason) => reason.as_str(),
            Self::Trap => "trap",
            Self::Malformed => "malformed",
        }
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
