//! Severity levels for diagnostics.

use std::fmt;
use std::str::FromStr;

/// How a diagnostic in a group is treated once policy resolution is done.
///
/// Unlike rendering-oriented severity ladders, there is no `Note`/`Help`
/// here: policy only decides whether a diagnostic fails the build, prints,
/// or is dropped entirely.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    /// The diagnostic is emitted and fails the build.
    Error,
    /// The diagnostic is emitted but does not fail the build.
    Warning,
    /// The diagnostic is dropped without being emitted.
    Ignored,
}

impl Severity {
    /// Check if this severity fails the build.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Check if a diagnostic with this severity is emitted at all.
    pub fn is_emitted(self) -> bool {
        !matches!(self, Severity::Ignored)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Ignored => write!(f, "ignored"),
        }
    }
}

/// Error returned when parsing a severity name fails.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unknown severity `{0}`, expected `error`, `warning`, or `ignored`")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "ignored" => Ok(Severity::Ignored),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}
