//! Error types for version, range and mode parsing

/// Errors raised while parsing versions, ranges or modes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Empty version string
    #[error("version string is empty")]
    Empty,

    /// Version string is not dotted numeric
    #[error("invalid version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    /// Range string is not in bracket notation
    #[error("invalid version range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    /// Mode name other than offline/online
    #[error("unknown WLST mode '{0}' (expected 'offline' or 'online')")]
    UnknownMode(String),

    /// Mode mask other than offline/online/both
    #[error("unknown WLST mode mask '{0}' (expected 'offline', 'online' or 'both')")]
    UnknownModeMask(String),
}

impl VersionError {
    pub(crate) fn malformed_version(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_range(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
