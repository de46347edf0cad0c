//! Validation verdicts and resolution outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Whether a model path exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationVerdict {
    /// Not declared at any version
    Invalid,
    /// Declared, but not at this version or in this mode
    VersionInvalid,
    /// Valid at this version and mode
    Valid,
}

impl ValidationVerdict {
    /// Whether the verdict is [`ValidationVerdict::Valid`]
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

impl Display for ValidationVerdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Invalid => "INVALID",
            Self::VersionInvalid => "VERSION_INVALID",
            Self::Valid => "VALID",
        })
    }
}

/// Outcome of resolving something that may not exist
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// Resolved
    Found(T),
    /// Not resolvable; `verdict` is never `Valid`
    Unresolved {
        /// Why resolution stopped
        verdict: ValidationVerdict,
        /// Human-readable explanation
        message: String,
    },
}

impl<T> Resolution<T> {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Unresolved {
            verdict: ValidationVerdict::Invalid,
            message: message.into(),
        }
    }

    pub(crate) fn version_invalid(message: impl Into<String>) -> Self {
        Self::Unresolved {
            verdict: ValidationVerdict::VersionInvalid,
            message: message.into(),
        }
    }

    /// Verdict of this outcome
    #[inline]
    #[must_use]
    pub fn verdict(&self) -> ValidationVerdict {
        match self {
            Self::Found(_) => ValidationVerdict::Valid,
            Self::Unresolved { verdict, .. } => *verdict,
        }
    }

    /// Whether resolution succeeded
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Resolved value, if any
    #[inline]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Unresolved { .. } => None,
        }
    }

    /// Map the resolved value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Found(value) => Resolution::Found(f(value)),
            Self::Unresolved { verdict, message } => Resolution::Unresolved { verdict, message },
        }
    }
}

/// A model attribute translated to its native form
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttribute {
    /// Native attribute name
    pub native_name: String,
    /// Native value
    pub native_value: Value,
    /// Always `Valid` for a translated attribute
    pub verdict: ValidationVerdict,
}

/// Why a declared attribute was not translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Not declared in the session mode
    ModeUnsupported,
    /// Declared in the mode, but not at the session version
    VersionUnsupported,
    /// Declared with `IGNORED` access
    Ignored,
    /// Read-only; cannot be set
    ReadOnly,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ModeUnsupported => "not supported in this mode",
            Self::VersionUnsupported => "not supported at this version",
            Self::Ignored => "ignored",
            Self::ReadOnly => "read-only",
        })
    }
}

/// Result of translating a model attribute to native form
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// Set this native attribute
    Set(ResolvedAttribute),
    /// Skip silently; never fatal
    Skip(SkipReason),
}

impl Translation {
    /// Translated attribute, if not skipped
    #[inline]
    #[must_use]
    pub fn into_attribute(self) -> Option<ResolvedAttribute> {
        match self {
            Self::Set(attribute) => Some(attribute),
            Self::Skip(_) => None,
        }
    }

    /// Skip reason, if skipped
    #[inline]
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Set(_) => None,
            Self::Skip(reason) => Some(*reason),
        }
    }
}
