//! Error types for alias sessions
//!
//! Not-found and version mismatches are values ([`crate::Resolution`],
//! [`crate::ValidationVerdict`], `Option`), never errors. What remains here
//! is bad catalog data, broken caller contracts, and values that cannot be
//! translated.

use wda_catalog::{CatalogError, LocationError, PasswordForm};
use wda_version::VersionError;

/// Alias session errors
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    /// Catalog loading failed or a folder type is unknown
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Location context contract violated
    #[error(transparent)]
    Location(#[from] LocationError),

    /// Version or mode literal malformed
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Attribute not declared in the folder at any version
    #[error("attribute {name} is not defined in folder {location}")]
    AttributeNotFound { location: String, name: String },

    /// Structurally malformed input, such as an empty name
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A single-instance folder has neither a bound name nor a default name
    #[error("no instance name for folder {folder} at {location}")]
    MissingInstanceName { location: String, folder: String },

    /// A model value cannot be converted to the attribute's native type
    #[error("invalid value for {name} at {location}: {reason}")]
    InvalidValue {
        location: String,
        name: String,
        reason: String,
    },

    /// Password value form contradicts what the attribute accepts online
    #[error("password attribute {name} at {location} only accepts {expected:?} values online")]
    PasswordModeMismatch {
        location: String,
        name: String,
        expected: PasswordForm,
    },

    /// Session configuration could not be read
    #[error("invalid session configuration: {0}")]
    Config(String),
}

impl AliasError {
    /// Create an invalid value error
    pub fn invalid_value(
        location: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            location: location.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if the caller broke an API contract rather than hitting bad data
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Location(_) | Self::MalformedInput(_) | Self::MissingInstanceName { .. }
        )
    }

    /// Check if the error reports bad catalog data
    #[inline]
    #[must_use]
    pub fn is_configuration_defect(&self) -> bool {
        match self {
            Self::Catalog(e) => e.is_defect(),
            _ => false,
        }
    }
}

/// Result alias for session operations
pub type Result<T> = std::result::Result<T, AliasError>;
