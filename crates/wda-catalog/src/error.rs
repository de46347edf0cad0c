//! Error types for the alias catalog
//!
//! Provides error handling for:
//! - Catalog loading (I/O, parse, schema version)
//! - Configuration defects found while compiling metadata
//! - Location context contract violations

use std::path::PathBuf;
use wda_version::VersionError;

/// Errors raised while loading or querying the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error while reading a metadata file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata document could not be deserialized
    #[error("failed to parse alias metadata from {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Metadata file extension is not json/yaml/yml
    #[error("unsupported alias metadata format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Schema version marker not recognised
    #[error("unsupported alias catalog schema_version '{found}', expected '{expected}'")]
    UnsupportedSchema { found: String, expected: &'static str },

    /// Bad catalog data; never recoverable at runtime
    #[error("alias catalog defect at {location}: {detail}")]
    ConfigurationDefect { location: String, detail: String },

    /// Folder path unknown at every version
    #[error("unknown model folder type: {0}")]
    UnknownFolderType(String),

    /// Version, range or mode literal in metadata is malformed
    #[error("invalid version data: {0}")]
    Version(#[from] VersionError),
}

impl CatalogError {
    /// Create a configuration defect for a catalog location
    pub fn defect(location: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ConfigurationDefect {
            location: location.into(),
            detail: detail.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this error reports bad catalog data
    #[inline]
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationDefect { .. } | Self::UnsupportedSchema { .. } | Self::Version(_)
        )
    }
}

/// Contract violations on a [`crate::LocationContext`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// Folder type, token or token value was empty
    #[error("{what} must not be empty")]
    EmptyName { what: &'static str },

    /// Descending below a multi-instance folder whose name is unbound
    #[error("name token {token} must be set before descending below {folder_path}")]
    NameTokenUnset { folder_path: String, token: String },

    /// `pop` called on the root location
    #[error("cannot pop the root location")]
    PopBelowRoot,
}
