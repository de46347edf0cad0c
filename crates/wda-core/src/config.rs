//! Session configuration
//!
//! A session is bound to one target server version, one WLST mode and one
//! target platform for its whole life. The configuration can be built in code, read from a TOML
//! document (either at the top level or under a `[session]` table), or taken
//! from the environment.

use crate::error::{AliasError, Result};
use serde::{Deserialize, Serialize};
use wda_catalog::TargetPlatform;
use wda_version::{Version, WlstMode};

/// Environment variable holding the target version
pub const ENV_TARGET_VERSION: &str = "WDA_TARGET_VERSION";

/// Environment variable holding the WLST mode
pub const ENV_WLST_MODE: &str = "WDA_WLST_MODE";

/// Environment variable holding the target server platform
pub const ENV_TARGET_PLATFORM: &str = "WDA_TARGET_PLATFORM";

/// Version and mode a session targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Target server version
    pub target_version: Version,
    /// Connection mode, offline unless given
    #[serde(default)]
    pub mode: WlstMode,
    /// Platform of the target server, Unix unless given
    #[serde(default)]
    pub target_platform: TargetPlatform,
}

impl SessionConfig {
    /// Create an offline configuration for `target_version`
    #[inline]
    #[must_use]
    pub fn new(target_version: Version) -> Self {
        Self {
            target_version,
            mode: WlstMode::Offline,
            target_platform: TargetPlatform::Unix,
        }
    }

    /// With connection mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: WlstMode) -> Self {
        self.mode = mode;
        self
    }

    /// With target version
    #[inline]
    #[must_use]
    pub fn with_target_version(mut self, target_version: Version) -> Self {
        self.target_version = target_version;
        self
    }

    /// With target server platform
    #[inline]
    #[must_use]
    pub fn with_target_platform(mut self, target_platform: TargetPlatform) -> Self {
        self.target_platform = target_platform;
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// Returns [`AliasError::Config`] for malformed TOML or missing fields
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let document: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| AliasError::Config(e.to_string()))?;
        let table = match document.get("session") {
            Some(toml::Value::Table(session)) => session.clone(),
            _ => document,
        };
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| AliasError::Config(e.to_string()))
    }

    /// Read from `WDA_TARGET_VERSION`, `WDA_WLST_MODE` and
    /// `WDA_TARGET_PLATFORM`
    ///
    /// # Errors
    /// Returns [`AliasError::Config`] if the version variable is unset or the
    /// platform is unknown, and [`AliasError::Version`] for a malformed
    /// version or mode
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let version = lookup(ENV_TARGET_VERSION)
            .ok_or_else(|| AliasError::Config(format!("{ENV_TARGET_VERSION} is not set")))?;
        let mut config = Self::new(version.parse()?);
        if let Some(mode) = lookup(ENV_WLST_MODE) {
            config.mode = mode.parse()?;
        }
        if let Some(platform) = lookup(ENV_TARGET_PLATFORM) {
            config.target_platform = platform
                .parse()
                .map_err(|e: wda_catalog::CatalogError| AliasError::Config(e.to_string()))?;
        }
        Ok(config)
    }
}
