//! WLST connection modes
//!
//! [`WlstMode`] is the closed set of modes a session targets; [`ModeMask`]
//! is what catalog entries declare to say which modes they apply to.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Connection mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WlstMode {
    /// Disconnected: edits a domain home on disk
    Offline,
    /// Connected: edits a running admin server
    Online,
}

impl WlstMode {
    /// Both modes, offline first
    pub const ALL: [WlstMode; 2] = [WlstMode::Offline, WlstMode::Online];

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Online => "online",
        }
    }

    /// The other mode
    #[inline]
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Offline => Self::Online,
            Self::Online => Self::Offline,
        }
    }
}

impl Default for WlstMode {
    fn default() -> Self {
        Self::Offline
    }
}

impl Display for WlstMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WlstMode {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(Self::Offline),
            "online" => Ok(Self::Online),
            _ => Err(VersionError::UnknownMode(s.to_string())),
        }
    }
}

/// Set of modes an entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeMask {
    /// Offline only
    Offline,
    /// Online only
    Online,
    /// Both modes
    #[default]
    Both,
}

impl ModeMask {
    /// Whether `mode` is selected
    #[inline]
    #[must_use]
    pub fn includes(self, mode: WlstMode) -> bool {
        match (self, mode) {
            (Self::Both, _) | (Self::Offline, WlstMode::Offline) | (Self::Online, WlstMode::Online) => {
                true
            }
            (Self::Offline, WlstMode::Online) | (Self::Online, WlstMode::Offline) => false,
        }
    }

    /// Whether the two masks select a common mode
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        WlstMode::ALL
            .iter()
            .any(|mode| self.includes(*mode) && other.includes(*mode))
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Online => "online",
            Self::Both => "both",
        }
    }
}

impl From<WlstMode> for ModeMask {
    fn from(mode: WlstMode) -> Self {
        match mode {
            WlstMode::Offline => Self::Offline,
            WlstMode::Online => Self::Online,
        }
    }
}

impl Display for ModeMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeMask {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(Self::Offline),
            "online" => Ok(Self::Online),
            "both" | "" => Ok(Self::Both),
            _ => Err(VersionError::UnknownModeMask(s.to_string())),
        }
    }
}
