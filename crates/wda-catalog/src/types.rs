//! Closed vocabularies used by catalog entries
//!
//! Every string-valued code in the metadata (attribute types, access codes,
//! folder categories, model sections) is parsed once at load time into one of
//! these enums, so the rest of the engine matches exhaustively instead of
//! comparing strings.

use crate::error::CatalogError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use wda_version::WlstMode;

/// Separator used by a delimited-string attribute on the native side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `,` (the default for `delimited_string`)
    Comma,
    /// ` `; values pass through unchanged
    Space,
    /// `;`
    Semicolon,
    /// Path separator of the target server's platform
    PathSeparator,
}

impl Delimiter {
    /// Separator character on a server running on `platform`
    #[inline]
    #[must_use]
    pub fn separator(self, platform: TargetPlatform) -> char {
        match self {
            Self::Comma => ',',
            Self::Space => ' ',
            Self::Semicolon => ';',
            Self::PathSeparator => platform.path_separator(),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Space => "space",
            Self::Semicolon => "semicolon",
            Self::PathSeparator => "path_separator",
        }
    }
}

/// Operating system family of the target server
///
/// Only decides the separator of `delimited_string[path_separator]`
/// attributes; the host running the engine plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Unix-like server, `:` between path entries
    #[default]
    Unix,
    /// Windows server, `;` between path entries
    Windows,
}

impl TargetPlatform {
    /// Separator between path entries
    #[inline]
    #[must_use]
    pub fn path_separator(self) -> char {
        match self {
            Self::Unix => ':',
            Self::Windows => ';',
        }
    }
}

impl Display for TargetPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        })
    }
}

impl FromStr for TargetPlatform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unix" | "linux" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            other => Err(CatalogError::defect(
                "target platform",
                format!("unknown target platform '{other}'"),
            )),
        }
    }
}

/// Native type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Plain string
    String,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    Long,
    /// Floating point
    Double,
    /// Boolean
    Boolean,
    /// Password, possibly split online into encrypted/plaintext names
    Password,
    /// Credential; treated as a password
    Credential,
    /// Delimited string list
    Delimited(Delimiter),
    /// Native array of strings
    JArray,
    /// String-to-string map
    Properties,
}

impl AttributeType {
    /// Whether values are secrets
    #[inline]
    #[must_use]
    pub fn is_password(self) -> bool {
        matches!(self, Self::Password | Self::Credential)
    }

    /// Whether values are lists
    #[inline]
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, Self::Delimited(_) | Self::JArray)
    }

    /// Whether values are numeric
    #[inline]
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Double)
    }
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Long => f.write_str("long"),
            Self::Double => f.write_str("double"),
            Self::Boolean => f.write_str("boolean"),
            Self::Password => f.write_str("password"),
            Self::Credential => f.write_str("credential"),
            Self::Delimited(Delimiter::Comma) => f.write_str("delimited_string"),
            Self::Delimited(d) => write!(f, "delimited_string[{}]", d.suffix()),
            Self::JArray => f.write_str("jarray"),
            Self::Properties => f.write_str("properties"),
        }
    }
}

impl FromStr for AttributeType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.trim() {
            "string" => Self::String,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "double" => Self::Double,
            "boolean" => Self::Boolean,
            "password" => Self::Password,
            "credential" => Self::Credential,
            "delimited_string" | "delimited_string[comma]" => Self::Delimited(Delimiter::Comma),
            "delimited_string[space]" => Self::Delimited(Delimiter::Space),
            "delimited_string[semicolon]" => Self::Delimited(Delimiter::Semicolon),
            "delimited_string[path_separator]" => Self::Delimited(Delimiter::PathSeparator),
            "jarray" | "list" => Self::JArray,
            "properties" => Self::Properties,
            other => {
                return Err(CatalogError::defect(
                    "attribute type",
                    format!("unknown attribute type '{other}'"),
                ))
            }
        };
        Ok(parsed)
    }
}

/// Write access of an attribute in a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// Read/write
    #[default]
    ReadWrite,
    /// Read-only; discovered but never set
    ReadOnly,
    /// Declared but deliberately unsupported; silently skipped
    Ignored,
}

impl FromStr for Access {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RW" | "" => Ok(Self::ReadWrite),
            "RO" | "ROD" => Ok(Self::ReadOnly),
            "IGNORED" => Ok(Self::Ignored),
            other => Err(CatalogError::defect(
                "attribute access",
                format!("unknown access code '{other}'"),
            )),
        }
    }
}

/// Value form a single-name password attribute accepts online
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordForm {
    /// Encrypted or plaintext
    #[default]
    Either,
    /// Only `{AES}`-style encrypted values
    Encrypted,
    /// Only plaintext values
    Plaintext,
}

/// Shape a list-valued attribute takes in the model when read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredModelType {
    /// YAML list
    List,
    /// Single delimited string
    DelimitedString,
}

/// Whether a folder holds one unnamed instance or many named ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    /// One instance; name comes from its token or default name
    #[default]
    Single,
    /// Many instances keyed by the folder's name token
    Multiple,
}

/// Behavioural category of a folder, used instead of type-name comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderCategory {
    /// No special handling
    #[default]
    Standard,
    /// Managed or admin server
    Server,
    /// Server template
    ServerTemplate,
    /// Cluster
    Cluster,
    /// Deployed application
    Application,
    /// Shared library
    Library,
    /// System resource module (JDBC, JMS, WLDF, ...)
    SystemResource,
    /// Security realm
    Realm,
    /// Security provider of any kind
    SecurityProvider,
}

impl FolderCategory {
    /// Whether deployers treat the folder as a deployable
    #[inline]
    #[must_use]
    pub fn is_deployment(self) -> bool {
        matches!(self, Self::Application | Self::Library)
    }

    /// Whether the folder targets servers or clusters
    #[inline]
    #[must_use]
    pub fn is_topology_target(self) -> bool {
        matches!(self, Self::Server | Self::ServerTemplate | Self::Cluster)
    }
}

/// Top-level section of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSection {
    /// `domainInfo`
    #[serde(rename = "domainInfo")]
    DomainInfo,
    /// `topology`
    #[serde(rename = "topology")]
    Topology,
    /// `resources`
    #[serde(rename = "resources")]
    Resources,
    /// `appDeployments`
    #[serde(rename = "appDeployments")]
    AppDeployments,
}

impl ModelSection {
    /// Section key as written in model files
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DomainInfo => "domainInfo",
            Self::Topology => "topology",
            Self::Resources => "resources",
            Self::AppDeployments => "appDeployments",
        }
    }
}

impl Display for ModelSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static MODE_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\{([^:{}]*):([^:{}]*)\}$").unwrap_or_else(|e| panic!("invalid mode-split pattern: {e}"))
});

/// Value that may differ between offline and online
///
/// Metadata writes `${offline:online}` for split values; a plain value applies
/// to both modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSplit<T> {
    offline: T,
    online: T,
}

impl<T> ModeSplit<T> {
    /// Same value in both modes
    #[inline]
    #[must_use]
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            offline: value.clone(),
            online: value,
        }
    }

    /// Distinct values per mode
    #[inline]
    #[must_use]
    pub fn split(offline: T, online: T) -> Self {
        Self { offline, online }
    }

    /// Value for `mode`
    #[inline]
    #[must_use]
    pub fn get(&self, mode: WlstMode) -> &T {
        match mode {
            WlstMode::Offline => &self.offline,
            WlstMode::Online => &self.online,
        }
    }

    /// Both values, offline first
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.offline, &self.online].into_iter()
    }

    /// Convert each side
    ///
    /// # Errors
    /// Returns the first conversion error
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<ModeSplit<U>, E> {
        Ok(ModeSplit {
            offline: f(self.offline)?,
            online: f(self.online)?,
        })
    }
}

impl<T: PartialEq> ModeSplit<T> {
    /// Whether offline and online differ
    #[inline]
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.offline != self.online
    }
}

impl ModeSplit<String> {
    /// Parse `${offline:online}` or a plain value
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match MODE_SPLIT.captures(raw.trim()) {
            Some(caps) => Self::split(caps[1].trim().to_string(), caps[2].trim().to_string()),
            None => Self::uniform(raw.trim().to_string()),
        }
    }
}
