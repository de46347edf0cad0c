//! WDA Core
//!
//! Alias sessions over a shared catalog: folder resolution, attribute
//! translation between model and native forms, dual-password handling and
//! validation verdicts, all for one target version and WLST mode.
//!
//! # Overview
//!
//! The core crate provides:
//! - **Aliases**: the session and its query surface
//! - **FolderResolver**: location → native paths, flattened levels included
//! - **AttributeTranslator**: model ↔ native names and values
//! - **ValidationClassifier**: `VALID` / `VERSION_INVALID` / `INVALID` verdicts
//! - **SessionConfig**: version, mode and target platform, from code, TOML or the environment
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use wda_catalog::AliasCatalog;
//! use wda_core::{Aliases, SessionConfig};
//! use wda_version::WlstMode;
//!
//! let catalog = Arc::new(AliasCatalog::from_json_str(r#"{
//!     "schema_version": "alias_catalog_v1",
//!     "root": {"folders": {"Server": {
//!         "wlst_type": "${Server:Servers}", "instance": "multiple", "name_token": "SERVER",
//!         "attributes": {"ListenPort": {"wlst_type": "integer"}}
//!     }}}
//! }"#).unwrap());
//!
//! let config = SessionConfig::new("14.1.1".parse().unwrap()).with_mode(WlstMode::Online);
//! let aliases = Aliases::new(catalog, &config);
//! let server = aliases.location("/Server/ms1").unwrap();
//!
//! assert_eq!(aliases.get_wlst_attributes_path(&server).unwrap().as_deref(), Some("/Servers/ms1"));
//! let (name, value) = aliases
//!     .get_wlst_attribute_name_and_value(&server, "ListenPort", &json!("7001"))
//!     .unwrap();
//! assert_eq!(name.as_deref(), Some("ListenPort"));
//! assert_eq!(value, Some(json!(7001)));
//! ```

#![warn(missing_docs)]

pub mod aliases;
pub mod classifier;
pub mod config;
mod convert;
pub mod error;
pub mod password;
pub mod resolver;
pub mod translator;
pub mod verdict;

// Re-exports
pub use aliases::{Aliases, FlattenedFolderInfo};
pub use classifier::ValidationClassifier;
pub use config::{SessionConfig, ENV_TARGET_PLATFORM, ENV_TARGET_VERSION, ENV_WLST_MODE};
pub use error::{AliasError, Result};
pub use password::PasswordHandler;
pub use resolver::{FolderResolver, ResolvedFolder};
pub use translator::AttributeTranslator;
pub use verdict::{Resolution, ResolvedAttribute, SkipReason, Translation, ValidationVerdict};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for alias sessions
    pub use crate::{
        AliasError, Aliases, Resolution, SessionConfig, SkipReason, Translation, ValidationVerdict,
    };
    pub use wda_catalog::{AliasCatalog, LocationContext, TargetPlatform};
    pub use wda_version::{Version, WlstMode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
