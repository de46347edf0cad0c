//! WDA Catalog
//!
//! Versioned alias metadata: which model folders and attributes exist at which
//! server version and connection mode, and what they are called natively.
//!
//! # Overview
//!
//! The catalog crate provides:
//! - **AliasCatalog**: compiled metadata, keyed by model folder path, with
//!   load-time defect detection and a lazy per-(folder, version, mode) view cache
//! - **FolderDefinition** / **AttributeDefinition**: the compiled entries
//! - **LocationContext**: a cursor into a model instance with name-token bindings
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wda_catalog::{AliasCatalog, LocationContext};
//!
//! let catalog = Arc::new(AliasCatalog::from_json_str(r#"{
//!     "schema_version": "alias_catalog_v1",
//!     "root": {"folders": {"Cluster": {
//!         "wlst_type": "Cluster", "instance": "multiple", "name_token": "CLUSTER"
//!     }}}
//! }"#).unwrap());
//!
//! let mut location = LocationContext::new(Arc::clone(&catalog));
//! location.append("Cluster").unwrap();
//! location.add_name_token("CLUSTER", "cluster1").unwrap();
//! assert_eq!(location.to_string(), "/Cluster/cluster1");
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod definition;
pub mod error;
pub mod location;
pub mod metadata;
pub mod tokens;
pub mod types;
pub mod view;

// Re-exports
pub use catalog::AliasCatalog;
pub use definition::{
    AttributeDefinition, AttributeVariant, FlattenedFolderSpec, FolderDefinition, ResolvedVariant,
    VariantMatch,
};
pub use error::{CatalogError, LocationError};
pub use location::LocationContext;
pub use metadata::{CatalogDocument, SCHEMA_VERSION};
pub use types::{
    Access, AttributeType, Delimiter, FolderCategory, InstanceKind, ModeSplit, ModelSection,
    PasswordForm, PreferredModelType, TargetPlatform,
};
pub use view::FolderView;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog consumers
    pub use crate::{
        AliasCatalog, AttributeType, CatalogError, FolderCategory, FolderDefinition,
        LocationContext, LocationError, ModelSection, ResolvedVariant,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
