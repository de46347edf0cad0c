//! Testing utilities for WDA workspace
//!
//! Shared fixture catalog, session builders and tracing setup.

#![allow(missing_docs)]

use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wda_catalog::{AliasCatalog, LocationContext};
use wda_core::{Aliases, SessionConfig};
use wda_version::{Version, WlstMode};

/// Fixture catalog covering every metadata feature
pub const SAMPLE_ALIASES: &str = include_str!("../fixtures/sample_aliases.json");

/// Version every fixture range is written against
pub const LATEST_VERSION: &str = "14.1.1.0.0";

static SAMPLE: Lazy<Arc<AliasCatalog>> = Lazy::new(fresh_sample_catalog);

/// Shared compiled fixture catalog
pub fn sample_catalog() -> Arc<AliasCatalog> {
    Arc::clone(&SAMPLE)
}

/// Freshly compiled fixture catalog with an empty view cache
pub fn fresh_sample_catalog() -> Arc<AliasCatalog> {
    Arc::new(AliasCatalog::from_json_str(SAMPLE_ALIASES).unwrap())
}

pub fn version(text: &str) -> Version {
    text.parse().unwrap()
}

/// Session over the shared fixture catalog
pub fn session(version_text: &str, mode: WlstMode) -> Aliases {
    let config = SessionConfig::new(version(version_text)).with_mode(mode);
    Aliases::new(sample_catalog(), &config)
}

pub fn offline(version_text: &str) -> Aliases {
    session(version_text, WlstMode::Offline)
}

pub fn online(version_text: &str) -> Aliases {
    session(version_text, WlstMode::Online)
}

/// Location in the shared fixture catalog
pub fn location(model_path: &str) -> LocationContext {
    LocationContext::from_model_path(sample_catalog(), model_path).unwrap()
}

/// Install a fmt subscriber honouring `RUST_LOG`; later calls are no-ops
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
