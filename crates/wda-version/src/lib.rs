//! WDA Version
//!
//! Version and mode primitives shared by every layer of the alias engine.
//!
//! # Overview
//!
//! - **Version**: dotted numeric server version (`12.2.1.3.0`), trailing zeros insignificant
//! - **VersionRange**: bracketed range (`[12.1.2,12.2.1)`, `[14.1.1,)`) with mixed
//!   open/closed upper bounds
//! - **WlstMode** / **ModeMask**: the two connection modes and the masks that select them
//!
//! # Example
//!
//! ```rust
//! use wda_version::{in_range, Version, VersionRange};
//!
//! let version: Version = "12.2.1.3".parse().unwrap();
//! let range: VersionRange = "[12.2.1,14.1.1)".parse().unwrap();
//! assert!(in_range(&version, &range));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod mode;
pub mod range;
pub mod version;

// Re-exports
pub use error::VersionError;
pub use mode::{ModeMask, WlstMode};
pub use range::{Bound, VersionRange};
pub use version::{compare, is_at_least, Version};

/// True when `version` lies inside `range`.
///
/// The range decides whether its upper bound is open or closed; callers
/// never need to know which convention a catalog entry used.
#[inline]
#[must_use]
pub fn in_range(version: &Version, range: &VersionRange) -> bool {
    range.contains(version)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
