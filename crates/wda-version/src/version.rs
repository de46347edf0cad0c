//! Dotted server versions
//!
//! Provides [`Version`] with segment-wise integer ordering where missing
//! trailing segments count as zero, so `12.2.1` and `12.2.1.0` are equal.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Dotted numeric server version
///
/// Keeps the segments as written for display; comparison, equality and
/// hashing ignore trailing zero segments.
///
/// # Examples
/// - `12.2.1.3.0` == `12.2.1.3`
/// - `14.1.1` > `12.2.1.4.0`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    segments: Vec<u32>,
}

impl Version {
    /// Create version from numeric segments
    ///
    /// # Errors
    /// Returns error if `segments` is empty
    pub fn from_segments(segments: Vec<u32>) -> Result<Self, VersionError> {
        if segments.is_empty() {
            return Err(VersionError::Empty);
        }
        Ok(Self { segments })
    }

    /// Segments as written
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Segments with trailing zeros removed
    #[must_use]
    pub fn significant_segments(&self) -> &[u32] {
        let end = self
            .segments
            .iter()
            .rposition(|s| *s != 0)
            .map_or(0, |idx| idx + 1);
        &self.segments[..end]
    }

    /// Segment at `index`, zero when absent
    #[inline]
    #[must_use]
    pub fn segment(&self, index: usize) -> u32 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Major version (first segment)
    #[inline]
    #[must_use]
    pub fn major(&self) -> u32 {
        self.segment(0)
    }
}

/// Compare two versions segment-wise, padding the shorter one with zeros
#[must_use]
pub fn compare(a: &Version, b: &Version) -> Ordering {
    let len = a.segments.len().max(b.segments.len());
    for idx in 0..len {
        match a.segment(idx).cmp(&b.segment(idx)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True when `version` is at or above `floor`
#[inline]
#[must_use]
pub fn is_at_least(version: &Version, floor: &Version) -> bool {
    compare(version, floor) != Ordering::Less
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_segments().hash(state);
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.segments.iter().map(u32::to_string).collect();
        write!(f, "{}", text.join("."))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let segments = trimmed
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(VersionError::malformed_version(s, "empty segment"))
                } else if !seg.chars().all(|c| c.is_ascii_digit()) {
                    Err(VersionError::malformed_version(
                        s,
                        format!("segment '{seg}' is not numeric"),
                    ))
                } else {
                    seg.parse::<u32>().map_err(|_| {
                        VersionError::malformed_version(s, format!("segment '{seg}' is too large"))
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Version {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn version_parse_and_display() {
        let version = v("12.2.1.3.0");
        assert_eq!(version.segments(), &[12, 2, 1, 3, 0]);
        assert_eq!(version.to_string(), "12.2.1.3.0");
    }

    #[test]
    fn version_trailing_zero_equality() {
        assert_eq!(v("12.2.1"), v("12.2.1.0"));
        assert_eq!(v("12.2.1"), v("12.2.1.0.0"));
        assert_ne!(v("12.2.1"), v("12.2.1.0.1"));
    }

    #[test]
    fn version_trailing_zero_hash() {
        let mut set = HashSet::new();
        set.insert(v("12.2.1"));
        assert!(set.contains(&v("12.2.1.0")));
    }

    #[test]
    fn version_ordering_is_numeric() {
        assert!(v("12.2.1.10") > v("12.2.1.9"));
        assert!(v("14.1.1") > v("12.2.1.4.0"));
        assert!(v("10.3.6") < v("12.1.1"));
        assert!(v("12.2.1.0.1") > v("12.2.1"));
    }

    #[test]
    fn version_is_at_least() {
        assert!(is_at_least(&v("12.2.1.3"), &v("12.2.1")));
        assert!(is_at_least(&v("12.2.1"), &v("12.2.1.0")));
        assert!(!is_at_least(&v("12.1.3"), &v("12.2.1")));
    }

    #[test]
    fn version_parse_rejects_garbage() {
        assert!(matches!("".parse::<Version>(), Err(VersionError::Empty)));
        assert!(matches!(
            "12..1".parse::<Version>(),
            Err(VersionError::MalformedVersion { .. })
        ));
        assert!(matches!(
            "12.2.x".parse::<Version>(),
            Err(VersionError::MalformedVersion { .. })
        ));
        assert!(matches!(
            "12.2.1-SNAPSHOT".parse::<Version>(),
            Err(VersionError::MalformedVersion { .. })
        ));
    }

    #[test]
    fn version_significant_segments() {
        assert_eq!(v("12.2.1.0.0").significant_segments(), &[12, 2, 1]);
        assert!(v("0.0").significant_segments().is_empty());
    }

    #[test]
    fn version_serde_as_string() {
        let version: Version = serde_json::from_str("\"14.1.1.0.0\"").unwrap();
        assert_eq!(version, v("14.1.1"));
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"14.1.1.0.0\"");
    }
}
