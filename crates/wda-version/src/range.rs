//! Version ranges in bracket notation
//!
//! Catalog entries mix conventions: most ranges are half-open (`[12.1.2,12.2.1)`)
//! but some close the upper bound (`[12.2.1,12.2.1.4]`). [`VersionRange`]
//! records the convention per bound so membership tests are uniform.

use crate::error::VersionError;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One end of a version range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    /// Boundary version
    pub version: Version,
    /// Whether the boundary version itself is in range
    pub inclusive: bool,
}

impl Bound {
    /// Inclusive bound
    #[inline]
    #[must_use]
    pub fn inclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: true,
        }
    }

    /// Exclusive bound
    #[inline]
    #[must_use]
    pub fn exclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: false,
        }
    }
}

/// Range of server versions with optional lower and upper bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Range covering every version
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// `[min,)`
    #[inline]
    #[must_use]
    pub fn at_least(min: Version) -> Self {
        Self {
            lower: Some(Bound::inclusive(min)),
            upper: None,
        }
    }

    /// `[min,max)`
    #[inline]
    #[must_use]
    pub fn half_open(min: Version, max: Version) -> Self {
        Self {
            lower: Some(Bound::inclusive(min)),
            upper: Some(Bound::exclusive(max)),
        }
    }

    /// `[min,max]`
    #[inline]
    #[must_use]
    pub fn closed(min: Version, max: Version) -> Self {
        Self {
            lower: Some(Bound::inclusive(min)),
            upper: Some(Bound::inclusive(max)),
        }
    }

    /// Build a range from explicit bounds
    ///
    /// # Errors
    /// Returns error if the bounds describe an empty range
    pub fn new(lower: Option<Bound>, upper: Option<Bound>) -> Result<Self, VersionError> {
        let range = Self { lower, upper };
        if range.is_empty() {
            return Err(VersionError::malformed_range(
                &range.to_string(),
                "lower bound is above upper bound",
            ));
        }
        Ok(range)
    }

    /// Lower bound, if any
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Option<&Bound> {
        self.lower.as_ref()
    }

    /// Upper bound, if any
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Option<&Bound> {
        self.upper.as_ref()
    }

    /// Check membership of `version`
    #[must_use]
    pub fn contains(&self, version: &Version) -> bool {
        let above_lower = self.lower.as_ref().map_or(true, |b| {
            match version.cmp(&b.version) {
                Ordering::Greater => true,
                Ordering::Equal => b.inclusive,
                Ordering::Less => false,
            }
        });
        let below_upper = self.upper.as_ref().map_or(true, |b| {
            match version.cmp(&b.version) {
                Ordering::Less => true,
                Ordering::Equal => b.inclusive,
                Ordering::Greater => false,
            }
        });
        above_lower && below_upper
    }

    /// Check whether two ranges share at least one version
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let lower = tighter_lower(self.lower.as_ref(), other.lower.as_ref());
        let upper = tighter_upper(self.upper.as_ref(), other.upper.as_ref());
        !bounds_empty(lower, upper)
    }

    fn is_empty(&self) -> bool {
        bounds_empty(self.lower.as_ref(), self.upper.as_ref())
    }
}

fn tighter_lower<'a>(a: Option<&'a Bound>, b: Option<&'a Bound>) -> Option<&'a Bound> {
    match (a, b) {
        (Some(x), Some(y)) => match x.version.cmp(&y.version) {
            Ordering::Greater => Some(x),
            Ordering::Less => Some(y),
            Ordering::Equal => Some(if x.inclusive { y } else { x }),
        },
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

fn tighter_upper<'a>(a: Option<&'a Bound>, b: Option<&'a Bound>) -> Option<&'a Bound> {
    match (a, b) {
        (Some(x), Some(y)) => match x.version.cmp(&y.version) {
            Ordering::Less => Some(x),
            Ordering::Greater => Some(y),
            Ordering::Equal => Some(if x.inclusive { y } else { x }),
        },
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

fn bounds_empty(lower: Option<&Bound>, upper: Option<&Bound>) -> bool {
    match (lower, upper) {
        (Some(lo), Some(hi)) => match lo.version.cmp(&hi.version) {
            Ordering::Less => false,
            Ordering::Equal => !(lo.inclusive && hi.inclusive),
            Ordering::Greater => true,
        },
        _ => false,
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Display for VersionRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let open = match &self.lower {
            Some(b) if !b.inclusive => '(',
            _ => '[',
        };
        let close = match &self.upper {
            Some(b) if b.inclusive => ']',
            _ => ')',
        };
        let lower = self
            .lower
            .as_ref()
            .map(|b| b.version.to_string())
            .unwrap_or_default();
        let upper = self
            .upper
            .as_ref()
            .map(|b| b.version.to_string())
            .unwrap_or_default();
        write!(f, "{open}{lower},{upper}{close}")
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    /// Parse `[min,max)`, `[min,max]`, `(min,max)`, `[min,)`, `[,max)`,
    /// `[v]` (exactly `v`) or a bare version `v` (meaning `[v,)`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::malformed_range(s, "range is empty"));
        }

        let first = trimmed.chars().next().unwrap_or_default();
        if first != '[' && first != '(' {
            let version = trimmed
                .parse::<Version>()
                .map_err(|e| VersionError::malformed_range(s, e.to_string()))?;
            return Ok(Self::at_least(version));
        }

        let last = trimmed.chars().last().unwrap_or_default();
        if last != ']' && last != ')' {
            return Err(VersionError::malformed_range(
                s,
                "expected closing ']' or ')'",
            ));
        }
        if trimmed.len() < 2 {
            return Err(VersionError::malformed_range(s, "range has no body"));
        }

        let lower_inclusive = first == '[';
        let upper_inclusive = last == ']';
        let body = &trimmed[1..trimmed.len() - 1];

        let parse_side = |text: &str| -> Result<Option<Version>, VersionError> {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<Version>()
                    .map(Some)
                    .map_err(|e| VersionError::malformed_range(s, e.to_string()))
            }
        };

        let parts: Vec<&str> = body.split(',').collect();
        let range = match parts.as_slice() {
            [exact] => {
                if !(lower_inclusive && upper_inclusive) {
                    return Err(VersionError::malformed_range(
                        s,
                        "single-version range must use '[v]'",
                    ));
                }
                let version = parse_side(exact)?
                    .ok_or_else(|| VersionError::malformed_range(s, "range has no version"))?;
                Self::closed(version.clone(), version)
            }
            [lower, upper] => {
                let lower = parse_side(lower)?.map(|version| Bound {
                    version,
                    inclusive: lower_inclusive,
                });
                let upper = parse_side(upper)?.map(|version| Bound {
                    version,
                    inclusive: upper_inclusive,
                });
                Self { lower, upper }
            }
            _ => {
                return Err(VersionError::malformed_range(
                    s,
                    "expected at most one ',' separator",
                ))
            }
        };

        if range.is_empty() {
            return Err(VersionError::malformed_range(
                s,
                "lower bound is above upper bound",
            ));
        }
        Ok(range)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn r(s: &str) -> VersionRange {
        s.parse().unwrap()
    }

    #[test]
    fn range_half_open_excludes_max() {
        let range = r("[12.1.2,12.2.1)");
        assert!(range.contains(&v("12.1.2")));
        assert!(range.contains(&v("12.1.3.0.0")));
        assert!(!range.contains(&v("12.2.1")));
        assert!(!range.contains(&v("12.2.1.0")));
        assert!(!range.contains(&v("12.1.1")));
    }

    #[test]
    fn range_closed_includes_max() {
        let range = r("[12.2.1,12.2.1.4]");
        assert!(range.contains(&v("12.2.1.4")));
        assert!(range.contains(&v("12.2.1.4.0")));
        assert!(!range.contains(&v("12.2.1.4.1")));
    }

    #[test]
    fn range_unbounded_sides() {
        assert!(r("[10,)").contains(&v("14.1.2")));
        assert!(!r("[10,)").contains(&v("9.2")));
        assert!(r("[,12.2.1)").contains(&v("10.3.6")));
        assert!(!r("[,12.2.1)").contains(&v("12.2.1")));
    }

    #[test]
    fn range_exclusive_lower() {
        let range = r("(12.2.1,)");
        assert!(!range.contains(&v("12.2.1")));
        assert!(range.contains(&v("12.2.1.1")));
    }

    #[test]
    fn range_bare_version_is_floor() {
        let range = r("12.2.1.3");
        assert_eq!(range, VersionRange::at_least(v("12.2.1.3")));
    }

    #[test]
    fn range_exact_version() {
        let range = r("[12.2.1.3]");
        assert!(range.contains(&v("12.2.1.3.0")));
        assert!(!range.contains(&v("12.2.1.4")));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(matches!(
            "[14.1.1,12.2.1)".parse::<VersionRange>(),
            Err(VersionError::MalformedRange { .. })
        ));
        assert!(matches!(
            "[12.2.1,12.2.1)".parse::<VersionRange>(),
            Err(VersionError::MalformedRange { .. })
        ));
    }

    #[test]
    fn range_rejects_bad_syntax() {
        for bad in ["[12.2.1", "[1,2,3)", "(12.2.1)", "", "[abc,)"] {
            assert!(bad.parse::<VersionRange>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn range_overlap_detection() {
        assert!(r("[10,)").overlaps(&r("[12.2.1,)")));
        assert!(!r("[10,12.2.1)").overlaps(&r("[12.2.1,)")));
        assert!(r("[10,12.2.1]").overlaps(&r("[12.2.1,)")));
        assert!(!r("[10,12.2.1]").overlaps(&r("(12.2.1,)")));
        assert!(VersionRange::unbounded().overlaps(&r("[,10)")));
    }

    #[test]
    fn range_display_round_trip() {
        for text in ["[12.1.2,12.2.1)", "[12.2.1,12.2.1.4]", "[10,)", "[,12.2.1)", "(12,14]"] {
            assert_eq!(r(text).to_string(), text);
        }
    }
}
