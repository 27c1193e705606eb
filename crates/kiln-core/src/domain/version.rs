//! Platform versions and version ranges.
//!
//! Versions follow the platform's release convention: a numeric triple with
//! an optional qualifier. Qualifiers order as
//! `M<n>` (milestone) < `RC<n>` (release candidate) < `SNAPSHOT` < final,
//! so every pre-release sorts strictly before the final release of the same
//! triple.
//!
//! A [`VersionRange`] is an interval with an inclusive or exclusive bound on
//! each side:
//!
//! ```text
//! [3.0.0,3.2.0-M1)   3.0.0 <= v < 3.2.0-M1
//! (3.0.0,3.2.0]      3.0.0 <  v <= 3.2.0
//! 3.2.0              v >= 3.2.0
//! ```
//!
//! Matching is pure and total for any parsed [`Version`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::DomainError;

// ── Qualifier ────────────────────────────────────────────────────────────────

/// Release qualifier. Variant order is significant: the derived `Ord`
/// compares the variant first, then the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qualifier {
    Milestone(u32),
    ReleaseCandidate(u32),
    Snapshot,
    Release,
}

impl Qualifier {
    fn parse(raw: &str) -> Result<Self, String> {
        let upper = raw.to_ascii_uppercase();
        match upper.as_str() {
            "" => Err("empty qualifier".into()),
            "RELEASE" | "FINAL" | "GA" => Ok(Self::Release),
            "SNAPSHOT" | "BUILD-SNAPSHOT" => Ok(Self::Snapshot),
            _ => {
                if let Some(n) = upper.strip_prefix("RC").or_else(|| upper.strip_prefix("CR")) {
                    return parse_sequence(n).map(Self::ReleaseCandidate);
                }
                if let Some(n) = upper.strip_prefix('M') {
                    return parse_sequence(n).map(Self::Milestone);
                }
                Err(format!("unknown qualifier '{raw}'"))
            }
        }
    }
}

fn parse_sequence(digits: &str) -> Result<u32, String> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("qualifier sequence '{digits}' is not a number"));
    }
    digits
        .parse()
        .map_err(|e| format!("qualifier sequence '{digits}': {e}"))
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Milestone(n) => write!(f, "-M{n}"),
            Self::ReleaseCandidate(n) => write!(f, "-RC{n}"),
            Self::Snapshot => f.write_str("-SNAPSHOT"),
            Self::Release => Ok(()),
        }
    }
}

// ── Version ──────────────────────────────────────────────────────────────────

/// A concrete platform version, e.g. `3.2.0`, `3.3.0-M2`, `3.1.5-SNAPSHOT`.
///
/// Field order matters: the derived `Ord` compares the numeric triple first,
/// then the qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    qualifier: Qualifier,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: Qualifier::Release,
        }
    }

    pub const fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Parse `MAJOR.MINOR[.PATCH]` with an optional qualifier separated by
    /// `-` or `.` (`3.2.0-M1`, `3.2.0.RC1`, `2.7.18.RELEASE`).
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let malformed = |reason: String| DomainError::MalformedVersion {
            input: input.to_string(),
            reason,
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(malformed("version is empty".into()));
        }

        let (numeric, qualifier) = split_qualifier(text);

        let parts: Vec<&str> = numeric.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(malformed(format!(
                "expected MAJOR.MINOR[.PATCH], found {} component(s)",
                parts.len()
            )));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed(format!("'{part}' is not a number")));
            }
            *slot = part
                .parse()
                .map_err(|e| malformed(format!("'{part}': {e}")))?;
        }

        let qualifier = match qualifier {
            Some(raw) => Qualifier::parse(raw).map_err(malformed)?,
            None => Qualifier::Release,
        };

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            qualifier,
        })
    }

    pub const fn major(&self) -> u32 {
        self.major
    }
    pub const fn minor(&self) -> u32 {
        self.minor
    }
    pub const fn patch(&self) -> u32 {
        self.patch
    }
    pub const fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    /// Milestones, release candidates, and snapshots.
    pub const fn is_prerelease(&self) -> bool {
        !matches!(self.qualifier, Qualifier::Release)
    }

    pub const fn is_snapshot(&self) -> bool {
        matches!(self.qualifier, Qualifier::Snapshot)
    }
}

/// Splits off the numeric prefix (at most three dot-separated digit
/// groups) and whatever follows one `-` or `.` separator:
/// `2.1.0.BUILD-SNAPSHOT` → (`2.1.0`, `BUILD-SNAPSHOT`).
///
/// Input that does not start with a digit group, or where the prefix is
/// followed by anything but a separator, is returned whole so the numeric
/// check reports it.
fn split_qualifier(text: &str) -> (&str, Option<&str>) {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut groups = 0;
    loop {
        let start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == start {
            return (text, None);
        }
        groups += 1;
        let next_is_group =
            bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit);
        if groups == 3 || !next_is_group {
            break;
        }
        end += 1;
    }

    match bytes.get(end) {
        None => (text, None),
        Some(b'-' | b'.') => (&text[..end], Some(&text[end + 1..])),
        Some(_) => (text, None),
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}",
            self.major, self.minor, self.patch, self.qualifier
        )
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ── VersionRange ─────────────────────────────────────────────────────────────

/// An interval over [`Version`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    lower: Version,
    lower_inclusive: bool,
    upper: Option<Version>,
    upper_inclusive: bool,
}

impl VersionRange {
    /// `v >= lower`.
    pub fn at_least(lower: Version) -> Self {
        Self {
            lower,
            lower_inclusive: true,
            upper: None,
            upper_inclusive: false,
        }
    }

    /// `lower <= v < upper`, the most common catalog shape.
    pub fn between(lower: Version, upper: Version) -> Result<Self, DomainError> {
        Self::bounded(lower, true, upper, false)
    }

    fn bounded(
        lower: Version,
        lower_inclusive: bool,
        upper: Version,
        upper_inclusive: bool,
    ) -> Result<Self, DomainError> {
        let range = Self {
            lower,
            lower_inclusive,
            upper: Some(upper),
            upper_inclusive,
        };
        range.check_non_empty()?;
        Ok(range)
    }

    /// Parse a range expression.
    ///
    /// # Errors
    ///
    /// [`DomainError::MalformedRange`] when the expression does not follow
    /// the interval grammar, a bound is not a version, or the interval is
    /// empty.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let malformed = |reason: String| DomainError::MalformedRange {
            input: input.to_string(),
            reason,
        };
        let bound = |raw: &str| {
            Version::parse(raw).map_err(|e| match e {
                DomainError::MalformedVersion { reason, .. } => {
                    malformed(format!("bound '{}': {}", raw.trim(), reason))
                }
                other => malformed(other.to_string()),
            })
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(malformed("range is empty".into()));
        }

        let lower_inclusive = match text.as_bytes()[0] {
            b'[' => true,
            b'(' => false,
            _ => {
                if text.contains(',') {
                    return Err(malformed("interval must start with '[' or '('".into()));
                }
                let single = text.strip_prefix(">=").unwrap_or(text);
                return Ok(Self::at_least(bound(single)?));
            }
        };

        let upper_inclusive = match text.as_bytes()[text.len() - 1] {
            b']' => true,
            b')' => false,
            _ => return Err(malformed("interval must end with ']' or ')'".into())),
        };

        let inner = &text[1..text.len() - 1];
        let bounds: Vec<&str> = inner.split(',').collect();
        if bounds.len() != 2 {
            return Err(malformed(format!(
                "expected two bounds separated by ',', found {}",
                bounds.len()
            )));
        }

        let range = Self {
            lower: bound(bounds[0])?,
            lower_inclusive,
            upper: Some(bound(bounds[1])?),
            upper_inclusive,
        };
        range.check_non_empty().map_err(|e| match e {
            DomainError::MalformedRange { reason, .. } => malformed(reason),
            other => other,
        })?;
        Ok(range)
    }

    fn check_non_empty(&self) -> Result<(), DomainError> {
        let Some(upper) = &self.upper else {
            return Ok(());
        };
        let empty = match self.lower.cmp(upper) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => !(self.lower_inclusive && self.upper_inclusive),
            std::cmp::Ordering::Less => false,
        };
        if empty {
            return Err(DomainError::MalformedRange {
                input: self.to_expression(),
                reason: "lower bound is above upper bound".into(),
            });
        }
        Ok(())
    }

    /// Whether `version` lies inside this range.
    pub fn matches(&self, version: &Version) -> bool {
        let above_lower = if self.lower_inclusive {
            version >= &self.lower
        } else {
            version > &self.lower
        };
        let below_upper = match &self.upper {
            None => true,
            Some(upper) if self.upper_inclusive => version <= upper,
            Some(upper) => version < upper,
        };
        above_lower && below_upper
    }

    pub fn lower(&self) -> &Version {
        &self.lower
    }

    pub fn upper(&self) -> Option<&Version> {
        self.upper.as_ref()
    }

    /// The canonical, re-parseable expression for this range.
    pub fn to_expression(&self) -> String {
        match &self.upper {
            None => self.lower.to_string(),
            Some(upper) => format!(
                "{}{},{}{}",
                if self.lower_inclusive { '[' } else { '(' },
                self.lower,
                upper,
                if self.upper_inclusive { ']' } else { ')' },
            ),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            None => write!(f, ">={}", self.lower),
            Some(_) => f.write_str(&self.to_expression()),
        }
    }
}

impl FromStr for VersionRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_expression())
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn range(s: &str) -> VersionRange {
        VersionRange::parse(s).unwrap()
    }

    // ── Version parsing ───────────────────────────────────────────────────

    #[test]
    fn parses_plain_triple() {
        let version = v("3.2.1");
        assert_eq!(
            (version.major(), version.minor(), version.patch()),
            (3, 2, 1)
        );
        assert_eq!(version.qualifier(), Qualifier::Release);
    }

    #[test]
    fn missing_patch_defaults_to_zero() {
        assert_eq!(v("3.2"), v("3.2.0"));
    }

    #[test]
    fn parses_dash_and_dot_qualifiers() {
        assert_eq!(v("3.2.0-M1").qualifier(), Qualifier::Milestone(1));
        assert_eq!(v("3.2.0.M1").qualifier(), Qualifier::Milestone(1));
        assert_eq!(v("3.2.0-RC2").qualifier(), Qualifier::ReleaseCandidate(2));
        assert_eq!(v("3.2.0-SNAPSHOT").qualifier(), Qualifier::Snapshot);
        assert_eq!(v("2.7.18.RELEASE").qualifier(), Qualifier::Release);
        assert_eq!(v("2.1.0.BUILD-SNAPSHOT").qualifier(), Qualifier::Snapshot);
    }

    #[test]
    fn qualifier_may_contain_a_dash() {
        let version = v("2.1.0.BUILD-SNAPSHOT");
        assert_eq!(
            (version.major(), version.minor(), version.patch()),
            (2, 1, 0)
        );
        assert!(version.is_snapshot());
        assert_eq!(v("3.2-M1"), v("3.2.0-M1"));
        assert_eq!(v("2.1.0.BUILD-SNAPSHOT"), v("2.1.0-SNAPSHOT"));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "3", "a.b.c", "3.2.0-", "3.2.0-alpha", "3..0", "1.2.3.4.5", "3.2x", "3.2.0.1"] {
            assert!(
                matches!(Version::parse(bad), Err(DomainError::MalformedVersion { .. })),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(v("3.2.0.M1").to_string(), "3.2.0-M1");
        assert_eq!(v("2.7.18.RELEASE").to_string(), "2.7.18");
        assert_eq!(v("3.3.0-rc1").to_string(), "3.3.0-RC1");
    }

    // ── Version ordering ──────────────────────────────────────────────────

    #[test]
    fn prereleases_sort_before_final() {
        let ordered = [
            "3.1.9",
            "3.2.0-M1",
            "3.2.0-M2",
            "3.2.0-RC1",
            "3.2.0-SNAPSHOT",
            "3.2.0",
            "3.2.1-M1",
            "3.10.0",
        ];
        for pair in ordered.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn numeric_components_compare_numerically() {
        assert!(v("3.10.0") > v("3.9.9"));
        assert!(v("10.0.0") > v("9.99.99"));
    }

    #[test]
    fn prerelease_flags() {
        assert!(v("3.2.0-M1").is_prerelease());
        assert!(v("3.2.0-SNAPSHOT").is_snapshot());
        assert!(!v("3.2.0").is_prerelease());
    }

    // ── Range parsing ─────────────────────────────────────────────────────

    #[test]
    fn single_version_means_at_least() {
        let r = range("3.2.0");
        assert!(r.upper().is_none());
        assert!(r.matches(&v("3.2.0")));
        assert!(r.matches(&v("4.0.0")));
        assert!(!r.matches(&v("3.2.0-RC1")));
    }

    #[test]
    fn inclusive_lower_exclusive_upper() {
        let r = range("[3.0.0,3.2.0-M1)");
        assert!(r.matches(&v("3.0.0")));
        assert!(r.matches(&v("3.1.12")));
        assert!(!r.matches(&v("3.2.0-M1")));
        assert!(!r.matches(&v("3.2.0")));
        assert!(!r.matches(&v("2.7.18")));
    }

    #[test]
    fn exclusive_lower_inclusive_upper() {
        let r = range("(3.0.0,3.2.0]");
        assert!(!r.matches(&v("3.0.0")));
        assert!(r.matches(&v("3.0.1")));
        assert!(r.matches(&v("3.2.0")));
        assert!(!r.matches(&v("3.2.1")));
    }

    #[test]
    fn milestone_below_final_lower_bound_is_excluded() {
        let r = range("[3.2.0,3.3.0)");
        assert!(!r.matches(&v("3.2.0-RC1")));
        assert!(r.matches(&v("3.3.0-M1")));
    }

    #[test]
    fn tolerates_whitespace() {
        assert_eq!(range(" [ 3.0.0 , 3.1.0 ) "), range("[3.0.0,3.1.0)"));
    }

    #[test]
    fn degenerate_inclusive_range_matches_one_version() {
        let r = range("[3.2.0,3.2.0]");
        assert!(r.matches(&v("3.2.0")));
        assert!(!r.matches(&v("3.2.1")));
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for bad in [
            "",
            "[3.0.0,3.1.0",
            "3.0.0,3.1.0)",
            "[3.0.0)",
            "[3.0.0,3.1.0,3.2.0)",
            "[3.1.0,3.0.0)",
            "[3.0.0,3.0.0)",
            "[x,3.0.0)",
            "{3.0.0,3.1.0}",
        ] {
            assert!(
                matches!(VersionRange::parse(bad), Err(DomainError::MalformedRange { .. })),
                "accepted: {bad:?}"
            );
        }
    }

    #[test]
    fn expression_round_trips() {
        for expr in ["[3.0.0,3.2.0-M1)", "(3.0.0,3.2.0]", "3.2.0"] {
            assert_eq!(range(expr).to_expression(), expr);
        }
        assert_eq!(range("3.2.0").to_string(), ">=3.2.0");
        assert_eq!(range(">=3.2.0"), range("3.2.0"));
    }

    #[test]
    fn matching_agrees_with_bound_comparison() {
        let candidates = [
            "2.7.0", "3.0.0-M1", "3.0.0", "3.1.5", "3.2.0-M1", "3.2.0-RC1", "3.2.0",
            "3.2.0-SNAPSHOT", "3.3.0",
        ];
        let lower = v("3.0.0");
        let upper = v("3.2.0");
        for (li, ui) in [(true, true), (true, false), (false, true), (false, false)] {
            let expr = format!(
                "{}{},{}{}",
                if li { '[' } else { '(' },
                lower,
                upper,
                if ui { ']' } else { ')' }
            );
            let r = range(&expr);
            for candidate in candidates {
                let c = v(candidate);
                let expected = (if li { c >= lower } else { c > lower })
                    && (if ui { c <= upper } else { c < upper });
                assert_eq!(r.matches(&c), expected, "{expr} vs {candidate}");
            }
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let r = range("[3.0.0,3.2.0-M1)");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"[3.0.0,3.2.0-M1)\"");
        let back: VersionRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
