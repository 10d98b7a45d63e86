//! Spring version ordering and compatibility ranges
//!
//! Spring Boot versions look like `3.2.0`, `3.2.0-M1`, `2.7.0.RELEASE` or
//! `3.0.0-BUILD-SNAPSHOT`. This module orders them the way Spring Initializr
//! does:
//! - A shallow numeric compare of the first three dotted fields
//! - A qualifier tie-break (`M` < `RC` < `BUILD-SNAPSHOT` < `RELEASE`)
//!
//! The numeric pass is deliberately naive. A field such as `"0-M1"` does not
//! parse as an integer and counts as `0`, so `3.0.0-M1` and `3.0.0` tie on
//! numbers and are told apart only by their qualifiers.

pub mod range;

use regex::Regex;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::LazyLock;

pub use range::{satisfies, VersionRange};

/// `MAJOR.(MINOR|x).(PATCH|x)` with an optional separator, qualifier name and number
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+|x)\.([0-9]+|x)(?:([.|-])([^0-9]+)([0-9]+)?)?$")
        .expect("version pattern is a valid regex")
});

/// Release maturity qualifier, in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    /// `M`
    Milestone,
    /// `RC`
    ReleaseCandidate,
    /// `BUILD-SNAPSHOT`
    BuildSnapshot,
    /// `RELEASE`, also used for absent or unknown qualifiers
    Release,
}

impl Qualifier {
    /// Every qualifier, lowest precedence first
    pub const ALL: [Qualifier; 4] = [
        Qualifier::Milestone,
        Qualifier::ReleaseCandidate,
        Qualifier::BuildSnapshot,
        Qualifier::Release,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Milestone => "M",
            Qualifier::ReleaseCandidate => "RC",
            Qualifier::BuildSnapshot => "BUILD-SNAPSHOT",
            Qualifier::Release => "RELEASE",
        }
    }

    /// Position in [`Qualifier::ALL`]
    pub fn rank(&self) -> i64 {
        *self as i64
    }

    /// Look up a qualifier by its exact name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == name)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the qualifier of a version string.
///
/// Returns [`Qualifier::Release`] when the string does not match the version
/// grammar or carries a qualifier outside the known vocabulary.
pub fn extract_qualifier(version: &str) -> Qualifier {
    VERSION_PATTERN
        .captures(version)
        .and_then(|caps| caps.get(5))
        .and_then(|name| Qualifier::from_name(name.as_str()))
        .unwrap_or(Qualifier::Release)
}

/// Compare two version strings.
///
/// Negative when `a < b`, zero when equal, positive when `a > b`. The value is
/// the difference of the first differing component (or of the qualifier
/// ranks), so only its sign is meaningful.
pub fn compare(a: &str, b: &str) -> i64 {
    let mut fields_a = a.split('.');
    let mut fields_b = b.split('.');

    for _ in 0..3 {
        let diff = numeric_field(fields_a.next()) - numeric_field(fields_b.next());
        if diff != 0 {
            return diff;
        }
    }

    extract_qualifier(a).rank() - extract_qualifier(b).rank()
}

/// Missing, wildcard and qualifier-contaminated fields all count as 0.
/// Out-of-range fields saturate at the `i32` bounds.
fn numeric_field(field: Option<&str>) -> i64 {
    let Some(field) = field else {
        return 0;
    };
    let value = match field.parse::<i32>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i32::MAX,
            IntErrorKind::NegOverflow => i32::MIN,
            _ => 0,
        },
    };
    i64::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare("2.7.3", "2.7.3"), 0);
        assert_eq!(compare("3.0.0-M1", "3.0.0-M1"), 0);
        assert_eq!(compare("3.1.0-BUILD-SNAPSHOT", "3.1.0-BUILD-SNAPSHOT"), 0);
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(compare("2.7.2", "2.7.3") < 0);
        assert!(compare("3.0.0", "2.9.9") > 0);
        assert!(compare("2.10.0", "2.9.0") > 0);
        assert!(compare("1.5.22", "2.0.0") < 0);
    }

    #[test]
    fn test_returns_component_difference() {
        assert_eq!(compare("5.0.0", "2.0.0"), 3);
        assert_eq!(compare("2.1.0", "2.4.0"), -3);
    }

    #[test]
    fn test_qualifier_tie_break() {
        assert!(compare("3.0.0-M1", "3.0.0-RC1") < 0);
        assert!(compare("3.0.0-RC1", "3.0.0-BUILD-SNAPSHOT") < 0);
        assert!(compare("3.0.0-BUILD-SNAPSHOT", "3.0.0") < 0);
        assert!(compare("3.0.0.RELEASE", "3.0.0.M2") > 0);
    }

    #[test]
    fn test_qualified_patch_ties_numerically_with_plain() {
        // "0-M1" is not an integer, so only the qualifier separates these
        assert_eq!(compare("3.0.0-RELEASE", "3.0.0"), 0);
        assert_eq!(compare("3.0.0-M1", "3.0.0"), -3);
        assert_eq!(compare("3.0.0", "3.0.0-RC2"), 2);
    }

    #[test]
    fn test_contaminated_field_counts_as_zero() {
        // "5-M1" fails to parse and is treated as 0, below the plain "1"
        assert!(compare("3.0.5-M1", "3.0.1") < 0);
    }

    #[test]
    fn test_overflowing_field_saturates() {
        assert!(compare("3000000000.0.0", "2.0.0") > 0);
        assert_eq!(compare("3000000000.0.0", "2147483647.0.0"), 0);
        assert!(compare("1.-3000000000.0", "1.0.0") < 0);
    }

    #[test]
    fn test_non_ascii_digits_are_not_versions() {
        assert_eq!(extract_qualifier("\u{663}.0.0-M1"), Qualifier::Release);
        assert_eq!(compare("\u{663}.0.0", "0.0.0"), 0);
    }

    #[test]
    fn test_qualifier_number_is_ignored() {
        assert_eq!(compare("3.0.0-M1", "3.0.0-M3"), 0);
        assert_eq!(compare("3.0.0-RC1", "3.0.0-RC2"), 0);
    }

    #[test]
    fn test_wildcard_and_missing_fields() {
        assert_eq!(compare("2.x.x", "2.0.0"), 0);
        assert_eq!(compare("2.7", "2.7.0"), 0);
        assert!(compare("2.7.x", "2.7.1") < 0);
        assert_eq!(compare("", "0.0.0"), 0);
    }

    #[test]
    fn test_antisymmetry() {
        let versions = [
            "2.7.3",
            "2.7.18",
            "3.0.0",
            "3.0.0-M1",
            "3.0.0-RC2",
            "3.0.0-BUILD-SNAPSHOT",
            "3.1.0.RELEASE",
            "3.2.x",
        ];
        for a in versions {
            assert_eq!(compare(a, a), 0, "{a} should equal itself");
            for b in versions {
                assert_eq!(
                    compare(a, b).signum(),
                    -compare(b, a).signum(),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_extract_qualifier() {
        assert_eq!(extract_qualifier("3.0.0-M1"), Qualifier::Milestone);
        assert_eq!(extract_qualifier("3.0.0.RC2"), Qualifier::ReleaseCandidate);
        assert_eq!(
            extract_qualifier("3.0.0-BUILD-SNAPSHOT"),
            Qualifier::BuildSnapshot
        );
        assert_eq!(extract_qualifier("2.7.0.RELEASE"), Qualifier::Release);
        assert_eq!(extract_qualifier("2.7.0"), Qualifier::Release);
        assert_eq!(extract_qualifier("2.x.x-M1"), Qualifier::Milestone);
    }

    #[test]
    fn test_unknown_qualifiers_rank_as_release() {
        assert_eq!(extract_qualifier("3.0.0-SNAPSHOT"), Qualifier::Release);
        assert_eq!(extract_qualifier("3.0.0-m1"), Qualifier::Release);
        assert_eq!(extract_qualifier("not a version"), Qualifier::Release);
        assert_eq!(extract_qualifier("3.0-M1"), Qualifier::Release);
        assert_eq!(compare("3.0.0-SNAPSHOT", "3.0.0"), 0);
    }

    #[test]
    fn test_qualifier_precedence() {
        let names: Vec<&str> = Qualifier::ALL.iter().map(Qualifier::as_str).collect();
        assert_eq!(names, ["M", "RC", "BUILD-SNAPSHOT", "RELEASE"]);
        assert!(Qualifier::Milestone < Qualifier::ReleaseCandidate);
        assert!(Qualifier::ReleaseCandidate < Qualifier::BuildSnapshot);
        assert!(Qualifier::BuildSnapshot < Qualifier::Release);
        assert_eq!(Qualifier::from_name("RC"), Some(Qualifier::ReleaseCandidate));
        assert_eq!(Qualifier::from_name("GA"), None);
    }
}
