//! Version range expressions such as `[2.7.0,3.0.0-M1)`

use super::compare;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Opening bracket, lower bound, comma, upper bound, closing bracket
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\(|\[)(.*),(.*)(\)|\])").expect("range pattern is a valid regex")
});

/// A parsed range expression
///
/// `[` and `]` mark inclusive bounds, `(` and `)` exclusive ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub lower: String,
    pub lower_inclusive: bool,
    pub upper: String,
    pub upper_inclusive: bool,
}

impl VersionRange {
    /// Parse a bracketed range expression.
    ///
    /// Returns `None` if the expression does not match the range grammar. The
    /// match is unanchored, so text around the brackets is tolerated.
    pub fn parse(expression: &str) -> Option<Self> {
        let caps = RANGE_PATTERN.captures(expression)?;

        Some(Self {
            lower_inclusive: &caps[1] == "[",
            lower: caps[2].to_string(),
            upper: caps[3].to_string(),
            upper_inclusive: &caps[4] == "]",
        })
    }

    /// Check whether `version` lies within this range
    pub fn contains(&self, version: &str) -> bool {
        // Bounds are always the left operand
        let lower = compare(&self.lower, version);
        let upper = compare(&self.upper, version);

        let above_lower = if self.lower_inclusive {
            lower <= 0
        } else {
            lower < 0
        };
        let below_upper = if self.upper_inclusive {
            upper >= 0
        } else {
            upper > 0
        };

        above_lower && below_upper
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{}{}",
            if self.lower_inclusive { '[' } else { '(' },
            self.lower,
            self.upper,
            if self.upper_inclusive { ']' } else { ')' }
        )
    }
}

/// Check whether `version` satisfies a range expression.
///
/// An empty expression places no constraint. A malformed one is never
/// satisfied.
pub fn satisfies(version: &str, expression: &str) -> bool {
    if expression.is_empty() {
        return true;
    }

    match VersionRange::parse(expression) {
        Some(range) => range.contains(version),
        None => {
            debug!(expression, "ignoring malformed version range");
            false
        }
    }
}
