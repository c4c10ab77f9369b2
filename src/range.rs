use crate::error::ParseError;
use crate::range_parse::VersionRangeParser;
use crate::version::Version;
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

/// An interval of versions with independently inclusive or exclusive bounds.
///
/// An absent bound means the range is unbounded on that side; the inclusive
/// flag for an absent bound carries no meaning for matching but is still
/// stored and echoed when the range is formatted.
///
/// All four surface syntaxes accepted by [`VersionRange::parse`] reduce to
/// this one representation:
///
/// ```
/// use rangever::VersionRange;
///
/// let range = VersionRange::parse("^1.2.3").unwrap();
/// assert_eq!("[1.2.3,2.0.0)", range.to_string());
///
/// let range = VersionRange::parse(">=4.5.6").unwrap();
/// assert_eq!("[4.5.6,]", range.to_string());
///
/// let range = VersionRange::parse("1.2.+").unwrap();
/// assert_eq!("[1.2.0,1.3.0)", range.to_string());
/// ```
///
/// Satisfaction compares only the `major.minor.patch` triple of the candidate,
/// so a pre-release of an in-range triple satisfies the range:
///
/// ```
/// use rangever::VersionRange;
///
/// let range = VersionRange::parse("[1.0.0,2.0.0)").unwrap();
/// assert!(range.is_satisfied_by_str("1.5.0-alpha").unwrap());
/// assert!(!range.is_satisfied_by_str("2.0.0").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    start: Option<Version>,
    start_inclusive: bool,
    end: Option<Version>,
    end_inclusive: bool,
}

impl VersionRange {
    /// Assembles a range from two optional bounds and their inclusive flags.
    pub fn new(
        start: Option<Version>,
        start_inclusive: bool,
        end: Option<Version>,
        end_inclusive: bool,
    ) -> Self {
        Self {
            start,
            start_inclusive,
            end,
            end_inclusive,
        }
    }

    /// Parses a range in any of the four supported syntaxes: a bracket
    /// interval such as `[1.0.0,2.0.0)`, a comparison such as `>=1.0.0`, a
    /// caret range such as `^1.2.3`, or a glob such as `1.2.+`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the exact column of the offending
    /// character. When a version embedded in the range is malformed, the
    /// error's column is rebased into this string's coordinate space and the
    /// inner error is kept as the source.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        VersionRangeParser::new(text).parse()
    }

    /// The lower bound, if any.
    pub fn start(&self) -> Option<&Version> {
        self.start.as_ref()
    }

    /// Whether the lower bound is inclusive.
    pub fn is_start_inclusive(&self) -> bool {
        self.start_inclusive
    }

    /// The upper bound, if any.
    pub fn end(&self) -> Option<&Version> {
        self.end.as_ref()
    }

    /// Whether the upper bound is inclusive.
    pub fn is_end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    /// True if `version` falls within this range.
    ///
    /// Only the core `major.minor.patch` triples are compared; the candidate's
    /// pre-release and build metadata are ignored.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        if let Some(start) = &self.start {
            let below_start = match start.core().cmp(version.core()) {
                Ordering::Greater => true,
                Ordering::Equal => !self.start_inclusive,
                Ordering::Less => false,
            };
            if below_start {
                return false;
            }
        }

        if let Some(end) = &self.end {
            return match end.core().cmp(version.core()) {
                Ordering::Less => false,
                Ordering::Equal => self.end_inclusive,
                Ordering::Greater => true,
            };
        }

        true
    }

    /// Parses `version` and tests it against this range.
    ///
    /// # Errors
    ///
    /// Propagates the [`ParseError`] if `version` is not a valid version
    /// string.
    pub fn is_satisfied_by_str(&self, version: &str) -> Result<bool, ParseError> {
        Ok(self.is_satisfied_by(&Version::parse(version)?))
    }
}

impl Display for VersionRange {
    /// Renders the canonical bracket form `{[|(}[start],[end]{]|)}`. The
    /// comparison, caret, and glob input syntaxes all normalize to this form;
    /// there is no round trip back to the original notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.start_inclusive { "[" } else { "(" })?;
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        f.write_str(",")?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?;
        }
        f.write_str(if self.end_inclusive { "]" } else { ")" })
    }
}

impl FromStr for VersionRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}
