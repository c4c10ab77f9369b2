use crate::error::ParseError;
use crate::parse::VersionParser;
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};
use num_bigint::BigUint;

/// The `major.minor.patch` numeric triple of a version.
///
/// Components are arbitrary-precision and non-negative. Ordering is
/// lexicographic over `(major, minor, patch)` with numeric comparison at each
/// position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoreVersion {
    major: BigUint,
    minor: BigUint,
    patch: BigUint,
}

impl CoreVersion {
    /// Creates a core version from its three components.
    pub fn new(major: BigUint, minor: BigUint, patch: BigUint) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The major component.
    pub fn major(&self) -> &BigUint {
        &self.major
    }

    /// The minor component.
    pub fn minor(&self) -> &BigUint {
        &self.minor
    }

    /// The patch component.
    pub fn patch(&self) -> &BigUint {
        &self.patch
    }
}

impl Display for CoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A single dot-separated identifier within a pre-release.
///
/// Identifiers consisting only of digits are numeric and compare numerically;
/// all others compare by ASCII lexical order of their text. A numeric
/// identifier always sorts below an alphanumeric one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreReleaseIdentifier {
    /// An all-digit identifier, compared numerically. Its textual form never
    /// carries leading zeros; the parser rejects them.
    Numeric(BigUint),
    /// An identifier of `[0-9A-Za-z-]` containing at least one letter or
    /// hyphen, compared lexically.
    Alphanumeric(String),
}

impl Ord for PreReleaseIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        use PreReleaseIdentifier::*;
        match (self, other) {
            (Numeric(left), Numeric(right)) => left.cmp(right),
            (Numeric(_), Alphanumeric(_)) => Ordering::Less,
            (Alphanumeric(_), Numeric(_)) => Ordering::Greater,
            (Alphanumeric(left), Alphanumeric(right)) => left.cmp(right),
        }
    }
}

impl PartialOrd for PreReleaseIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for PreReleaseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseIdentifier::Numeric(value) => write!(f, "{value}"),
            PreReleaseIdentifier::Alphanumeric(value) => f.write_str(value),
        }
    }
}

/// The dot-separated pre-release identifiers of a version.
///
/// The empty sequence is the canonical "no pre-release" value and outranks
/// every non-empty sequence: a plain `1.0.0` has higher precedence than any
/// `1.0.0-…`. Two non-empty sequences compare identifier by identifier; when
/// one is a proper prefix of the other, the longer one is greater.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PreRelease {
    identifiers: Vec<PreReleaseIdentifier>,
}

impl PreRelease {
    /// Creates a pre-release from its identifiers, in order.
    pub fn new(identifiers: Vec<PreReleaseIdentifier>) -> Self {
        Self { identifiers }
    }

    /// The "no pre-release" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if this is the "no pre-release" value.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// The identifiers, in order.
    pub fn identifiers(&self) -> &[PreReleaseIdentifier] {
        &self.identifiers
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        // empty means "not a pre-release", which outranks every pre-release
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }

        for (left, right) in self.identifiers.iter().zip(&other.identifiers) {
            match left.cmp(right) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        // all shared identifiers equal: the longer sequence is greater
        self.identifiers.len().cmp(&other.identifiers.len())
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for PreRelease {
    /// The identifiers joined with dots, without the leading `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers = self.identifiers.iter();
        if let Some(first) = identifiers.next() {
            write!(f, "{first}")?;
        }
        for identifier in identifiers {
            write!(f, ".{identifier}")?;
        }
        Ok(())
    }
}

/// The build metadata of a version, carried for display only.
///
/// Never participates in precedence or range satisfaction. Two versions that
/// differ only in build metadata compare as equal in precedence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BuildMetadata {
    metadata: String,
}

impl BuildMetadata {
    /// Creates build metadata from its text, dots included.
    pub fn new(metadata: impl Into<String>) -> Self {
        Self {
            metadata: metadata.into(),
        }
    }

    /// The "no build metadata" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if this is the "no build metadata" value.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// The metadata text, without the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.metadata
    }
}

impl Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metadata)
    }
}

/// A parsed version: core triple, pre-release, and build metadata.
///
/// Versions are immutable once constructed and ordered by SemVer precedence.
///
/// # Examples
///
/// ```
/// use rangever::Version;
///
/// let alpha = Version::parse("1.0.0-alpha").unwrap();
/// let release = Version::parse("1.0.0").unwrap();
/// assert!(alpha < release);
/// assert_eq!("1.0.0-alpha", alpha.to_string());
/// ```
///
/// Build metadata is preserved for display but ignored for precedence:
///
/// ```
/// use rangever::Version;
/// use std::cmp::Ordering;
///
/// let a = Version::parse("1.0.0+alpha").unwrap();
/// let b = Version::parse("1.0.0+beta").unwrap();
/// assert_eq!(Ordering::Equal, a.cmp_precedence(&b));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    core: CoreVersion,
    pre_release: PreRelease,
    build_metadata: BuildMetadata,
}

impl Version {
    /// Assembles a version from already-built parts.
    pub fn new(
        core: CoreVersion,
        pre_release: PreRelease,
        build_metadata: BuildMetadata,
    ) -> Self {
        Self {
            core,
            pre_release,
            build_metadata,
        }
    }

    /// Parses a version string of the form
    /// `major.minor.patch[-preRelease][+buildMetadata]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the exact column of the offending
    /// character when the string is malformed: non-digits where a number is
    /// required, leading zeros in a numeric identifier, empty identifiers, or
    /// trailing characters after a complete version.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        VersionParser::new(text).parse()
    }

    /// The `major.minor.patch` triple.
    pub fn core(&self) -> &CoreVersion {
        &self.core
    }

    /// The major component.
    pub fn major(&self) -> &BigUint {
        self.core.major()
    }

    /// The minor component.
    pub fn minor(&self) -> &BigUint {
        self.core.minor()
    }

    /// The patch component.
    pub fn patch(&self) -> &BigUint {
        self.core.patch()
    }

    /// The pre-release identifiers, possibly empty.
    pub fn pre_release(&self) -> &PreRelease {
        &self.pre_release
    }

    /// The build metadata, possibly empty.
    pub fn build_metadata(&self) -> &BuildMetadata {
        &self.build_metadata
    }

    /// Compares two versions by SemVer precedence: the core triples first,
    /// then the pre-releases. Build metadata is ignored, so two versions that
    /// differ only in build metadata compare as equal here even though they
    /// are not `==`.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.core
            .cmp(&other.core)
            .then_with(|| self.pre_release.cmp(&other.pre_release))
    }
}

impl Ord for Version {
    /// Precedence order, with a final lexical build-metadata tie-break so that
    /// the total order stays consistent with `Eq`. Use
    /// [`cmp_precedence`](Version::cmp_precedence) for pure SemVer precedence.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_precedence(other)
            .then_with(|| self.build_metadata.as_str().cmp(other.build_metadata.as_str()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Version {
    /// Renders `major.minor.patch[-preRelease][+buildMetadata]`, the exact
    /// fixed point of parsing: formatting a parsed version reproduces the
    /// original valid input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl From<CoreVersion> for Version {
    /// A plain version with no pre-release and no build metadata.
    fn from(core: CoreVersion) -> Self {
        Version::new(core, PreRelease::empty(), BuildMetadata::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(major: u32, minor: u32, patch: u32) -> CoreVersion {
        CoreVersion::new(BigUint::from(major), BigUint::from(minor), BigUint::from(patch))
    }

    #[test]
    fn test_core_version_ordering() {
        let args = [
            ((0, 0, 0), (0, 0, 1), Ordering::Less),
            ((0, 0, 1), (0, 1, 0), Ordering::Less),
            ((0, 1, 0), (1, 0, 0), Ordering::Less),
            ((1, 0, 0), (1, 0, 0), Ordering::Equal),
            ((2, 0, 0), (1, 99, 99), Ordering::Greater),
            ((1, 10, 0), (1, 9, 0), Ordering::Greater),
        ];

        for ((am, an, ap), (bm, bn, bp), expected) in args {
            assert_eq!(
                expected,
                core(am, an, ap).cmp(&core(bm, bn, bp)),
                "{am}.{an}.{ap} vs {bm}.{bn}.{bp}"
            );
        }
    }

    #[test]
    fn test_identifier_ordering() {
        use PreReleaseIdentifier::*;

        let one = Numeric(BigUint::from(1u32));
        let two = Numeric(BigUint::from(2u32));
        let eleven = Numeric(BigUint::from(11u32));
        let alpha = Alphanumeric("alpha".to_owned());
        let beta = Alphanumeric("beta".to_owned());

        assert!(one < two);
        // numeric, not lexical: 2 < 11
        assert!(two < eleven);
        assert!(alpha < beta);
        // any numeric identifier sorts below any alphanumeric one
        assert!(eleven < alpha);
        assert!(alpha > one);
    }

    #[test]
    fn test_empty_pre_release_outranks_all() {
        let empty = PreRelease::empty();
        let alpha = PreRelease::new(vec![PreReleaseIdentifier::Alphanumeric("alpha".to_owned())]);

        assert_eq!(Ordering::Equal, empty.cmp(&PreRelease::empty()));
        assert_eq!(Ordering::Greater, empty.cmp(&alpha));
        assert_eq!(Ordering::Less, alpha.cmp(&empty));
    }

    #[test]
    fn test_prefix_pre_release_is_lesser() {
        let shorter = PreRelease::new(vec![PreReleaseIdentifier::Alphanumeric("alpha".to_owned())]);
        let longer = PreRelease::new(vec![
            PreReleaseIdentifier::Alphanumeric("alpha".to_owned()),
            PreReleaseIdentifier::Numeric(BigUint::from(1u32)),
        ]);

        assert!(shorter < longer);
        assert!(longer > shorter);
    }

    #[test]
    fn test_semver_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];

        for pair in chain.windows(2) {
            let lower = Version::parse(pair[0]).unwrap();
            let higher = Version::parse(pair[1]).unwrap();
            assert_eq!(
                Ordering::Less,
                lower.cmp_precedence(&higher),
                "{} should precede {}",
                pair[0],
                pair[1]
            );
            assert!(lower < higher);
        }
    }

    #[test]
    fn test_build_metadata_ignored_for_precedence() {
        let a = Version::parse("1.0.0+a").unwrap();
        let b = Version::parse("1.0.0+b").unwrap();
        assert_eq!(Ordering::Equal, a.cmp_precedence(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_ordering_is_antisymmetric() {
        let versions = [
            "0.0.0",
            "1.0.0-alpha",
            "1.0.0",
            "1.0.1",
            "2.0.0-rc.1",
            "2.0.0",
        ];

        for a in &versions {
            for b in &versions {
                let left = Version::parse(a).unwrap();
                let right = Version::parse(b).unwrap();
                assert_eq!(
                    left.cmp_precedence(&right),
                    right.cmp_precedence(&left).reverse(),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_display_round_trip() {
        let args = [
            "1.2.3",
            "0.0.4",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.2.3-SNAPSHOT-123",
            "1.1.2+meta-valid",
            "1.0.0-rc.1+build.1",
            "99999999999999999999999.999999999999999999.99999999999999999",
        ];

        for text in args {
            let version = Version::parse(text).unwrap();
            assert_eq!(text, version.to_string());
        }
    }

    #[test]
    fn test_from_core() {
        let version = Version::from(core(1, 2, 3));
        assert!(version.pre_release().is_empty());
        assert!(version.build_metadata().is_empty());
        assert_eq!("1.2.3", version.to_string());
    }

    #[test]
    fn test_accessors() {
        let version = Version::parse("1.2.3-alpha+build").unwrap();
        assert_eq!(&BigUint::from(1u32), version.major());
        assert_eq!(&BigUint::from(2u32), version.minor());
        assert_eq!(&BigUint::from(3u32), version.patch());
        assert_eq!("alpha", version.pre_release().to_string());
        assert_eq!("build", version.build_metadata().as_str());
    }
}
