use crate::error::{ErrorKind, ParseError};
use crate::stream::Lookahead;
use crate::version::{BuildMetadata, CoreVersion, PreRelease, PreReleaseIdentifier, Version};
use num_bigint::BigUint;
use num_traits::Zero;

/// A single-pass recursive-descent parser for version strings.
///
/// Grammar:
///
/// ```text
/// version    := core ('-' prerelease)? ('+' buildmeta)?
/// core       := digits '.' digits '.' digits
/// digits     := '0' | [1-9][0-9]*
/// prerelease := prid ('.' prid)*
/// prid       := digits | [0-9A-Za-z-]+
/// buildmeta  := [0-9A-Za-z-]+ ('.' [0-9A-Za-z-]+)*
/// ```
///
/// A pre-release identifier is numeric only when no letter or hyphen appears
/// anywhere in its run of characters, decided by lookahead before committing.
/// Each parser owns one [`Lookahead`] over one input; construct a fresh parser
/// per parse.
pub(crate) struct VersionParser<'src> {
    input: Lookahead<'src>,
}

impl<'src> VersionParser<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self {
            input: Lookahead::new(text),
        }
    }

    pub(crate) fn parse(mut self) -> Result<Version, ParseError> {
        let core = self.parse_core_version()?;
        let mut pre_release = PreRelease::empty();
        let mut build_metadata = BuildMetadata::empty();

        let mut next = self.input.consume();

        if next.is('-') {
            pre_release = self.parse_pre_release()?;
            next = self.input.consume();
        }

        if next.is('+') {
            build_metadata = self.parse_build_metadata()?;
            next = self.input.consume();
        }

        if next.is_end_of_input() {
            Ok(Version::new(core, pre_release, build_metadata))
        } else {
            Err(ParseError::new(ErrorKind::TrailingCharacters, next.pos()))
        }
    }

    fn parse_core_version(&mut self) -> Result<CoreVersion, ParseError> {
        let major = self.consume_number()?;
        self.consume_character('.')?;
        let minor = self.consume_number()?;
        self.consume_character('.')?;
        let patch = self.consume_number()?;
        Ok(CoreVersion::new(major, minor, patch))
    }

    fn parse_pre_release(&mut self) -> Result<PreRelease, ParseError> {
        let mut identifiers = vec![self.parse_pre_release_identifier()?];

        while self.input.current().is('.') {
            self.input.consume();
            identifiers.push(self.parse_pre_release_identifier()?);
        }

        Ok(PreRelease::new(identifiers))
    }

    fn parse_pre_release_identifier(&mut self) -> Result<PreReleaseIdentifier, ParseError> {
        if self.lookahead_alphanumeric() {
            Ok(PreReleaseIdentifier::Alphanumeric(
                self.consume_alphanumeric()?,
            ))
        } else {
            Ok(PreReleaseIdentifier::Numeric(self.consume_number()?))
        }
    }

    fn parse_build_metadata(&mut self) -> Result<BuildMetadata, ParseError> {
        if !self.input.current().is_alphanumeric() {
            return Err(ParseError::new(
                ErrorKind::AlphanumericExpected,
                self.input.current().pos(),
            ));
        }

        let mut metadata = String::new();
        loop {
            let consumed = self.input.consume();
            if consumed.is('.') {
                if self.input.current().is('.') {
                    return Err(ParseError::new(
                        ErrorKind::AlphanumericExpectedFoundDot,
                        self.input.current().pos(),
                    ));
                }
                if self.input.current().is_end_of_input() {
                    return Err(ParseError::new(
                        ErrorKind::AlphanumericExpectedFoundEndOfInput,
                        self.input.current().pos(),
                    ));
                }
            }

            metadata.push(consumed.value());

            if !(self.input.current().is_alphanumeric() || self.input.current().is('.')) {
                break;
            }
        }

        Ok(BuildMetadata::new(metadata))
    }

    /// Scans ahead over the current run of `[0-9A-Za-z-]` and reports whether
    /// it contains a letter or hyphen, which makes the identifier
    /// alphanumeric rather than numeric. Nothing is consumed.
    fn lookahead_alphanumeric(&mut self) -> bool {
        let mut offset = 0;
        loop {
            let ahead = self.input.peek(offset);
            if ahead.is_letter() || ahead.is('-') {
                return true;
            }
            if !ahead.is_alphanumeric() {
                return false;
            }
            offset += 1;
        }
    }

    fn consume_alphanumeric(&mut self) -> Result<String, ParseError> {
        if !self.input.current().is_alphanumeric() {
            return Err(ParseError::new(
                ErrorKind::AlphanumericExpected,
                self.input.current().pos(),
            ));
        }

        let mut run = String::new();
        while self.input.current().is_alphanumeric() {
            run.push(self.input.consume().value());
        }
        Ok(run)
    }

    fn consume_number(&mut self) -> Result<BigUint, ParseError> {
        if !self.input.current().is_digit() {
            return Err(ParseError::new(
                ErrorKind::NumericExpected,
                self.input.current().pos(),
            ));
        }

        if self.input.current().is('0') && self.input.peek(1).is_digit() {
            return Err(ParseError::new(
                ErrorKind::LeadingZero,
                self.input.current().pos(),
            ));
        }

        let mut value = BigUint::zero();
        while self.input.current().is_digit() {
            let digit = self.input.consume().value() as u32 - '0' as u32;
            value = value * 10u32 + digit;
        }
        Ok(value)
    }

    fn consume_character(&mut self, expected: char) -> Result<(), ParseError> {
        if self.input.current().is(expected) {
            self.input.consume();
            Ok(())
        } else {
            Err(ParseError::new(
                ErrorKind::ExpectedCharacter { expected },
                self.input.current().pos(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.0.4")]
    #[case("1.0.0")]
    #[case("1.1.7")]
    #[case("1.2.3")]
    #[case("10.20.30")]
    #[case("2.0.0")]
    #[case("99999999999999999999999.999999999999999999.99999999999999999")]
    fn test_valid_core(#[case] text: &str) {
        let version = Version::parse(text).unwrap();
        assert_eq!(text, version.to_string());
        assert!(version.pre_release().is_empty());
        assert!(version.build_metadata().is_empty());
    }

    #[rstest]
    #[case("01.1.1")]
    #[case("1")]
    #[case("1.01.1")]
    #[case("1.1.01")]
    #[case("1.2")]
    #[case("1.2. 3")]
    #[case("1.2.3.DEV")]
    #[case("1.2.?")]
    #[case("1._.3")]
    #[case("[.2.3")]
    #[case("alpha")]
    #[case("alpha.beta")]
    #[case("alpha.beta.1")]
    #[case("v1.2.3")]
    #[case("")]
    fn test_invalid_core(#[case] text: &str) {
        assert!(Version::parse(text).is_err(), "{text:?} should not parse");
    }

    #[rstest]
    #[case("1.0.0-0A.is.legal")]
    #[case("1.0.0-alpha")]
    #[case("1.0.0-alpha.0valid")]
    #[case("1.0.0-alpha.1")]
    #[case("1.0.0-alpha.beta")]
    #[case("1.0.0-alpha.beta.1")]
    #[case("1.0.0-alpha0.valid")]
    #[case("1.0.0-beta")]
    #[case("1.2.3----RC-SNAPSHOT.12.9.1--.12")]
    #[case("1.2.3-SNAPSHOT-123")]
    #[case("10.2.3-DEV-SNAPSHOT")]
    #[case("2.0.1-alpha.1227")]
    fn test_valid_pre_release(#[case] text: &str) {
        let version = Version::parse(text).unwrap();
        assert_eq!(text, version.to_string());
        assert!(!version.pre_release().is_empty());
    }

    #[rstest]
    #[case("-alpha.")]
    #[case("-invalid")]
    #[case("1.0.0-alpha.")]
    #[case("1.0.0-alpha..")]
    #[case("1.0.0-alpha..1")]
    #[case("1.0.0-alpha...1")]
    #[case("1.0.0-alpha_beta")]
    #[case("1.2-SNAPSHOT")]
    #[case("1.2.3-0123")]
    #[case("1.2.3-0123.0123")]
    #[case("1.2.3-@")]
    #[case("1.2.3-be$ta")]
    #[case("1.2.3-rc!")]
    #[case("1.2.3-rc.")]
    #[case("1.2.3=alpha")]
    #[case("1.2.3~beta")]
    fn test_invalid_pre_release(#[case] text: &str) {
        assert!(Version::parse(text).is_err(), "{text:?} should not parse");
    }

    #[rstest]
    #[case("1.0.0+0.build.1-rc.10000aaa-kk-0.1")]
    #[case("1.1.2+meta")]
    #[case("1.1.2+meta-valid")]
    #[case("2.0.0+build.1848")]
    #[case("1.0.0-beta+exp.sha.5114f85")]
    fn test_valid_build_metadata(#[case] text: &str) {
        let version = Version::parse(text).unwrap();
        assert_eq!(text, version.to_string());
        assert!(!version.build_metadata().is_empty());
    }

    #[rstest]
    #[case("+invalid")]
    #[case("+justmeta")]
    #[case("1.0.0+")]
    #[case("1.0.0+.")]
    #[case("1.0.0+meta.")]
    #[case("1.0.0+meta..more")]
    #[case("1.0.0+meta_invalid")]
    #[case("1.0.0+meta+more")]
    fn test_invalid_build_metadata(#[case] text: &str) {
        assert!(Version::parse(text).is_err(), "{text:?} should not parse");
    }

    #[test]
    fn test_numeric_identifier_classification() {
        // all digits with no letter or hyphen in the run: numeric
        let version = Version::parse("1.0.0-11.2").unwrap();
        assert_eq!(
            &[
                PreReleaseIdentifier::Numeric(BigUint::from(11u32)),
                PreReleaseIdentifier::Numeric(BigUint::from(2u32)),
            ],
            version.pre_release().identifiers()
        );

        // a trailing letter makes the whole run alphanumeric, so the
        // leading-zero rule does not apply
        let version = Version::parse("1.2.3-0123abc").unwrap();
        assert_eq!(
            &[PreReleaseIdentifier::Alphanumeric("0123abc".to_owned())],
            version.pre_release().identifiers()
        );
    }

    #[test]
    fn test_leading_zero_positions() {
        let args = [
            ("01.1.1", 0),
            ("1.01.1", 2),
            ("1.1.01", 4),
            ("1.2.3-0123", 6),
        ];

        for (text, pos) in args {
            let err = Version::parse(text).unwrap_err();
            assert_eq!(&ErrorKind::LeadingZero, err.kind(), "{text}");
            assert_eq!(pos, err.position(), "{text}");
        }
    }

    #[test]
    fn test_error_positions() {
        let args = [
            ("1.2.?", ErrorKind::NumericExpected, 4),
            ("1.2", ErrorKind::ExpectedCharacter { expected: '.' }, 3),
            ("1.2.3.DEV", ErrorKind::TrailingCharacters, 5),
            ("1.2.3-", ErrorKind::NumericExpected, 6),
            ("1.0.0+", ErrorKind::AlphanumericExpected, 6),
            ("1.0.0+a..b", ErrorKind::AlphanumericExpectedFoundDot, 8),
            ("1.0.0+a.", ErrorKind::AlphanumericExpectedFoundEndOfInput, 8),
            ("", ErrorKind::NumericExpected, 0),
        ];

        for (text, kind, pos) in args {
            let err = Version::parse(text).unwrap_err();
            assert_eq!(&kind, err.kind(), "{text:?}");
            assert_eq!(pos, err.position(), "{text:?}");
        }
    }

    #[test]
    fn test_build_metadata_kept_verbatim() {
        let version = Version::parse("1.0.0+exp.sha.5114f85").unwrap();
        assert_eq!("exp.sha.5114f85", version.build_metadata().as_str());
    }

    #[test]
    fn test_huge_components() {
        let version = Version::parse("99999999999999999999999.1.2").unwrap();
        assert_eq!(
            "99999999999999999999999".parse::<BigUint>().unwrap(),
            *version.major()
        );
    }
}
