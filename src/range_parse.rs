use crate::error::{ErrorKind, ParseError};
use crate::parse::VersionParser;
use crate::range::VersionRange;
use crate::stream::{Char, Lookahead};
use crate::version::{CoreVersion, Version};
use num_bigint::BigUint;
use num_traits::Zero;

/// A recursive-descent parser for version range strings.
///
/// The first character of the input selects one of four grammars, each of
/// which must consume the entire input:
///
/// ```text
/// range      := interval | comparison | caret | glob
/// interval   := ('[' | '(') version? ',' version? (']' | ')')
/// comparison := ('>' | '<') '='? version
/// caret      := '^' version
/// glob       := ('+' | '*') | digits '.' ('+' | digits '.' ('+' | digits))
/// ```
///
/// Versions embedded in an interval, comparison, or caret are handed to
/// [`VersionParser`] over the exact substring between delimiters; a failure
/// there is rebased into this string's coordinate space.
pub(crate) struct VersionRangeParser<'src> {
    input: Lookahead<'src>,
}

impl<'src> VersionRangeParser<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self {
            input: Lookahead::new(text),
        }
    }

    pub(crate) fn parse(mut self) -> Result<VersionRange, ParseError> {
        let current = self.input.current();

        if current.is_any(&['[', '(']) {
            self.parse_interval()
        } else if current.is_any(&['>', '<']) {
            self.parse_comparison()
        } else if current.is('^') {
            self.parse_caret()
        } else {
            self.parse_glob()
        }
    }

    fn parse_interval(&mut self) -> Result<VersionRange, ParseError> {
        let start_inclusive = self.input.consume().is('[');

        let mut start = None;
        if !self.input.current().is(',') {
            start = Some(self.consume_version_until(&[','])?);
        }
        self.consume_character(',')?;

        let end;
        let end_inclusive;
        if self.input.current().is_any(&[']', ')']) {
            end = None;
            end_inclusive = self.input.consume().is(']');
        } else {
            end = Some(self.consume_version_until(&[']', ')'])?);

            let next = self.input.consume();
            end_inclusive = match next.value() {
                ']' => true,
                ')' => false,
                _ => return Err(ParseError::new(ErrorKind::UnclosedRange, next.pos())),
            };
        }

        self.consume_end_of_input()?;
        Ok(VersionRange::new(start, start_inclusive, end, end_inclusive))
    }

    fn parse_comparison(&mut self) -> Result<VersionRange, ParseError> {
        let greater_than = self.input.consume().is('>');
        let inclusive = self.input.current().is('=');
        if inclusive {
            self.input.consume();
        }

        let version = self.consume_version_until(&[])?;
        self.consume_end_of_input()?;

        if greater_than {
            Ok(VersionRange::new(Some(version), inclusive, None, true))
        } else {
            Ok(VersionRange::new(None, true, Some(version), inclusive))
        }
    }

    fn parse_caret(&mut self) -> Result<VersionRange, ParseError> {
        self.consume_character('^')?;

        let lower = self.consume_version_until(&[])?;
        let upper = caret_upper_bound(&lower);

        self.consume_end_of_input()?;
        Ok(VersionRange::new(Some(lower), true, Some(upper), false))
    }

    fn parse_glob(&mut self) -> Result<VersionRange, ParseError> {
        let lower;
        let upper;

        if self.input.current().is_any(&['+', '*']) {
            self.input.consume();
            // a bare glob matches everything: unbounded on both sides rather
            // than anchored at 0.0.0, so pre-releases of 0.0.0 match too
            lower = None;
            upper = None;
        } else {
            let major = self.consume_number()?;
            self.consume_character('.')?;

            if self.input.current().is('+') {
                self.input.consume();
                lower = Some(plain_version(major.clone(), BigUint::zero(), BigUint::zero()));
                upper = Some(plain_version(major + 1u32, BigUint::zero(), BigUint::zero()));
            } else {
                let minor = self.consume_number()?;
                self.consume_character('.')?;

                if self.input.current().is('+') {
                    self.input.consume();
                    lower = Some(plain_version(major.clone(), minor.clone(), BigUint::zero()));
                    upper = Some(plain_version(major, minor + 1u32, BigUint::zero()));
                } else {
                    let patch = self.consume_number()?;
                    lower = Some(plain_version(major.clone(), minor.clone(), patch.clone()));
                    upper = Some(plain_version(major, minor, patch + 1u32));
                }
            }
        }

        self.consume_end_of_input()?;
        Ok(VersionRange::new(lower, true, upper, false))
    }

    /// Consumes characters up to (but not including) any of `stops`, or up to
    /// the end of input when `stops` is empty, and parses the collected
    /// substring as a version. A parse failure is rebased to the column at
    /// which the substring began.
    fn consume_version_until(&mut self, stops: &[char]) -> Result<Version, ParseError> {
        let start_pos = self.input.current().pos();
        let mut text = String::new();

        loop {
            text.push(self.consume_not_end_of_input()?.value());

            let current = self.input.current();
            let done = if stops.is_empty() {
                current.is_end_of_input()
            } else {
                current.is_any(stops)
            };
            if done {
                break;
            }
        }

        VersionParser::new(&text)
            .parse()
            .map_err(|inner| inner.rebase(start_pos))
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

    fn consume_not_end_of_input(&mut self) -> Result<Char, ParseError> {
        if self.input.current().is_end_of_input() {
            Err(ParseError::new(
                ErrorKind::UnexpectedEndOfInput,
                self.input.current().pos(),
            ))
        } else {
            Ok(self.input.consume())
        }
    }

    fn consume_end_of_input(&mut self) -> Result<(), ParseError> {
        if self.input.current().is_end_of_input() {
            self.input.consume();
            Ok(())
        } else {
            Err(ParseError::new(
                ErrorKind::TrailingCharacters,
                self.input.current().pos(),
            ))
        }
    }
}

/// The exclusive upper bound of a caret range: the first non-zero component
/// of (major, minor, patch) incremented by one, everything to its right reset
/// to zero. For `^0.0.0` the patch is incremented.
fn caret_upper_bound(lower: &Version) -> Version {
    if !lower.major().is_zero() {
        plain_version(lower.major().clone() + 1u32, BigUint::zero(), BigUint::zero())
    } else if !lower.minor().is_zero() {
        plain_version(BigUint::zero(), lower.minor().clone() + 1u32, BigUint::zero())
    } else {
        plain_version(BigUint::zero(), BigUint::zero(), lower.patch().clone() + 1u32)
    }
}

fn plain_version(major: BigUint, minor: BigUint, patch: BigUint) -> Version {
    Version::from(CoreVersion::new(major, minor, patch))
}
