/// The specific failure detected by a parser.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A digit was required but something else (or the end of input) was found.
    #[error("numeric identifier expected")]
    NumericExpected,

    /// A numeric identifier started with `0` followed by more digits.
    #[error("numeric identifier must not contain leading zeros")]
    LeadingZero,

    /// An identifier of `[0-9A-Za-z-]` was required but not found.
    #[error("alphanumeric identifier expected")]
    AlphanumericExpected,

    /// A dot inside build metadata was followed by another dot.
    #[error("alphanumeric identifier expected, but found period")]
    AlphanumericExpectedFoundDot,

    /// A dot inside build metadata was followed by the end of input.
    #[error("alphanumeric identifier expected, but found end of input")]
    AlphanumericExpectedFoundEndOfInput,

    /// A specific delimiter was required at this position.
    #[error("illegal character, expected '{expected}'")]
    ExpectedCharacter {
        /// The delimiter that was required.
        expected: char,
    },

    /// An interval was not closed by `]` or `)`.
    #[error("expected ']' or ')' to close the range")]
    UnclosedRange,

    /// The grammar was complete but input remained.
    #[error("illegal trailing character, end of input expected")]
    TrailingCharacters,

    /// The input ended in the middle of a required token.
    #[error("found end of input while parsing version range")]
    UnexpectedEndOfInput,
}

/// An error produced while parsing a version or version range.
///
/// Carries the zero-based column of the offending character. When a version
/// embedded in a range fails to parse, the inner error is retained as the
/// [source](std::error::Error::source) and the column is rebased into the
/// outer string's coordinate space.
///
/// [`annotate`](ParseError::annotate) renders the caret diagnostic suitable
/// for showing directly to a user:
///
/// ```
/// use rangever::Version;
///
/// let err = Version::parse("1.2.?").unwrap_err();
/// assert_eq!(4, err.position());
/// assert_eq!(
///     "numeric identifier expected\n1.2.?\n    ^",
///     err.annotate("1.2.?"),
/// );
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    kind: ErrorKind,
    pos: usize,
    #[source]
    source: Option<Box<ParseError>>,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, pos: usize) -> Self {
        Self {
            kind,
            pos,
            source: None,
        }
    }

    /// Shifts this error's column by `offset`, keeping the original error as
    /// the source. Used when a sub-parse over a substring fails and the column
    /// must be reported relative to the enclosing string.
    pub(crate) fn rebase(self, offset: usize) -> Self {
        Self {
            kind: self.kind.clone(),
            pos: self.pos + offset,
            source: Some(Box::new(self)),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The zero-based column of the offending character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Renders a three-line diagnostic: the message, the offending input, and
    /// a caret marker under the offending column.
    pub fn annotate(&self, input: &str) -> String {
        let mut rendered = format!("{self}\n{input}\n");
        for _ in 0..self.pos {
            rendered.push(' ');
        }
        rendered.push('^');
        rendered
    }
}
