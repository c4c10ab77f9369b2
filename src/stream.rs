use std::collections::VecDeque;
use std::str::Chars;

/// A single character from the input along with its zero-based column.
///
/// A NUL value marks the end-of-input sentinel, which carries the position one
/// past the last real character. Predicates on the sentinel never match any
/// sought character, so parsers can probe for delimiters without checking for
/// the end of input first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Char {
    value: char,
    pos: usize,
}

impl Char {
    pub(crate) fn new(value: char, pos: usize) -> Self {
        Self { value, pos }
    }

    pub(crate) fn value(self) -> char {
        self.value
    }

    pub(crate) fn pos(self) -> usize {
        self.pos
    }

    /// True if this character equals `test`. Always false for the sentinel.
    pub(crate) fn is(self, test: char) -> bool {
        self.value == test && test != '\0'
    }

    pub(crate) fn is_any(self, tests: &[char]) -> bool {
        tests.iter().any(|&test| self.is(test))
    }

    pub(crate) fn is_digit(self) -> bool {
        self.value.is_ascii_digit()
    }

    pub(crate) fn is_letter(self) -> bool {
        self.value.is_ascii_alphabetic()
    }

    /// Letters, digits, and the hyphen, per the SemVer identifier alphabet.
    pub(crate) fn is_alphanumeric(self) -> bool {
        self.is_letter() || self.is_digit() || self.value == '-'
    }

    pub(crate) fn is_end_of_input(self) -> bool {
        self.value == '\0'
    }
}

/// A character stream with arbitrary-depth lookahead.
///
/// Characters fetched ahead of the current position are buffered until
/// consumed. Once the source is exhausted, every further read returns the
/// single cached end-of-input sentinel; consuming past the end is a no-op.
pub(crate) struct Lookahead<'src> {
    source: Chars<'src>,
    buffer: VecDeque<Char>,
    pos: usize,
    source_exhausted: bool,
    end_of_input: Option<Char>,
}

impl<'src> Lookahead<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self {
            source: text.chars(),
            buffer: VecDeque::new(),
            pos: 0,
            source_exhausted: false,
            end_of_input: None,
        }
    }

    /// The character at the current position, without consuming it.
    pub(crate) fn current(&mut self) -> Char {
        self.peek(0)
    }

    /// The character `offset` positions ahead of the current one, without
    /// consuming anything.
    pub(crate) fn peek(&mut self, offset: usize) -> Char {
        while self.buffer.len() <= offset && !self.source_exhausted {
            match self.fetch() {
                Some(item) => self.buffer.push_back(item),
                None => self.source_exhausted = true,
            }
        }

        match self.buffer.get(offset).copied() {
            Some(item) => item,
            None => self.end_of_input(),
        }
    }

    /// Returns the current character and advances past it.
    pub(crate) fn consume(&mut self) -> Char {
        let current = self.current();
        self.advance(1);
        current
    }

    /// Advances by up to `count` characters. Advancing past the end of the
    /// source is a no-op.
    pub(crate) fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.buffer.pop_front().is_some() {
                continue;
            }
            if self.source_exhausted || self.fetch().is_none() {
                self.source_exhausted = true;
                return;
            }
        }
    }

    fn fetch(&mut self) -> Option<Char> {
        let value = self.source.next()?;
        let item = Char::new(value, self.pos);
        self.pos += 1;
        Some(item)
    }

    fn end_of_input(&mut self) -> Char {
        let pos = self.pos;
        *self.end_of_input.get_or_insert_with(|| Char::new('\0', pos))
    }
}
