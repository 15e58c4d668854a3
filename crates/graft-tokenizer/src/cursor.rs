use std::str::Chars;

use text_size::{TextLen as _, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    len: TextSize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), len: text.text_len() }
    }

    /// Bytes left to consume.
    pub(crate) fn len(&self) -> TextSize {
        self.chars.as_str().text_len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len();
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        !self.is_eof() && self.peek() == c
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
