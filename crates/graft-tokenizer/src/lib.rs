//! Splits source text into tokens with attached leading and trailing trivia.
//!
//! A token's trailing trivia runs up to and including the first line break;
//! everything after that line break belongs to the next token's leading trivia.

mod cursor;

use cursor::Cursor;
pub use graft_syntax::SyntaxKind;
use graft_syntax::SyntaxKind::*;
use graft_syntax::{GreenToken, GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };

    /// The token's text without trivia.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.kind_range]
    }

    pub fn to_green(&self, source: &str) -> GreenToken {
        GreenToken::with_trivia(
            self.leading.clone(),
            self.kind,
            self.text(source),
            self.trailing.clone(),
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TriviaPosition {
    Leading,
    Trailing,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Returns the current token and lexes the next one. Once the end of
    /// input is reached every call yields an `EOF` token.
    pub fn next_token(&mut self) -> Token {
        let leading = self.trivia(TriviaPosition::Leading);
        let (kind, kind_range) = self.syntax_kind();
        let trailing = if kind == EOF {
            GreenTrivia::empty()
        } else {
            self.trivia(TriviaPosition::Trailing)
        };

        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self, position: TriviaPosition) -> GreenTrivia {
        let start = self.offset();
        self.trivia_pieces.clear();

        while !self.cursor.is_eof() {
            let kind = match self.cursor.peek() {
                '\n' => {
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\r' => {
                    self.cursor.advance();
                    if self.cursor.matches('\n') {
                        self.cursor.advance();
                    }
                    TriviaPieceKind::Newline
                }
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| !is_line_break(c));
                    TriviaPieceKind::SingleLineComment
                }
                '/' if self.cursor.second() == '*' => {
                    self.block_comment();
                    TriviaPieceKind::MultiLineComment
                }
                '#' if position == TriviaPosition::Leading => {
                    self.cursor.advance_while(|c| !is_line_break(c));
                    TriviaPieceKind::Directive
                }
                c if c.is_whitespace() => {
                    self.cursor.advance_while(|c| c.is_whitespace() && !is_line_break(c));
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();

            if position == TriviaPosition::Trailing && kind == TriviaPieceKind::Newline {
                break;
            }
        }

        let range = TextRange::new(start, self.offset());
        GreenTrivia::new(&self.text[range], &self.trivia_pieces)
    }

    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_eof() {
            if self.cursor.peek() == '*' && self.cursor.second() == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            return (EOF, TextRange::empty(self.offset()));
        }

        let kind = match self.cursor.advance() {
            '(' => L_PAREN,
            ')' => R_PAREN,
            '[' => L_BRACKET,
            ']' => R_BRACKET,
            '{' => L_BRACE,
            '}' => R_BRACE,
            ':' => COLON,
            ';' => SEMICOLON,
            ',' => COMMA,
            '.' => DOT,
            '?' => QUESTION,
            '+' => PLUS,
            '-' => MINUS,
            '*' => STAR,
            '/' => SLASH,
            '<' => self.followed_by('=', LT_EQ, LT),
            '>' => self.followed_by('=', GT_EQ, GT),
            '!' => self.followed_by('=', BANG_EQ, BANG),
            '&' => self.followed_by('&', AMP_AMP, UNKNOWN),
            '|' => self.followed_by('|', PIPE_PIPE, UNKNOWN),
            '=' => {
                if self.cursor.matches('>') {
                    self.cursor.advance();
                    FAT_ARROW
                } else {
                    self.followed_by('=', EQ_EQ, EQ)
                }
            }
            '"' => self.string(),
            '@' if self.cursor.matches('"') => {
                self.cursor.advance();
                self.verbatim_string()
            }
            '0'..='9' => {
                self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
                INT_NUMBER
            }
            c if c == '_' || c.is_alphabetic() => {
                self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');
                SyntaxKind::from_keyword(self.text()).unwrap_or(NAME)
            }
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn followed_by(&mut self, next: char, joined: SyntaxKind, single: SyntaxKind) -> SyntaxKind {
        if self.cursor.matches(next) {
            self.cursor.advance();
            joined
        } else {
            single
        }
    }

    /// An unterminated literal stops at the end of the line.
    fn string(&mut self) -> SyntaxKind {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() && !is_line_break(self.cursor.peek()) {
                        self.cursor.advance();
                    }
                }
                c if is_line_break(c) => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        STRING
    }

    /// `@"..."` spans lines; `""` is an escaped quote.
    fn verbatim_string(&mut self) -> SyntaxKind {
        while !self.cursor.is_eof() {
            if self.cursor.advance() == '"' {
                if !self.cursor.matches('"') {
                    break;
                }
                self.cursor.advance();
            }
        }
        STRING
    }
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Tokenizes the whole input. The last token is always `EOF`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let done = token.kind == EOF;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
