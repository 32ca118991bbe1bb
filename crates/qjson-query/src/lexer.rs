//! Single-line query lexer. Tracks a column counter only, since the query
//! language never spans multiple lines.

use crate::token::{Token, TokenKind};
use qjson_util::Error;

const SOURCE: &str = "Query Lexer";

fn is_alphabetic(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

fn is_numeric(c: u8) -> bool {
    c.is_ascii_digit()
}

pub struct Lexer<'a> {
    source: &'a [u8],
    position: usize,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), position: 0, column: 1 }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    fn current(&self) -> u8 {
        self.source[self.position]
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.position];
        self.position += 1;
        self.column += 1;
        c
    }

    fn trim_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.current(), b' ' | b'\t' | b'\r' | b'\n') {
            self.advance();
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let col = self.column;
        let start = self.position;
        while !self.is_at_end() && is_alphabetic(self.current()) {
            self.advance();
        }
        let name = std::str::from_utf8(&self.source[start..self.position]).unwrap().to_string();
        Token::new(TokenKind::Identifier(name), col)
    }

    fn lex_number(&mut self) -> Result<Token, Error> {
        let col = self.column;
        let start = self.position;
        while !self.is_at_end() && is_numeric(self.current()) {
            self.advance();
        }

        let mut is_double = false;
        if !self.is_at_end() && self.current() == b'.' {
            is_double = true;
            self.advance();
            while !self.is_at_end() && is_numeric(self.current()) {
                self.advance();
            }
        }

        let lexeme = std::str::from_utf8(&self.source[start..self.position]).unwrap();
        if is_double {
            let value: f64 = lexeme
                .parse()
                .map_err(|_| Error::new(SOURCE, format!("Invalid number literal '{lexeme}'"), 1, col))?;
            Ok(Token::new(TokenKind::Double(value), col))
        } else {
            let value: i64 = lexeme
                .parse()
                .map_err(|_| Error::new(SOURCE, format!("Invalid number literal '{lexeme}'"), 1, col))?;
            Ok(Token::new(TokenKind::Integer(value), col))
        }
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Result<Token, Error>> {
        self.trim_whitespace();

        if self.is_at_end() {
            return None;
        }

        let col = self.column;
        let c = self.current();

        if is_alphabetic(c) {
            return Some(Ok(self.lex_identifier()));
        }
        if is_numeric(c) {
            return Some(self.lex_number());
        }

        self.advance();
        let kind = match c {
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            other => {
                return Some(Err(Error::new(SOURCE, format!("Unexpected character '{}'", other as char), 1, col)));
            }
        };
        Some(Ok(Token::new(kind, col)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
