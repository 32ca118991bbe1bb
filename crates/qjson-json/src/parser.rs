//! Recursive-descent JSON parser.
//!
//! Consumes a borrowed token slice through a head index rather than an
//! owned cursor, so the parser never copies the token stream. Errors are
//! accumulated rather than raised immediately; the first unrecoverable
//! mismatch in a production stops that production and returns `None`, but
//! the error is still recorded.

use crate::token::{Token, TokenKind};
use crate::value::{JsonArray, JsonObject, JsonValue};
use qjson_util::Error;

const SOURCE: &str = "Parser";

pub struct Parser<'a> {
    tokens: &'a [Token],
    head: usize,
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, head: 0, errors: Vec::new() }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.head)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.head);
        if tok.is_some() {
            self.head += 1;
        }
        tok
    }

    /// Position to attach to an "unexpected end of input" error: the last
    /// token's position if any tokens were seen, else the start of input.
    fn eof_position(&self) -> (u32, u32) {
        match self.tokens.last() {
            Some(tok) => (tok.row, tok.col),
            None => (1, 1),
        }
    }

    fn unexpected(&mut self, expected: &str) {
        match self.peek() {
            Some(tok) => {
                let (row, col) = (tok.row, tok.col);
                self.errors.push(Error::new(
                    SOURCE,
                    format!("Unexpected token: Expected {expected}, instead found {}", tok.kind.describe()),
                    row,
                    col,
                ));
            }
            None => {
                let (row, col) = self.eof_position();
                self.errors.push(Error::new(
                    SOURCE,
                    format!("Unexpected token: Expected {expected}, instead found end of input"),
                    row,
                    col,
                ));
            }
        }
    }

    /// Parses the whole document. Returns the root value on success, or
    /// `None` with `errors()` populated on failure.
    pub fn parse(&mut self) -> Option<JsonValue> {
        self.parse_value()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn parse_value(&mut self) -> Option<JsonValue> {
        let Some(tok) = self.peek() else {
            self.unexpected("a value");
            return None;
        };
        match tok.kind.clone() {
            TokenKind::LBrace => self.parse_object().map(JsonValue::Object),
            TokenKind::LBracket => self.parse_array().map(JsonValue::Array),
            TokenKind::String(s) => {
                self.advance();
                Some(JsonValue::String(s))
            }
            TokenKind::Integer(n) => {
                self.advance();
                Some(JsonValue::Integer(n))
            }
            TokenKind::Double(d) => {
                self.advance();
                Some(JsonValue::Double(d))
            }
            TokenKind::True => {
                self.advance();
                Some(JsonValue::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Some(JsonValue::Bool(false))
            }
            TokenKind::Null => {
                self.advance();
                Some(JsonValue::Null)
            }
            _ => {
                self.unexpected("a value");
                None
            }
        }
    }

    fn parse_object(&mut self) -> Option<JsonObject> {
        self.advance(); // consume '{'
        let mut obj = JsonObject::default();

        if self.peek().is_none() {
            self.unexpected("a string key or '}'");
            return None;
        }
        if matches!(self.peek().unwrap().kind, TokenKind::RBrace) {
            self.advance();
            return Some(obj);
        }

        loop {
            let key = match self.peek() {
                Some(Token { kind: TokenKind::String(_), .. }) => {
                    let Token { kind: TokenKind::String(s), .. } = self.advance().unwrap().clone() else {
                        unreachable!()
                    };
                    s
                }
                _ => {
                    self.unexpected("a string key");
                    return None;
                }
            };

            match self.peek() {
                Some(Token { kind: TokenKind::Colon, .. }) => {
                    self.advance();
                }
                _ => {
                    self.unexpected("':'");
                    return None;
                }
            }

            let value = self.parse_value()?;
            obj.insert(key, value);

            match self.peek() {
                Some(Token { kind: TokenKind::RBrace, .. }) => {
                    self.advance();
                    return Some(obj);
                }
                Some(Token { kind: TokenKind::Comma, .. }) => {
                    self.advance();
                    continue;
                }
                _ => {
                    self.unexpected("',' or '}'");
                    return None;
                }
            }
        }
    }

    fn parse_array(&mut self) -> Option<JsonArray> {
        self.advance(); // consume '['
        let mut arr = JsonArray::new();

        if self.peek().is_none() {
            self.unexpected("a value or ']'");
            return None;
        }
        if matches!(self.peek().unwrap().kind, TokenKind::RBracket) {
            self.advance();
            return Some(arr);
        }

        loop {
            let value = self.parse_value()?;
            arr.push(value);

            match self.peek() {
                Some(Token { kind: TokenKind::RBracket, .. }) => {
                    self.advance();
                    return Some(arr);
                }
                Some(Token { kind: TokenKind::Comma, .. }) => {
                    self.advance();
                    continue;
                }
                _ => {
                    self.unexpected("',' or ']'");
                    return None;
                }
            }
        }
    }
}
