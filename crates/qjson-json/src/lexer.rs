//! Byte-wise JSON lexer.
//!
//! Scans a UTF-8 source byte-by-byte except inside strings, where escape
//! sequences are decoded. Tracks `(line, column)`; column resets to 1 on
//! every `\n`.

use crate::token::{Token, TokenKind};
use qjson_util::Error;

const SOURCE: &str = "Lexer";

fn is_numeric(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_alphabetic(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Tokenizes a JSON source string on demand.
pub struct Lexer<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
            column: 1,
        }
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
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn trim_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn error(&self, line: u32, column: u32, message: impl Into<String>) -> Error {
        Error::new(SOURCE, message, line, column)
    }

    fn lex_keyword(&mut self) -> Result<Token, Error> {
        let row = self.line;
        let col = self.column;
        let start = self.position;
        while !self.is_at_end() && is_alphabetic(self.current()) {
            self.advance();
        }
        let lexeme = std::str::from_utf8(&self.source[start..self.position]).unwrap();
        let kind = match lexeme {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            other => {
                return Err(self.error(row, col, format!("Unexpected keyword '{other}'")));
            }
        };
        Ok(Token::new(kind, row, col))
    }

    fn lex_string(&mut self) -> Result<Token, Error> {
        let row = self.line;
        let col = self.column;
        self.advance(); // opening quote
        let mut bytes: Vec<u8> = Vec::new();

        loop {
            if self.is_at_end() {
                return Err(self.error(self.line, self.column, "Unterminated string"));
            }
            match self.current() {
                b'"' => {
                    self.advance();
                    break;
                }
                b'\\' => {
                    let esc_row = self.line;
                    let esc_col = self.column;
                    self.advance();
                    if self.is_at_end() {
                        return Err(self.error(esc_row, esc_col, "Unterminated string"));
                    }
                    match self.current() {
                        b'"' => {
                            bytes.push(b'"');
                            self.advance();
                        }
                        b'\\' => {
                            bytes.push(b'\\');
                            self.advance();
                        }
                        b'/' => {
                            bytes.push(b'/');
                            self.advance();
                        }
                        b'b' => {
                            bytes.push(0x08);
                            self.advance();
                        }
                        b'f' => {
                            bytes.push(0x0c);
                            self.advance();
                        }
                        b'n' => {
                            bytes.push(b'\n');
                            self.advance();
                        }
                        b'r' => {
                            bytes.push(b'\r');
                            self.advance();
                        }
                        b't' => {
                            bytes.push(b'\t');
                            self.advance();
                        }
                        b'u' => {
                            self.advance();
                            let mut digits = [0u8; 4];
                            for slot in digits.iter_mut() {
                                if self.is_at_end() || self.current() == b'"' {
                                    return Err(self.error(
                                        esc_row,
                                        esc_col,
                                        "Expected 4 hex digits after '\\u', found closing '\"'",
                                    ));
                                }
                                if !is_hex_digit(self.current()) {
                                    return Err(self.error(
                                        esc_row,
                                        esc_col,
                                        format!(
                                            "Expected 4 hex digits after '\\u', found '{}'",
                                            self.current() as char
                                        ),
                                    ));
                                }
                                *slot = self.current();
                                self.advance();
                            }
                            // Decoded byte-naively: the four hex digits become a raw
                            // character rather than a true Unicode code point decode
                            // (full Unicode decoding is a non-goal).
                            bytes.push(b'\\');
                            bytes.push(b'u');
                            bytes.extend_from_slice(&digits);
                        }
                        other => {
                            return Err(self.error(
                                esc_row,
                                esc_col,
                                format!("Unexpected escape sequence '\\{}'", other as char),
                            ));
                        }
                    }
                }
                _ => {
                    // Copy a whole run of plain bytes at once rather than one byte
                    // at a time, so a multi-byte UTF-8 character is never sliced
                    // mid-codepoint.
                    let start = self.position;
                    while !self.is_at_end() && !matches!(self.current(), b'"' | b'\\') {
                        self.advance();
                    }
                    bytes.extend_from_slice(&self.source[start..self.position]);
                }
            }
        }

        let value = String::from_utf8(bytes)
            .expect("string body is a concatenation of ASCII escapes and valid source UTF-8 runs");

        Ok(Token::new(TokenKind::String(value), row, col))
    }

    fn lex_number(&mut self) -> Result<Token, Error> {
        let row = self.line;
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

        let mantissa_end = self.position;

        if !self.is_at_end() && (self.current() == b'e' || self.current() == b'E') {
            is_double = true;
            self.advance();
            if !self.is_at_end() && (self.current() == b'+' || self.current() == b'-') {
                self.advance();
            }
            let exponent_digits_start = self.position;
            while !self.is_at_end() && is_numeric(self.current()) {
                self.advance();
            }
            if self.position == exponent_digits_start {
                return Err(self.error(row, col, "Invalid scientific notation"));
            }
        }

        let lexeme = std::str::from_utf8(&self.source[start..self.position]).unwrap();
        if is_double {
            let value: f64 = lexeme
                .parse()
                .map_err(|_| self.error(row, col, format!("Invalid number literal '{lexeme}'")))?;
            Ok(Token::new(TokenKind::Double(value), row, col))
        } else {
            let mantissa = std::str::from_utf8(&self.source[start..mantissa_end]).unwrap();
            let value: i64 = mantissa
                .parse()
                .map_err(|_| self.error(row, col, format!("Invalid number literal '{lexeme}'")))?;
            Ok(Token::new(TokenKind::Integer(value), row, col))
        }
    }

    /// Returns the next token, or `None` at end of input. A lexical error
    /// still advances the cursor past the offending byte, so callers may
    /// keep pulling tokens after one.
    pub fn next_token(&mut self) -> Option<Result<Token, Error>> {
        self.trim_whitespace();

        if self.is_at_end() {
            return None;
        }

        let row = self.line;
        let col = self.column;
        let c = self.current();

        if is_alphabetic(c) {
            return Some(self.lex_keyword());
        }
        if c == b'"' {
            return Some(self.lex_string());
        }
        if is_numeric(c) {
            return Some(self.lex_number());
        }

        self.advance();
        let kind = match c {
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            other => {
                return Some(Err(self.error(row, col, format!("Unexpected character '{}'", other as char))));
            }
        };
        Some(Ok(Token::new(kind, row, col)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
