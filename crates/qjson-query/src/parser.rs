//! Recursive-descent, precedence-climbing parser for the query language.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expression := term
//! term       := factor (('+' | '-') factor)*
//! factor     := value (('*' | '/') factor)*       ; right-associative as implemented
//! value      := INTEGER
//!             | DOUBLE
//!             | '-' value
//!             | '(' expression ')'
//!             | IDENTIFIER ( '(' args ')' | path_tail )
//! args       := (expression (',' expression)*)?
//! path_tail  := ( '[' expression ']' )? ('.' IDENTIFIER path_tail)?
//! ```
//!
//! `factor` recurses into itself for the right-hand side rather than
//! looping, so `a/b/c` parses as `a/(b/c)`, right-associative rather than
//! the conventional left-associative reading. This mirrors the original
//! implementation exactly rather than "fixing" it.

use crate::ast::{ArithOp, Binary, Expression, Function, Path, Unary, Value};
use crate::token::{Token, TokenKind};
use qjson_util::Error;

const SOURCE: &str = "Query";

pub struct Parser {
    tokens: Vec<Token>,
    head: usize,
    errors: Vec<Error>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
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

    fn eof_col(&self) -> u32 {
        self.tokens.last().map(|t| t.col).unwrap_or(1)
    }

    fn unexpected(&mut self, expected: &str) {
        match self.peek() {
            Some(tok) => {
                let col = tok.col;
                self.errors.push(Error::new(
                    SOURCE,
                    format!("Unexpected token: Expected {expected}, instead found {}", tok.kind.describe()),
                    1,
                    col,
                ));
            }
            None => {
                let col = self.eof_col();
                self.errors.push(Error::new(
                    SOURCE,
                    format!("Unexpected token: Expected {expected}, instead found end of input"),
                    1,
                    col,
                ));
            }
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Parses a complete expression. Any token left over after a successful
    /// parse is itself an error.
    pub fn parse(&mut self) -> Option<Expression> {
        let expr = self.parse_expression()?;

        if let Some(tok) = self.peek() {
            let col = tok.col;
            self.errors.push(Error::new(SOURCE, format!("Unexpected token '{}'", tok.kind.describe()), 1, col));
            return None;
        }

        Some(expr)
    }

    fn parse_expression(&mut self) -> Option<Value> {
        self.parse_term()
    }

    fn parse_term(&mut self) -> Option<Value> {
        let mut lhs = self.parse_factor()?;

        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Plus) => ArithOp::Add,
                Some(TokenKind::Minus) => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Value::Binary(Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) });
        }

        Some(lhs)
    }

    /// Right-associative: recurses into itself for the right-hand side
    /// rather than looping, so `a/b/c` parses as `a/(b/c)`.
    fn parse_factor(&mut self) -> Option<Value> {
        let lhs = self.parse_value()?;

        let op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Star) => ArithOp::Mul,
            Some(TokenKind::Slash) => ArithOp::Div,
            _ => return Some(lhs),
        };
        self.advance();
        let rhs = self.parse_factor()?;
        Some(Value::Binary(Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }))
    }

    fn parse_value(&mut self) -> Option<Value> {
        let Some(tok) = self.peek() else {
            self.unexpected("a value");
            return None;
        };

        match tok.kind.clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Some(Value::Integer(n))
            }
            TokenKind::Double(d) => {
                self.advance();
                Some(Value::Double(d))
            }
            TokenKind::Minus => {
                self.advance();
                let inner = self.parse_value()?;
                Some(Value::Unary(Unary { value: Box::new(inner) }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                match self.peek() {
                    Some(Token { kind: TokenKind::RParen, .. }) => {
                        self.advance();
                        Some(inner)
                    }
                    _ => {
                        self.unexpected("')'");
                        None
                    }
                }
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
                    self.parse_call(name)
                } else {
                    self.parse_path(name).map(Value::Path)
                }
            }
            _ => {
                self.unexpected("a value");
                None
            }
        }
    }

    fn parse_call(&mut self, name: String) -> Option<Value> {
        self.advance(); // consume '('
        let mut arguments = Vec::new();

        if !matches!(self.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
            loop {
                arguments.push(self.parse_expression()?);
                match self.peek().map(|t| &t.kind) {
                    Some(TokenKind::Comma) => {
                        self.advance();
                        continue;
                    }
                    _ => break,
                }
            }
        }

        match self.peek() {
            Some(Token { kind: TokenKind::RParen, .. }) => {
                self.advance();
                Some(Value::Function(Function { name, arguments }))
            }
            _ => {
                self.unexpected("')'");
                None
            }
        }
    }

    fn parse_path(&mut self, id: String) -> Option<Path> {
        let subscript = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LBracket)) {
            self.advance();
            let index = self.parse_expression()?;
            match self.peek() {
                Some(Token { kind: TokenKind::RBracket, .. }) => {
                    self.advance();
                }
                _ => {
                    self.unexpected("']'");
                    return None;
                }
            }
            Some(Box::new(index))
        } else {
            None
        };

        let next = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Dot)) {
            self.advance();
            let next_id = match self.peek() {
                Some(Token { kind: TokenKind::Identifier(name), .. }) => {
                    let name = name.clone();
                    self.advance();
                    name
                }
                _ => {
                    self.unexpected("an identifier");
                    return None;
                }
            };
            Some(Box::new(self.parse_path(next_id)?))
        } else {
            None
        };

        Some(Path { id, subscript, next })
    }
}

/// Lexes then parses `source` in one call. Returns the expression on
/// success, or the accumulated lexical/syntactic errors on failure.
pub fn parse_expression(source: &str) -> Result<Expression, Vec<Error>> {
    let mut errors = Vec::new();
    let mut tokens = Vec::new();

    for result in crate::lexer::Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut parser = Parser::new(tokens);
    match parser.parse() {
        Some(expr) if parser.errors().is_empty() => Ok(expr),
        _ => Err(parser.into_errors()),
    }
}
