//! JSON lexing, parsing, and value representation.
//!
//! `Lexer` turns source bytes into a stream of [`token::Token`]s; `Parser`
//! turns a token slice into a [`value::JsonValue`] tree. Both accumulate
//! [`qjson_util::Error`]s rather than panicking on malformed input.

mod lexer;
mod parser;
mod token;
mod value;

pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};
pub use value::{JsonArray, JsonObject, JsonValue};

/// Lexes then parses `source` in one call. Returns the root value on
/// success, or the accumulated lexical/syntactic errors on failure.
pub fn parse_document(source: &str) -> Result<JsonValue, Vec<qjson_util::Error>> {
    let mut errors = Vec::new();
    let mut tokens = Vec::new();

    for result in Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut parser = Parser::new(&tokens);
    match parser.parse() {
        Some(value) if parser.errors().is_empty() => Ok(value),
        _ => Err(parser.into_errors()),
    }
}
