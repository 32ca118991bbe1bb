//! The single structured error record shared by every lexer, parser, and the
//! evaluator.

use std::fmt;

/// A single diagnostic: a lexical, syntactic, semantic, or operational
/// failure tied to a subsystem and a source position.
///
/// `source` names the subsystem that raised the error (`"Lexer"`,
/// `"Parser"`, `"Query Lexer"`, `"Query"`, `"Evaluator"`, `"CLI"`). `line`
/// and `column` are 1-based; for single-line input (the query language)
/// `line` is always `1`. Two errors compare equal when every field matches;
/// this lets tests assert against literal `Error` values instead of
/// matching on rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub source: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub is_warning: bool,
}

impl Error {
    /// Construct an error (not a warning) at the given subsystem and position.
    pub fn new(source: impl Into<String>, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            line,
            column,
            is_warning: false,
        }
    }

    /// Construct a warning at the given subsystem and position.
    pub fn warning(source: impl Into<String>, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            line,
            column,
            is_warning: true,
        }
    }
}

impl fmt::Display for Error {
    /// Renders `Error:<source>:<line>:<column>: <message>`, except that
    /// errors from the `"Evaluator"` source omit their position, since a
    /// runtime condition has no meaningful lexical coordinate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error:")?;
        if self.source != "Evaluator" {
            write!(f, "{}:{}:{}:", self.source, self.line, self.column)?;
        }
        write!(f, " {}", self.message)
    }
}

/// `Diagnostic` is an alias for `Error` kept for the part of the codebase
/// (the CLI renderer) that talks about "diagnostics" rather than "errors",
/// since both terms name the same record.
pub type Diagnostic = Error;

/// Prints every diagnostic in `errors` to stderr, one per line, via
/// `Error`'s `Display` impl.
pub fn render_errors(errors: &[Error]) {
    for error in errors {
        eprintln!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_position_for_non_evaluator_sources() {
        let err = Error::new("Lexer", "Unexpected character 'x'", 3, 7);
        assert_eq!(err.to_string(), "Error:Lexer:3:7: Unexpected character 'x'");
    }

    #[test]
    fn renders_without_position_for_evaluator_source() {
        let err = Error::new("Evaluator", "Division by zero", 0, 0);
        assert_eq!(err.to_string(), "Error: Division by zero");
    }

    #[test]
    fn structural_equality_ignores_nothing() {
        let a = Error::new("Parser", "oops", 1, 2);
        let b = Error::new("Parser", "oops", 1, 2);
        let c = Error::new("Parser", "oops", 1, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn warning_flag_is_tracked_but_does_not_change_display() {
        let warn = Error::warning("Parser", "unused", 1, 1);
        assert!(warn.is_warning);
        assert_eq!(warn.to_string(), "Error:Parser:1:1: unused");
    }

    #[quickcheck_macros::quickcheck]
    fn display_always_contains_the_message(source: String, message: String, line: u32, column: u32) -> bool {
        let err = Error::new(source, message.clone(), line, column);
        err.to_string().contains(&message)
    }

    #[quickcheck_macros::quickcheck]
    fn non_evaluator_sources_always_render_their_position(message: String, line: u32, column: u32) -> bool {
        let err = Error::new("Lexer", message, line, column);
        err.to_string().contains(&format!("{line}:{column}"))
    }
}
