use std::{error::Error, fmt::Display};

use crate::lexer::{Position, TokenKind};

/// An unexpected token during recursive-descent parsing. No error recovery is attempted: the
/// first error aborts parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub found: TokenKind,
    pub expected: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(found: TokenKind, expected: impl Into<String>, position: Position) -> Self {
        Self {
            found,
            expected: expected.into(),
            position,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, col) = self.position;
        write!(
            f,
            "parse error: unexpected {}, expected {} ({line}:{col})",
            self.found, self.expected
        )
    }
}

impl Error for ParseError {}
