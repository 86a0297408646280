use std::{error::Error, fmt::Display};

use super::token::Position;

/// An unexpected character encountered while scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, col) = self.position;
        write!(f, "lexical error: {} ({line}:{col})", self.message)
    }
}

impl Error for LexError {}
