use std::{error::Error, fmt::Display};

use crate::lexer::Position;

/// Errors raised while walking the AST: undefined variable/function, bad operand type, division
/// by zero, index out of range, missing dict key.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
    pub position: Position,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn undefined_variable(name: &str, position: Position) -> Self {
        Self::new(format!("undefined variable '{name}'"), position)
    }

    pub fn undefined_function(name: &str, position: Position) -> Self {
        Self::new(format!("undefined function '{name}'"), position)
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, col) = self.position;
        write!(f, "runtime error: {} ({line}:{col})", self.message)
    }
}

impl Error for RuntimeError {}
