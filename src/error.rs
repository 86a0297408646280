use std::fmt::{self, Display};

use crate::interpreter::RuntimeError;
use crate::lexer::LexError;
use crate::parser::ParseError;

/// The error kinds the interpreter distinguishes, each surfaced with its own prefix. `Host`
/// covers everything the CLI is responsible for rather than the core language: missing/
/// unreadable files, a wrong extension, a missing argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
    Host(String),
}

impl Error {
    pub fn host(message: impl Into<String>) -> Self {
        Error::Host(message.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(err) => write!(f, "{err}"),
            Error::Parse(err) => write!(f, "{err}"),
            Error::Runtime(err) => write!(f, "{err}"),
            Error::Host(message) => write!(f, "host error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}
