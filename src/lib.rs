//! `mylang`: lexer, parser and tree-walking evaluator for a small dynamically typed scripting
//! language. The CLI front end (`src/bin/mylang`) owns argument parsing, file I/O, and process
//! exit codes; this library only ever sees a source string and an `InterpreterIo`.
pub mod ast;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod lexer;
pub mod parser;

use ast::Program;
pub use error::Error;
use interpreter::{Interpreter, Value};
use io::InterpreterIo;
use lexer::Lexer;
use parser::Parser;

/// Lexes and parses `source` into a `Program`, without running it.
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = Lexer::lex(source)?;
    let program = Parser::parse(tokens)?;
    Ok(program)
}

/// Lexes, parses and evaluates `source` against `io`, returning the value of the last
/// top-level statement. A `return` at the top level terminates the program early with its
/// value, the same as it would inside a function call.
pub fn run(source: &str, io: &mut dyn InterpreterIo) -> Result<Value, Error> {
    let program = parse(source)?;
    let value = Interpreter::new(io).run(&program)?;
    Ok(value)
}
