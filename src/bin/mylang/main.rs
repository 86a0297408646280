//! # mylang
//!
//! Binary entry point: parses CLI arguments, reads the source file, and runs it through the
//! interpreter. Everything here is host wiring — argument parsing, extension checking, file
//! reading, and exit codes — kept separate from the core language, which only ever sees a
//! source string and an `InterpreterIo`.
mod cli;

use std::fs;

use cli::Cli;
use log::{error, info};
use mylang::interpreter::Interpreter;
use mylang::io::StdIo;
use mylang::lexer::Lexer;
use mylang::parser::Parser;
use mylang::Error;

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Error> {
    if args.file.extension().and_then(|ext| ext.to_str()) != Some("mylang") {
        return Err(Error::host(format!(
            "expected a '.mylang' file, got '{}'",
            args.file.display()
        )));
    }

    info!("reading {}", args.file.display());
    let source = fs::read_to_string(&args.file)
        .map_err(|err| Error::host(format!("could not read '{}': {err}", args.file.display())))?;

    let tokens = Lexer::lex(&source)?;
    if args.dump_tokens {
        info!("tokens:\n{tokens:#?}");
    }

    let program = Parser::parse(tokens)?;
    if args.dump_ast {
        info!("AST:\n{program:#?}");
    }

    let mut io = StdIo;
    Interpreter::new(&mut io).run(&program)?;

    Ok(())
}
