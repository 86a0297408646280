//! Abstract I/O interface the evaluator is built against. Concrete stream wiring — actual
//! stdin/stdout, or a scripted double for tests — lives behind this trait so the evaluator
//! itself never touches a terminal directly.
use std::collections::VecDeque;
use std::io::{self, Write};

pub trait InterpreterIo {
    /// Emits one line terminated by the platform newline.
    fn print_line(&mut self, line: &str);

    /// Writes `prompt` without a trailing newline, then reads one line with the newline
    /// stripped.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Wires the evaluator to real standard streams, line-buffered.
#[derive(Default)]
pub struct StdIo;

impl InterpreterIo for StdIo {
    fn print_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// A scripted I/O double: captures every printed line and serves canned input lines in order.
/// Used by this crate's own tests and available to embedders who want to drive a program
/// without a terminal.
#[derive(Default)]
pub struct RecordingIo {
    pub printed: Vec<String>,
    pending_input: VecDeque<String>,
}

impl RecordingIo {
    pub fn with_input(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            printed: Vec::new(),
            pending_input: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InterpreterIo for RecordingIo {
    fn print_line(&mut self, line: &str) {
        self.printed.push(line.to_owned());
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.pending_input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted input"))
    }
}
