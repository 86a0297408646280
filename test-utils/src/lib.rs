use std::{
    error::Error,
    io, str,
    process::{Command, Output},
};

const MYLANG_PATH: &str = "./target/debug/mylang";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_mylang(args: &[&str]) -> Result<Output, io::Error> {
    Command::new(MYLANG_PATH).args(args).output()
}

/// Runs a fixture `.mylang` file through the built binary and asserts its stdout/stderr.
pub fn check_run(src_path: &str, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_mylang(&[src_path])?;
    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "mylang exited with status {:?}",
        output.status.code()
    );
    Ok(())
}

/// Runs a fixture expected to fail (bad extension, parse error, ...) and asserts a non-zero
/// exit status plus a stderr message containing `expected_message`.
pub fn check_failure(src_path: &str, expected_message: &str) -> Result<(), Box<dyn Error>> {
    let output = run_mylang(&[src_path])?;
    assert!(
        !output.status.success(),
        "expected mylang to fail on {src_path}"
    );
    let stderr = str::from_utf8(&output.stderr)?;
    assert!(
        stderr.contains(expected_message),
        "expected stderr to contain '{expected_message}', got '{stderr}'"
    );
    Ok(())
}
