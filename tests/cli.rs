//! Host wiring: the CLI binary's own responsibilities (extension check, file reading, exit
//! codes) that the library's own tests can't reach since they bypass `main` entirely. Grounded
//! on the teacher's `tests/fib.rs`, which shells out to the built binary.
use std::error::Error;

use test_utils::{check_failure, check_run, Expected};

const HELLO_PATH: &str = "./tests/fixtures/hello.mylang";
const SCENARIOS_PATH: &str = "./tests/fixtures/scenarios.mylang";
const PARSE_ERROR_PATH: &str = "./tests/fixtures/parse_error.mylang";
const BAD_EXTENSION_PATH: &str = "./tests/fixtures/bad_extension.txt";
const MISSING_PATH: &str = "./tests/fixtures/does_not_exist.mylang";

#[test]
fn run_hello_fixture() -> Result<(), Box<dyn Error>> {
    check_run(
        HELLO_PATH,
        Expected {
            stdout: "hello, world\n",
            stderr: "",
        },
    )
}

#[test]
fn run_scenarios_fixture_produces_expected_output() -> Result<(), Box<dyn Error>> {
    check_run(
        SCENARIOS_PATH,
        Expected {
            stdout: "7\nx=4\n25\n99\ntrue\n0\n1\n2\n",
            stderr: "",
        },
    )
}

#[test]
fn rejects_non_mylang_extension() -> Result<(), Box<dyn Error>> {
    check_failure(BAD_EXTENSION_PATH, "expected a '.mylang' file")
}

#[test]
fn rejects_missing_file() -> Result<(), Box<dyn Error>> {
    check_failure(MISSING_PATH, "could not read")
}

#[test]
fn surfaces_a_parse_error_with_a_non_zero_exit() -> Result<(), Box<dyn Error>> {
    check_failure(PARSE_ERROR_PATH, "parse error")
}
