//! A handful of representative programs, run end-to-end through the public `mylang::run`
//! entry point against a `RecordingIo` double, rather than through unit tests on individual
//! interpreter methods.
use mylang::io::RecordingIo;

fn run(source: &str) -> Vec<String> {
    let mut io = RecordingIo::default();
    mylang::run(source, &mut io).unwrap();
    io.printed
}

#[test]
fn scenario_1_arithmetic_precedence() {
    assert_eq!(run("print 1 + 2 * 3;"), vec!["7"]);
}

#[test]
fn scenario_2_string_concat_normalizes_integer_float() {
    assert_eq!(run(r#"print "x=" + 4.0;"#), vec!["x=4"]);
}

#[test]
fn scenario_3_function_call() {
    assert_eq!(
        run("function f(x) { return x * x; } print f(5);"),
        vec!["25"]
    );
}

#[test]
fn scenario_4_amend_list_element() {
    assert_eq!(
        run("a = [10, 20, 30]; amend a[1] to 99; print a[1];"),
        vec!["99"]
    );
}

#[test]
fn scenario_5_dict_remove_and_structural_equality() {
    assert_eq!(
        run(r#"d = {"k": 1}; d["k"] = 2; remove d["k"]; print d == {};"#),
        vec!["true"]
    );
}

#[test]
fn scenario_6_while_loop_terminates() {
    assert_eq!(
        run("i = 0; while (i < 3) { print i; i = i + 1; }"),
        vec!["0", "1", "2"]
    );
}
