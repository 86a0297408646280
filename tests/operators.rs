//! Operator semantics: short-circuiting, structural equality, ordered comparisons, and the
//! dual `+` coercion law.
use mylang::io::RecordingIo;
use mylang::Error;

fn run(source: &str) -> Vec<String> {
    let mut io = RecordingIo::default();
    mylang::run(source, &mut io).unwrap();
    io.printed
}

fn run_err(source: &str) -> Error {
    let mut io = RecordingIo::default();
    mylang::run(source, &mut io).unwrap_err()
}

#[test]
fn and_or_yield_the_last_operand_evaluated_not_a_coerced_boolean() {
    assert_eq!(run(r#"print 0 or "fallback";"#), vec!["fallback"]);
    assert_eq!(run("print 3 and 4;"), vec!["4"]);
}

#[test]
fn structural_equality_never_equates_differing_types() {
    assert_eq!(run("print 1 == true;"), vec!["false"]);
    assert_eq!(run(r#"print "1" == 1;"#), vec!["false"]);
}

#[test]
fn ordered_comparison_works_on_strings_too() {
    assert_eq!(run(r#"print "abc" < "abd";"#), vec!["true"]);
}

#[test]
fn ordered_comparison_across_types_is_a_runtime_error() {
    let err = run_err(r#"print 1 < "a";"#);
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn string_coercion_law_for_integer_valued_floats() {
    // For any numeric `n` with integer value `k`, `"" + n` renders identically to `"" + k`.
    assert_eq!(run(r#"print "" + 4.0;"#), run(r#"print "" + 4;"#));
    assert_eq!(run(r#"print "" + 4.0;"#), vec!["4"]);
}

#[test]
fn unary_not_applies_truthiness_before_negating() {
    assert_eq!(run("print !0;"), vec!["true"]);
    assert_eq!(run(r#"print !"nonempty";"#), vec!["false"]);
}

#[test]
fn unary_minus_on_a_non_number_is_a_runtime_error() {
    let err = run_err("print -true;");
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let err = run_err("print 1 / 0;");
    assert!(matches!(err, Error::Runtime(_)));
}
