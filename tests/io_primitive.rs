//! The `input` primitive and `print` line framing, driven through a scripted `RecordingIo`
//! rather than a real terminal.
use mylang::io::RecordingIo;

#[test]
fn input_reads_one_line_per_call_in_program_order() {
    let source = r#"
        first = input("first: ");
        second = input("second: ");
        print first;
        print second;
    "#;
    let mut io = RecordingIo::with_input(["Ada", "Grace"]);
    mylang::run(source, &mut io).unwrap();
    assert_eq!(io.printed, vec!["Ada", "Grace"]);
}

#[test]
fn input_coerces_a_non_string_prompt() {
    let source = r#"name = input(42); print name;"#;
    let mut io = RecordingIo::with_input(["ok"]);
    mylang::run(source, &mut io).unwrap();
    assert_eq!(io.printed, vec!["ok"]);
}

#[test]
fn running_out_of_scripted_input_is_a_runtime_error() {
    let mut io = RecordingIo::default();
    let err = mylang::run(r#"print input("prompt: ");"#, &mut io).unwrap_err();
    assert!(matches!(err, mylang::Error::Runtime(_)));
}
