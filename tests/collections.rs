//! Lists and dicts: composite literals, indexing, `amend`/`remove`, and reference semantics
//! for aliased composites.
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
fn list_remove_shifts_the_tail_left() {
    assert_eq!(
        run("a = [1, 2, 3]; remove a[0]; print a[0]; print a[1];"),
        vec!["2", "3"]
    );
}

#[test]
fn dict_literal_with_duplicate_keys_keeps_the_last_value() {
    assert_eq!(
        run(r#"d = {"k": 1, "k": 2}; print d["k"];"#),
        vec!["2"]
    );
}

#[test]
fn index_assign_can_create_a_new_dict_key() {
    assert_eq!(
        run(r#"d = {}; d["new"] = 7; print d["new"];"#),
        vec!["7"]
    );
}

#[test]
fn aliasing_a_list_through_assignment_shares_the_underlying_container() {
    // Lists have reference semantics: `b = a` aliases the same backing list.
    assert_eq!(
        run("a = [1]; b = a; amend b[0] to 9; print a[0];"),
        vec!["9"]
    );
}

#[test]
fn out_of_range_list_index_is_a_runtime_error() {
    let err = run_err("a = [1, 2]; print a[5];");
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn missing_dict_key_is_a_runtime_error() {
    let err = run_err(r#"d = {}; print d["missing"];"#);
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn removing_a_missing_key_is_a_runtime_error() {
    let err = run_err(r#"d = {}; remove d["missing"];"#);
    assert!(matches!(err, Error::Runtime(_)));
}
