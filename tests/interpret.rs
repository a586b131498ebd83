//! Interpreter integration tests
//!
//! Drives the full pipeline: source → lex → parse → execute, one statement
//! at a time against one shared environment, the way the CLI driver does.

use pretty_assertions::assert_eq;
use strand::diagnostics::RuntimeError;
use strand::interp::Interpreter;
use strand::lexer::lex;
use strand::parser::Parser;

/// Run a program, returning the captured output of each print statement
fn run_program(source: &str) -> Result<Vec<String>, RuntimeError> {
    let tokens = lex(source).expect("lex failed");
    let mut parser = Parser::new(&tokens);
    let mut interp = Interpreter::new();
    while let Some(stmt) = parser.next_stmt().expect("parse failed") {
        interp.execute(&stmt)?;
    }
    Ok(interp.output().to_vec())
}

/// Run a program and concatenate its output, as it would appear on stdout
fn output_of(source: &str) -> String {
    run_program(source).expect("program failed").concat()
}

fn error_of(source: &str) -> RuntimeError {
    run_program(source).expect_err("program should fail")
}

// ==================== Arithmetic ====================

#[test]
fn test_arithmetic() {
    assert_eq!(output_of("print 10 + 32;"), "42");
    assert_eq!(output_of("print 50 - 8;"), "42");
    assert_eq!(output_of("print 6 * 7;"), "42");
    assert_eq!(output_of("print 84 / 2;"), "42");
}

#[test]
fn test_negative_results() {
    assert_eq!(output_of("print 0 - 5;"), "-5");
}

#[test]
fn test_division_truncates() {
    assert_eq!(output_of("print 7 / 2;"), "3");
    assert_eq!(output_of("print (0 - 7) / 2;"), "-3");
}

#[test]
fn test_division_by_zero_is_fatal() {
    assert!(matches!(
        error_of("print 1 / 0;"),
        RuntimeError::DivideByZero { .. }
    ));
}

#[test]
fn test_arithmetic_on_sequence_is_type_mismatch() {
    assert!(matches!(
        error_of("print [1] + 1;"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        error_of("print 1 * [2, 3];"),
        RuntimeError::TypeMismatch { .. }
    ));
}

// ==================== Variables ====================

#[test]
fn test_uninitialized_variable_is_zero() {
    assert_eq!(output_of("print q;"), "0");
}

#[test]
fn test_assignment_and_lookup() {
    assert_eq!(output_of("x = 40; y = 2; print x + y;"), "42");
}

#[test]
fn test_reassignment_overwrites() {
    assert_eq!(output_of("x = [1, 2]; x = 5; print x;"), "5");
}

// ==================== Logic ====================

#[test]
fn test_and_or_results_not_normalized() {
    assert_eq!(output_of("print 2 && 3;"), "3");
    assert_eq!(output_of("print 0 && 3;"), "0");
    assert_eq!(output_of("print 2 || 3;"), "2");
    assert_eq!(output_of("print 0 || 5;"), "5");
}

#[test]
fn test_and_short_circuits() {
    // The division by zero on the right must never be evaluated.
    assert_eq!(output_of("print 0 && 1 / 0;"), "0");
}

#[test]
fn test_or_short_circuits() {
    assert_eq!(output_of("print 1 || 1 / 0;"), "1");
}

#[test]
fn test_logic_on_sequence_is_type_mismatch() {
    assert!(matches!(
        error_of("print [1] && 1;"),
        RuntimeError::TypeMismatch { .. }
    ));
}

// ==================== Comparison ====================

#[test]
fn test_less_on_ints() {
    assert_eq!(output_of("print 1 < 2;"), "1");
    assert_eq!(output_of("print 2 < 1;"), "0");
    assert_eq!(output_of("print 2 < 2;"), "0");
}

#[test]
fn test_less_on_sequences_is_lexicographic() {
    assert_eq!(output_of("print [1, 2, 3] < [1, 3, 0];"), "1");
    assert_eq!(output_of("print [2] < [1, 9];"), "0");
}

#[test]
fn test_less_prefix_sequence_is_less() {
    assert_eq!(output_of("print [1, 2] < [1, 2, 0];"), "1");
    assert_eq!(output_of("print [1, 2, 0] < [1, 2];"), "0");
}

#[test]
fn test_less_equal_sequences_false_both_ways() {
    assert_eq!(output_of("print [1, 2] < [1, 2];"), "0");
    assert_eq!(output_of("a = [7]; print a < a;"), "0");
}

#[test]
fn test_less_mixed_kinds_is_type_mismatch() {
    assert!(matches!(
        error_of("print [1] < 1;"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_equals_on_ints() {
    assert_eq!(output_of("print 42 == 42;"), "1");
    assert_eq!(output_of("print 42 == 41;"), "0");
}

#[test]
fn test_equals_on_sequences_is_deep() {
    assert_eq!(output_of("print [1, 2] == [1, 2];"), "1");
    assert_eq!(output_of("print [1, 2] == [1, 3];"), "0");
    assert_eq!(output_of("print [1, 2] == [1, 2, 3];"), "0");
}

#[test]
fn test_equals_mixed_kinds_is_false_not_error() {
    assert_eq!(output_of("print [1] == 1;"), "0");
    assert_eq!(output_of("print 1 == [1];"), "0");
    assert_eq!(output_of("print [] == 0;"), "0");
}

// ==================== Sequences ====================

#[test]
fn test_push_len_index() {
    let source = "
        x = [];
        push(x, 1);
        push(x, 2);
        push(x, 3);
        print len(x);
        print x[0];
        print x[1];
        print x[2];
    ";
    assert_eq!(output_of(source), "3123");
}

#[test]
fn test_index_out_of_bounds_is_fatal() {
    let err = error_of("x = [1, 2, 3]; print x[3];");
    assert!(matches!(
        err,
        RuntimeError::IndexOutOfBounds { index: 3, len: 3, .. }
    ));
}

#[test]
fn test_negative_index_is_fatal() {
    assert!(matches!(
        error_of("x = [1]; print x[0 - 1];"),
        RuntimeError::IndexOutOfBounds { index: -1, .. }
    ));
}

#[test]
fn test_len_scenario() {
    let source = "x = [1, 2, 3]; print len(x); push(x, 4); print len(x);";
    let output = run_program(source).unwrap();
    assert_eq!(output, vec!["3", "4"]);
    assert_eq!(output.concat(), "34");
}

#[test]
fn test_len_of_int_is_type_mismatch() {
    assert!(matches!(
        error_of("print len(5);"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_index_of_int_is_type_mismatch() {
    assert!(matches!(
        error_of("print 5[0];"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_push_to_int_is_type_mismatch() {
    assert!(matches!(
        error_of("x = 1; push(x, 2);"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_push_sequence_value_is_type_mismatch() {
    assert!(matches!(
        error_of("x = []; push(x, [1]);"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_sequence_initializer_elements_must_be_ints() {
    assert!(matches!(
        error_of("x = [[1]];"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_index_into_literal() {
    assert_eq!(output_of("print [10, 20, 30][1];"), "20");
}

// ==================== Aliasing ====================

#[test]
fn test_push_through_alias_grows_both() {
    let source = "a = [1]; b = a; push(b, 5); print len(a); print a[1];";
    assert_eq!(output_of(source), "25");
}

#[test]
fn test_element_write_through_alias_is_shared() {
    let source = "a = [1, 2]; b = a; b[0] = 9; print a[0];";
    assert_eq!(output_of(source), "9");
}

#[test]
fn test_environment_drop_releases_each_binding_once() {
    let interp = strand::run("a = [1, 2]; b = a;").unwrap();
    let value = interp.env().lookup("a");
    let seq = value.as_seq().unwrap().clone();
    drop(value);
    // Two bindings plus our local handle.
    assert_eq!(seq.ref_count(), 3);
    drop(interp);
    assert_eq!(seq.ref_count(), 1);
    assert_eq!(seq.to_vec(), vec![1, 2]);
}

// ==================== Print ====================

#[test]
fn test_print_sequence_as_character_codes() {
    assert_eq!(output_of("print [72, 105];"), "Hi");
}

#[test]
fn test_print_character_codes_no_separator() {
    let source = "s = [104, 101, 108, 108, 111]; print s; print 33;";
    assert_eq!(output_of(source), "hello33");
}

// ==================== Control flow ====================

#[test]
fn test_if_true_executes_body() {
    assert_eq!(output_of("if (0 < 1) print 1;"), "1");
}

#[test]
fn test_if_false_is_silent() {
    let output = run_program("if (1 < 0) print 1;").unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_if_condition_must_be_int() {
    assert!(matches!(
        error_of("if ([1]) print 1;"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_while_counts() {
    let source = "i = 2; while (0 < i + 1) { print i; i = i - 1; }";
    assert_eq!(output_of(source), "210");
}

#[test]
fn test_while_condition_must_be_int() {
    assert!(matches!(
        error_of("x = [1]; while (x) print 1;"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_compound_executes_in_order() {
    assert_eq!(output_of("{ print 1; print 2; print 3; }"), "123");
}

#[test]
fn test_nested_while_mutation_through_alias_converges() {
    // The inner loop writes through an alias taken each outer pass; the
    // final contents must be those of the last pass regardless of which
    // handle performed the writes.
    let source = "
        s = [0, 0, 0, 0];
        i = 0;
        while (i < 2) {
            t = s;
            j = 0;
            while (j < 4) {
                t[j] = i * 4 + j;
                j = j + 1;
            }
            i = i + 1;
        }
        print s[0]; print s[1]; print s[2]; print s[3];
    ";
    assert_eq!(output_of(source), "4567");
}

#[test]
fn test_fibonacci_program() {
    let source = "
        a = 0;
        b = 1;
        n = 0;
        while (n < 9) {
            print a;
            t = a + b;
            a = b;
            b = t;
            n = n + 1;
        }
    ";
    assert_eq!(output_of(source), "01123581321");
}

#[test]
fn test_build_and_sort_sequence() {
    // Insertion sort over a shared sequence, in-place.
    let source = "
        s = [5, 3, 4, 1, 2];
        i = 1;
        while (i < len(s)) {
            j = i;
            while (0 < j && s[j] < s[j - 1]) {
                t = s[j];
                s[j] = s[j - 1];
                s[j - 1] = t;
                j = j - 1;
            }
            i = i + 1;
        }
        print s[0]; print s[1]; print s[2]; print s[3]; print s[4];
    ";
    assert_eq!(output_of(source), "12345");
}
