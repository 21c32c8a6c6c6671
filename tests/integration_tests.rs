use tinyc::compile_source;
use tinyc::error::{CompileError, SemanticError};

/// Run the full pipeline on `source`, asserting it succeeds, and return the
/// generated IR text.
fn compile_ok(source: &str) -> String {
    let mut out = Vec::new();
    compile_source(source, "test.tc", &mut out, false).expect("compilation should succeed");
    String::from_utf8(out).expect("emitted IR should be valid UTF-8")
}

fn compile_err(source: &str) -> CompileError {
    let mut out = Vec::new();
    compile_source(source, "test.tc", &mut out, false).expect_err("compilation should fail")
}

#[test]
fn arithmetic_precedence_program_emits_print_and_return() {
    let ir = compile_ok("int main() { print 1 + 2 * 3; return 0; }");
    assert!(ir.contains("define i32 @main()"));
    assert!(ir.contains("mul nsw i32 2, 3"));
    assert!(ir.contains("add nsw i32 1,"));
    assert!(ir.contains("call i32(i8*, ...) @printf"));
    assert!(ir.contains("ret i32 0"));
}

#[test]
fn gcd_function_has_four_basic_blocks() {
    let source = "\
        int gcd(int a, int b) {
            while (b != 0) {
                int t;
                t = b;
                b = a % b;
                a = t;
            }
            return a;
        }
        int main() {
            print gcd(48, 18);
            return 0;
        }
    ";
    let ir = compile_ok(source);
    assert!(ir.contains("define i32 @gcd(i32 %0, i32 %1)"));
    // continue / body / break labels from the while loop, plus the
    // function's own entry label.
    let block_labels = ir.matches(".block.").count();
    assert!(block_labels >= 4, "expected at least 4 block labels, IR was:\n{ir}");
    assert!(ir.contains("srem i32"));
    assert!(ir.contains("call i32 @gcd("));
}

#[test]
fn functions_may_call_each_other_regardless_of_definition_order() {
    let source = "\
        int f(int n) {
            return n + 1;
        }
        int main() {
            print f(41);
            return 0;
        }
    ";
    let ir = compile_ok(source);
    let f_pos = ir.find("define i32 @f(").unwrap();
    let main_pos = ir.find("define i32 @main(").unwrap();
    let call_pos = ir.find("call i32 @f(").unwrap();
    assert!(f_pos < main_pos, "f must be emitted before main is");
    assert!(call_pos > main_pos, "the call site lives inside main's body");
}

#[test]
fn recursive_function_can_call_itself() {
    let source = "\
        int fact(int n) {
            if (n == 0) {
                return 1;
            }
            return n * fact(n - 1);
        }
        int main() {
            print fact(5);
            return 0;
        }
    ";
    let ir = compile_ok(source);
    assert!(ir.contains("call i32 @fact("));
}

#[test]
fn dangling_else_lowers_to_three_labels() {
    let source = "\
        int main() {
            int a;
            a = 0;
            if (1) if (0) a = 1; else a = 2;
            return a;
        }
    ";
    let ir = compile_ok(source);
    assert!(ir.matches("br i1").count() == 2, "one conditional branch per if");
}

#[test]
fn calling_an_undefined_function_is_a_semantic_error() {
    let err = compile_err("int main() { return unknown(); }");
    assert!(matches!(
        err,
        CompileError::Semantic(SemanticError::UndefinedGlobalFunction(name)) if name == "unknown"
    ));
}

#[test]
fn calling_a_function_with_the_wrong_arity_is_a_semantic_error() {
    let source = "\
        int add(int a, int b) {
            return a + b;
        }
        int main() {
            return add(1);
        }
    ";
    let err = compile_err(source);
    assert!(matches!(
        err,
        CompileError::Semantic(SemanticError::ArityMismatch { expected: 2, got: 1 })
    ));
}

#[test]
fn referencing_an_undeclared_local_is_a_semantic_error() {
    let err = compile_err("int main() { return missing; }");
    assert!(matches!(
        err,
        CompileError::Semantic(SemanticError::UndefinedLocalSymbol(name)) if name == "missing"
    ));
}

#[test]
fn a_malformed_program_is_a_parse_error() {
    let err = compile_err("int main() { return 0 }");
    assert!(matches!(err, CompileError::Parse(_)));
}

#[test]
fn an_unexpected_character_is_a_scan_error() {
    let err = compile_err("int main() { return 0 @ 1; }");
    assert!(matches!(err, CompileError::Scan(_)));
}

#[test]
fn source_name_is_threaded_into_the_ir_metadata() {
    let ir = compile_ok("int main() { return 0; }");
    assert!(ir.contains("source_filename = \"test.tc\""));
}

#[test]
fn reopening_the_same_outfile_per_input_keeps_only_the_last_compilation() {
    use std::fs::{self, File};
    use tempfile::tempdir;

    let dir = tempdir().expect("failed to create temp dir");
    let outfile = dir.path().join("out.ll");

    for name in ["first", "second"] {
        let mut sink = File::create(&outfile).expect("failed to truncate outfile");
        compile_source(
            &format!("int main() {{ return 0; }} // {name}"),
            name,
            &mut sink,
            false,
        )
        .expect("compilation should succeed");
    }

    let ir = fs::read_to_string(&outfile).expect("failed to read outfile");
    assert!(ir.contains("source_filename = \"second\""));
    assert!(!ir.contains("source_filename = \"first\""));
}
