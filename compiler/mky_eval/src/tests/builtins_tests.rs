//! Builtin library behaviour and exact error messages.

use super::{eval_err, eval_ok, inspect, run_capturing};
use crate::{builtin_names, EvalErrorKind, Interpreter, InterpreterBuilder, Value};
use mky_ir::StringInterner;
use pretty_assertions::assert_eq;
use std::io::Write;

mod len {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strings_and_arrays() {
        assert_eq!(eval_ok("len(\"\")"), Value::Int(0));
        assert_eq!(eval_ok("len(\"four\")"), Value::Int(4));
        assert_eq!(eval_ok("len(\"héllo\")"), Value::Int(5));
        assert_eq!(eval_ok("len([1, 2, 3])"), Value::Int(3));
        assert_eq!(eval_ok("len([])"), Value::Int(0));
    }

    #[test]
    fn errors() {
        assert_eq!(eval_err("len(1)"), "argument to `len` not supported, got INTEGER");
        assert_eq!(
            eval_err("len(\"one\", \"two\")"),
            "wrong number of arguments. got=2, want=1"
        );
        assert_eq!(eval_err("len()"), "wrong number of arguments. got=0, want=1");
    }
}

mod sequences {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn head_and_last() {
        assert_eq!(eval_ok("head([1, 2, 3])"), Value::Int(1));
        assert_eq!(eval_ok("last([1, 2, 3])"), Value::Int(3));
        assert_eq!(eval_ok("head([])"), Value::NULL);
        assert_eq!(eval_ok("last([])"), Value::NULL);
        assert_eq!(eval_ok("head(\"abc\")"), Value::string("a"));
        assert_eq!(eval_ok("last(\"abc\")"), Value::string("c"));
        assert_eq!(eval_ok("head(\"\")"), Value::NULL);
        assert_eq!(eval_ok("last(\"\")"), Value::NULL);
        assert_eq!(eval_err("head(1)"), "head is not implemented for INTEGER");
        assert_eq!(eval_err("last(true)"), "last is not implemented for BOOLEAN");
    }

    #[test]
    fn tail() {
        assert_eq!(inspect("tail([1, 2, 3])"), "[2, 3]");
        assert_eq!(inspect("tail([1])"), "[]");
        assert_eq!(inspect("tail([])"), "[]");
        assert_eq!(eval_ok("tail(\"abc\")"), Value::string("bc"));
        assert_eq!(eval_ok("tail(\"a\")"), Value::string(""));
        assert_eq!(eval_ok("tail(\"\")"), Value::NULL);
        assert_eq!(eval_err("tail(null)"), "tail is not implemented for NULL");
    }

    #[test]
    fn push() {
        assert_eq!(inspect("push([], 1)"), "[1]");
        assert_eq!(inspect("push([1], [2])"), "[1, [2]]");
        assert_eq!(eval_err("push(1, 1)"), "push is not implemented for INTEGER");
        assert_eq!(
            eval_err("push([1])"),
            "wrong number of arguments. got=1, want=2"
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        assert_eq!(
            inspect("let a = [1]; let b = push(a, 2); [a, b]"),
            "[[1], [1, 2]]"
        );
        assert_eq!(
            inspect("let a = [1, 2]; let b = tail(a); [a, b]"),
            "[[1, 2], [2]]"
        );
    }

    #[test]
    fn recursive_map() {
        let source = r"
            let map = fn(arr, f) {
                let iter = fn(arr, acc) {
                    if (len(arr) == 0) { acc } else { iter(tail(arr), push(acc, f(head(arr)))) }
                };
                iter(arr, [])
            };
            map([1, 2, 3], fn(x) { x * 2 })
        ";
        assert_eq!(inspect(source), "[2, 4, 6]");
    }
}

mod text {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_joins_inspect_forms() {
        assert_eq!(
            eval_ok("string(1, true, \"x\", [1], null)"),
            Value::string("1truex[1]null")
        );
        assert_eq!(eval_ok("string()"), Value::string(""));
    }

    #[test]
    fn raw_quotes_and_escapes() {
        assert_eq!(eval_ok("raw(\"a\\\"b\")"), Value::string("\"a\\\"b\""));
        assert_eq!(eval_ok("raw(1, 2)"), Value::string("\"12\""));
        assert_eq!(eval_ok("raw(\"line\\n\")"), Value::string("\"line\\n\""));
    }

    #[test]
    fn raw_leaves_other_characters_unescaped() {
        let interner = StringInterner::new();
        let mut interp = Interpreter::new(&interner);
        let text = "\u{1b}[0m caf\u{e9}\u{301}\t\0";
        interp.env().bind(interner.intern("text"), Value::string(text));

        assert_eq!(
            interp.eval_source("raw(text)").unwrap(),
            Value::string("\"\u{1b}[0m caf\u{e9}\u{301}\\t\\0\"")
        );
        assert_eq!(
            interp.eval_source("eval(raw(text))").unwrap(),
            Value::string(text)
        );
    }

    #[test]
    fn int_parses_or_passes_through() {
        assert_eq!(eval_ok("int(\"42\")"), Value::Int(42));
        assert_eq!(eval_ok("int(\"-7\")"), Value::Int(-7));
        assert_eq!(eval_ok("int(7)"), Value::Int(7));
        assert_eq!(eval_err("int(\"12a\")"), "could not parse \"12a\" as integer");
        assert_eq!(eval_err("int(\"\")"), "could not parse \"\" as integer");
        assert_eq!(
            eval_err("int(true)"),
            "argument to `int` not supported yet, got BOOLEAN"
        );
        assert_eq!(eval_err("int()"), "wrong number of arguments. got=0, want=1");
    }

    #[test]
    fn validators_return_their_argument() {
        assert_eq!(eval_ok("ident(\"foo_bar\")"), Value::string("foo_bar"));
        assert_eq!(eval_ok("idents(\"foo bar\")"), Value::string("foo bar"));
        assert_eq!(eval_ok("space(\" \\t\\n\")"), Value::string(" \t\n"));
    }

    #[test]
    fn validators_reject() {
        assert_eq!(
            eval_err("ident(\"foo1\")"),
            "argument to `ident` not matched, got STRING"
        );
        assert_eq!(
            eval_err("ident(\"\")"),
            "argument to `ident` not matched, got STRING"
        );
        assert_eq!(
            eval_err("ident(1)"),
            "argument to `ident` not matched, got INTEGER"
        );
        assert_eq!(
            eval_err("idents(\"a-b\")"),
            "argument to `idents` not matched, got STRING"
        );
        assert_eq!(
            eval_err("space(\"x\")"),
            "argument to `space` not matched, got STRING"
        );
    }

    #[test]
    fn validator_arity_names_the_builtin() {
        assert_eq!(
            eval_err("ident()"),
            "wrong number of arguments for ident. got=0, want=1"
        );
        assert_eq!(
            eval_err("space(\" \", \" \")"),
            "wrong number of arguments for space. got=2, want=1"
        );
    }
}

mod effects {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn echo_prints_and_returns_null() {
        let (result, output) = run_capturing("echo(\"hello \", 1, [true])");
        assert_eq!(result.unwrap(), Value::NULL);
        assert_eq!(output, "hello 1[true]\n");

        let (_, output) = run_capturing("echo()");
        assert_eq!(output, "\n");
    }

    #[test]
    fn read_returns_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "let x = 1;\nx + 1").unwrap();
        let path = file.path().to_str().unwrap();

        let source = format!("read({path:?})");
        assert_eq!(eval_ok(&source), Value::string("let x = 1;\nx + 1"));

        let source = format!("eval(read({path:?}))");
        assert_eq!(eval_ok(&source), Value::Int(2));
    }

    #[test]
    fn read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mky");
        let missing = missing.to_str().unwrap();
        assert_eq!(
            eval_err(&format!("read({missing:?})")),
            format!("could not read file {missing}")
        );
        assert_eq!(
            eval_err("read(1)"),
            "argument to `read` not supported yet, got INTEGER"
        );
    }

    #[test]
    fn eval_runs_in_the_calling_scope() {
        assert_eq!(eval_ok("eval(\"1 + 2\")"), Value::Int(3));
        assert_eq!(eval_ok("eval(\"let q = 5;\"); q"), Value::Int(5));
        assert_eq!(eval_ok("eval(\"return 3; 4\")"), Value::Int(3));
        assert_eq!(eval_ok("eval(\"\")"), Value::NULL);
        assert_eq!(
            eval_ok("let f = fn() { eval(\"let inner = 1;\"); inner }; f()"),
            Value::Int(1)
        );
        assert_eq!(
            eval_err("let f = fn() { eval(\"let inner = 1;\") }; f(); inner"),
            "identifier not found: inner"
        );
    }

    #[test]
    fn eval_errors() {
        assert_eq!(
            eval_err("eval(1)"),
            "argument to `eval` not supported yet, got INTEGER"
        );
        assert_eq!(
            eval_err("eval(\"let = 1;\")"),
            "could not parse eval input: expected next token to be IDENT, got = instead"
        );
        assert_eq!(eval_err("eval(\"1 / 0\")"), "division by zero");
    }

    #[test]
    fn eval_source_reports_first_parse_error() {
        let interner = StringInterner::new();
        let mut interp = Interpreter::new(&interner);
        let err = interp.eval_source("let x 5; )").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::EvalParse { .. }));
        assert!(err.message.starts_with("could not parse eval input: "));
    }

    #[test]
    fn self_evaluating_text_hits_the_depth_limit() {
        let interner = StringInterner::new();
        let mut interp = InterpreterBuilder::new(&interner).max_call_depth(50).build();
        let err = interp
            .eval_source("let s = \"eval(s)\"; eval(s)")
            .unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 50 });
        assert_eq!(interp.call_depth, 0);
    }

    #[test]
    fn nested_eval_within_the_limit_succeeds() {
        let interner = StringInterner::new();
        let mut interp = InterpreterBuilder::new(&interner).max_call_depth(5).build();
        let value = interp
            .eval_source("eval(\"eval(\\\"1 + 6\\\")\")")
            .unwrap();
        assert_eq!(value, Value::Int(7));
    }
}

mod catalogue {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_inspect_by_name() {
        assert_eq!(inspect("len"), "<builtin len>");
        assert_eq!(inspect("[head, tail]"), "[<builtin head>, <builtin tail>]");
    }

    #[test]
    fn every_builtin_resolves() {
        for name in builtin_names() {
            assert_eq!(inspect(name), format!("<builtin {name}>"));
        }
    }
}
