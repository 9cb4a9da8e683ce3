//! Evaluator scenario tests: source text in, value or error out.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod builtins_tests;

use mky_ir::StringInterner;

use crate::{
    buffer_handler, silent_handler, EvalError, EvalResult, Interpreter, InterpreterBuilder, Value,
};

/// Lex and parse `source`, panicking on syntax errors, then evaluate it.
fn eval_in(interp: &mut Interpreter<'_>, source: &str) -> EvalResult {
    let tokens = mky_lexer::lex(source, interp.interner());
    let output = mky_parse::parse(&tokens, interp.interner());
    assert!(
        output.errors.is_empty(),
        "parse errors in {source:?}: {:?}",
        output.errors
    );
    interp.eval_program(&output.program)
}

pub(crate) fn run(source: &str) -> EvalResult {
    let interner = StringInterner::new();
    let mut interp = InterpreterBuilder::new(&interner)
        .print_handler(silent_handler())
        .build();
    eval_in(&mut interp, source)
}

/// Evaluate and return `echo` output alongside the result.
pub(crate) fn run_capturing(source: &str) -> (EvalResult, String) {
    let interner = StringInterner::new();
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(&interner)
        .print_handler(handler.clone())
        .build();
    let result = eval_in(&mut interp, source);
    (result, handler.get_output())
}

pub(crate) fn eval_ok(source: &str) -> Value {
    run(source).unwrap_or_else(|err| panic!("{source:?} failed: {err}"))
}

pub(crate) fn eval_error(source: &str) -> EvalError {
    match run(source) {
        Err(err) => err,
        Ok(value) => panic!("{source:?} evaluated to {value}, expected an error"),
    }
}

pub(crate) fn eval_err(source: &str) -> String {
    eval_error(source).message
}

/// `Inspect` form of the result.
pub(crate) fn inspect(source: &str) -> String {
    eval_ok(source).to_string()
}
