//! `echo`, `read`, `eval`: the builtins with effects.

use super::{join_inspect, single_arg};
use crate::errors::{argument_not_supported_yet, file_read_failed, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Print the concatenated arguments as one line; returns `null`.
pub(super) fn echo(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    interpreter.print_handler().println(&join_inspect(args));
    Ok(Value::NULL)
}

pub(super) fn read(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Str(path) => std::fs::read_to_string(path.as_str())
            .map(Value::string)
            .map_err(|err| {
                tracing::debug!(path = path.as_str(), %err, "read failed");
                file_read_failed(path)
            }),
        other => Err(argument_not_supported_yet("read", other.type_name())),
    }
}

/// Lex, parse and evaluate the argument as a program in the caller's
/// environment. Its `let`s stay visible afterwards.
pub(super) fn eval(interpreter: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Str(source) => interpreter.eval_source(source),
        other => Err(argument_not_supported_yet("eval", other.type_name())),
    }
}
