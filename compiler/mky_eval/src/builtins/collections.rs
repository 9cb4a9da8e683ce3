//! `len`, `head`, `last`, `tail`, `push`.
//!
//! Strings are treated as sequences of characters. None of these mutate
//! their input; `tail` and `push` return new arrays.

use super::single_arg;
use crate::errors::{not_implemented_for, unsupported_argument, wrong_arg_count, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn char_value(c: char) -> Value {
    Value::string(c.to_string())
}

pub(super) fn len(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Str(s) => Ok(count(s.chars().count())),
        Value::Array(items) => Ok(count(items.len())),
        other => Err(unsupported_argument("len", other.type_name())),
    }
}

pub(super) fn head(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Array(items) => Ok(items.first().cloned().unwrap_or(Value::NULL)),
        Value::Str(s) => Ok(s.chars().next().map_or(Value::NULL, char_value)),
        other => Err(not_implemented_for("head", other.type_name())),
    }
}

pub(super) fn last(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Array(items) => Ok(items.last().cloned().unwrap_or(Value::NULL)),
        Value::Str(s) => Ok(s.chars().next_back().map_or(Value::NULL, char_value)),
        other => Err(not_implemented_for("last", other.type_name())),
    }
}

/// Empty arrays give an empty array; empty strings give `null`.
pub(super) fn tail(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Array(items) => Ok(Value::array(items.iter().skip(1).cloned().collect())),
        Value::Str(s) => {
            let mut chars = s.chars();
            Ok(match chars.next() {
                Some(_) => Value::string(chars.as_str()),
                None => Value::NULL,
            })
        }
        other => Err(not_implemented_for("tail", other.type_name())),
    }
}

pub(super) fn push(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    let [target, item] = args else {
        return Err(wrong_arg_count(args.len(), "2"));
    };
    match target {
        Value::Array(items) => {
            let mut extended = Vec::with_capacity(items.len().saturating_add(1));
            extended.extend(items.iter().cloned());
            extended.push(item.clone());
            Ok(Value::array(extended))
        }
        other => Err(not_implemented_for("push", other.type_name())),
    }
}
