//! `string`, `raw`, and the validators `int`, `ident`, `idents`, `space`.
//!
//! The validators double as macro-pattern predicates: a macro grows its
//! capture for as long as the validator returns a value.

use super::{join_inspect, single_arg};
use crate::errors::{
    argument_not_matched, argument_not_supported_yet, invalid_integer, wrong_arg_count_for,
    EvalResult,
};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn string(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(join_inspect(args)))
}

/// Like `string`, but quoted and escaped as a string literal.
pub(super) fn raw(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(quote_literal(&join_inspect(args))))
}

/// `text` as a string literal the lexer reads back unchanged. Only the
/// escapes the lexer resolves are emitted; every other character, control
/// characters included, is written as is.
fn quote_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len().saturating_add(2));
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Parse a string as a decimal integer; integers pass through.
pub(super) fn int(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    match single_arg(args)? {
        Value::Str(s) => s
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_integer(s)),
        value @ Value::Int(_) => Ok(value.clone()),
        other => Err(argument_not_supported_yet("int", other.type_name())),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Shared shape of the text validators: one string argument that matches
/// `accept` in full, returned unchanged.
fn validate(name: &'static str, args: &[Value], accept: fn(char) -> bool) -> EvalResult {
    let [arg] = args else {
        return Err(wrong_arg_count_for(name, args.len(), "1"));
    };
    match arg {
        Value::Str(s) if !s.is_empty() && s.chars().all(accept) => Ok(arg.clone()),
        other => Err(argument_not_matched(name, other.type_name())),
    }
}

/// `[A-Za-z_]+`
pub(super) fn ident(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    validate("ident", args, is_word_char)
}

/// `[A-Za-z_ ]+`
pub(super) fn idents(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    validate("idents", args, |c| is_word_char(c) || c == ' ')
}

/// `[ \t\n\r]+`
pub(super) fn space(_: &mut Interpreter<'_>, args: &[Value]) -> EvalResult {
    validate("space", args, |c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}
