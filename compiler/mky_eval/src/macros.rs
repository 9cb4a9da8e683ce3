//! Macro expander.
//!
//! A macro call takes one string and carves it into one capture per
//! parameter, left to right, with a cursor into the remaining input:
//!
//! - a [`MacroPattern::Predicate`] grows its capture one character at a time
//!   while the builtin accepts it. The first rejected character is left for
//!   the next parameter.
//! - a [`MacroPattern::Literal`] matches its text at the cursor and consumes
//!   it; the capture is the literal itself.
//!
//! Captures are bound as strings in a child of the macro's defining scope,
//! then the body runs there.

use std::rc::Rc;

use mky_ir::{Expr, MacroLit};

use crate::errors::{
    catch_return, invalid_macro_argument, invalid_macro_pattern, wrong_arg_count, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::value::{Builtin, MacroPattern, MacroValue, Value};

impl Interpreter<'_> {
    /// Evaluate a macro literal: each pattern must reduce to a string or a
    /// builtin.
    pub(crate) fn eval_macro_literal(&mut self, def: &Rc<MacroLit>) -> EvalResult {
        let mut patterns = Vec::with_capacity(def.patterns.len());
        for expr in &def.patterns {
            let pattern = match self.eval_expr(expr)? {
                Value::Str(text) => MacroPattern::Literal(text.to_string()),
                Value::Builtin(builtin) => MacroPattern::Predicate(builtin),
                other => {
                    return Err(invalid_macro_pattern(other.type_name()).with_span(expr.span))
                }
            };
            patterns.push(pattern);
        }
        Ok(Value::macro_value(Rc::clone(def), patterns, self.env.clone()))
    }

    pub(crate) fn call_macro(&mut self, mac: &MacroValue, args: &[Expr]) -> EvalResult {
        let [arg] = args else {
            return Err(wrong_arg_count(args.len(), "1 string template"));
        };
        let input = match self.eval_expr(arg)? {
            Value::Str(input) => input,
            other => return Err(invalid_macro_argument(other.type_name()).with_span(arg.span)),
        };

        let captures = decompose(&mac.patterns, &input, |builtin, candidate| {
            (builtin.func)(self, &[Value::string(candidate)]).is_ok()
        });
        tracing::debug!(input = input.as_str(), ?captures, "macro decomposition");

        let frame = mac.env.child();
        for (param, capture) in mac.def.params.iter().zip(captures) {
            frame.bind(*param, Value::string(capture));
        }

        let mut scoped = self.enter_call(frame)?;
        catch_return(scoped.eval_block(&mac.def.body))
    }
}

/// Split `input` into one capture per pattern.
///
/// `accepts` runs a predicate builtin on a candidate prefix. Input left over
/// after the last pattern is ignored.
pub(crate) fn decompose<F>(patterns: &[MacroPattern], input: &str, mut accepts: F) -> Vec<String>
where
    F: FnMut(Builtin, &str) -> bool,
{
    let mut rest = input;
    let mut captures = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let (capture, consumed) = match pattern {
            MacroPattern::Predicate(builtin) => {
                longest_accepted(rest, |candidate| accepts(*builtin, candidate))
            }
            MacroPattern::Literal(literal) => match_literal(rest, literal),
        };
        captures.push(capture.to_string());
        rest = &rest[consumed..];
    }
    captures
}

/// Longest prefix reachable by extending one character at a time while
/// `accepts` holds. Returns the prefix and its byte length.
fn longest_accepted(rest: &str, mut accepts: impl FnMut(&str) -> bool) -> (&str, usize) {
    let mut accepted = 0;
    for end in (1..=rest.len()).filter(|&end| rest.is_char_boundary(end)) {
        if !accepts(&rest[..end]) {
            break;
        }
        accepted = end;
    }
    (&rest[..accepted], accepted)
}

/// The literal when the input continues with it; otherwise an empty
/// capture and the input is exhausted.
fn match_literal<'r>(rest: &'r str, literal: &str) -> (&'r str, usize) {
    if rest.starts_with(literal) {
        (&rest[..literal.len()], literal.len())
    } else {
        ("", rest.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop(_: &mut Interpreter<'_>, _: &[Value]) -> EvalResult {
        Ok(Value::NULL)
    }

    fn predicate(name: &'static str) -> MacroPattern {
        MacroPattern::Predicate(Builtin {
            name,
            func: noop,
        })
    }

    fn literal(text: &str) -> MacroPattern {
        MacroPattern::Literal(text.to_string())
    }

    fn letters(builtin: Builtin, candidate: &str) -> bool {
        match builtin.name {
            "ident" => candidate.chars().all(|c| c.is_ascii_alphabetic() || c == '_'),
            "digits" => candidate.chars().all(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    #[test]
    fn predicate_then_literal_then_predicate() {
        let patterns = [predicate("ident"), literal(":"), predicate("ident")];
        assert_eq!(
            decompose(&patterns, "foo:bar", letters),
            vec!["foo", ":", "bar"]
        );
    }

    #[test]
    fn predicate_stops_before_first_rejected_char() {
        let patterns = [predicate("digits"), predicate("ident")];
        assert_eq!(decompose(&patterns, "123abc!", letters), vec!["123", "abc"]);
    }

    #[test]
    fn predicate_rejecting_first_char_captures_nothing() {
        let patterns = [predicate("digits"), literal("x")];
        assert_eq!(decompose(&patterns, "x9", letters), vec!["", "x"]);
    }

    #[test]
    fn literal_not_at_cursor_exhausts_input() {
        let patterns = [literal("->"), predicate("ident")];
        assert_eq!(decompose(&patterns, "ab->cd", letters), vec!["", ""]);
    }

    #[test]
    fn exhausted_input_yields_empty_captures() {
        let patterns = [predicate("ident"), literal(","), predicate("ident")];
        assert_eq!(decompose(&patterns, "abc", letters), vec!["abc", "", ""]);
    }

    #[test]
    fn multibyte_input_is_split_on_char_boundaries() {
        let patterns = [predicate("ident"), literal("é"), predicate("ident")];
        assert_eq!(decompose(&patterns, "aéb", letters), vec!["a", "é", "b"]);
    }
}
