//! Binary operator implementations for the evaluator.
//!
//! Dispatch is a match on the operand type pair. Pairs without a rule fall
//! back to reference identity for `==`/`!=` and are an error otherwise.

use mky_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero, negative_repeat,
    repeat_too_large, EvalResult,
};
use crate::value::Value;

/// Largest string `*` may build, in bytes.
pub const MAX_REPEAT_BYTES: usize = 1 << 30;

/// Checked arithmetic where the only error case is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Checked division with zero guard.
#[inline]
fn checked_div(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(division_by_zero())
    } else {
        checked_arith(a.checked_div(b), "division")
    }
}

/// Checked remainder with zero guard.
#[inline]
fn checked_mod(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(modulo_by_zero())
    } else {
        checked_arith(a.checked_rem(b), "remainder")
    }
}

/// Evaluate a binary operation on two already-evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "call sites hand over owned operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    let result = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Int(n), Value::Str(s)) => eval_int_string_binary(*n, s, op, false),
        (Value::Str(s), Value::Int(n)) => eval_int_string_binary(*n, s, op, true),
        _ => None,
    };
    match result {
        Some(result) => result,
        None => eval_fallback(&left, &right, op),
    }
}

// Type-Specific Evaluation Functions
//
// Each returns `None` when the pair has no rule for `op`.

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Option<EvalResult> {
    Some(match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(a, b),
        BinaryOp::Mod => checked_mod(a, b),
        BinaryOp::Eq => Ok(Value::bool(a == b)),
        BinaryOp::NotEq => Ok(Value::bool(a != b)),
        BinaryOp::Lt => Ok(Value::bool(a < b)),
        BinaryOp::LtEq => Ok(Value::bool(a <= b)),
        BinaryOp::Gt => Ok(Value::bool(a > b)),
        BinaryOp::GtEq => Ok(Value::bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => return None,
    })
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Option<EvalResult> {
    Some(Ok(Value::bool(match op {
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        BinaryOp::And => a && b,
        BinaryOp::Or => a || b,
        _ => return None,
    })))
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<EvalResult> {
    Some(Ok(match op {
        BinaryOp::Add => Value::string(format!("{a}{b}")),
        // Removes every occurrence of the right operand
        BinaryOp::Sub => Value::string(a.replace(b, "")),
        BinaryOp::Eq => Value::bool(a == b),
        BinaryOp::NotEq => Value::bool(a != b),
        _ => return None,
    }))
}

/// Mixed integer/string operands. `string_first` records operand order,
/// which matters for `+` only.
fn eval_int_string_binary(n: i64, s: &str, op: BinaryOp, string_first: bool) -> Option<EvalResult> {
    match op {
        BinaryOp::Add if string_first => Some(Ok(Value::string(format!("{s}{n}")))),
        BinaryOp::Add => Some(Ok(Value::string(format!("{n}{s}")))),
        BinaryOp::Mul => Some(repeat_string(s, n)),
        _ => None,
    }
}

fn repeat_string(s: &str, count: i64) -> EvalResult {
    let Ok(times) = usize::try_from(count) else {
        return Err(negative_repeat(count));
    };
    match s.len().checked_mul(times) {
        Some(bytes) if bytes <= MAX_REPEAT_BYTES => {}
        _ => return Err(repeat_too_large(MAX_REPEAT_BYTES)),
    }
    Ok(Value::string(s.repeat(times)))
}

/// Pairs without a rule: identity comparison, else an error.
fn eval_fallback(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::bool(left.identical(right))),
        BinaryOp::NotEq => Ok(Value::bool(!left.identical(right))),
        _ => Err(invalid_binary_op(op, left.type_name(), right.type_name())),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn kind(result: EvalResult) -> EvalErrorKind {
        result.unwrap_err().kind
    }

    mod integers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn arithmetic() {
            assert_eq!(
                evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Add).unwrap(),
                Value::Int(9)
            );
            assert_eq!(
                evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Div).unwrap(),
                Value::Int(3)
            );
            assert_eq!(
                evaluate_binary(Value::Int(-7), Value::Int(2), BinaryOp::Mod).unwrap(),
                Value::Int(-1)
            );
        }

        #[test]
        fn comparisons() {
            assert_eq!(
                evaluate_binary(Value::Int(1), Value::Int(2), BinaryOp::Lt).unwrap(),
                Value::TRUE
            );
            assert_eq!(
                evaluate_binary(Value::Int(2), Value::Int(2), BinaryOp::GtEq).unwrap(),
                Value::TRUE
            );
            assert_eq!(
                evaluate_binary(Value::Int(2), Value::Int(2), BinaryOp::NotEq).unwrap(),
                Value::FALSE
            );
        }

        #[test]
        fn zero_divisor() {
            assert_eq!(
                kind(evaluate_binary(Value::Int(1), Value::Int(0), BinaryOp::Div)),
                EvalErrorKind::DivisionByZero
            );
            assert_eq!(
                kind(evaluate_binary(Value::Int(1), Value::Int(0), BinaryOp::Mod)),
                EvalErrorKind::ModuloByZero
            );
        }

        #[test]
        fn overflow() {
            assert_eq!(
                kind(evaluate_binary(Value::Int(i64::MAX), Value::Int(1), BinaryOp::Add)),
                EvalErrorKind::IntegerOverflow {
                    operation: "addition"
                }
            );
            assert_eq!(
                kind(evaluate_binary(Value::Int(i64::MIN), Value::Int(-1), BinaryOp::Div)),
                EvalErrorKind::IntegerOverflow {
                    operation: "division"
                }
            );
        }

        #[test]
        fn logical_ops_rejected() {
            let err = evaluate_binary(Value::Int(1), Value::Int(1), BinaryOp::And).unwrap_err();
            assert_eq!(
                err.message,
                "Operation & between INTEGER and INTEGER not implemented!"
            );
        }
    }

    mod booleans {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn logic() {
            assert_eq!(
                evaluate_binary(Value::TRUE, Value::FALSE, BinaryOp::And).unwrap(),
                Value::FALSE
            );
            assert_eq!(
                evaluate_binary(Value::TRUE, Value::FALSE, BinaryOp::Or).unwrap(),
                Value::TRUE
            );
            assert_eq!(
                evaluate_binary(Value::FALSE, Value::FALSE, BinaryOp::Eq).unwrap(),
                Value::TRUE
            );
        }

        #[test]
        fn arithmetic_rejected() {
            let err = evaluate_binary(Value::TRUE, Value::TRUE, BinaryOp::Add).unwrap_err();
            assert_eq!(
                err.message,
                "Operation + between BOOLEAN and BOOLEAN not implemented!"
            );
        }
    }

    mod strings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn concat_and_remove() {
            assert_eq!(
                evaluate_binary(Value::string("ab"), Value::string("cd"), BinaryOp::Add).unwrap(),
                Value::string("abcd")
            );
            assert_eq!(
                evaluate_binary(Value::string("abcabc"), Value::string("abc"), BinaryOp::Sub)
                    .unwrap(),
                Value::string("")
            );
            assert_eq!(
                evaluate_binary(Value::string("a-b-c"), Value::string("-"), BinaryOp::Sub)
                    .unwrap(),
                Value::string("abc")
            );
        }

        #[test]
        fn mixed_with_integers() {
            assert_eq!(
                evaluate_binary(Value::Int(1), Value::string("x"), BinaryOp::Add).unwrap(),
                Value::string("1x")
            );
            assert_eq!(
                evaluate_binary(Value::string("x"), Value::Int(1), BinaryOp::Add).unwrap(),
                Value::string("x1")
            );
            assert_eq!(
                evaluate_binary(Value::Int(2), Value::string("x"), BinaryOp::Mul).unwrap(),
                Value::string("xx")
            );
            assert_eq!(
                evaluate_binary(Value::string("ab"), Value::Int(0), BinaryOp::Mul).unwrap(),
                Value::string("")
            );
            assert_eq!(
                kind(evaluate_binary(Value::string("ab"), Value::Int(-1), BinaryOp::Mul)),
                EvalErrorKind::NegativeRepeat { count: -1 }
            );
        }

        #[test]
        fn repeat_is_capped() {
            let too_large = EvalErrorKind::RepeatTooLarge {
                limit: MAX_REPEAT_BYTES,
            };
            assert_eq!(
                kind(evaluate_binary(Value::string("x"), Value::Int(i64::MAX), BinaryOp::Mul)),
                too_large
            );
            assert_eq!(
                kind(evaluate_binary(Value::Int(i64::MAX), Value::string("ab"), BinaryOp::Mul)),
                too_large
            );
            let half = MAX_REPEAT_BYTES.checked_div(2).unwrap();
            let just_over = i64::try_from(half.checked_add(1).unwrap()).unwrap();
            assert_eq!(
                kind(evaluate_binary(Value::string("ab"), Value::Int(just_over), BinaryOp::Mul)),
                too_large
            );
            assert_eq!(
                evaluate_binary(Value::string(""), Value::Int(i64::MAX), BinaryOp::Mul).unwrap(),
                Value::string("")
            );
        }
    }

    mod fallback {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn identity_equality() {
            let arr = Value::array(vec![Value::Int(1)]);
            assert_eq!(
                evaluate_binary(arr.clone(), arr.clone(), BinaryOp::Eq).unwrap(),
                Value::TRUE
            );
            assert_eq!(
                evaluate_binary(arr, Value::array(vec![Value::Int(1)]), BinaryOp::Eq).unwrap(),
                Value::FALSE
            );
            assert_eq!(
                evaluate_binary(Value::NULL, Value::NULL, BinaryOp::Eq).unwrap(),
                Value::TRUE
            );
            assert_eq!(
                evaluate_binary(Value::Int(1), Value::TRUE, BinaryOp::NotEq).unwrap(),
                Value::TRUE
            );
        }

        #[test]
        fn mismatch_message() {
            let err = evaluate_binary(Value::Int(5), Value::TRUE, BinaryOp::Add).unwrap_err();
            assert_eq!(
                err.message,
                "Operation + between INTEGER and BOOLEAN not implemented!"
            );
        }
    }
}
