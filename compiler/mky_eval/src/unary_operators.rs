//! Unary operator implementations for the evaluator.

use mky_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op, EvalResult};
use crate::value::Value;

/// Evaluate a unary operation.
///
/// `!` on an integer is true exactly when the integer is not truthy.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Int(n), UnaryOp::Not) => Ok(Value::bool(*n <= 0)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::bool(!b)),
        _ => Err(invalid_unary_op(op, value.type_name())),
    }
}
