#![deny(clippy::arithmetic_side_effects)]
//! Mky Eval - tree-walking evaluator for the Mky language.
//!
//! # Architecture
//!
//! - `Value`: closed tagged-variant runtime values, heap payloads behind `Heap<T>`
//! - `Environment`: parent-chained scopes shared by closures
//! - `Interpreter`: recursive evaluation over the AST from `mky_parse`
//! - `evaluate_binary` / `evaluate_unary`: operand-type-pair dispatch
//! - `builtins`: native functions resolved after the environment
//! - `macros`: the string-decomposing macro expander
//!
//! Errors and `return` both travel as `Err(EvalError)`; see [`errors`].

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod macros;
mod operators;
mod print_handler;
mod unary_operators;
pub mod value;

pub use environment::{Environment, LocalScope, Scope};
pub use errors::{ControlFlow, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{Builtin, HashKey, HashPair, Heap, MacroPattern, Value};

/// Names the builtin library resolves, in catalogue order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    builtins::names()
}

#[cfg(test)]
mod tests;
