//! Evaluation errors and control-flow signals.
//!
//! `return` rides the error channel of [`EvalResult`] like a genuine error,
//! so `?` propagates both out of nested blocks. Function and macro calls
//! and the program boundary convert a [`ControlFlow::Return`] back into a
//! value with [`EvalError::into_return_value`].
//!
//! `EvalErrorKind` categorises the failure. Factory functions below are the
//! only way evaluation code builds errors; each fills in both `kind` and the
//! user-facing `message`.

use crate::value::Value;
use mky_ir::{BinaryOp, Span, UnaryOp};
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Non-error signals that unwind through `EvalResult::Err`.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    /// `return value;` unwinding to the nearest call or program boundary.
    Return(Value),
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },
    NegativeRepeat {
        count: i64,
    },
    RepeatTooLarge {
        limit: usize,
    },

    // Type/Operator
    InvalidBinaryOp {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    InvalidUnaryOp {
        op: UnaryOp,
        operand: &'static str,
    },

    // Access
    UndefinedVariable {
        name: String,
    },
    UnusableHashKey {
        type_name: &'static str,
    },
    UnsupportedIndex {
        type_name: &'static str,
    },
    NotIndexable {
        type_name: &'static str,
    },

    // Calls
    NotCallable {
        type_name: &'static str,
    },
    MissingArguments {
        callee: String,
        missing: usize,
    },
    ArityMismatch {
        callee: Option<&'static str>,
        got: usize,
        want: &'static str,
    },
    RecursionLimit {
        limit: usize,
    },

    // Builtin argument checks
    UnsupportedArgument {
        builtin: &'static str,
        type_name: &'static str,
    },
    ArgumentNotSupportedYet {
        builtin: &'static str,
        type_name: &'static str,
    },
    NotImplementedFor {
        builtin: &'static str,
        type_name: &'static str,
    },
    ArgumentNotMatched {
        builtin: &'static str,
        type_name: &'static str,
    },
    InvalidInteger {
        text: String,
    },

    // Macros
    InvalidMacroPattern {
        type_name: &'static str,
    },
    InvalidMacroArgument {
        type_name: &'static str,
    },

    // I/O and re-entry
    FileRead {
        path: String,
    },
    EvalParse {
        message: String,
    },

    /// The parser left an error placeholder here.
    MalformedExpression,

    /// Catch-all for signals and messages without a structured kind.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Arithmetic
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::NegativeRepeat { count } => {
                write!(f, "cannot repeat a string a negative number of times: {count}")
            }
            Self::RepeatTooLarge { limit } => {
                write!(f, "repeated string would exceed {limit} bytes")
            }

            // Type/Operator
            Self::InvalidBinaryOp { op, left, right } => {
                write!(f, "Operation {op} between {left} and {right} not implemented!")
            }
            Self::InvalidUnaryOp { op, operand } => write!(f, "Not implemented {op} for {operand}"),

            // Access
            Self::UndefinedVariable { name } => write!(f, "identifier not found: {name}"),
            Self::UnusableHashKey { type_name } => write!(f, "unusable as hash key: {type_name}"),
            Self::UnsupportedIndex { type_name } => {
                write!(f, "indexing by {type_name} is not yet supported")
            }
            Self::NotIndexable { type_name } => {
                write!(f, "indexing not supported for {type_name} yet")
            }

            // Calls
            Self::NotCallable { type_name } => write!(f, "{type_name} callable not supported yet"),
            Self::MissingArguments { callee, missing } => {
                write!(f, "function {callee} is missing {missing} parameters")
            }
            Self::ArityMismatch { callee, got, want } => match callee {
                Some(name) => write!(
                    f,
                    "wrong number of arguments for {name}. got={got}, want={want}"
                ),
                None => write!(f, "wrong number of arguments. got={got}, want={want}"),
            },
            Self::RecursionLimit { limit } => {
                write!(f, "maximum recursion depth exceeded (limit: {limit})")
            }

            // Builtin argument checks
            Self::UnsupportedArgument { builtin, type_name } => {
                write!(f, "argument to `{builtin}` not supported, got {type_name}")
            }
            Self::ArgumentNotSupportedYet { builtin, type_name } => {
                write!(f, "argument to `{builtin}` not supported yet, got {type_name}")
            }
            Self::NotImplementedFor { builtin, type_name } => {
                write!(f, "{builtin} is not implemented for {type_name}")
            }
            Self::ArgumentNotMatched { builtin, type_name } => {
                write!(f, "argument to `{builtin}` not matched, got {type_name}")
            }
            Self::InvalidInteger { text } => write!(f, "could not parse {text:?} as integer"),

            // Macros
            Self::InvalidMacroPattern { type_name } => {
                write!(f, "macro pattern must be STRING or BUILTIN, got {type_name}")
            }
            Self::InvalidMacroArgument { type_name } => {
                write!(f, "macro argument must be STRING, got {type_name}")
            }

            // I/O and re-entry
            Self::FileRead { path } => write!(f, "could not read file {path}"),
            Self::EvalParse { message } => write!(f, "could not parse eval input: {message}"),

            Self::MalformedExpression => write!(f, "malformed expression"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error, or a control-flow signal travelling on the error path.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// User-facing message; the `Inspect` text of the error.
    pub message: String,
    /// Set for `return` signals.
    pub control_flow: Option<ControlFlow>,
    /// Source location of the expression that failed, when known.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            control_flow: None,
            span: None,
        }
    }

    /// Create a `return` signal carrying `value`.
    pub fn return_with(value: Value) -> Self {
        Self {
            kind: EvalErrorKind::Custom {
                message: "return".to_string(),
            },
            message: format!("return:{value}"),
            control_flow: Some(ControlFlow::Return(value)),
            span: None,
        }
    }

    /// Attach a source span unless one is already set.
    ///
    /// The innermost expression that failed wins.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[inline]
    pub fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }

    /// Unwrap a `return` signal into its value; real errors pass through.
    pub fn into_return_value(self) -> EvalResult {
        match self.control_flow {
            Some(ControlFlow::Return(value)) => Ok(value),
            None => Err(self),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Catch `return` at a call or program boundary.
#[inline]
pub(crate) fn catch_return(result: EvalResult) -> EvalResult {
    result.or_else(EvalError::into_return_value)
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn negative_repeat(count: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeRepeat { count })
}

#[cold]
pub fn repeat_too_large(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RepeatTooLarge { limit })
}

// Operator Errors

/// No rule for `op` on this operand type pair.
#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { op, left, right })
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { op, operand })
}

// Access Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unusable_hash_key(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnusableHashKey { type_name })
}

/// Index value of the wrong type for the collection.
#[cold]
pub fn unsupported_index(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedIndex { type_name })
}

/// Collection type that cannot be indexed at all.
#[cold]
pub fn not_indexable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable { type_name })
}

// Call Errors

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn missing_arguments(callee: String, missing: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArguments { callee, missing })
}

/// Wrong argument count to a builtin or macro.
#[cold]
pub fn wrong_arg_count(got: usize, want: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        callee: None,
        got,
        want,
    })
}

/// Wrong argument count, naming the builtin in the message.
#[cold]
pub fn wrong_arg_count_for(callee: &'static str, got: usize, want: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        callee: Some(callee),
        got,
        want,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Builtin Argument Errors

#[cold]
pub fn unsupported_argument(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedArgument { builtin, type_name })
}

#[cold]
pub fn argument_not_supported_yet(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentNotSupportedYet { builtin, type_name })
}

#[cold]
pub fn not_implemented_for(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplementedFor { builtin, type_name })
}

#[cold]
pub fn argument_not_matched(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentNotMatched { builtin, type_name })
}

#[cold]
pub fn invalid_integer(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidInteger {
        text: text.to_string(),
    })
}

// Macro Errors

#[cold]
pub fn invalid_macro_pattern(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidMacroPattern { type_name })
}

#[cold]
pub fn invalid_macro_argument(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidMacroArgument { type_name })
}

// I/O and Re-entry Errors

#[cold]
pub fn file_read_failed(path: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FileRead {
        path: path.to_string(),
    })
}

#[cold]
pub fn eval_parse_failed(message: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EvalParse { message })
}

#[cold]
pub fn malformed_expression() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedExpression)
}
