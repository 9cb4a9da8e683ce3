//! Parse error types.

use mky_ir::Span;
use thiserror::Error;

/// A syntax error. The parser collects these and keeps going.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("no prefix parse function for {found} found")]
    NoPrefixParse { found: &'static str, span: Span },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String, span: Span },
}

impl ParseError {
    /// Location of the offending token.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixParse { span, .. }
            | ParseError::InvalidInteger { span, .. } => *span,
        }
    }
}
