//! Mky IR - data structures shared by every phase of the Mky interpreter.
//!
//! - [`Name`] and [`StringInterner`]: interned identifiers and string literals
//! - [`Span`]: byte ranges into the source text
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`ast`]: the statement and expression tree the evaluator walks

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Block, Expr, ExprKind, FunctionLit, MacroLit, Program, Render, Stmt, StmtKind,
    UnaryOp,
};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{TemplatePart, Token, TokenKind, TokenList};
