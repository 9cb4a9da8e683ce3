//! Abstract syntax tree.
//!
//! The parser produces a [`Program`]; the evaluator walks it directly.
//! Function and macro literals are reference counted so the values created
//! from them can outlive the program they were parsed from (REPL lines,
//! `eval` input).

mod display;
mod operators;

use std::rc::Rc;

use super::{Name, Span};

pub use display::Render;
pub use operators::{BinaryOp, UnaryOp};

/// A whole source file or REPL line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// `{ stmt; stmt; ... }`. Blocks do not introduce scopes.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Name, value: Expr },
    /// `return value;`
    Return(Expr),
    /// Bare expression; its value is the statement's value.
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(Name),
    Int(i64),
    Bool(bool),
    Str(Name),
    /// Backtick template; each part is a `Str` fragment or an `Ident` hole.
    Template(Vec<Expr>),
    Array(Vec<Expr>),
    /// Key/value pairs in source order.
    Hash(Vec<(Expr, Expr)>),
    Function(Rc<FunctionLit>),
    Macro(Rc<MacroLit>),
    Prefix {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Infix {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
    /// Placeholder left where the parser recovered from a syntax error.
    Error,
}

/// `fn(a, b) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLit {
    pub params: Vec<Name>,
    pub body: Block,
}

/// `macro(a: pattern, b: pattern) { body }`
///
/// `patterns[i]` is the pattern expression declared for `params[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MacroLit {
    pub params: Vec<Name>,
    pub patterns: Vec<Expr>,
    pub body: Block,
}
