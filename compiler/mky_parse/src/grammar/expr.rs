//! Expressions: Pratt loop, prefix and infix productions.

use std::rc::Rc;

use mky_ir::{
    BinaryOp, Block, Expr, ExprKind, FunctionLit, MacroLit, Name, Stmt, StmtKind, TemplatePart,
    TokenKind, UnaryOp,
};
use mky_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Binding power, lowest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    /// `|`
    Or,
    /// `&`
    And,
    /// `==` `!=`
    Equals,
    /// `<` `>` `<=` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/` `%`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
}

fn infix_precedence(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Pipe => Precedence::Or,
        TokenKind::Amp => Precedence::And,
        TokenKind::EqEq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Amp => BinaryOp::And,
        TokenKind::Pipe => BinaryOp::Or,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            while !self.cursor.check(&TokenKind::Semicolon)
                && precedence < infix_precedence(self.cursor.current_kind())
            {
                left = self.parse_infix(left)?;
            }
            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        match &token.kind {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Ident(*name), span))
            }
            TokenKind::Int(n) => {
                self.cursor.advance();
                let value = i64::try_from(*n).map_err(|_| ParseError::InvalidInteger {
                    literal: n.to_string(),
                    span,
                })?;
                Ok(Expr::new(ExprKind::Int(value), span))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                Ok(Expr::new(
                    ExprKind::Bool(matches!(token.kind, TokenKind::True)),
                    span,
                ))
            }
            TokenKind::Str(_) => Ok(self.parse_strings()),
            TokenKind::Template(parts) => {
                self.cursor.advance();
                let parts = parts
                    .iter()
                    .map(|part| match *part {
                        TemplatePart::Text(text) => Expr::new(ExprKind::Str(text), span),
                        TemplatePart::Ident(name) => Expr::new(ExprKind::Ident(name), span),
                    })
                    .collect();
                Ok(Expr::new(ExprKind::Template(parts), span))
            }
            TokenKind::Bang | TokenKind::Minus => {
                self.cursor.advance();
                let op = if matches!(token.kind, TokenKind::Bang) {
                    UnaryOp::Not
                } else {
                    UnaryOp::Neg
                };
                let operand = self.parse_expression(Precedence::Prefix)?;
                let span = span.to(operand.span);
                Ok(Expr::new(
                    ExprKind::Prefix {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                ))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let elements = self.parse_expression_list(&TokenKind::RBracket)?;
                Ok(Expr::new(
                    ExprKind::Array(elements),
                    span.to(self.cursor.previous_span()),
                ))
            }
            TokenKind::LBrace => self.parse_hash(),
            TokenKind::If => self.parse_if(),
            TokenKind::Fn => self.parse_function(),
            TokenKind::Macro => self.parse_macro(),
            other => Err(ParseError::NoPrefixParse {
                found: other.display_name(),
                span,
            }),
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        match &token.kind {
            TokenKind::LParen => {
                let args = self.parse_expression_list(&TokenKind::RParen)?;
                let span = left.span.to(self.cursor.previous_span());
                Ok(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(left),
                        args,
                    },
                    span,
                ))
            }
            TokenKind::LBracket => {
                let index = self.parse_expression(Precedence::Lowest)?;
                let end = self.cursor.expect(&TokenKind::RBracket)?;
                let span = left.span.to(end);
                Ok(Expr::new(
                    ExprKind::Index {
                        collection: Box::new(left),
                        index: Box::new(index),
                    },
                    span,
                ))
            }
            kind => {
                let op = binary_op(kind).ok_or(ParseError::NoPrefixParse {
                    found: kind.display_name(),
                    span: token.span,
                })?;
                let right = self.parse_expression(infix_precedence(kind))?;
                let span = left.span.to(right.span);
                Ok(Expr::new(
                    ExprKind::Infix {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }
        }
    }

    /// Comma-separated expressions up to and including `end`. The opening
    /// delimiter has already been consumed. A trailing comma is allowed.
    fn parse_expression_list(&mut self, end: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.check(end) {
            items.push(self.parse_expression(Precedence::Lowest)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(end)?;
        Ok(items)
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self) -> Expr {
        let start = self.cursor.current_span();
        let mut names: Vec<Name> = Vec::new();
        while let TokenKind::Str(name) = self.cursor.current_kind() {
            names.push(*name);
            self.cursor.advance();
        }
        let span = start.to(self.cursor.previous_span());
        let name = match names.as_slice() {
            [single] => *single,
            many => {
                let joined: String = many.iter().map(|n| self.interner.lookup(*n)).collect();
                self.interner.intern(&joined)
            }
        };
        Expr::new(ExprKind::Str(name), span)
    }

    /// `{ key: value, ... }`
    fn parse_hash(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::LBrace)?;
        let mut pairs = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            let key = self.parse_expression(Precedence::Lowest)?;
            self.cursor.expect(&TokenKind::Colon)?;
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Hash(pairs), start.to(end)))
    }

    /// `if cond { ... } else { ... }`; the condition may be parenthesised or
    /// bare, and `else if` chains nest.
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::If)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        let consequence = self.parse_block()?;
        let alternative = if self.cursor.eat(&TokenKind::Else) {
            if self.cursor.check(&TokenKind::If) {
                let nested = self.parse_if()?;
                let span = nested.span;
                Some(Block {
                    statements: vec![Stmt {
                        kind: StmtKind::Expr(nested),
                        span,
                    }],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            start.to(self.cursor.previous_span()),
        ))
    }

    /// `fn(a, b) { ... }`
    fn parse_function(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::Fn)?;
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            params.push(self.expect_ident()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.to(body.span);
        Ok(Expr::new(
            ExprKind::Function(Rc::new(FunctionLit { params, body })),
            span,
        ))
    }

    /// `macro(a: pattern, b: pattern) { ... }`
    fn parse_macro(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::Macro)?;
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut patterns = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            params.push(self.expect_ident()?);
            self.cursor.expect(&TokenKind::Colon)?;
            patterns.push(self.parse_expression(Precedence::Lowest)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.to(body.span);
        Ok(Expr::new(
            ExprKind::Macro(Rc::new(MacroLit {
                params,
                patterns,
                body,
            })),
            span,
        ))
    }
}
