//! Statements, blocks and error recovery.

use mky_ir::{Block, Expr, ExprKind, Program, Stmt, StmtKind, TokenKind};
use tracing::debug;

use crate::grammar::expr::Precedence;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            statements.push(self.parse_statement_or_recover());
        }
        Program { statements }
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.cursor.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            statements.push(self.parse_statement_or_recover());
        }
        let end = self.cursor.expect(&TokenKind::RBrace)?;
        Ok(Block {
            statements,
            span: start.to(end),
        })
    }

    fn parse_statement_or_recover(&mut self) -> Stmt {
        let start = self.cursor.position();
        let start_span = self.cursor.current_span();
        match self.parse_statement() {
            Ok(stmt) => stmt,
            Err(error) => {
                debug!(%error, span = %error.span(), "recovering from parse error");
                self.errors.push(error);
                self.synchronize(start);
                let span = start_span.to(self.cursor.previous_span());
                Stmt {
                    kind: StmtKind::Expr(Expr::new(ExprKind::Error, span)),
                    span,
                }
            }
        }
    }

    /// Skip to the end of the broken statement: past the next `;`, or up to
    /// a `}` that closes the enclosing block. Always consumes at least one
    /// token so the caller makes progress.
    fn synchronize(&mut self, start: usize) {
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::RBrace if self.cursor.position() > start => return,
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Let => {
                self.cursor.advance();
                let name = self.expect_ident()?;
                self.cursor.expect(&TokenKind::Assign)?;
                let value = self.parse_expression(Precedence::Lowest)?;
                StmtKind::Let { name, value }
            }
            TokenKind::Return => {
                self.cursor.advance();
                StmtKind::Return(self.parse_expression(Precedence::Lowest)?)
            }
            _ => StmtKind::Expr(self.parse_expression(Precedence::Lowest)?),
        };
        self.cursor.eat(&TokenKind::Semicolon);
        Ok(Stmt {
            kind,
            span: start.to(self.cursor.previous_span()),
        })
    }
}
