//! Pratt parser for Mky.
//!
//! Produces a [`Program`] from a [`TokenList`]. Syntax errors are collected
//! rather than returned early: the parser resynchronises at the next
//! statement boundary and leaves an `ExprKind::Error` placeholder where the
//! broken statement was.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use mky_ir::{Name, Program, StringInterner, TokenKind, TokenList};

/// Result of parsing: the program plus every syntax error encountered.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream.
    pub fn parse(mut self) -> ParseOutput {
        let program = self.parse_program();
        ParseOutput {
            program,
            errors: self.errors,
        }
    }

    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                let name = *name;
                self.cursor.advance();
                Ok(name)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "IDENT",
                found: other.display_name(),
                span: self.cursor.current_span(),
            }),
        }
    }
}

/// Parse a token list into a program.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseOutput {
    Parser::new(tokens, interner).parse()
}

#[cfg(test)]
mod tests;
