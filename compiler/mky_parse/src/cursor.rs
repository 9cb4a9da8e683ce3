//! Token cursor for navigating the token stream.

use mky_ir::{Span, Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

/// Cursor over a token list. Past the end it keeps returning `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Used for progress tracking during error recovery.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Current token has the same variant as `kind`.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    /// Consume and return the current token. Does not move past `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        trace!(pos = self.pos, kind = %token.kind, "advance");
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report what was found instead.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.display_name(),
                found: self.current_kind().display_name(),
                span: self.current_span(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(kinds: Vec<TokenKind>) -> TokenList {
        let mut tokens = TokenList::new();
        for (i, kind) in kinds.into_iter().enumerate() {
            let start = u32::try_from(i).unwrap_or(0);
            tokens.push(Token::new(kind, Span::new(start, start + 1)));
        }
        tokens
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let tokens = list(vec![TokenKind::Plus, TokenKind::Eof]);
        let mut cursor = Cursor::new(&tokens);
        assert!(cursor.eat(&TokenKind::Plus));
        assert!(cursor.is_at_end());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_expect_reports_found() {
        let tokens = list(vec![TokenKind::Int(3), TokenKind::Eof]);
        let mut cursor = Cursor::new(&tokens);
        let err = cursor.expect(&TokenKind::LParen);
        assert_eq!(
            err,
            Err(ParseError::UnexpectedToken {
                expected: "(",
                found: "INT",
                span: Span::new(0, 1),
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_list_is_eof() {
        let tokens = TokenList::new();
        let cursor = Cursor::new(&tokens);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_span(), Span::DUMMY);
    }
}
