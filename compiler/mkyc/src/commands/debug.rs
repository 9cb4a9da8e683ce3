//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write;

use mky_ir::{Render, StringInterner, TemplatePart, Token, TokenKind};

/// Tokenize `source` and list one token per line with its span.
pub fn lex_source(source: &str) -> String {
    let interner = StringInterner::new();
    let tokens = mky_lexer::lex(source, &interner);

    let mut out = format!("{} tokens:\n", tokens.len());
    for token in tokens.iter() {
        let _ = writeln!(out, "  {} @ {}", describe(token, &interner), token.span);
    }
    out
}

fn describe(token: &Token, interner: &StringInterner) -> String {
    match &token.kind {
        TokenKind::Int(n) => format!("INT {n}"),
        TokenKind::Ident(name) => format!("IDENT {}", interner.lookup(*name)),
        TokenKind::Str(text) => format!("STRING {:?}", interner.lookup(*text)),
        TokenKind::Template(parts) => {
            let mut body = String::new();
            for part in parts {
                match part {
                    TemplatePart::Text(text) => body.push_str(interner.lookup(*text)),
                    TemplatePart::Ident(name) => {
                        let _ = write!(body, "{{{}}}", interner.lookup(*name));
                    }
                }
            }
            format!("TEMPLATE `{body}`")
        }
        other => other.display_name().to_string(),
    }
}

/// Parse `source` and render the program with every operator grouping made
/// explicit, followed by any syntax errors.
pub fn parse_source(source: &str) -> String {
    let interner = StringInterner::new();
    let tokens = mky_lexer::lex(source, &interner);
    let output = mky_parse::parse(&tokens, &interner);

    let mut out = String::new();
    let _ = writeln!(out, "{} statements", output.program.statements.len());
    for stmt in &output.program.statements {
        let _ = writeln!(out, "  {}", stmt.to_source(&interner));
    }
    if output.has_errors() {
        let _ = writeln!(out, "{} errors", output.errors.len());
        for error in &output.errors {
            let _ = writeln!(out, "  {}: {error}", error.span());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lex_lists_tokens_with_payloads() {
        assert_eq!(
            lex_source("let x = `a{x}`;"),
            "6 tokens:\n  \
             LET @ 0..3\n  \
             IDENT x @ 4..5\n  \
             = @ 6..7\n  \
             TEMPLATE `a{x}` @ 8..14\n  \
             ; @ 14..15\n  \
             EOF @ 15..15\n"
        );
    }

    #[test]
    fn parse_shows_grouping() {
        assert_eq!(
            parse_source("1 + 2 * 3; let s = \"a\";"),
            "2 statements\n  (1 + (2 * 3))\n  let s = \"a\";\n"
        );
    }

    #[test]
    fn parse_lists_errors() {
        let rendered = parse_source("let = 1;");
        assert!(rendered.ends_with("1 errors\n  4..5: expected next token to be IDENT, got = instead\n"));
    }
}
