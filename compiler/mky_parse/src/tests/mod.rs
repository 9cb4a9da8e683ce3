//! Parser tests.
//!
//! - `expr`: literals, operator precedence, calls, indexing, templates
//! - `stmt`: statements, blocks, function and macro literals
//! - `recovery`: error messages and resynchronisation


use crate::{parse, ParseOutput};
use mky_ir::{Render, StringInterner};

fn parse_source(source: &str, interner: &StringInterner) -> ParseOutput {
    let tokens = mky_lexer::lex(source, interner);
    parse(&tokens, interner)
}

/// Parse and render back, asserting there were no errors.
fn render(source: &str) -> String {
    let interner = StringInterner::new();
    let output = parse_source(source, &interner);
    assert!(
        !output.has_errors(),
        "unexpected parse errors for {source:?}: {:?}",
        output.errors
    );
    output.program.to_source(&interner)
}

/// Parse and return the error messages.
fn errors(source: &str) -> Vec<String> {
    let interner = StringInterner::new();
    parse_source(source, &interner)
        .errors
        .iter()
        .map(ToString::to_string)
        .collect()
}
