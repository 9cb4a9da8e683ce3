//! Splitting backtick template literals into fragments.
//!
//! `` `hello {name}!` `` becomes `[Text("hello "), Ident(name), Text("!")]`.
//! Empty text fragments are dropped.

use mky_ir::{StringInterner, TemplatePart};

use crate::escape::resolve_template_escape;

/// Split the body of a template (without the backticks).
///
/// Returns `None` when a hole is unterminated or does not hold a single
/// identifier.
pub(crate) fn split_template(body: &str, interner: &StringInterner) -> Option<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(esc) => match resolve_template_escape(esc) {
                    Some(resolved) => text.push(resolved),
                    None => {
                        text.push('\\');
                        text.push(esc);
                    }
                },
                None => text.push('\\'),
            },
            '{' => {
                let mut hole = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        c => hole.push(c),
                    }
                }
                let ident = hole.trim();
                if !is_identifier(ident) {
                    return None;
                }
                if !text.is_empty() {
                    parts.push(TemplatePart::Text(interner.intern(&text)));
                    text.clear();
                }
                parts.push(TemplatePart::Ident(interner.intern(ident)));
            }
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        parts.push(TemplatePart::Text(interner.intern(&text)));
    }
    Some(parts)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
