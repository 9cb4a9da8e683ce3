//! Escape sequence processing for string and template literals.
//!
//! Recognized escapes: `\n`, `\r`, `\t`, `\\`, `\"`, `\0`, and inside
//! templates additionally `` \` ``, `\{`, `\}`.

/// Resolve a single escape character to its replacement.
#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Template-only escapes for the characters that delimit a template.
#[inline]
pub(crate) fn resolve_template_escape(c: char) -> Option<char> {
    match c {
        '`' | '{' | '}' => Some(c),
        _ => resolve_escape(c),
    }
}

/// Process string escape sequences.
///
/// Invalid escapes are preserved literally (`\q` stays `\q`).
pub(crate) fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => {
                    if let Some(resolved) = resolve_escape(esc) {
                        result.push(resolved);
                    } else {
                        result.push('\\');
                        result.push(esc);
                    }
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}
