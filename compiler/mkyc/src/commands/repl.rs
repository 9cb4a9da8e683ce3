//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use mky_eval::{Environment, InterpreterBuilder, SharedPrintHandler};
use mky_ir::StringInterner;

use crate::RunOptions;

pub const PROMPT: &str = ">> ";

/// Read lines from `input` until end of file, evaluating each one.
///
/// Every line runs in the same environment, so bindings carry over. Parse
/// errors are listed one per line and the line is skipped; otherwise the
/// value's Inspect form (or the error message) is printed.
pub fn run_repl<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    options: &RunOptions,
    handler: &SharedPrintHandler,
) -> std::io::Result<()> {
    let interner = StringInterner::new();
    let env = Environment::new();
    let mut lines = input.lines();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let tokens = mky_lexer::lex(&line, &interner);
        let output = mky_parse::parse(&tokens, &interner);
        if output.has_errors() {
            for error in &output.errors {
                writeln!(out, "\t{error}")?;
            }
            continue;
        }

        let mut interpreter = InterpreterBuilder::new(&interner)
            .env(env.clone())
            .print_handler(handler.clone())
            .max_call_depth(options.max_call_depth)
            .build();
        match interpreter.eval_program(&output.program) {
            Ok(value) => writeln!(out, "{value}")?,
            Err(err) => writeln!(out, "ERROR: {err}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use mky_eval::{buffer_handler, silent_handler};
    use pretty_assertions::assert_eq;

    fn session(input: &str) -> String {
        let mut out = Vec::new();
        run_repl(
            input.as_bytes(),
            &mut out,
            &RunOptions::default(),
            &silent_handler(),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bindings_persist_across_lines() {
        assert_eq!(
            session("let x = 2;\nx * 21\n"),
            ">> 2\n>> 42\n>> "
        );
    }

    #[test]
    fn closures_survive_their_line() {
        assert_eq!(
            session("let add = fn(a) { fn(b) { a + b } };\nlet inc = add(1);\ninc(41)\n"),
            ">> <function>\n>> <function>\n>> 42\n>> "
        );
    }

    #[test]
    fn parse_errors_skip_the_line() {
        assert_eq!(
            session("let = 1;\n1\n"),
            ">> \texpected next token to be IDENT, got = instead\n>> 1\n>> "
        );
    }

    #[test]
    fn errors_do_not_end_the_session() {
        assert_eq!(
            session("missing\n5\n"),
            ">> ERROR: identifier not found: missing\n>> 5\n>> "
        );
    }

    #[test]
    fn echo_uses_the_handler() {
        let handler = buffer_handler();
        let mut out = Vec::new();
        run_repl(
            "echo(1, 2)\n".as_bytes(),
            &mut out,
            &RunOptions::default(),
            &handler,
        )
        .unwrap();
        assert_eq!(handler.get_output(), "12\n");
        assert_eq!(String::from_utf8(out).unwrap(), ">> null\n>> ");
    }
}
