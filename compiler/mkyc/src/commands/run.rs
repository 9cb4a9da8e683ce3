//! The `run` command: evaluate a source file, or every source file under a
//! directory.

use std::io::Write;
use std::path::Path;

use mky_eval::{InterpreterBuilder, SharedPrintHandler};
use mky_ir::{Span, StringInterner};

use super::{collect_sources, read_file};
use crate::RunOptions;

/// Why a program produced no value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// Syntax errors, in source order.
    #[error("{}", .0.join("\n"))]
    Parse(Vec<String>),
    /// Evaluation stopped with an error.
    #[error("{message}")]
    Eval { message: String, span: Option<Span> },
}

/// Lex, parse and evaluate `source` in a fresh environment.
///
/// Returns the Inspect rendering of the program's value.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    handler: SharedPrintHandler,
) -> Result<String, RunError> {
    let interner = StringInterner::new();
    let tokens = mky_lexer::lex(source, &interner);
    let output = mky_parse::parse(&tokens, &interner);
    if output.has_errors() {
        return Err(RunError::Parse(
            output.errors.iter().map(ToString::to_string).collect(),
        ));
    }

    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(handler)
        .max_call_depth(options.max_call_depth)
        .build();
    match interpreter.eval_program(&output.program) {
        Ok(value) => Ok(value.to_string()),
        Err(err) => Err(RunError::Eval {
            span: err.span,
            message: err.message,
        }),
    }
}

/// Run a file, or each `.mky` file under a directory.
///
/// Values are written to `out`, failures to `err`. Returns `Ok(false)` when
/// any file failed to read, parse or evaluate.
pub fn run_path<W: Write, E: Write>(
    path: &Path,
    options: &RunOptions,
    handler: &SharedPrintHandler,
    out: &mut W,
    err: &mut E,
) -> std::io::Result<bool> {
    let files = if path.is_dir() {
        match collect_sources(path) {
            Ok(files) => files,
            Err(msg) => {
                writeln!(err, "error: {msg}")?;
                return Ok(false);
            }
        }
    } else {
        vec![path.to_path_buf()]
    };

    let mut ok = true;
    for file in &files {
        tracing::debug!(file = %file.display(), "running");
        let source = match read_file(file) {
            Ok(source) => source,
            Err(msg) => {
                writeln!(err, "error: {msg}")?;
                ok = false;
                continue;
            }
        };
        match run_source(&source, options, handler.clone()) {
            Ok(value) => writeln!(out, "{value}")?,
            Err(RunError::Parse(errors)) => {
                writeln!(err, "parse errors in '{}':", file.display())?;
                for msg in errors {
                    writeln!(err, "\t{msg}")?;
                }
                ok = false;
            }
            Err(RunError::Eval { message, span }) => {
                match span {
                    Some(span) => writeln!(err, "error in '{}' at {span}: {message}", file.display())?,
                    None => writeln!(err, "error in '{}': {message}", file.display())?,
                }
                ok = false;
            }
        }
    }
    Ok(ok)
}
