//! Command handlers for the `mky` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading and
//! discovering source files live here.

mod debug;
mod repl;
mod run;

use std::path::{Path, PathBuf};

pub use debug::{lex_source, parse_source};
pub use repl::{run_repl, PROMPT};
pub use run::{run_path, run_source, RunError};

use crate::SOURCE_EXTENSION;

/// Read a file from disk, mapping I/O failures to a user-facing message.
pub fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.display();
        match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied reading '{path}'")
            }
            std::io::ErrorKind::InvalidData => {
                format!("'{path}' contains invalid UTF-8 data")
            }
            _ => format!("error reading '{path}': {e}"),
        }
    })
}

/// Every `.mky` file under `dir`, recursively, in sorted order.
///
/// Entries whose name starts with `.` are skipped, directories included.
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    collect_into(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("cannot read directory '{}': {e}", dir.display()))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("cannot read directory '{}': {e}", dir.display()))?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_dir() {
            collect_into(&path, files)?;
        } else if is_source_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Whether `path` carries the `.mky` extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}
