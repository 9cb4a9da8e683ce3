#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

//! File and directory runs through `run_path`.

use std::fs;
use std::path::Path;

use mky_eval::{buffer_handler, silent_handler};
use mkyc::commands::{collect_sources, run_path};
use mkyc::RunOptions;
use pretty_assertions::assert_eq;

fn run(path: &Path) -> (bool, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_path(
        path,
        &RunOptions::default(),
        &silent_handler(),
        &mut out,
        &mut err,
    )
    .unwrap();
    (
        ok,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn single_file_prints_its_value() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("main.mky");
    fs::write(&file, "let sq = fn(x) { x * x };\nsq(7)\n").unwrap();

    assert_eq!(run(&file), (true, "49\n".to_string(), String::new()));
}

#[test]
fn directory_runs_sources_recursively_and_skips_dotfiles() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.mky"), "1").unwrap();
    fs::write(dir.path().join("notes.txt"), "not code").unwrap();
    fs::write(dir.path().join(".hidden.mky"), "2").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("b.mky"), "\"b\"").unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git").join("c.mky"), "3").unwrap();

    let sources = collect_sources(dir.path()).unwrap();
    assert_eq!(
        sources,
        vec![dir.path().join("a.mky"), dir.path().join("nested").join("b.mky")]
    );
    assert_eq!(run(dir.path()), (true, "1\nb\n".to_string(), String::new()));
}

#[test]
fn failures_go_to_stderr_and_later_files_still_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.mky"), "1 / 0").unwrap();
    fs::write(dir.path().join("b.mky"), "let = 1;").unwrap();
    fs::write(dir.path().join("c.mky"), "true").unwrap();

    let (ok, out, err) = run(dir.path());
    assert!(!ok);
    assert_eq!(out, "true\n");
    let a = dir.path().join("a.mky");
    let b = dir.path().join("b.mky");
    assert_eq!(
        err,
        format!(
            "error in '{}' at 0..5: division by zero\n\
             parse errors in '{}':\n\
             \texpected next token to be IDENT, got = instead\n",
            a.display(),
            b.display()
        )
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mky");
    let (ok, out, err) = run(&missing);
    assert!(!ok);
    assert_eq!(out, "");
    assert_eq!(err, format!("error: cannot find file '{}'\n", missing.display()));
}

#[test]
fn echo_and_read_work_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.mky");
    fs::write(&lib, "let greet = fn(n) { \"hi \" + n };").unwrap();
    let main = dir.path().join("main.mky");
    fs::write(
        &main,
        format!("eval(read({:?}));\necho(greet(\"mky\"));\n", lib.to_str().unwrap()),
    )
    .unwrap();

    let handler = buffer_handler();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_path(&main, &RunOptions::default(), &handler, &mut out, &mut err).unwrap();
    assert!(ok, "{}", String::from_utf8_lossy(&err));
    assert_eq!(handler.get_output(), "hi mky\n");
    assert_eq!(String::from_utf8(out).unwrap(), "null\n");
}
