//! Mky interpreter CLI.

use std::path::Path;

use mkyc::commands::{is_source_file, lex_source, parse_source, read_file, run_path, run_repl};
use mkyc::{builtins_help, init_tracing, RunOptions};

fn main() {
    init_tracing();

    let mut options = RunOptions::default();
    let mut args = Vec::new();
    for arg in std::env::args().skip(1) {
        match options.apply_flag(&arg) {
            Ok(true) => {}
            Ok(false) => args.push(arg),
            Err(msg) => {
                eprintln!("error: {msg}");
                std::process::exit(1);
            }
        }
    }

    let Some(command) = args.first() else {
        start_repl(&options);
        return;
    };

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mky run <file.mky | directory> [--max-depth=<n>]");
                std::process::exit(1);
            };
            run(path, &options);
        }
        "repl" => start_repl(&options),
        "lex" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mky lex <file.mky>");
                std::process::exit(1);
            };
            print!("{}", lex_source(&read_or_exit(path)));
        }
        "parse" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mky parse <file.mky>");
                std::process::exit(1);
            };
            print!("{}", parse_source(&read_or_exit(path)));
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Mky {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare source file or directory runs it
            let path = Path::new(command);
            if is_source_file(path) || path.is_dir() {
                run(command, &options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn run(path: &str, options: &RunOptions) {
    let handler = mky_eval::stdout_handler();
    let result = run_path(
        Path::new(path),
        options,
        &handler,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn start_repl(options: &RunOptions) {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".to_string());
    println!("Hi {user}! This is the Mky programming language");
    println!("Feel free to type in commands");

    let handler = mky_eval::stdout_handler();
    let stdin = std::io::stdin();
    if let Err(e) = run_repl(stdin.lock(), &mut std::io::stdout(), options, &handler) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn read_or_exit(path: &str) -> String {
    match read_file(Path::new(path)) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Mky interpreter");
    println!();
    println!("Usage: mky [command] [options]");
    println!();
    println!("Commands:");
    println!("  run <path>           Run a .mky file, or every .mky file under a directory");
    println!("  repl                 Start the interactive prompt (default with no arguments)");
    println!("  lex <file.mky>       Tokenize and display tokens");
    println!("  parse <file.mky>     Parse and display the AST");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Maximum call depth (default: {})", mky_eval::DEFAULT_MAX_CALL_DEPTH);
    println!();
    println!("Builtins:");
    println!("{}", builtins_help(78));
    println!();
    println!("Environment:");
    println!("  MKY_LOG              Tracing filter, e.g. MKY_LOG=mky_eval=debug (falls back to RUST_LOG)");
    println!();
    println!("Examples:");
    println!("  mky main.mky");
    println!("  mky run demos/");
    println!("  mky parse main.mky");
    println!("  mky --max-depth=100000 deep.mky");
}
