//! Mky command line front end.
//!
//! The `mky` binary is a thin argument dispatcher over [`commands`]. Each
//! command takes its input and output streams explicitly so the same code
//! paths run under the integration tests.

pub mod commands;

use std::sync::Once;

use mky_eval::DEFAULT_MAX_CALL_DEPTH;

/// File extension of Mky source files.
pub const SOURCE_EXTENSION: &str = "mky";

/// Options shared by the commands that evaluate code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Call depth at which evaluation fails with a recursion error.
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RunOptions {
    /// Apply a `--flag=value` argument. Returns `Ok(false)` when the
    /// argument is not an option this type knows about.
    pub fn apply_flag(&mut self, arg: &str) -> Result<bool, String> {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            self.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Builtin names for the help text, comma separated and wrapped to `width`
/// columns, each line indented by two spaces.
pub fn builtins_help(width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::from(" ");
    for name in mky_eval::builtin_names() {
        if line.len() > 2 && line.len().saturating_add(name.len()).saturating_add(2) > width {
            lines.push(line);
            line = String::from(" ");
        }
        line.push(' ');
        line.push_str(name);
        line.push(',');
    }
    line.pop();
    lines.push(line);
    lines.join("\n")
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Reads the filter from `MKY_LOG`, falling back to `RUST_LOG`, and installs
/// a hierarchical subscriber on stderr. Installs nothing when neither is set.
/// Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let directives = std::env::var("MKY_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            let filter = EnvFilter::new(directives);
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_bracketed_fields(true);
            tracing_subscriber::registry().with(filter).with(tree).init();
        }
    });
}
