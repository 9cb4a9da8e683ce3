//! Native functions available to every program.
//!
//! Builtins are a fallback, not an overlay: identifier resolution checks the
//! environment first, so a `let len = ...` shadows the builtin. Each builtin
//! validates its own argument count and kinds.

mod collections;
mod io;
mod text;

use crate::errors::{wrong_arg_count, EvalError};
use crate::value::{Builtin, Value};

const BUILTINS: &[Builtin] = &[
    // Collections
    Builtin {
        name: "len",
        func: collections::len,
    },
    Builtin {
        name: "head",
        func: collections::head,
    },
    Builtin {
        name: "last",
        func: collections::last,
    },
    Builtin {
        name: "tail",
        func: collections::tail,
    },
    Builtin {
        name: "push",
        func: collections::push,
    },
    // Text
    Builtin {
        name: "string",
        func: text::string,
    },
    Builtin {
        name: "raw",
        func: text::raw,
    },
    Builtin {
        name: "int",
        func: text::int,
    },
    Builtin {
        name: "ident",
        func: text::ident,
    },
    Builtin {
        name: "idents",
        func: text::idents,
    },
    Builtin {
        name: "space",
        func: text::space,
    },
    // I/O and re-entry
    Builtin {
        name: "echo",
        func: io::echo,
    },
    Builtin {
        name: "read",
        func: io::read,
    },
    Builtin {
        name: "eval",
        func: io::eval,
    },
];

/// Resolve a name that the environment chain did not bind.
///
/// `null` is not a keyword; it resolves here.
pub fn lookup(name: &str) -> Option<Value> {
    if name == "null" {
        return Some(Value::NULL);
    }
    BUILTINS
        .iter()
        .find(|builtin| builtin.name == name)
        .map(|builtin| Value::Builtin(*builtin))
}

/// Names of all builtins, in catalogue order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// The single argument of a one-argument builtin.
#[inline]
fn single_arg(args: &[Value]) -> Result<&Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(wrong_arg_count(args.len(), "1")),
    }
}

/// Concatenated `Inspect` forms, as `string`, `raw` and `echo` produce.
fn join_inspect(args: &[Value]) -> String {
    args.iter().map(ToString::to_string).collect()
}
