//! Runtime values for the Mky interpreter.
//!
//! Heap payloads are wrapped in [`Heap<T>`], whose constructor is private to
//! this module. Build them through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");       // OK
//! let a = Value::array(vec![]);         // OK
//! let s = Value::Str(Heap::new(...));   // ERROR: Heap::new is pub(super)
//! ```
//!
//! `Display` is the `Inspect` form used for templates, `string`/`echo` and
//! CLI output.

mod heap;

use std::fmt;
use std::rc::Rc;

use mky_ir::{FunctionLit, MacroLit};
use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;

pub use heap::Heap;

/// Native function signature.
///
/// Builtins receive the interpreter so `eval` and `echo` can reach the
/// current environment and print handler.
pub type BuiltinFn = fn(&mut Interpreter<'_>, &[Value]) -> EvalResult;

/// A named native function.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A closure: function literal plus the environment it was defined in.
#[derive(Clone)]
pub struct FunctionValue {
    pub def: Rc<FunctionLit>,
    pub env: Environment,
}

/// How one macro parameter carves its capture out of the argument string.
#[derive(Clone, Debug, PartialEq)]
pub enum MacroPattern {
    /// Fixed text that must appear at the cursor.
    Literal(String),
    /// Longest prefix the builtin accepts without an error.
    Predicate(Builtin),
}

/// A macro: literal plus its evaluated patterns and defining environment.
#[derive(Clone)]
pub struct MacroValue {
    pub def: Rc<MacroLit>,
    pub patterns: Vec<MacroPattern>,
    pub env: Environment,
}

/// Key of a hash entry. Only integers, booleans and strings are hashable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// The original key value alongside the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Hash contents.
pub type HashPairs = FxHashMap<HashKey, HashPair>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Null,
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<HashPairs>),
    Function(Heap<FunctionValue>),
    Macro(Heap<MacroValue>),
    Builtin(Builtin),
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);
    pub const NULL: Value = Value::Null;

    // Factory Methods

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn hash(pairs: HashPairs) -> Self {
        Value::Hash(Heap::new(pairs))
    }

    #[inline]
    pub fn function(def: Rc<FunctionLit>, env: Environment) -> Self {
        Value::Function(Heap::new(FunctionValue { def, env }))
    }

    #[inline]
    pub fn macro_value(def: Rc<MacroLit>, patterns: Vec<MacroPattern>, env: Environment) -> Self {
        Value::Macro(Heap::new(MacroValue { def, patterns, env }))
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    // Queries

    /// Type name as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "INTEGER",
            Value::Bool(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Macro(_) => "MACRO",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Condition value of an `if`.
    ///
    /// `None` for kinds that are neither true nor false; the `if` then
    /// yields `Null` without running either branch.
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(n) => Some(*n > 0),
            _ => None,
        }
    }

    /// The `Hashable` capability.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Int(n) => Some(HashKey::Integer(*n)),
            Value::Bool(b) => Some(HashKey::Boolean(*b)),
            Value::Str(s) => Some(HashKey::String(s.to_string())),
            _ => None,
        }
    }

    /// Reference identity, used by `==` on kinds without value equality.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Heap::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            (Value::Macro(a), Value::Macro(b)) => Heap::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Hash(pairs) => {
                let mut entries: Vec<(&HashKey, &HashPair)> = pairs.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                f.write_str("{")?;
                for (i, (_, pair)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Value::Function(_) => f.write_str("<function>"),
            Value::Macro(_) => f.write_str("<macro>"),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

// Closures hold their environment, which may hold the closure again, so
// Debug stops at the function boundary.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => write!(f, "Null"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(items) => f.debug_tuple("Array").field(&**items).finish(),
            Value::Hash(pairs) => {
                let mut entries: Vec<&HashPair> = pairs.values().collect();
                entries.sort_by(|a, b| a.key.hash_key().cmp(&b.key.hash_key()));
                f.debug_tuple("Hash").field(&entries).finish()
            }
            Value::Function(func) => write!(f, "Function(arity={})", func.def.params.len()),
            Value::Macro(mac) => write!(f, "Macro(arity={})", mac.def.params.len()),
            Value::Builtin(b) => write!(f, "{b:?}"),
        }
    }
}

/// Structural equality for scalars and collections; identity for closures.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            _ => self.identical(other),
        }
    }
}
