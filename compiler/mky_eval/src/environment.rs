//! Lexical scopes for name resolution and closure capture.
//!
//! An [`Environment`] is a cheap handle to one scope. Scopes link to their
//! parent; lookups walk the chain, binds only touch the current scope.
//! Closures keep the handle of their defining scope alive, so a closure sees
//! later `let`s in that scope.
//!
//! A closure stored in the scope it captures forms an `Rc` cycle and is not
//! freed before the process exits.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use mky_ir::Name;

use crate::value::Value;

/// Single-threaded shared cell for scope records.
///
/// All scope allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One scope: its own bindings plus an optional parent.
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a name here, then in each ancestor.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if let Some(value) = scope.bindings.get(&name) {
                return Some(value.clone());
            }
            next = scope.parent.clone();
        }
        None
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the current scope of evaluation.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
}

impl Environment {
    /// A root environment with no parent.
    pub fn new() -> Self {
        Environment {
            scope: LocalScope::new(Scope::new()),
        }
    }

    /// Resolve `name` through the scope chain.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scope.borrow().lookup(name)
    }

    /// Bind `name` in this scope only, overwriting any existing binding.
    /// Returns the bound value.
    pub fn bind(&self, name: Name, value: Value) -> Value {
        self.scope.borrow_mut().define(name, value.clone());
        value
    }

    /// A fresh scope whose parent is this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            scope: LocalScope::new(Scope::with_parent(self.scope.clone())),
        }
    }

    /// Number of scopes from here to the root, counting both ends.
    pub fn depth(&self) -> usize {
        let mut depth = 1usize;
        let mut next = self.scope.borrow().parent.clone();
        while let Some(scope) = next {
            depth = depth.saturating_add(1);
            next = scope.borrow().parent.clone();
        }
        depth
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn same_scope(&self, other: &Environment) -> bool {
        self.scope.ptr_eq(&other.scope)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        f.debug_struct("Environment")
            .field("bindings", &scope.bindings.len())
            .field("depth", &self.depth())
            .finish()
    }
}
