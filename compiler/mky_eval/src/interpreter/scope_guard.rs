//! RAII guard for call frames.
//!
//! Entering a call swaps the interpreter's environment for the callee's
//! scope and bumps the call depth. Dropping the [`ScopedInterpreter`] puts
//! both back, on every exit path including `?` and unwinding.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{recursion_limit_exceeded, EvalError};

/// Interpreter running inside a call frame.
///
/// Derefs to the interpreter, so evaluation methods are called on the guard
/// directly.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    saved_env: Option<Environment>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        if let Some(env) = self.saved_env.take() {
            self.interpreter.env = env;
        }
        self.interpreter.call_depth = self.interpreter.call_depth.saturating_sub(1);
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Enter a call frame evaluating in `env`.
    ///
    /// Fails once the configured maximum call depth is reached.
    pub fn enter_call(&mut self, env: Environment) -> Result<ScopedInterpreter<'_, 'a>, EvalError> {
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }
        self.call_depth = self.call_depth.saturating_add(1);
        let saved_env = std::mem::replace(&mut self.env, env);
        Ok(ScopedInterpreter {
            interpreter: self,
            saved_env: Some(saved_env),
        })
    }
}
