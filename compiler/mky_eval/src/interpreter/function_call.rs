//! Call dispatch: builtins, closures, macros.

use mky_ir::Expr;

use super::Interpreter;
use crate::errors::{catch_return, missing_arguments, not_callable, EvalError, EvalResult};
use crate::value::{FunctionValue, Value};

impl Interpreter<'_> {
    /// Call `callee` with unevaluated argument expressions.
    ///
    /// Arguments are evaluated in the caller's scope. Builtins see every
    /// argument; closures only the first `params.len()`; macros take their
    /// single argument through the macro expander.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = callee.type_name()))]
    pub(super) fn eval_call(&mut self, callee: &Value, args: &[Expr]) -> EvalResult {
        match callee {
            Value::Builtin(builtin) => {
                let values = self.eval_args(args)?;
                (builtin.func)(self, &values)
            }
            Value::Function(func) => self.call_function(callee, func, args),
            Value::Macro(mac) => self.call_macro(mac, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// Too few arguments is an error; extra arguments are not evaluated.
    fn call_function(&mut self, callee: &Value, func: &FunctionValue, args: &[Expr]) -> EvalResult {
        let params = &func.def.params;
        if args.len() < params.len() {
            return Err(missing_arguments(
                callee.to_string(),
                params.len().saturating_sub(args.len()),
            ));
        }

        let frame = func.env.child();
        for (param, arg) in params.iter().zip(args) {
            let value = self.eval_expr(arg)?;
            frame.bind(*param, value);
        }

        let mut scoped = self.enter_call(frame)?;
        catch_return(scoped.eval_block(&func.def.body))
    }
}
