//! Tree-walking interpreter.
//!
//! Evaluation is a recursive match over AST node kinds. `return` travels on
//! the error channel and is caught at call boundaries and at the program
//! boundary. Every expression runs under [`ensure_sufficient_stack`], so deep
//! nesting grows the stack instead of overflowing it.

mod builder;
mod function_call;
mod scope_guard;

use mky_ir::{Block, Expr, ExprKind, Name, Program, Stmt, StmtKind, StringInterner};
use mky_stack::ensure_sufficient_stack;

use crate::builtins;
use crate::environment::Environment;
use crate::errors::{
    catch_return, eval_parse_failed, malformed_expression, not_indexable, undefined_variable,
    unsupported_index, unusable_hash_key, EvalError, EvalResult,
};
use crate::operators::evaluate_binary;
use crate::print_handler::SharedPrintHandler;
use crate::unary_operators::evaluate_unary;
use crate::value::{HashPair, HashPairs, Value};

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

/// Default bound on nested function and macro calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Tree-walking interpreter.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    /// Current scope. Swapped for the callee's scope during calls.
    pub(crate) env: Environment,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
    pub(crate) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with a fresh root environment, printing to stdout.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Evaluate a whole program. A top-level `return` ends the program with
    /// its value; an empty program is `null`.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        catch_return(self.eval_statements(&program.statements))
    }

    /// Lex, parse and evaluate `source` in the current environment.
    ///
    /// Parse errors are reported as a single evaluation error naming the
    /// first one. Each re-entry counts as a call frame, so `eval` nested in
    /// evaluated text hits the call depth limit like recursion does.
    pub fn eval_source(&mut self, source: &str) -> EvalResult {
        let tokens = mky_lexer::lex(source, self.interner);
        let output = mky_parse::parse(&tokens, self.interner);
        if let Some(first) = output.errors.first() {
            tracing::debug!(errors = output.errors.len(), "eval input did not parse");
            return Err(eval_parse_failed(first.to_string()));
        }
        tracing::debug!(statements = output.program.statements.len(), "eval re-entry");
        let env = self.env.clone();
        let mut scoped = self.enter_call(env)?;
        scoped.eval_program(&output.program)
    }

    /// Evaluate a block in the current scope. Does not catch `return`.
    pub fn eval_block(&mut self, block: &Block) -> EvalResult {
        self.eval_statements(&block.statements)
    }

    fn eval_statements(&mut self, statements: &[Stmt]) -> EvalResult {
        let mut result = Value::NULL;
        for stmt in statements {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult {
        tracing::trace!(span = ?stmt.span, "statement");
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value)?;
                Ok(self.env.bind(*name, value))
            }
            StmtKind::Return(value) => {
                let value = self.eval_expr(value)?;
                Err(EvalError::return_with(value))
            }
            StmtKind::Expr(expr) => self.eval_expr(expr),
        }
    }

    /// Evaluate an expression. Errors carry the span of the innermost
    /// expression that failed.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr)).map_err(|err| {
            if err.is_control_flow() {
                err
            } else {
                err.with_span(expr.span)
            }
        })
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Ident(name) => self.lookup(*name),
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Bool(b) => Ok(Value::bool(*b)),
            ExprKind::Str(text) => Ok(Value::string(self.interner.lookup(*text))),
            ExprKind::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&self.eval_expr(part)?.to_string());
                }
                Ok(Value::string(out))
            }
            ExprKind::Array(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval_expr(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Hash(pairs) => self.eval_hash(pairs),
            ExprKind::Function(def) => Ok(Value::function(def.clone(), self.env.clone())),
            ExprKind::Macro(def) => self.eval_macro_literal(def),
            ExprKind::Prefix { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(&value, *op)
            }
            ExprKind::Infix { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expr(condition)?;
                match (condition.truthiness(), alternative) {
                    (Some(true), _) => self.eval_block(consequence),
                    (Some(false), Some(alternative)) => self.eval_block(alternative),
                    (Some(false), None) | (None, _) => Ok(Value::NULL),
                }
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                self.eval_call(&callee, args)
            }
            ExprKind::Index { collection, index } => {
                let collection = self.eval_expr(collection)?;
                let index = self.eval_expr(index)?;
                eval_index(&collection, &index)
            }
            ExprKind::Error => Err(malformed_expression()),
        }
    }

    /// Environment first, then builtins.
    fn lookup(&self, name: Name) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        let text = self.interner.lookup(name);
        builtins::lookup(text).ok_or_else(|| undefined_variable(text))
    }

    /// Keys are evaluated before their values; later duplicates win.
    fn eval_hash(&mut self, pairs: &[(Expr, Expr)]) -> EvalResult {
        let mut map = HashPairs::default();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr)?;
            let Some(hash_key) = key.hash_key() else {
                return Err(unusable_hash_key(key.type_name()).with_span(key_expr.span));
            };
            let value = self.eval_expr(value_expr)?;
            map.insert(hash_key, HashPair { key, value });
        }
        Ok(Value::hash(map))
    }
}

/// `collection[index]`. Out-of-range and missing keys give `null`.
fn eval_index(collection: &Value, index: &Value) -> EvalResult {
    match (collection, index) {
        (Value::Array(items), Value::Int(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::NULL)),
        (Value::Str(s), Value::Int(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| s.chars().nth(i))
            .map_or(Value::NULL, |c| Value::string(c.to_string()))),
        (Value::Array(_) | Value::Str(_), other) => Err(unsupported_index(other.type_name())),
        (Value::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => Ok(pairs
                .get(&hash_key)
                .map_or(Value::NULL, |pair| pair.value.clone())),
            None => Err(unsupported_index(key.type_name())),
        },
        (other, _) => Err(not_indexable(other.type_name())),
    }
}
