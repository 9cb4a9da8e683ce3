//! Rendering AST nodes back to text.
//!
//! Infix and prefix expressions are fully parenthesised, so the output shows
//! how the parser grouped operators: `1 + 2 * 3` renders as `(1 + (2 * 3))`.

use super::{Block, Expr, ExprKind, FunctionLit, MacroLit, Program, Stmt, StmtKind};
use crate::StringInterner;

/// Render a node as source-like text. Names resolve through the interner.
pub trait Render {
    fn render(&self, interner: &StringInterner, out: &mut String);

    fn to_source(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.render(interner, &mut out);
        out
    }
}

impl Render for Program {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        for stmt in &self.statements {
            stmt.render(interner, out);
        }
    }
}

/// Statements concatenate without separators, so `{ x + 2; }` renders as
/// `(x + 2)`.
impl Render for Block {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        for stmt in &self.statements {
            stmt.render(interner, out);
        }
    }
}

impl Render for Stmt {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        match &self.kind {
            StmtKind::Let { name, value } => {
                out.push_str("let ");
                out.push_str(interner.lookup(*name));
                out.push_str(" = ");
                value.render(interner, out);
                out.push(';');
            }
            StmtKind::Return(value) => {
                out.push_str("return ");
                value.render(interner, out);
                out.push(';');
            }
            StmtKind::Expr(expr) => expr.render(interner, out),
        }
    }
}

impl Render for Expr {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        match &self.kind {
            ExprKind::Ident(name) => out.push_str(interner.lookup(*name)),
            ExprKind::Int(n) => out.push_str(&n.to_string()),
            ExprKind::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            ExprKind::Str(name) => {
                out.push('"');
                escape_into(interner.lookup(*name), '"', out);
                out.push('"');
            }
            ExprKind::Template(parts) => {
                out.push('`');
                for part in parts {
                    match &part.kind {
                        ExprKind::Str(name) => escape_into(interner.lookup(*name), '`', out),
                        ExprKind::Ident(name) => {
                            out.push('{');
                            out.push_str(interner.lookup(*name));
                            out.push('}');
                        }
                        _ => part.render(interner, out),
                    }
                }
                out.push('`');
            }
            ExprKind::Array(elements) => {
                out.push('[');
                render_list(elements, interner, out);
                out.push(']');
            }
            ExprKind::Hash(pairs) => {
                out.push('{');
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    key.render(interner, out);
                    out.push_str(": ");
                    value.render(interner, out);
                }
                out.push('}');
            }
            ExprKind::Function(func) => func.render(interner, out),
            ExprKind::Macro(mac) => mac.render(interner, out),
            ExprKind::Prefix { op, operand } => {
                out.push('(');
                out.push_str(op.as_symbol());
                operand.render(interner, out);
                out.push(')');
            }
            ExprKind::Infix { op, left, right } => {
                out.push('(');
                left.render(interner, out);
                out.push(' ');
                out.push_str(op.as_symbol());
                out.push(' ');
                right.render(interner, out);
                out.push(')');
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                out.push_str("if ");
                condition.render(interner, out);
                out.push_str(" { ");
                consequence.render(interner, out);
                out.push_str(" }");
                if let Some(alternative) = alternative {
                    out.push_str(" else { ");
                    alternative.render(interner, out);
                    out.push_str(" }");
                }
            }
            ExprKind::Call { callee, args } => {
                callee.render(interner, out);
                out.push('(');
                render_list(args, interner, out);
                out.push(')');
            }
            ExprKind::Index { collection, index } => {
                out.push('(');
                collection.render(interner, out);
                out.push('[');
                index.render(interner, out);
                out.push_str("])");
            }
            ExprKind::Error => out.push_str("<error>"),
        }
    }
}

impl Render for FunctionLit {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        out.push_str("fn(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(interner.lookup(*param));
        }
        out.push_str(") { ");
        self.body.render(interner, out);
        out.push_str(" }");
    }
}

impl Render for MacroLit {
    fn render(&self, interner: &StringInterner, out: &mut String) {
        out.push_str("macro(");
        for (i, (param, pattern)) in self.params.iter().zip(&self.patterns).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(interner.lookup(*param));
            out.push_str(": ");
            pattern.render(interner, out);
        }
        out.push_str(") { ");
        self.body.render(interner, out);
        out.push_str(" }");
    }
}

fn render_list(exprs: &[Expr], interner: &StringInterner, out: &mut String) {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        expr.render(interner, out);
    }
}

/// Escape `s` so the lexer reads it back unchanged inside `quote` delimiters.
fn escape_into(s: &str, quote: char, out: &mut String) {
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            '{' | '}' if quote == '`' => {
                out.push('\\');
                out.push(c);
            }
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}
