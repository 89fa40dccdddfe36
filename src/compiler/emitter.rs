use crate::ast::literal::quote;
use crate::ast::{ActionDecl, Program, Statement};

/// Widest indentation step the emitter accepts.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Writes a lowered `Program` as DSL source text.
///
/// Action bodies start at column zero; each `IF` branch is one level deeper than
/// its `IF` line. Actions are separated by a single blank line and every line,
/// including the last, ends with `\n`.
#[derive(Debug, Clone)]
pub struct Emitter {
    indent_width: usize,
}

impl Default for Emitter {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl Emitter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.clamp(1, MAX_INDENT_WIDTH),
        }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn emit_program(&self, program: &Program) -> String {
        let mut out = String::new();
        for (i, action) in program.actions.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.emit_action(action, &mut out);
        }
        out
    }

    fn emit_action(&self, action: &ActionDecl, out: &mut String) {
        out.push_str(&format!(
            "DEFINE ACTION {} ON EVERY {} DO\n",
            action.name, action.every
        ));
        self.emit_statements(&action.body, 0, out);
    }

    fn emit_statements(&self, statements: &[Statement], depth: usize, out: &mut String) {
        for stmt in statements {
            self.emit_statement(stmt, depth, out);
        }
    }

    fn emit_statement(&self, stmt: &Statement, depth: usize, out: &mut String) {
        let indent = " ".repeat(depth * self.indent_width);
        match stmt {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push_str(&format!("{}IF {} THEN\n", indent, condition));
                self.emit_statements(then_branch, depth + 1, out);
                if !else_branch.is_empty() {
                    out.push_str(&format!("{}ELSE\n", indent));
                    self.emit_statements(else_branch, depth + 1, out);
                }
            }
            Statement::Publish { topic, payload } => {
                out.push_str(&format!(
                    "{}PUBLISH TOPIC {} {}\n",
                    indent,
                    quote(topic),
                    quote(payload)
                ));
            }
        }
    }
}
