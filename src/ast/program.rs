use super::Duration;
use super::literal::quote;
use std::fmt;

/// A complete LOT Flux program: zero or more timed actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    pub actions: Vec<ActionDecl>,
}

/// `DEFINE ACTION <name> ON EVERY <every> DO` followed by its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionDecl {
    pub name: String,
    pub every: Duration,
    pub body: Vec<Statement>,
}

/// A statement inside an action body or a conditional branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// `IF <condition> THEN ... [ELSE ...]`. An empty `else_branch` means no `ELSE`.
    If {
        condition: String,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
    /// `PUBLISH TOPIC "<topic>" "<payload>"`
    Publish { topic: String, payload: String },
}

impl Program {
    pub fn new(actions: Vec<ActionDecl>) -> Self {
        Self { actions }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Total number of statements across all actions, nested ones included.
    pub fn statement_count(&self) -> usize {
        self.actions
            .iter()
            .map(|action| count_statements(&action.body))
            .sum()
    }

    /// Returns a tree view of the program, useful for debugging the lowering step.
    pub fn display_tree(&self) -> DisplayProgram<'_> {
        DisplayProgram { program: self }
    }
}

fn count_statements(statements: &[Statement]) -> usize {
    statements
        .iter()
        .map(|stmt| match stmt {
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => 1 + count_statements(then_branch) + count_statements(else_branch),
            Statement::Publish { .. } => 1,
        })
        .sum()
}

/// Renders the program as DSL source with the default two-space indentation.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::compiler::emitter::Emitter::default().emit_program(self))
    }
}

/// A wrapper to display a program as an indented tree.
pub struct DisplayProgram<'a> {
    program: &'a Program,
}

impl<'a> fmt::Display for DisplayProgram<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program ({} actions)", self.program.actions.len())?;
        let count = self.program.actions.len();
        for (i, action) in self.program.actions.iter().enumerate() {
            let is_last = i + 1 == count;
            writeln!(
                f,
                "{}Action {} (every {})",
                if is_last { "└── " } else { "├── " },
                action.name,
                action.every
            )?;
            let child_prefix = if is_last { "    " } else { "│   " };
            self.fmt_statements(&action.body, f, child_prefix)?;
        }
        Ok(())
    }
}

impl<'a> DisplayProgram<'a> {
    fn fmt_statements(
        &self,
        statements: &[Statement],
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
    ) -> fmt::Result {
        let count = statements.len();
        for (i, stmt) in statements.iter().enumerate() {
            self.fmt_as_tree(stmt, f, prefix, i + 1 == count)?;
        }
        Ok(())
    }

    fn fmt_as_tree(
        &self,
        stmt: &Statement,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });

        match stmt {
            Statement::Publish { topic, payload } => {
                writeln!(f, "Publish {} {}", quote(topic), quote(payload))?;
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "If {}", condition)?;
                let has_else = !else_branch.is_empty();
                self.fmt_branch(f, "Then", then_branch, &child_prefix, !has_else)?;
                if has_else {
                    self.fmt_branch(f, "Else", else_branch, &child_prefix, true)?;
                }
            }
        }
        Ok(())
    }

    fn fmt_branch(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        statements: &[Statement],
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        writeln!(f, "{}{}{}", prefix, if is_last { "└── " } else { "├── " }, label)?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        self.fmt_statements(statements, f, &child_prefix)
    }
}
