//! Reader for LOT Flux DSL text.
//!
//! The grammar has no block terminators, so structure comes from indentation:
//! action bodies sit at depth zero and each `IF` branch is one level deeper than
//! its `IF` line. Blank lines are ignored.

mod line;

use crate::ast::literal::{is_identifier, unquote};
use crate::ast::{ActionDecl, Duration, Program, Statement};
use crate::error::ParseError;
use line::{Line, LineCursor, scan_lines};

/// Parses DSL text written with the default two-space indentation.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    Parser::default().parse(source)
}

#[derive(Debug, Clone)]
pub struct Parser {
    indent_width: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per nesting level. Values below one are raised to one.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width.max(1);
        self
    }

    pub fn parse(&self, source: &str) -> Result<Program, ParseError> {
        let lines = scan_lines(source, self.indent_width)?;
        let mut cursor = LineCursor::new(&lines);
        let mut actions = Vec::new();

        while let Some(line) = cursor.next_line() {
            if line.depth != 0 {
                return Err(ParseError::InvalidIndentation {
                    line: line.number,
                    message: "an action header must not be indented".to_string(),
                });
            }
            actions.push(self.parse_action(line, &mut cursor)?);
        }

        tracing::debug!(actions = actions.len(), "parsed LOT Flux program");
        Ok(Program::new(actions))
    }

    fn parse_action(&self, header: &Line, cursor: &mut LineCursor) -> Result<ActionDecl, ParseError> {
        let tokens: Vec<&str> = header.text.split_whitespace().collect();
        let expect = |index: usize, keyword: &str| -> Result<(), ParseError> {
            match tokens.get(index) {
                Some(token) if *token == keyword => Ok(()),
                Some(token) => Err(ParseError::unexpected(header.number, keyword, *token)),
                None => Err(ParseError::unexpected(header.number, keyword, "end of line")),
            }
        };

        expect(0, "DEFINE")?;
        expect(1, "ACTION")?;
        let name = match tokens.get(2) {
            Some(name) if is_identifier(name) => name.to_string(),
            Some(other) => return Err(ParseError::unexpected(header.number, "action name", *other)),
            None => return Err(ParseError::unexpected(header.number, "action name", "end of line")),
        };
        expect(3, "ON")?;
        expect(4, "EVERY")?;
        let every: Duration = match tokens.get(5) {
            Some(text) => text.parse().map_err(|_| ParseError::InvalidDuration {
                line: header.number,
                text: text.to_string(),
            })?,
            None => return Err(ParseError::unexpected(header.number, "duration", "end of line")),
        };
        expect(6, "DO")?;
        if let Some(extra) = tokens.get(7) {
            return Err(ParseError::unexpected(header.number, "end of line", *extra));
        }

        let body = self.parse_block(cursor, 0)?;
        if body.is_empty() {
            return Err(ParseError::EmptyBlock {
                line: header.number,
                keyword: "DO",
            });
        }
        Ok(ActionDecl { name, every, body })
    }

    /// Parses consecutive statements at exactly `depth`, stopping at a shallower
    /// line, an `ELSE`, or (at depth zero) the next action header.
    fn parse_block(&self, cursor: &mut LineCursor, depth: usize) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while let Some(line) = cursor.peek() {
            if line.depth < depth || line.text == "ELSE" {
                break;
            }
            if line.depth > depth {
                return Err(ParseError::InvalidIndentation {
                    line: line.number,
                    message: format!("unexpected indentation (expected depth {})", depth),
                });
            }
            if depth == 0 && line.text.starts_with("DEFINE ") {
                break;
            }
            cursor.advance();
            statements.push(self.parse_statement(line, cursor, depth)?);
        }
        Ok(statements)
    }

    fn parse_statement(
        &self,
        line: &Line,
        cursor: &mut LineCursor,
        depth: usize,
    ) -> Result<Statement, ParseError> {
        if let Some(rest) = line.text.strip_prefix("IF ") {
            return self.parse_if(line, rest, cursor, depth);
        }
        if let Some(rest) = line.text.strip_prefix("PUBLISH TOPIC") {
            return self.parse_publish(line, rest);
        }
        let found = line.text.split_whitespace().next().unwrap_or_default();
        Err(ParseError::unexpected(line.number, "IF or PUBLISH TOPIC", found))
    }

    fn parse_if(
        &self,
        line: &Line,
        rest: &str,
        cursor: &mut LineCursor,
        depth: usize,
    ) -> Result<Statement, ParseError> {
        let condition = rest
            .strip_suffix("THEN")
            .filter(|cond| cond.is_empty() || cond.ends_with(char::is_whitespace))
            .ok_or_else(|| ParseError::unexpected(line.number, "THEN at end of line", line.text))?
            .trim();
        if condition.is_empty() {
            return Err(ParseError::unexpected(line.number, "condition", "THEN"));
        }

        let then_branch = self.parse_block(cursor, depth + 1)?;
        if then_branch.is_empty() {
            return Err(ParseError::EmptyBlock {
                line: line.number,
                keyword: "THEN",
            });
        }

        let mut else_branch = Vec::new();
        if let Some(next) = cursor.peek() {
            if next.depth == depth && next.text == "ELSE" {
                cursor.advance();
                else_branch = self.parse_block(cursor, depth + 1)?;
                if else_branch.is_empty() {
                    return Err(ParseError::EmptyBlock {
                        line: next.number,
                        keyword: "ELSE",
                    });
                }
            }
        }

        Ok(Statement::If {
            condition: condition.to_string(),
            then_branch,
            else_branch,
        })
    }

    fn parse_publish(&self, line: &Line, rest: &str) -> Result<Statement, ParseError> {
        let literal_error = |message: String| ParseError::InvalidStringLiteral {
            line: line.number,
            message,
        };

        let rest = require_space(line, rest, "topic")?;
        let (topic, rest) = unquote(rest).map_err(&literal_error)?;
        let rest = require_space(line, rest, "payload")?;
        let (payload, rest) = unquote(rest).map_err(&literal_error)?;
        if !rest.trim().is_empty() {
            return Err(ParseError::unexpected(line.number, "end of line", rest.trim()));
        }

        Ok(Statement::Publish { topic, payload })
    }
}

/// Consumes the whitespace separating two tokens, failing when there is none.
fn require_space<'a>(line: &Line, rest: &'a str, next: &str) -> Result<&'a str, ParseError> {
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        let found = if rest.is_empty() { "end of line" } else { rest };
        return Err(ParseError::unexpected(
            line.number,
            &format!("space before {}", next),
            found,
        ));
    }
    Ok(trimmed)
}
