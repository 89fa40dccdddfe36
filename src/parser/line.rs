use crate::error::ParseError;

/// A non-blank source line with its indentation resolved to a nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Line<'a> {
    /// 1-based.
    pub number: usize,
    pub depth: usize,
    /// Content without indentation or trailing whitespace.
    pub text: &'a str,
}

pub(super) fn scan_lines(source: &str, indent_width: usize) -> Result<Vec<Line<'_>>, ParseError> {
    let mut lines = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let content = raw.trim_start_matches(' ');
        let leading = raw.len() - content.len();
        if content.starts_with(char::is_whitespace) {
            return Err(ParseError::InvalidIndentation {
                line: number,
                message: "indentation must use spaces only".to_string(),
            });
        }
        if leading % indent_width != 0 {
            return Err(ParseError::InvalidIndentation {
                line: number,
                message: format!(
                    "indentation of {} spaces is not a multiple of {}",
                    leading, indent_width
                ),
            });
        }

        lines.push(Line {
            number,
            depth: leading / indent_width,
            text: content.trim_end(),
        });
    }
    Ok(lines)
}

pub(super) struct LineCursor<'s, 'a> {
    lines: &'s [Line<'a>],
    pos: usize,
}

impl<'s, 'a> LineCursor<'s, 'a> {
    pub(super) fn new(lines: &'s [Line<'a>]) -> Self {
        Self { lines, pos: 0 }
    }

    pub(super) fn peek(&self) -> Option<&'s Line<'a>> {
        self.lines.get(self.pos)
    }

    pub(super) fn advance(&mut self) {
        self.pos += 1;
    }

    pub(super) fn next_line(&mut self) -> Option<&'s Line<'a>> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }
}
