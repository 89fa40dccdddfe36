//! String literal and identifier rules shared by the emitter and the DSL reader.

/// Wraps `value` in double quotes, escaping characters that would end the literal
/// or break the line structure of the program.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Reads one quoted literal from the start of `input`.
///
/// Returns the decoded value and the text following the closing quote.
pub fn unquote(input: &str) -> Result<(String, &str), String> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        Some((_, c)) => return Err(format!("expected '\"', found '{}'", c)),
        None => return Err("expected '\"', found end of line".to_string()),
    }

    let mut value = String::new();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Ok((value, &input[idx + c.len_utf8()..])),
            '\\' => match chars.next() {
                Some((_, '"')) => value.push('"'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, other)) => return Err(format!("unknown escape sequence '\\{}'", other)),
                None => break,
            },
            other => value.push(other),
        }
    }
    Err("unterminated string literal".to_string())
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
