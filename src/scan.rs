//! Simple line scanner.
//!
//! Splits on whitespace; a run quoted with `'` or `"` is one token with the
//! quotes removed. There are no escapes.

/// Split a complete line into tokens.
pub fn split_line(line: &str) -> Vec<String> {
    scan(line).0
}

/// Split a line being edited. The last token is the fragment under the
/// cursor: empty when the line ends in whitespace, and still carrying its
/// opening quote when that quote is unterminated.
pub fn split_for_completion(line: &str) -> Vec<String> {
    let (mut tokens, open, ended_in_space) = scan(line);
    match open {
        Some((quote, partial)) => {
            tokens.pop();
            tokens.push(format!("{}{}", quote, partial));
        }
        None if ended_in_space || tokens.is_empty() => tokens.push(String::new()),
        None => {}
    }
    tokens
}

/// Drop a leading quote from a completion fragment.
pub fn strip_quote(fragment: &str) -> &str {
    fragment
        .strip_prefix('"')
        .or_else(|| fragment.strip_prefix('\''))
        .unwrap_or(fragment)
}

/// Tokens, the unterminated quote (with its contents) if any, and whether
/// the line ended outside a token.
fn scan(line: &str) -> (Vec<String>, Option<(char, String)>, bool) {
    let mut tokens = Vec::new();
    let mut current: Option<String> = None;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.get_or_insert_with(String::new).push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                current.get_or_insert_with(String::new);
            }
            None if c.is_whitespace() => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            None => current.get_or_insert_with(String::new).push(c),
        }
    }

    let ended_in_space = current.is_none();
    let open = match (quote, &current) {
        (Some(q), Some(partial)) => Some((q, partial.clone())),
        _ => None,
    };
    if let Some(token) = current {
        tokens.push(token);
    }
    (tokens, open, ended_in_space)
}
