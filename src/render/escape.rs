/// Escapes the five HTML-significant characters for element content.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    push_escaped(&mut escaped, value, false);
    escaped
}

/// Escapes a value for a double-quoted attribute. Same as [`escape_html`]
/// plus backticks, which some template layers treat as attribute quotes.
pub fn escape_html_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    push_escaped(&mut escaped, value, true);
    escaped
}

fn push_escaped(out: &mut String, value: &str, attr: bool) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' if attr => out.push_str("&#96;"),
            _ => out.push(ch),
        }
    }
}
