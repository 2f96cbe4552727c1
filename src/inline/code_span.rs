//! Inline code tokenizer - splits a text run on single-backtick spans.

use regex::Regex;
use std::sync::LazyLock;

/// Non-greedy backtick span; no escaping of backticks inside.
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+?)`").expect("code span pattern is valid"));

/// Fragment of a text run, distinguished before further inline processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineToken<'a> {
    Text(&'a str),
    /// Content between a pair of backticks. Never re-parsed.
    Code(&'a str),
}

/// Splits `text` into text and inline code tokens, preserving order.
/// Empty text fragments between spans are not emitted.
pub fn tokenize(text: &str) -> Vec<InlineToken<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in CODE_SPAN.captures_iter(text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            tokens.push(InlineToken::Text(&text[cursor..whole.start()]));
        }
        tokens.push(InlineToken::Code(code.as_str()));
        cursor = whole.end();
    }

    if cursor < text.len() {
        tokens.push(InlineToken::Text(&text[cursor..]));
    }
    tokens
}
