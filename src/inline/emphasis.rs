//! Emphasis transforms over already-escaped text.
//!
//! Applied in a fixed order: `~~x~~`, `**x**`, `*x*`, `_x_`. Each pass only
//! emits tags free of the later delimiters, so later passes never re-match
//! what an earlier one consumed.

use regex::Regex;
use std::sync::LazyLock;

static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").expect("strikethrough pattern is valid"));

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("strong pattern is valid"));

/// Applies all emphasis transforms to escaped text.
pub fn render_emphasis(escaped: &str) -> String {
    let out = STRIKETHROUGH.replace_all(escaped, "<del>$1</del>");
    let out = STRONG.replace_all(&out, "<strong>$1</strong>");
    let out = wrap_single_delimited(&out, '*');
    wrap_single_delimited(&out, '_')
}

/// Wraps `<delim>x<delim>` in `<em>`.
///
/// The content is at least two characters, may not contain the delimiter,
/// may not start or end with whitespace, and neither delimiter may touch
/// another copy of itself on the outside, so `2*3*4` and `my_x_var` stay
/// literal. Runs in one pass: a failed opener's closing candidate is the next
/// opener tried.
fn wrap_single_delimited(text: &str, delim: char) -> String {
    if !text.contains(delim) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut emitted = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != delim {
            i += 1;
            continue;
        }

        let open = i;
        let Some(close) = (open + 1..chars.len()).find(|&j| chars[j] == delim) else {
            break;
        };

        let preceded_by_delim = open > 0 && chars[open - 1] == delim;
        let first = chars[open + 1];
        let last = chars[close - 1];
        let followed_by_delim = chars.get(close + 1) == Some(&delim);

        if preceded_by_delim
            || close < open + 3
            || first.is_whitespace()
            || last.is_whitespace()
            || followed_by_delim
        {
            i = close;
            continue;
        }

        out.extend(&chars[emitted..open]);
        out.push_str("<em>");
        out.extend(&chars[open + 1..close]);
        out.push_str("</em>");
        emitted = close + 1;
        i = close + 1;
    }

    out.extend(&chars[emitted..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_forms() {
        assert_eq!(
            render_emphasis("~~old~~ **bold** *it* _also_"),
            "<del>old</del> <strong>bold</strong> <em>it</em> <em>also</em>"
        );
    }

    #[test]
    fn test_single_char_content_is_literal() {
        assert_eq!(render_emphasis("*a*"), "*a*");
        assert_eq!(render_emphasis("2*3*4"), "2*3*4");
        assert_eq!(render_emphasis("x_1_ and y_2_"), "x_1_ and y_2_");
        assert_eq!(render_emphasis("use my_x_var here"), "use my_x_var here");
        assert_eq!(render_emphasis("_a_b_"), "_a_b_");
    }

    #[test]
    fn test_single_char_italic_inside_bold_is_literal() {
        assert_eq!(render_emphasis("**a*b*c**"), "<strong>a*b*c</strong>");
    }

    #[test]
    fn test_two_char_content() {
        assert_eq!(render_emphasis("*ab* _cd_"), "<em>ab</em> <em>cd</em>");
    }

    #[test]
    fn test_whitespace_inside_delimiters_is_literal() {
        assert_eq!(render_emphasis("a * b * c"), "a * b * c");
        assert_eq!(render_emphasis("*a *"), "*a *");
        assert_eq!(render_emphasis("_ a_"), "_ a_");
    }

    #[test]
    fn test_doubled_delimiter_is_not_italic() {
        assert_eq!(render_emphasis("__init__"), "__init__");
    }

    #[test]
    fn test_unclosed_markers_are_literal() {
        assert_eq!(render_emphasis("**open and *half"), "**open and *half");
        assert_eq!(render_emphasis("~~gone"), "~~gone");
    }

    #[test]
    fn test_bold_italic_nesting() {
        assert_eq!(
            render_emphasis("**bold *and* more**"),
            "<strong>bold <em>and</em> more</strong>"
        );
    }

    #[test]
    fn test_failed_opener_retries_at_next_delimiter() {
        assert_eq!(render_emphasis("a * b *cd*"), "a * b <em>cd</em>");
    }

    #[test]
    fn test_escaped_entities_untouched() {
        assert_eq!(
            render_emphasis("&lt;b&gt; &#39;x&#39; *y*"),
            "&lt;b&gt; &#39;x&#39; <em>y</em>"
        );
    }
}
