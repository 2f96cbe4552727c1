//! Inline rendering - turns one run of text into safe HTML.

mod code_span;
mod emphasis;
mod link;
mod placeholder;

use crate::render::escape_html;

pub use self::code_span::{tokenize, InlineToken};
pub use self::emphasis::render_emphasis;
pub use self::link::{find_links, link_html, sanitize_url, LinkMatch};
pub use self::placeholder::{strip_markers, PlaceholderMap};

/// Renderer for inline markup within a single line or run.
pub struct InlineRenderer;

impl InlineRenderer {
    /// Renders inline code, links and emphasis; everything else is escaped.
    pub fn render(raw: &str) -> String {
        let raw = strip_markers(raw);
        let mut out = String::with_capacity(raw.len());

        for token in tokenize(&raw) {
            match token {
                InlineToken::Code(code) => {
                    out.push_str("<code>");
                    out.push_str(&escape_html(code));
                    out.push_str("</code>");
                }
                InlineToken::Text(text) => out.push_str(&Self::render_text(text)),
            }
        }
        out
    }

    fn render_text(text: &str) -> String {
        let mut placeholders = PlaceholderMap::new();
        let linked = link::extract_links(text, &mut placeholders);
        let escaped = escape_html(&linked);
        let emphasized = render_emphasis(&escaped);
        let html = placeholders.substitute(&emphasized);
        debug_assert_eq!(placeholders.pending(), 0, "every link placeholder is restored");
        html
    }
}
