//! Link recognition and URL sanitizing.
//!
//! Two syntaxes are recognized: book references `[[Title:42]]` that point at
//! the internal book detail page, and conventional `[label](url)` links whose
//! URL must pass [`sanitize_url`].

use super::emphasis::render_emphasis;
use super::placeholder::PlaceholderMap;
use crate::render::{escape_html, escape_html_attr};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Book reference first so it wins when both forms start at one position.
/// The separator may be an ASCII or a full-width colon.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]\n:：]+?)\s*[:：]\s*([0-9]+)\]\]|\[([^\]\n]+)\]\(([^)\n]+)\)")
        .expect("link pattern is valid")
});

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMatch<'a> {
    Book { title: &'a str, id: &'a str },
    Markdown { label: &'a str, url: &'a str },
}

/// Validates a link target against the scheme allow-list.
///
/// Site-relative paths and fragments pass through unchanged; anything else must
/// parse as an absolute URL with an allowed scheme and is returned in its
/// normalized form.
pub fn sanitize_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with('/') || url.starts_with('#') {
        return Some(url.to_string());
    }

    let parsed = Url::parse(url).ok()?;
    // Url::parse lowercases the scheme.
    if ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        Some(parsed.into())
    } else {
        None
    }
}

/// Finds every link in `text`, left to right, without overlaps.
pub fn find_links(text: &str) -> Vec<(std::ops::Range<usize>, LinkMatch<'_>)> {
    LINK.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let link = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
                (Some(title), Some(id), _, _) => LinkMatch::Book {
                    title: title.as_str(),
                    id: id.as_str(),
                },
                (_, _, Some(label), Some(url)) => LinkMatch::Markdown {
                    label: label.as_str(),
                    url: url.as_str(),
                },
                _ => return None,
            };
            Some((whole.range(), link))
        })
        .collect()
}

/// Replaces links in `text` with placeholders holding their anchor HTML.
///
/// Links whose URL is rejected are rewritten to the literal `label (url)`
/// instead, left raw so they get escaped along with the surrounding text.
pub fn extract_links(text: &str, placeholders: &mut PlaceholderMap) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (span, link) in find_links(text) {
        out.push_str(&text[cursor..span.start]);
        match link_html(link) {
            Some(html) => out.push_str(&placeholders.insert(html)),
            None => {
                if let LinkMatch::Markdown { label, url } = link {
                    tracing::debug!(url, "Rejected link target");
                    out.push_str(label);
                    out.push_str(" (");
                    out.push_str(url);
                    out.push(')');
                }
            }
        }
        cursor = span.end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Builds anchor HTML for a link, or `None` when its URL is rejected.
pub fn link_html(link: LinkMatch<'_>) -> Option<String> {
    match link {
        LinkMatch::Book { title, id } => {
            let id = escape_html_attr(id.trim());
            let title_html = render_emphasis(&escape_html(title.trim()));
            Some(format!(
                "<a class=\"ai-book-link\" href=\"/books/{id}/\" data-book-id=\"{id}\">{title_html}</a>"
            ))
        }
        LinkMatch::Markdown { label, url } => {
            let safe_url = sanitize_url(url)?;
            let label_html = render_emphasis(&escape_html(label));
            let attrs = if is_web_url(&safe_url) {
                " target=\"_blank\" rel=\"noopener noreferrer\""
            } else {
                ""
            };
            Some(format!(
                "<a href=\"{}\"{attrs}>{label_html}</a>",
                escape_html_attr(&safe_url)
            ))
        }
    }
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_relative_and_fragment() {
        assert_eq!(sanitize_url(" /books/3/ "), Some("/books/3/".to_string()));
        assert_eq!(sanitize_url("#top"), Some("#top".to_string()));
    }

    #[test]
    fn test_sanitize_normalizes_absolute() {
        assert_eq!(
            sanitize_url("HTTPS://Example.com"),
            Some("https://example.com/".to_string())
        );
        assert_eq!(
            sanitize_url("mailto:desk@library.org"),
            Some("mailto:desk@library.org".to_string())
        );
        assert_eq!(sanitize_url("tel:+15551234"), Some("tel:+15551234".to_string()));
    }

    #[test]
    fn test_sanitize_rejects() {
        assert_eq!(sanitize_url(""), None);
        assert_eq!(sanitize_url("   "), None);
        assert_eq!(sanitize_url("javascript:alert(1)"), None);
        assert_eq!(sanitize_url("JavaScript:alert(1)"), None);
        assert_eq!(sanitize_url("data:text/html,<script>"), None);
        assert_eq!(sanitize_url("vbscript:msgbox"), None);
        assert_eq!(sanitize_url("books/3"), None);
        assert_eq!(sanitize_url("ftp://example.com"), None);
    }

    #[test]
    fn test_book_reference_wins_over_markdown_link() {
        let links = find_links("[[Dune:42]]");
        assert_eq!(
            links,
            vec![(0..11, LinkMatch::Book { title: "Dune", id: "42" })]
        );
    }

    #[test]
    fn test_book_reference_full_width_colon_and_spaces() {
        let links = find_links("see [[ 三体 ： 7]]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].1, LinkMatch::Book { title: " 三体", id: "7" });
    }

    #[test]
    fn test_book_reference_requires_digits() {
        assert!(find_links("[[Dune:abc]]").is_empty());
    }

    #[test]
    fn test_markdown_link_url_stops_at_paren() {
        let links = find_links("[x](javascript:alert(1))");
        assert_eq!(
            links,
            vec![(
                0..23,
                LinkMatch::Markdown {
                    label: "x",
                    url: "javascript:alert(1"
                }
            )]
        );
    }

    #[test]
    fn test_book_link_html() {
        let html = link_html(LinkMatch::Book {
            title: " *Dune* ",
            id: "42",
        });
        assert_eq!(
            html.as_deref(),
            Some(
                "<a class=\"ai-book-link\" href=\"/books/42/\" data-book-id=\"42\"><em>Dune</em></a>"
            )
        );
    }

    #[test]
    fn test_external_link_opens_in_new_tab() {
        let html = link_html(LinkMatch::Markdown {
            label: "site",
            url: "https://example.com/a?b=1&c=2",
        });
        assert_eq!(
            html.as_deref(),
            Some(
                "<a href=\"https://example.com/a?b=1&amp;c=2\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
            )
        );
    }

    #[test]
    fn test_internal_link_stays_in_tab() {
        let html = link_html(LinkMatch::Markdown {
            label: "shelf",
            url: "/books/",
        });
        assert_eq!(html.as_deref(), Some("<a href=\"/books/\">shelf</a>"));
    }

    #[test]
    fn test_extract_rejected_link_left_as_text() {
        let mut map = PlaceholderMap::new();
        let out = extract_links("go [x](javascript:alert(1)) now", &mut map);
        assert_eq!(out, "go x (javascript:alert(1)) now");
        assert_eq!(map.pending(), 0);
    }
}
