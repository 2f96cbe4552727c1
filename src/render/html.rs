use super::escape::{escape_html, escape_html_attr};
use super::Renderer;
use crate::core::ast::{BlockNode, DocumentAst};
use crate::inline::InlineRenderer;
use crate::parser::{normalize_newlines, BlockScanner};

/// Renders block units to an HTML fragment with no separators between blocks.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    max_quote_depth: usize,
    quote_depth: usize,
}

impl HtmlRenderer {
    /// `max_quote_depth` is how many nested blockquote levels are re-scanned
    /// as markdown; a quote past it renders its lines as one paragraph.
    pub fn new(max_quote_depth: usize) -> Self {
        Self {
            max_quote_depth,
            quote_depth: 0,
        }
    }

    fn render_block(&self, block: &BlockNode, out: &mut String) {
        match block {
            BlockNode::Paragraph(lines) => {
                out.push_str("<p>");
                out.push_str(&render_lines(lines));
                out.push_str("</p>");
            }
            BlockNode::List { kind, items } => {
                let tag = kind.tag();
                out.push_str(&format!("<{tag}>"));
                for item in items {
                    out.push_str("<li>");
                    out.push_str(&InlineRenderer::render(item));
                    out.push_str("</li>");
                }
                out.push_str(&format!("</{tag}>"));
            }
            BlockNode::CodeBlock { lang, lines } => {
                let class_attr = match lang.as_deref().map(str::trim) {
                    Some(lang) if !lang.is_empty() => {
                        format!(" class=\"language-{}\"", escape_html_attr(lang))
                    }
                    _ => String::new(),
                };
                out.push_str(&format!(
                    "<pre><code{class_attr}>{}</code></pre>",
                    escape_html(&lines.join("\n"))
                ));
            }
            BlockNode::Blockquote(lines) => {
                out.push_str("<blockquote>");
                out.push_str(&self.render_quote(lines));
                out.push_str("</blockquote>");
            }
            BlockNode::Heading { level, text } => {
                out.push_str(&format!(
                    "<h{level}>{}</h{level}>",
                    InlineRenderer::render(text)
                ));
            }
            BlockNode::HorizontalRule => out.push_str("<hr />"),
        }
    }

    fn render_quote(&self, lines: &[String]) -> String {
        let depth = self.quote_depth + 1;
        if depth > self.max_quote_depth {
            tracing::warn!(
                depth,
                max_quote_depth = self.max_quote_depth,
                "Blockquote nesting limit reached, rendering quote as plain lines"
            );
            let lines: Vec<&String> = lines.iter().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                return String::new();
            }
            return format!("<p>{}</p>", render_lines(lines));
        }

        let nested = Self {
            quote_depth: depth,
            ..*self
        };
        nested.render(&BlockScanner::scan(&lines.join("\n")))
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, document: &DocumentAst) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            self.render_block(block, &mut out);
        }
        out
    }
}

fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| InlineRenderer::render(line.as_ref()))
        .collect::<Vec<_>>()
        .join("<br />")
}

/// Fallback for input too large to scan: one paragraph of escaped lines.
pub fn render_plain_text(content: &str) -> String {
    let text = normalize_newlines(content);
    if text.trim().is_empty() {
        return String::new();
    }
    let body = text
        .split('\n')
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br />");
    format!("<p>{body}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::ListKind;
    use pretty_assertions::assert_eq;

    fn render(input: &str) -> String {
        HtmlRenderer::new(8).render(&BlockScanner::scan(input))
    }

    #[test]
    fn test_renders_each_block_kind() {
        let doc = DocumentAst {
            blocks: vec![
                BlockNode::Heading {
                    level: 2,
                    text: "Shelf".to_string(),
                },
                BlockNode::Paragraph(vec!["a".to_string(), "b".to_string()]),
                BlockNode::List {
                    kind: ListKind::Ordered,
                    items: vec!["one".to_string()],
                },
                BlockNode::CodeBlock {
                    lang: None,
                    lines: vec!["x < y".to_string()],
                },
                BlockNode::HorizontalRule,
            ],
        };
        assert_eq!(
            HtmlRenderer::new(8).render(&doc),
            "<h2>Shelf</h2><p>a<br />b</p><ol><li>one</li></ol><pre><code>x &lt; y</code></pre><hr />"
        );
    }

    #[test]
    fn test_code_block_language_class() {
        assert_eq!(
            render("```js\na<b\n```"),
            "<pre><code class=\"language-js\">a&lt;b</code></pre>"
        );
    }

    #[test]
    fn test_blockquote_is_rendered_recursively() {
        assert_eq!(
            render("> # Title\n> text"),
            "<blockquote><h1>Title</h1><p>text</p></blockquote>"
        );
    }

    #[test]
    fn test_nested_blockquote() {
        assert_eq!(
            render("> outer\n> > inner"),
            "<blockquote><p>outer</p><blockquote><p>inner</p></blockquote></blockquote>"
        );
    }

    #[test]
    fn test_quote_depth_limit_renders_plain_lines() {
        let out = HtmlRenderer::new(1).render(&BlockScanner::scan("> a\n> > b\n> > > c"));
        assert_eq!(
            out,
            "<blockquote><p>a</p><blockquote><p>b<br />&gt; c</p></blockquote></blockquote>"
        );
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(
            render_plain_text("# <b>\r\n**x**"),
            "<p># &lt;b&gt;<br />**x**</p>"
        );
        assert_eq!(render_plain_text(" \n "), "");
    }
}
