//! # chatmark
//!
//! Safe renderer for the markdown dialect used in library chat messages and
//! assistant replies. The output is meant to be inserted as raw HTML: all
//! text is entity-escaped, raw HTML is never passed through and links are
//! limited to `http`, `https`, `mailto`, `tel`, site paths and fragments.
//!
//! Besides headings, lists, code fences, blockquotes, inline code, emphasis
//! and `[label](url)` links, the dialect has book references: `[[Dune:42]]`
//! becomes a link to `/books/42/`.
//!
//! ## Example
//!
//! ```
//! use chatmark::{ChatMarkdown, RenderOptions};
//!
//! let renderer = ChatMarkdown::new(RenderOptions {
//!     max_quote_depth: 4,
//!     ..Default::default()
//! });
//! let html = renderer.render("Try **[[Dune:42]]**");
//! assert!(html.contains("href=\"/books/42/\""));
//! ```

pub mod core;
pub mod error;
pub mod inline;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use inline::InlineRenderer;
pub use parser::BlockScanner;
pub use render::{escape_html, escape_html_attr, HtmlRenderer, Renderer};

/// Limits applied while rendering untrusted input.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Inputs longer than this (in bytes) are shown as escaped plain text.
    pub max_input_bytes: usize,
    /// Nested blockquote levels that are still parsed as markdown.
    pub max_quote_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: 100_000,
            max_quote_depth: 8,
        }
    }
}

impl RenderOptions {
    /// Checks that every limit is usable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOptions`] when a limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(Error::InvalidOptions(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_quote_depth == 0 {
            return Err(Error::InvalidOptions(
                "max_quote_depth must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Chat markdown renderer configured with [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct ChatMarkdown {
    options: RenderOptions,
}

impl ChatMarkdown {
    /// Creates a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Creates a renderer with default options.
    pub fn with_defaults() -> Self {
        Self::new(RenderOptions::default())
    }

    /// Renders chat markdown to an HTML fragment. Never fails; malformed
    /// constructs degrade to escaped literal text.
    pub fn render(&self, content: &str) -> String {
        if content.len() > self.options.max_input_bytes {
            tracing::warn!(
                input_bytes = content.len(),
                max_input_bytes = self.options.max_input_bytes,
                "Input exceeds size limit, rendering as plain text"
            );
            return render::render_plain_text(content);
        }

        let document = BlockScanner::scan(content);
        tracing::debug!(
            input_bytes = content.len(),
            blocks = document.blocks.len(),
            "Scanned chat markdown"
        );
        HtmlRenderer::new(self.options.max_quote_depth).render(&document)
    }
}

/// Renders chat markdown with default options.
pub fn render_chat_markdown(content: &str) -> String {
    ChatMarkdown::with_defaults().render(content)
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use pyo3::prelude::*;

    /// Renders chat markdown to safe HTML.
    #[pyfunction]
    fn render_chat_markdown(content: &str) -> String {
        super::render_chat_markdown(content)
    }

    #[pymodule]
    pub fn chatmark(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(render_chat_markdown, m)?)?;
        Ok(())
    }
}
