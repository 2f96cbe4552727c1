//! Block scanner - groups chat markdown lines into block units.
//!
//! A line-by-line state machine. Classification priority per line:
//! code fence, open code block, blockquote, blank line, heading,
//! horizontal rule, list item, paragraph text.

use crate::core::ast::{BlockNode, DocumentAst, ListKind};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```([^`\s]+)?\s*$").expect("fence pattern is valid"));

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s{0,3}(#{1,6})\s+(.+?)\s*$").expect("heading pattern is valid")
});

static RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:-{3,}|\*{3,}|_{3,})\s*$").expect("rule pattern is valid")
});

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.+?)\s*$").expect("bullet pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.+?)\s*$").expect("ordinal pattern is valid"));

/// Scanner entry point.
pub struct BlockScanner;

impl BlockScanner {
    /// Scans `input` into block units. Never fails: unterminated fences and
    /// quotes keep whatever was buffered.
    pub fn scan(input: &str) -> DocumentAst {
        let text = normalize_newlines(input);
        let mut state = ScanState::default();

        for line in text.split('\n') {
            state.push_line(line);
        }
        state.finish()
    }
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

#[derive(Debug)]
struct OpenList {
    kind: ListKind,
    items: Vec<String>,
}

#[derive(Debug)]
struct OpenCode {
    lang: Option<String>,
    lines: Vec<String>,
}

#[derive(Debug, Default)]
struct ScanState {
    blocks: Vec<BlockNode>,
    paragraph: Vec<String>,
    list: Option<OpenList>,
    code: Option<OpenCode>,
    quote: Option<Vec<String>>,
}

impl ScanState {
    fn push_line(&mut self, line: &str) {
        if let Some(fence) = FENCE.captures(line) {
            self.flush_paragraph();
            self.flush_list();
            self.flush_quote();
            if self.code.is_some() {
                self.flush_code();
            } else {
                self.code = Some(OpenCode {
                    lang: fence.get(1).map(|m| m.as_str().to_string()),
                    lines: Vec::new(),
                });
            }
            return;
        }

        if let Some(code) = &mut self.code {
            code.lines.push(line.to_string());
            return;
        }

        if let Some(quoted) = line.strip_prefix('>') {
            self.flush_paragraph();
            self.flush_list();
            let dequoted = quoted
                .strip_prefix(char::is_whitespace)
                .unwrap_or(quoted);
            self.quote
                .get_or_insert_with(Vec::new)
                .push(dequoted.to_string());
            return;
        }
        self.flush_quote();

        if line.trim().is_empty() {
            self.flush_paragraph();
            return;
        }

        if let Some(heading) = HEADING.captures(line) {
            self.flush_paragraph();
            self.flush_list();
            let level = heading.get(1).map_or(1, |m| m.as_str().len());
            let text = heading.get(2).map_or("", |m| m.as_str());
            self.blocks.push(BlockNode::Heading {
                level: u8::try_from(level).unwrap_or(6),
                text: text.to_string(),
            });
            return;
        }

        if RULE.is_match(line) {
            self.flush_paragraph();
            self.flush_list();
            self.blocks.push(BlockNode::HorizontalRule);
            return;
        }

        let item = BULLET_ITEM
            .captures(line)
            .map(|caps| (ListKind::Bullet, caps))
            .or_else(|| {
                ORDERED_ITEM
                    .captures(line)
                    .map(|caps| (ListKind::Ordered, caps))
            });
        if let Some((kind, caps)) = item {
            self.flush_paragraph();
            let text = caps.get(1).map_or("", |m| m.as_str()).to_string();
            if !self.list.as_ref().is_some_and(|list| list.kind == kind) {
                self.flush_list();
            }
            self.list
                .get_or_insert_with(|| OpenList {
                    kind,
                    items: Vec::new(),
                })
                .items
                .push(text);
            return;
        }

        self.flush_list();
        self.paragraph.push(line.to_string());
    }

    fn finish(mut self) -> DocumentAst {
        self.flush_paragraph();
        self.flush_list();
        self.flush_code();
        self.flush_quote();
        DocumentAst {
            blocks: self.blocks,
        }
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let lines = std::mem::take(&mut self.paragraph);
            self.blocks.push(BlockNode::Paragraph(lines));
        }
    }

    fn flush_list(&mut self) {
        if let Some(OpenList { kind, items }) = self.list.take() {
            self.blocks.push(BlockNode::List { kind, items });
        }
    }

    fn flush_code(&mut self) {
        if let Some(OpenCode { lang, lines }) = self.code.take() {
            self.blocks.push(BlockNode::CodeBlock { lang, lines });
        }
    }

    fn flush_quote(&mut self) {
        if let Some(lines) = self.quote.take() {
            self.blocks.push(BlockNode::Blockquote(lines));
        }
    }
}
