/// Block units produced by one scan of chat markdown, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAst {
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    /// Raw lines of one paragraph; rendered joined by line breaks.
    Paragraph(Vec<String>),
    List {
        kind: ListKind,
        items: Vec<String>,
    },
    /// Fenced code, kept verbatim. `lang` is the tag after the opening fence.
    CodeBlock {
        lang: Option<String>,
        lines: Vec<String>,
    },
    /// Quoted lines with the leading `>` (and one space) already stripped.
    Blockquote(Vec<String>),
    Heading {
        level: u8,
        text: String,
    },
    HorizontalRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Ordered => "ol",
        }
    }
}
