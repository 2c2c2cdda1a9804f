//! Block tokens produced by the markdown lexer.

/// A top-level markdown block, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Heading(HeadingToken),
    Paragraph(BlockToken),
    /// A blank line between two blocks.
    Space,
    Code(CodeToken),
    List(BlockToken),
    /// Any other block, rendered verbatim by the fallback handler.
    Raw(RawToken),
}

impl Token {
    /// Short name of the token kind, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph(_) => "paragraph",
            Self::Space => "space",
            Self::Code(_) => "code",
            Self::List(_) => "list",
            Self::Raw(raw) => raw.kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingToken {
    /// 1 to 6.
    pub depth: u8,
    /// Plain text; soft and hard breaks become `\n`.
    pub text: String,
    /// Rendered inline content (without the `<hN>` wrapper).
    pub html: String,
    /// Explicit `{#id}` attribute, if the heading carries one.
    pub id: Option<String>,
    /// Source slice including the setext underline or `#` markers.
    pub raw: String,
}

impl HeadingToken {
    /// Whether the heading was written with a `---`/`===` underline.
    pub fn is_setext(&self) -> bool {
        !self.raw.trim_start().starts_with('#')
    }

    /// Content lines of a setext heading (the underline removed).
    pub fn setext_lines(&self) -> impl Iterator<Item = &str> {
        let mut lines: Vec<&str> = self.raw.trim_end().lines().collect();
        lines.pop();
        lines.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockToken {
    /// Rendered HTML for the whole block.
    pub html: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    /// Fence info string as written (empty for indented blocks).
    pub lang: String,
    /// Block body without the trailing newline.
    pub text: String,
    /// Source slice including the fences.
    pub raw: String,
}

impl CodeToken {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        let lang = lang.into();
        let text = text.into();
        let raw = format!("```{lang}\n{text}\n```");
        Self { lang, text, raw }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Rule,
    Html,
    BlockQuote,
    Table,
    FootnoteDefinition,
    DefinitionList,
    Other,
}

impl RawKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "hr",
            Self::Html => "html",
            Self::BlockQuote => "blockquote",
            Self::Table => "table",
            Self::FootnoteDefinition => "footnote",
            Self::DefinitionList => "dl",
            Self::Other => "raw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: RawKind,
    pub html: String,
    pub raw: String,
}
