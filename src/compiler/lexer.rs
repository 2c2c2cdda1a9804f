//! Markdown to block tokens using pulldown-cmark.
//!
//! The parser's offset iterator is grouped into top-level blocks. Each
//! block keeps its source slice and its rendered HTML, so handlers can
//! choose between the two.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use super::token::{BlockToken, CodeToken, HeadingToken, RawKind, RawToken, Token};

/// Extensions the token walk understands. Heading attributes carry
/// explicit `{#id}` anchors.
const EXTENSIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_HEADING_ATTRIBUTES);

/// One top-level block being collected.
struct Block<'a> {
    range: Range<usize>,
    events: Vec<Event<'a>>,
}

/// Lex markdown into top-level block tokens, in document order.
pub fn lex(markdown: &str) -> Vec<Token> {
    let parser = Parser::new_ext(markdown, EXTENSIONS);

    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<Block<'_>> = None;
    // End of the last block's visible content, for blank-line detection.
    let mut last_end: Option<usize> = None;

    for (event, range) in parser.into_offset_iter() {
        if depth == 0 {
            if let Some(prev) = last_end
                && has_blank_line(&markdown[prev.min(range.start)..range.start])
            {
                tokens.push(Token::Space);
            }
            current = Some(Block {
                range: range.clone(),
                events: Vec::new(),
            });
        }

        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        if let Some(block) = current.as_mut() {
            block.events.push(event);
        }

        if depth == 0
            && let Some(block) = current.take()
        {
            let raw = &markdown[block.range.clone()];
            last_end = Some(block.range.start + raw.trim_end().len());
            tokens.push(build_token(block, raw));
        }
    }

    tokens
}

/// A blank line sits between two blocks when the gap holds two newlines.
fn has_blank_line(gap: &str) -> bool {
    gap.matches('\n').count() >= 2
}

/// What the first event of a block says it is.
enum Opening {
    Heading(u8, Option<String>),
    Paragraph,
    List,
    Code(String),
    Raw(RawKind),
}

impl Opening {
    fn of(event: Option<&Event<'_>>) -> Self {
        match event {
            Some(Event::Start(Tag::Heading { level, id, .. })) => {
                Self::Heading(heading_depth(*level), id.as_ref().map(|id| id.to_string()))
            }
            Some(Event::Start(Tag::Paragraph)) => Self::Paragraph,
            Some(Event::Start(Tag::List(_))) => Self::List,
            Some(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))) => {
                Self::Code(info.to_string())
            }
            Some(Event::Start(Tag::CodeBlock(CodeBlockKind::Indented))) => Self::Code(String::new()),
            Some(Event::Rule) => Self::Raw(RawKind::Rule),
            Some(Event::Start(Tag::HtmlBlock) | Event::Html(_)) => Self::Raw(RawKind::Html),
            Some(Event::Start(Tag::BlockQuote(_))) => Self::Raw(RawKind::BlockQuote),
            Some(Event::Start(Tag::Table(_))) => Self::Raw(RawKind::Table),
            Some(Event::Start(Tag::FootnoteDefinition(_))) => Self::Raw(RawKind::FootnoteDefinition),
            Some(Event::Start(Tag::DefinitionList)) => Self::Raw(RawKind::DefinitionList),
            _ => Self::Raw(RawKind::Other),
        }
    }
}

/// Turn a collected block into its token.
fn build_token(block: Block<'_>, raw: &str) -> Token {
    match Opening::of(block.events.first()) {
        Opening::Heading(depth, id) => heading_token(depth, id, block.events, raw),
        Opening::Paragraph => Token::Paragraph(BlockToken {
            html: render(block.events),
            raw: raw.to_string(),
        }),
        Opening::List => Token::List(BlockToken {
            html: render(block.events),
            raw: raw.to_string(),
        }),
        Opening::Code(lang) => code_token(lang, &block.events, raw),
        Opening::Raw(kind) => raw_token(kind, block.events, raw),
    }
}

fn heading_token(depth: u8, id: Option<String>, events: Vec<Event<'_>>, raw: &str) -> Token {
    let mut text = String::new();
    for event in &events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            _ => {}
        }
    }

    // Render only the inline content between the heading's start and end.
    let inner: Vec<Event<'_>> = events
        .into_iter()
        .filter(|e| !matches!(e, Event::Start(Tag::Heading { .. }) | Event::End(TagEnd::Heading(_))))
        .collect();

    Token::Heading(HeadingToken {
        depth,
        text,
        html: render(inner),
        id,
        raw: raw.to_string(),
    })
}

fn code_token(lang: String, events: &[Event<'_>], raw: &str) -> Token {
    let mut text = String::new();
    for event in events {
        if let Event::Text(t) = event {
            text.push_str(t);
        }
    }
    if text.ends_with('\n') {
        text.pop();
    }

    Token::Code(CodeToken {
        lang,
        text,
        raw: raw.to_string(),
    })
}

fn raw_token(kind: RawKind, events: Vec<Event<'_>>, raw: &str) -> Token {
    Token::Raw(RawToken {
        kind,
        html: render(events),
        raw: raw.to_string(),
    })
}

fn render(events: Vec<Event<'_>>) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Convert heading level to its number
fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
