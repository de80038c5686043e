//! Markdown parsing for corpus files.
//!
//! One pass over the comrak AST collects everything the rules look at:
//! headings, links, pipe tables, fenced blocks and the top-level block
//! sequence. Links and tables remember the heading they sit under so
//! section-scoped lookups (Related Patterns, Alphabetical Index) stay cheap.

mod dto;
mod nodes;
mod tables;

use comrak::{
    Arena, Options,
    nodes::{AstNode, NodeValue},
    parse_document,
};
use std::ops::Range;

use self::nodes::{collect_text, node_line};
use self::tables::parse_table;

pub use self::dto::{DtoOccurrence, extract_dto_tags};
pub use self::tables::{Table, TableCell};

/// A heading with its plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1-6.
    pub level: u8,
    /// Inline text with markup removed.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// A link or image destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Destination as written (after comrak unescaping).
    pub url: String,
    /// Link text.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
    /// `![alt](src)` rather than `[text](href)`.
    pub is_image: bool,
    /// Index into `MarkdownDocument::headings` of the enclosing heading.
    pub heading: Option<usize>,
}

/// A fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the info string (empty when untagged).
    pub language: String,
    /// Block body.
    pub literal: String,
    /// 1-based line of the opening fence.
    pub line: usize,
    /// Fenced (```) rather than indented.
    pub fenced: bool,
}

/// Kind of a top-level block, used for positional checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading of the given level.
    Heading(u8),
    /// Plain paragraph.
    Paragraph,
    /// `>` blockquote.
    BlockQuote,
    /// Bullet or ordered list.
    List,
    /// Pipe table.
    Table,
    /// Code block.
    CodeBlock,
    /// Raw HTML block.
    Html,
    /// `---`.
    ThematicBreak,
    /// Anything else (front matter, footnotes, ...).
    Other,
}

/// One top-level block with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block kind.
    pub kind: BlockKind,
    /// Plain text content.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// Structured view of one Markdown file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Links and images in document order.
    pub links: Vec<Link>,
    /// Pipe tables in document order.
    pub tables: Vec<Table>,
    /// Code blocks in document order.
    pub code_blocks: Vec<CodeBlock>,
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

impl MarkdownDocument {
    /// Text of the first level-1 heading.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|heading| heading.level == 1)
            .map(|heading| heading.text.as_str())
    }

    /// The blockquote or paragraph directly under a leading level-1 title.
    #[must_use]
    pub fn intent(&self) -> Option<&str> {
        match (self.blocks.first(), self.blocks.get(1)) {
            (Some(title), Some(next))
                if title.kind == BlockKind::Heading(1)
                    && matches!(next.kind, BlockKind::BlockQuote | BlockKind::Paragraph)
                    && !next.text.is_empty() =>
            {
                Some(next.text.as_str())
            }
            _ => None,
        }
    }

    /// Headings (by index) that belong to the section opened by `index`:
    /// the heading itself plus every deeper heading before the next heading
    /// of the same or a higher level.
    #[must_use]
    pub fn section_headings(&self, index: usize) -> Range<usize> {
        let Some(opening) = self.headings.get(index) else {
            return index..index;
        };
        let end = self.headings[index + 1..]
            .iter()
            .position(|heading| heading.level <= opening.level)
            .map_or(self.headings.len(), |offset| index + 1 + offset);
        index..end
    }

    /// Index of the first heading of `level` accepted by `predicate`.
    pub fn find_heading(&self, level: u8, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.headings
            .iter()
            .position(|heading| heading.level == level && predicate(&heading.text))
    }

    /// Links inside the section opened by heading `index`.
    pub fn links_in_section(&self, index: usize) -> impl Iterator<Item = &Link> {
        let range = self.section_headings(index);
        self.links
            .iter()
            .filter(move |link| link.heading.is_some_and(|h| range.contains(&h)))
    }

    /// Tables inside the section opened by heading `index`.
    pub fn tables_in_section(&self, index: usize) -> impl Iterator<Item = &Table> {
        let range = self.section_headings(index);
        self.tables
            .iter()
            .filter(move |table| table.heading.is_some_and(|h| range.contains(&h)))
    }
}

fn block_kind(value: &NodeValue) -> BlockKind {
    match value {
        NodeValue::Heading(heading) => BlockKind::Heading(heading.level),
        NodeValue::Paragraph => BlockKind::Paragraph,
        NodeValue::BlockQuote => BlockKind::BlockQuote,
        NodeValue::List(_) => BlockKind::List,
        NodeValue::Table(_) => BlockKind::Table,
        NodeValue::CodeBlock(_) => BlockKind::CodeBlock,
        NodeValue::HtmlBlock(_) => BlockKind::Html,
        NodeValue::ThematicBreak => BlockKind::ThematicBreak,
        _ => BlockKind::Other,
    }
}

fn first_word(info: &str) -> String {
    info.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Parse one Markdown file.
#[must_use]
pub fn parse_markdown(content: &str) -> MarkdownDocument {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;
    let root = parse_document(&arena, content, &options);
    let mut doc = MarkdownDocument::default();

    for child in root.children() {
        let kind = block_kind(&child.data.borrow().value);
        let text = if kind == BlockKind::CodeBlock {
            String::new()
        } else {
            collect_text(child)
        };
        doc.blocks.push(Block {
            kind,
            text: text.trim().to_string(),
            line: node_line(child),
        });
    }

    let mut current_heading: Option<usize> = None;
    let mut stack: Vec<&AstNode<'_>> = vec![root];
    while let Some(node) = stack.pop() {
        let mut children: Vec<&AstNode<'_>> = node.children().collect();
        children.reverse();
        stack.extend(children);

        let line = node_line(node);
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                doc.headings.push(Heading {
                    level: heading.level,
                    text: collect_text(node).trim().to_string(),
                    line,
                });
                current_heading = Some(doc.headings.len() - 1);
            }
            NodeValue::Link(link) => doc.links.push(Link {
                url: link.url.clone(),
                text: collect_text(node).trim().to_string(),
                line,
                is_image: false,
                heading: current_heading,
            }),
            NodeValue::Image(link) => doc.links.push(Link {
                url: link.url.clone(),
                text: collect_text(node).trim().to_string(),
                line,
                is_image: true,
                heading: current_heading,
            }),
            NodeValue::Table(_) => doc.tables.push(parse_table(node, current_heading)),
            NodeValue::CodeBlock(block) => doc.code_blocks.push(CodeBlock {
                language: first_word(&block.info),
                literal: block.literal.clone(),
                line,
                fenced: block.fenced,
            }),
            _ => {}
        }
    }

    doc
}
