//! Abstract syntax tree for study-assistant content.

use serde::Deserialize;

/// A complete parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document content as a sequence of blocks.
    pub blocks: Vec<Block>,
}

/// Block-level elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph of inline content.
    Paragraph(Vec<Inline>),

    /// A heading with level (1-6) and inline content.
    Heading { level: u8, content: Vec<Inline> },

    /// A fenced code block.
    CodeBlock {
        language: Option<String>,
        content: String,
    },

    /// An ordered or unordered list. Items are flat inline sequences.
    List {
        ordered: bool,
        start: Option<u32>,
        items: Vec<Vec<Inline>>,
    },

    /// Display math, delimiters stripped. Single-line only.
    DisplayMath(String),

    /// A pipe table.
    Table {
        headers: Vec<Vec<Inline>>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<Vec<Inline>>>,
    },

    /// A thematic break (horizontal rule).
    ThematicBreak,
}

/// Table column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Inline-level elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text.
    Text(String),

    /// Emphasized text (italic).
    Emphasis(Vec<Inline>),

    /// Strong text (bold).
    Strong(Vec<Inline>),

    /// Inline code.
    Code(String),

    /// Inline math, delimiters stripped.
    Math(String),

    /// A numbered source marker: `[n]`, 1-based into the supplied source list.
    CitationRef(usize),

    /// A link.
    Link { url: String, content: Vec<Inline> },

    /// A soft line break within a paragraph.
    SoftBreak,
}

/// A cited source supplied alongside the raw text.
///
/// Inline `[n]` markers refer to the n-th source (1-based). A marker with no
/// matching source renders as plain bracketed text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Document {
    /// True if the document contains any math, inline or display.
    pub fn has_math(&self) -> bool {
        self.blocks.iter().any(|b| match b {
            Block::DisplayMath(_) => true,
            Block::Paragraph(inlines)
            | Block::Heading {
                content: inlines, ..
            } => inlines_have_math(inlines),
            Block::List { items, .. } => items.iter().any(|i| inlines_have_math(i)),
            Block::Table { headers, rows, .. } => {
                headers.iter().any(|c| inlines_have_math(c))
                    || rows.iter().flatten().any(|c| inlines_have_math(c))
            }
            _ => false,
        })
    }
}

fn inlines_have_math(inlines: &[Inline]) -> bool {
    inlines.iter().any(|i| match i {
        Inline::Math(_) => true,
        Inline::Emphasis(inner) | Inline::Strong(inner) => inlines_have_math(inner),
        Inline::Link { content, .. } => inlines_have_math(content),
        _ => false,
    })
}
