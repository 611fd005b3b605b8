//! Parser for study-content Markdown with inline math and source markers.

mod block;
mod inline;
mod lexer;

pub use block::parse_blocks;
pub use inline::parse_inlines;

use crate::ast::Document;

/// Parse a complete document from source text.
///
/// Total: parsing never fails. Malformed math delimiters, stray markers, and
/// broken Markdown all degrade to plain text blocks.
pub fn parse(input: &str) -> Document {
    Document {
        blocks: parse_blocks(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Inline};

    #[test]
    fn test_empty_input() {
        let doc = parse("");
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_mixed_document() {
        let input = "# Plan\n\nSolve $x^2 = 4$ first.\n\n- review notes\n- practice";
        let doc = parse(input);
        assert_eq!(doc.blocks.len(), 3);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
        assert!(matches!(doc.blocks[2], Block::List { ordered: false, .. }));
    }

    #[test]
    fn test_round_trip_non_math_lines() {
        let input = "  Intro line  \n\n- item one\n- item two\n\nClosing line";
        let doc = parse(input);

        let mut lines = Vec::new();
        for block in &doc.blocks {
            match block {
                Block::Paragraph(inlines) => lines.push(inline_text(inlines)),
                Block::List { items, .. } => {
                    for item in items {
                        lines.push(inline_text(item));
                    }
                }
                other => panic!("unexpected block: {other:?}"),
            }
        }

        assert_eq!(
            lines.join("\n"),
            "Intro line\nitem one\nitem two\nClosing line"
        );
    }

    fn inline_text(inlines: &[Inline]) -> String {
        inlines
            .iter()
            .map(|i| match i {
                Inline::Text(t) => t.clone(),
                Inline::SoftBreak => "\n".to_string(),
                other => panic!("unexpected inline: {other:?}"),
            })
            .collect()
    }
}
