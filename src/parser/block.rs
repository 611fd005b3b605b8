//! Block-level parsing.

use crate::ast::{Alignment, Block, Inline};
use crate::parser::inline::parse_inlines;
use crate::parser::lexer::{
    fenced_code_start, heading, list_item_marker, thematic_break, ListMarker, Token,
};

/// Parse all blocks from content.
///
/// Total: any input produces a block sequence. Malformed constructs degrade
/// to paragraphs rather than failing.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let lines: Vec<&str> = input.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some((block, consumed)) = try_parse_heading(trimmed) {
            blocks.push(block);
            i += consumed;
        } else if let Some((block, consumed)) = try_parse_thematic_break(trimmed) {
            blocks.push(block);
            i += consumed;
        } else if let Some((block, consumed)) = try_parse_fenced_code(&lines[i..]) {
            blocks.push(block);
            i += consumed;
        } else if let Some((block, consumed)) = try_parse_display_math(trimmed) {
            blocks.push(block);
            i += consumed;
        } else if let Some((block, consumed)) = try_parse_list(&lines[i..]) {
            blocks.push(block);
            i += consumed;
        } else if let Some((block, consumed)) = try_parse_table(&lines[i..]) {
            blocks.push(block);
            i += consumed;
        } else {
            let (block, consumed) = parse_paragraph(&lines[i..]);
            blocks.push(block);
            i += consumed;
        }
    }

    blocks
}

fn try_parse_heading(line: &str) -> Option<(Block, usize)> {
    if !line.starts_with('#') {
        return None;
    }

    match heading(line) {
        Ok((_, Token::Heading(level, content))) => Some((
            Block::Heading {
                level,
                content: parse_inlines(content),
            },
            1,
        )),
        _ => None,
    }
}

fn try_parse_thematic_break(line: &str) -> Option<(Block, usize)> {
    match thematic_break(line) {
        Ok(("", Token::ThematicBreak)) => Some((Block::ThematicBreak, 1)),
        _ => None,
    }
}

fn try_parse_fenced_code(lines: &[&str]) -> Option<(Block, usize)> {
    let first = lines[0].trim_start();

    if !first.starts_with("```") && !first.starts_with("~~~") {
        return None;
    }

    let fence = if first.starts_with("```") { "```" } else { "~~~" };

    match fenced_code_start(first) {
        Ok((_, Token::FencedCodeStart(lang))) => {
            let mut content = String::new();
            let mut i = 1;

            while i < lines.len() {
                let line = lines[i];
                if line.trim_start().starts_with(fence) {
                    return Some((code_block(lang, content), i + 1));
                }
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(line);
                i += 1;
            }

            // Unclosed fence - treat rest as code
            Some((code_block(lang, content), lines.len()))
        }
        _ => None,
    }
}

fn code_block(lang: &str, content: String) -> Block {
    Block::CodeBlock {
        language: if lang.is_empty() {
            None
        } else {
            Some(lang.to_string())
        },
        content,
    }
}

/// A display math block is a single line exactly wrapped in `$$...$$`. Math
/// never spans lines; an unclosed `$$` falls through to paragraph text.
fn try_parse_display_math(line: &str) -> Option<(Block, usize)> {
    if !line.starts_with("$$") || line.len() < 4 {
        return None;
    }

    let after_open = &line[2..];
    let end = after_open.find("$$")?;
    if !after_open[end + 2..].trim().is_empty() {
        return None;
    }

    Some((Block::DisplayMath(after_open[..end].trim().to_string()), 1))
}

fn try_parse_list(lines: &[&str]) -> Option<(Block, usize)> {
    let first = lines[0].trim();

    let (_, marker) = match list_item_marker(first) {
        Ok((rest, Token::ListItemMarker(m))) => (rest, m),
        _ => return None,
    };

    let ordered = matches!(marker, ListMarker::Ordered(_));
    let start = match marker {
        ListMarker::Ordered(n) => Some(n),
        ListMarker::Unordered => None,
    };

    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        match list_item_marker(trimmed) {
            Ok((rest, Token::ListItemMarker(m))) => {
                let same_type = matches!(
                    (&marker, &m),
                    (ListMarker::Unordered, ListMarker::Unordered)
                        | (ListMarker::Ordered(_), ListMarker::Ordered(_))
                );
                if !same_type {
                    break;
                }
                items.push(parse_inlines(rest.trim()));
                i += 1;
            }
            _ => break,
        }
    }

    Some((
        Block::List {
            ordered,
            start,
            items,
        },
        i,
    ))
}

fn try_parse_table(lines: &[&str]) -> Option<(Block, usize)> {
    // Need at least a header row and a delimiter row.
    if lines.len() < 2 || !lines[0].contains('|') || !is_table_delimiter(lines[1]) {
        return None;
    }

    let headers = parse_table_row(lines[0]);
    let alignments = parse_alignments(lines[1]);

    let mut rows = Vec::new();
    let mut i = 2;

    while i < lines.len() {
        let line = lines[i];
        if !line.contains('|') || line.trim().is_empty() {
            break;
        }
        rows.push(parse_table_row(line));
        i += 1;
    }

    Some((
        Block::Table {
            headers,
            alignments,
            rows,
        },
        i,
    ))
}

fn is_table_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.contains('|') {
        return false;
    }

    let inner = trimmed.trim_matches('|');

    for cell in inner.split('|') {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }

        let valid = cell.chars().all(|c| c == '-' || c == ':');
        if !valid || !cell.contains('-') {
            return false;
        }
    }

    true
}

fn parse_alignments(line: &str) -> Vec<Alignment> {
    let trimmed = line.trim().trim_matches('|');
    trimmed
        .split('|')
        .map(|cell| {
            let cell = cell.trim();
            let left = cell.starts_with(':');
            let right = cell.ends_with(':');
            match (left, right) {
                (true, true) => Alignment::Center,
                (false, true) => Alignment::Right,
                _ => Alignment::Left,
            }
        })
        .collect()
}

fn parse_table_row(line: &str) -> Vec<Vec<Inline>> {
    let trimmed = line.trim().trim_matches('|');
    trimmed
        .split('|')
        .map(|cell| parse_inlines(cell.trim()))
        .collect()
}

fn parse_paragraph(lines: &[&str]) -> (Block, usize) {
    let mut para_lines = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            break;
        }

        // End paragraph on a block-level element
        if i > 0
            && (trimmed.starts_with('#')
                || trimmed.starts_with("```")
                || trimmed.starts_with("~~~")
                || trimmed.starts_with("$$")
                || trimmed == "---"
                || trimmed == "***"
                || trimmed == "___"
                || list_item_marker(trimmed).is_ok())
        {
            break;
        }

        para_lines.push(trimmed);
        i += 1;
    }

    let content = para_lines.join("\n");
    (Block::Paragraph(parse_inlines(&content)), i.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_heading() {
        let blocks = parse_blocks("# Hello World");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 1,
                content: vec![Inline::Text("Hello World".into())],
            }]
        );
    }

    #[test]
    fn test_bullets_then_text() {
        let blocks = parse_blocks("- item one\n- item two\n\nRegular text");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    start: None,
                    items: vec![
                        vec![Inline::Text("item one".into())],
                        vec![Inline::Text("item two".into())],
                    ],
                },
                Block::Paragraph(vec![Inline::Text("Regular text".into())]),
            ]
        );
    }

    #[test]
    fn test_ordered_list() {
        let blocks = parse_blocks("2. second\n3. third");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: true,
                start: Some(2),
                items: vec![
                    vec![Inline::Text("second".into())],
                    vec![Inline::Text("third".into())],
                ],
            }]
        );
    }

    #[test]
    fn test_display_math_single_line() {
        let blocks = parse_blocks("$$E = mc^2$$");
        assert_eq!(blocks, vec![Block::DisplayMath("E = mc^2".into())]);
    }

    #[test]
    fn test_unclosed_display_math_degrades() {
        let blocks = parse_blocks("$$E = mc^2");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_parse_code_block() {
        let blocks = parse_blocks("```rust\nfn main() {}\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("rust".into()),
                content: "fn main() {}".into(),
            }]
        );
    }

    #[test]
    fn test_unclosed_fence_consumes_rest() {
        let blocks = parse_blocks("```\nlet x = 1;\nlet y = 2;");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: None,
                content: "let x = 1;\nlet y = 2;".into(),
            }]
        );
    }

    #[test]
    fn test_table() {
        let input = "| A | B |\n| --- | ---: |\n| 1 | 2 |";
        let blocks = parse_blocks(input);
        match &blocks[0] {
            Block::Table {
                headers,
                alignments,
                rows,
            } => {
                assert_eq!(headers.len(), 2);
                assert_eq!(alignments, &vec![Alignment::Left, Alignment::Right]);
                assert_eq!(rows.len(), 1);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_table_delimiter() {
        assert!(is_table_delimiter("| --- | :---: | ---: |"));
        assert!(is_table_delimiter("|---|:---:|---:|"));
        assert!(!is_table_delimiter("| not | a | delimiter |"));
    }

    #[test]
    fn test_paragraph_lines_trimmed() {
        let blocks = parse_blocks("  first line  \n  second line  ");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Inline::Text("first line".into()),
                Inline::SoftBreak,
                Inline::Text("second line".into()),
            ])]
        );
    }

    #[test]
    fn test_thematic_break() {
        let blocks = parse_blocks("above\n\n---\n\nbelow");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::ThematicBreak);
    }
}
