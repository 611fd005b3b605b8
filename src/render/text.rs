//! Plain-text renderer: the native composition surface.
//!
//! Produces styled Unicode text for contexts without a web view: math goes
//! through the Unicode formatter, lists get bullet glyphs, tables are laid
//! out with padded columns.

use crate::ast::{Block, Document, Inline};
use crate::render::math::latex_to_unicode;

/// Configuration for plain-text rendering.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Bullet prefix for unordered list items.
    pub bullet: String,
    /// Underline level-1 and level-2 headings with `=` / `-` rules.
    pub underline_headings: bool,
    /// Append link targets in parentheses after the link text.
    pub show_link_urls: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            bullet: "• ".to_string(),
            underline_headings: true,
            show_link_urls: true,
        }
    }
}

/// Render a document to plain styled text. Total: never fails.
pub fn render_text(doc: &Document, config: &TextConfig) -> String {
    let mut parts = Vec::new();

    for block in &doc.blocks {
        parts.push(render_block(block, config));
    }

    parts.join("\n\n")
}

fn render_block(block: &Block, config: &TextConfig) -> String {
    match block {
        Block::Paragraph(inlines) => render_inlines(inlines, config),
        Block::Heading { level, content } => {
            let text = render_inlines(content, config);
            if config.underline_headings && *level <= 2 {
                let rule = if *level == 1 { '=' } else { '-' };
                let underline: String = std::iter::repeat(rule).take(text.chars().count()).collect();
                format!("{}\n{}", text, underline)
            } else {
                text
            }
        }
        Block::CodeBlock { content, .. } => content
            .lines()
            .map(|l| format!("    {}", l))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::List {
            ordered,
            start,
            items,
        } => {
            let mut lines = Vec::new();
            let mut number = start.unwrap_or(1);
            for item in items {
                let text = render_inlines(item, config);
                if *ordered {
                    lines.push(format!("{}. {}", number, text));
                    number += 1;
                } else {
                    lines.push(format!("{}{}", config.bullet, text));
                }
            }
            lines.join("\n")
        }
        Block::DisplayMath(content) => latex_to_unicode(content),
        Block::Table { headers, rows, .. } => render_table(headers, rows, config),
        Block::ThematicBreak => "----------".to_string(),
    }
}

fn render_table(headers: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>], config: &TextConfig) -> String {
    let header_cells: Vec<String> = headers.iter().map(|c| render_inlines(c, config)).collect();
    let row_cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| render_inlines(c, config)).collect())
        .collect();

    let columns = header_cells.len().max(
        row_cells.iter().map(|r| r.len()).max().unwrap_or(0),
    );

    let mut widths = vec![0usize; columns];
    for (i, cell) in header_cells.iter().enumerate() {
        widths[i] = widths[i].max(cell.chars().count());
    }
    for row in &row_cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::new();
    lines.push(format_row(&header_cells, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &row_cells {
        lines.push(format_row(row, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_inlines(inlines: &[Inline], config: &TextConfig) -> String {
    let mut out = String::new();
    for inline in inlines {
        render_inline(inline, config, &mut out);
    }
    out
}

fn render_inline(inline: &Inline, config: &TextConfig, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::Emphasis(inner) | Inline::Strong(inner) => {
            out.push_str(&render_inlines(inner, config));
        }
        Inline::Code(code) => {
            out.push('`');
            out.push_str(code);
            out.push('`');
        }
        Inline::Math(latex) => out.push_str(&latex_to_unicode(latex)),
        Inline::CitationRef(n) => out.push_str(&format!("[{}]", n)),
        Inline::Link { url, content } => {
            let text = render_inlines(content, config);
            out.push_str(&text);
            if config.show_link_urls && !url.is_empty() && text != *url {
                out.push_str(&format!(" ({})", url));
            }
        }
        Inline::SoftBreak => out.push('\n'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_underlined() {
        let doc = parse("# Study Plan");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "Study Plan\n==========");
    }

    #[test]
    fn test_bullets() {
        let doc = parse("- review notes\n- practice");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "• review notes\n• practice");
    }

    #[test]
    fn test_math_is_unicode() {
        let doc = parse("The area is $\\pi r^2$.");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "The area is π r².");
    }

    #[test]
    fn test_display_math() {
        let doc = parse("$$\\alpha + \\beta$$");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "α + β");
    }

    #[test]
    fn test_markers_kept_literal() {
        let doc = parse("Key result [2].");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "Key result [2].");
    }

    #[test]
    fn test_table_columns_padded() {
        let doc = parse("| Name | Points |\n| --- | --- |\n| Quiz | 10 |");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "Name  Points\n----  ------\nQuiz  10");
    }

    #[test]
    fn test_ordered_list_numbering() {
        let doc = parse("2. second\n3. third");
        let text = render_text(&doc, &TextConfig::default());
        assert_eq!(text, "2. second\n3. third");
    }
}
