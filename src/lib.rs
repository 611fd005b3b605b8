//! # studymark
//!
//! A Markdown parser and renderer for study-assistant content: inline and
//! display math, numbered source markers, and study-plan exports.
//!
//! Backend responses arrive as Markdown with LaTeX-style math and `[n]`
//! source markers. One parser turns that text into a typed block/inline
//! tree; every surface consumes the same tree:
//!
//! - **Web HTML** ([`render_html`]): an embeddable fragment or a standalone
//!   page that typesets math client-side with KaTeX and announces a
//!   `content-ready` event (with measured height) when typesetting finishes.
//! - **Plain text** ([`render_text`]): styled Unicode output for native
//!   contexts, with math converted through a best-effort symbol table.
//! - **Print HTML** ([`export::render_print_html`]): a light, print-themed
//!   standalone page for the platform's HTML-to-PDF capture.
//! - **Calendar** ([`export::build_study_plan`]): an ICS study plan derived
//!   from assignment due dates.
//!
//! Parsing and rendering are total: malformed math delimiters, stray
//! markers, and broken Markdown degrade to plain text instead of failing.
//! The fallible surface is decoding backend JSON ([`models`]) and writing
//! export files, which return [`Result`] so callers can tell "empty" from
//! "failed".
//!
//! ## Quick Start
//!
//! ```rust
//! use studymark::{parse, render_html, HtmlConfig, Source};
//!
//! let input = "# Integration\n\nThe key identity is $\\int_0^1 x\\,dx = \\frac{1}{2}$ [1].";
//! let sources = vec![Source {
//!     id: "1".into(),
//!     title: "Calculus Notes".into(),
//!     url: "https://example.edu/notes".into(),
//!     snippet: None,
//! }];
//!
//! let doc = parse(input);
//! let html = render_html(&doc, &sources, &HtmlConfig::default());
//! assert!(html.contains("<h1>Integration</h1>"));
//! assert!(html.contains("#citation-1"));
//! ```
//!
//! ## Syntax
//!
//! - Headings: `# `, `## `, `### ` (through `######`)
//! - Emphasis: `*em*`, `**strong**`, `` `code` ``
//! - Math: inline `$...$`, display `$$...$$` on its own line
//! - Source markers: `[1]`, `[2]`, ... resolving against a supplied
//!   [`Source`] list; markers without a matching source stay literal text
//! - Lists: `- `, `* `, `+ `, `1. `
//! - Fenced code blocks, pipe tables, `---` rules

pub mod ast;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod render;
pub mod report;

// Convenience re-exports
pub use ast::{Block, Document, Inline, Source};
pub use error::{Error, Result};
pub use export::{IcsConfig, PrintConfig};
pub use parser::parse;
pub use render::{latex_to_unicode, render_html, render_text, HtmlConfig, MathBackend, TextConfig};

/// Parse and render Markdown to HTML in one step.
///
/// # Example
///
/// ```rust
/// let html = studymark::render("**Bold** move", &[], None);
/// assert!(html.contains("<strong>Bold</strong>"));
/// ```
pub fn render(input: &str, sources: &[Source], config: Option<&HtmlConfig>) -> String {
    let doc = parse(input);
    render_html(&doc, sources, config.unwrap_or(&HtmlConfig::default()))
}

/// Parse and render Markdown to plain styled text in one step.
///
/// # Example
///
/// ```rust
/// let text = studymark::render_plain("Area: $\\pi r^2$");
/// assert_eq!(text, "Area: π r²");
/// ```
pub fn render_plain(input: &str) -> String {
    let doc = parse(input);
    render_text(&doc, &TextConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_math_alternates_and_concatenates() {
        let line = "a $x+y$ b $z$ c";
        let doc = parse(line);

        let Block::Paragraph(inlines) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };

        // Alternating text/math, and the contents re-join to the line minus
        // its delimiters.
        let mut expect_math = false;
        let mut concat = String::new();
        for inline in inlines {
            match inline {
                Inline::Text(t) => {
                    assert!(!expect_math, "expected math, got text {t:?}");
                    concat.push_str(t);
                    expect_math = true;
                }
                Inline::Math(m) => {
                    assert!(expect_math, "expected text, got math {m:?}");
                    concat.push_str(m);
                    expect_math = false;
                }
                other => panic!("unexpected inline: {other:?}"),
            }
        }
        assert_eq!(concat, line.replace('$', ""));
    }

    #[test]
    fn test_unbalanced_trailing_dollar_never_panics() {
        for input in ["$", "a$", "$a", "a $b$ c$", "$$", "$$$"] {
            let doc = parse(input);
            assert!(!doc.blocks.is_empty() || input.is_empty());
        }
    }

    #[test]
    fn test_full_pipeline_with_sources() {
        let input = "## Answer\n\nPer the text [1], energy is $E = mc^2$.\n\n- mass\n- light";
        let sources = vec![Source {
            id: "src-1".into(),
            title: "Physics Primer".into(),
            url: "https://example.edu/physics".into(),
            snippet: Some("Chapter 3 covers relativity.".into()),
        }];

        let html = render(input, &sources, None);

        assert!(html.contains("<h2>Answer</h2>"));
        assert!(html.contains(r##"href="#citation-1""##));
        assert!(html.contains("Physics Primer"));
        assert!(html.contains("Chapter 3 covers relativity."));
        assert!(html.contains("<ul>"));
    }

    #[test]
    fn test_plain_surface_matches_web_content() {
        let input = "# Plan\n\nReview $\\alpha$ decay [1].";
        let text = render_plain(input);

        assert!(text.contains("Plan"));
        assert!(text.contains("α"));
        assert!(text.contains("[1]"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_report_table_flows_through_pipeline() {
        let assignments = vec![models::Assignment {
            id: "1".into(),
            course_id: "101".into(),
            name: "Essay".into(),
            description: None,
            due_at: Some("2025-10-01T23:59:59Z".into()),
            points_possible: Some(25.0),
            submission_types: vec![],
            workflow_state: Some("published".into()),
        }];

        let markdown = report::assignment_table(&assignments);
        let html = render(&markdown, &[], None);

        assert!(html.contains("<table"));
        assert!(html.contains("<td>Essay</td>"));
    }
}
