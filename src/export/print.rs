//! Print-themed HTML export for PDF capture.
//!
//! The platform captures this document to PDF; the crate's job is the
//! document itself: a light, fixed-black-text print theme, an optional
//! title/author/date header, and the same content-ready signal as the web
//! surface so capture fires on completion instead of a wall-clock delay.

use crate::ast::{Document, Source};
use crate::error::Result;
use crate::render::math::{create_renderer, MathBackend};
use crate::render::{escape_html, ready_script, render_html, HtmlConfig};
use std::path::Path;

/// Configuration for print output.
#[derive(Debug, Clone)]
pub struct PrintConfig {
    /// Document title, shown in the header block and the page title.
    pub title: Option<String>,
    /// Author line under the title.
    pub author: Option<String>,
    /// Display date under the title, preformatted by the caller.
    pub date: Option<String>,
    /// Math rendering backend.
    pub math_backend: MathBackend,
    /// CSS class prefix for styling.
    pub class_prefix: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            date: None,
            math_backend: MathBackend::KaTeX,
            class_prefix: "sm-".to_string(),
        }
    }
}

/// Render a document as a standalone print-themed HTML page.
pub fn render_print_html(doc: &Document, sources: &[Source], config: &PrintConfig) -> String {
    let body_config = HtmlConfig {
        math_backend: config.math_backend,
        standalone: false,
        title: None,
        custom_css: None,
        class_prefix: config.class_prefix.clone(),
    };
    let body = render_html(doc, sources, &body_config);

    let title = config.title.clone().unwrap_or_else(|| "Document".to_string());
    let p = &config.class_prefix;

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&title)));

    let mut typeset_pending = false;
    if doc.has_math() {
        if let Some(head) = create_renderer(config.math_backend).head_content() {
            out.push_str(&head);
            out.push('\n');
            typeset_pending = true;
        }
    }

    out.push_str(&print_styles(p));

    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<article class=\"{}print\">\n", p));

    if config.title.is_some() || config.author.is_some() || config.date.is_some() {
        out.push_str(&format!("<header class=\"{}print-header\">\n", p));
        if let Some(ref t) = config.title {
            out.push_str(&format!("<h1>{}</h1>\n", escape_html(t)));
        }
        if let Some(ref author) = config.author {
            out.push_str(&format!("<p>{}</p>\n", escape_html(author)));
        }
        if let Some(ref date) = config.date {
            out.push_str(&format!("<p>{}</p>\n", escape_html(date)));
        }
        out.push_str("</header>\n");
    }

    out.push_str(&body);
    out.push_str("</article>\n");
    out.push_str(&ready_script(typeset_pending));
    out.push_str("</body>\n</html>");

    out
}

/// Render the print document and write it to a file.
pub fn write_print_html(
    path: impl AsRef<Path>,
    doc: &Document,
    sources: &[Source],
    config: &PrintConfig,
) -> Result<()> {
    std::fs::write(path, render_print_html(doc, sources, config))?;
    Ok(())
}

// Distinct from the web theme: light background, fixed black text, heavier
// table borders for paper.
fn print_styles(p: &str) -> String {
    format!(
        r#"<style>
body {{ background: #ffffff; color: #000000; }}
.{p}print {{ max-width: 700px; margin: 0 auto; padding: 1.5em; font-family: Georgia, serif; font-size: 12pt; line-height: 1.5; }}
.{p}print-header {{ text-align: center; margin-bottom: 2em; border-bottom: 2px solid #000; padding-bottom: 1em; }}
.{p}print-header h1 {{ margin-bottom: 0.25em; }}
.{p}print-header p {{ margin: 0.1em 0; }}
.{p}print pre {{ background: #ffffff; border: 1px solid #000; padding: 0.75em; }}
.{p}print code {{ font-family: "Courier New", monospace; font-size: 10pt; }}
.{p}table {{ border-collapse: collapse; width: 100%; margin: 1em 0; }}
.{p}table th, .{p}table td {{ border: 1px solid #000; padding: 0.4em 0.8em; color: #000; }}
.{p}table th {{ background: #e8e8e8; }}
.{p}citation {{ color: #000; font-size: 0.85em; vertical-align: super; }}
.{p}sources {{ margin-top: 2em; border-top: 1px solid #000; font-size: 10pt; }}
.{p}source-snippet {{ color: #333; margin: 0.25em 0 0.75em; }}
a {{ color: #000; }}
.math.display {{ text-align: center; margin: 1em 0; }}
@media print {{ .{p}print {{ padding: 0; }} }}
</style>
"#
    )
}
