//! HTML renderer: the web-embeddable rendering surface.

use crate::ast::{Alignment, Block, Document, Inline, Source};
use crate::render::math::{create_renderer, MathBackend, MathRenderer};

/// Configuration for HTML rendering.
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Math rendering backend.
    pub math_backend: MathBackend,
    /// Whether to generate a complete HTML document or just the body content.
    pub standalone: bool,
    /// Document title (for standalone mode).
    pub title: Option<String>,
    /// Additional CSS to include.
    pub custom_css: Option<String>,
    /// CSS class prefix for styling.
    pub class_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            math_backend: MathBackend::KaTeX,
            standalone: false,
            title: None,
            custom_css: None,
            class_prefix: "sm-".to_string(),
        }
    }
}

/// Render a document to HTML.
///
/// Total and best-effort: malformed content degrades to visibly wrong but
/// valid markup. Source markers out of range render as literal text.
pub fn render_html(doc: &Document, sources: &[Source], config: &HtmlConfig) -> String {
    let mut renderer = HtmlRenderer::new(doc, sources, config);
    renderer.render()
}

struct HtmlRenderer<'a> {
    doc: &'a Document,
    sources: &'a [Source],
    config: &'a HtmlConfig,
    math: Box<dyn MathRenderer>,
    output: String,
}

impl<'a> HtmlRenderer<'a> {
    fn new(doc: &'a Document, sources: &'a [Source], config: &'a HtmlConfig) -> Self {
        Self {
            doc,
            sources,
            config,
            math: create_renderer(config.math_backend),
            output: String::new(),
        }
    }

    fn render(&mut self) -> String {
        if self.config.standalone {
            self.render_standalone()
        } else {
            self.render_body()
        }
    }

    fn render_standalone(&mut self) -> String {
        let title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| "Document".to_string());
        let needs_typeset = self.doc.has_math();

        self.output
            .push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        self.output.push_str("<meta charset=\"UTF-8\">\n");
        self.output.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        self.output
            .push_str(&format!("<title>{}</title>\n", escape_html(&title)));

        let mut typeset_pending = false;
        if needs_typeset {
            if let Some(head) = self.math.head_content() {
                self.output.push_str(&head);
                self.output.push('\n');
                typeset_pending = true;
            }
        }

        self.output.push_str(&self.default_styles());

        if let Some(ref css) = self.config.custom_css {
            self.output.push_str("<style>\n");
            self.output.push_str(css);
            self.output.push_str("\n</style>\n");
        }

        self.output.push_str("</head>\n<body>\n");
        self.output.push_str(&format!(
            "<article class=\"{}document\">\n",
            self.config.class_prefix
        ));

        self.render_body_content();

        self.output.push_str("</article>\n");
        self.output.push_str(&ready_script(typeset_pending));
        self.output.push_str("</body>\n</html>");

        std::mem::take(&mut self.output)
    }

    fn render_body(&mut self) -> String {
        self.render_body_content();
        std::mem::take(&mut self.output)
    }

    fn render_body_content(&mut self) {
        for block in &self.doc.blocks {
            self.render_block(block);
        }

        if !self.sources.is_empty() {
            self.render_sources();
        }
    }

    fn render_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(inlines) => {
                if inlines.is_empty() {
                    return;
                }
                self.output.push_str("<p>");
                self.render_inlines(inlines);
                self.output.push_str("</p>\n");
            }
            Block::Heading { level, content } => {
                let tag = format!("h{}", level);
                self.output.push('<');
                self.output.push_str(&tag);
                self.output.push('>');
                self.render_inlines(content);
                self.output.push_str("</");
                self.output.push_str(&tag);
                self.output.push_str(">\n");
            }
            Block::CodeBlock { language, content } => {
                self.output.push_str("<pre><code");
                if let Some(lang) = language {
                    self.output
                        .push_str(&format!(r#" class="language-{}""#, escape_html(lang)));
                }
                self.output.push('>');
                self.output.push_str(&escape_html(content));
                self.output.push_str("</code></pre>\n");
            }
            Block::List {
                ordered,
                start,
                items,
            } => {
                if *ordered {
                    self.output.push_str("<ol");
                    if let Some(start) = start {
                        if *start != 1 {
                            self.output.push_str(&format!(r#" start="{}""#, start));
                        }
                    }
                    self.output.push_str(">\n");
                } else {
                    self.output.push_str("<ul>\n");
                }

                for item in items {
                    self.output.push_str("<li>");
                    self.render_inlines(item);
                    self.output.push_str("</li>\n");
                }

                if *ordered {
                    self.output.push_str("</ol>\n");
                } else {
                    self.output.push_str("</ul>\n");
                }
            }
            Block::DisplayMath(content) => {
                let rendered = self.math.render_display(content);
                self.output.push_str(&rendered);
                self.output.push('\n');
            }
            Block::Table {
                headers,
                alignments,
                rows,
            } => {
                self.render_table(headers, alignments, rows);
            }
            Block::ThematicBreak => {
                self.output.push_str("<hr>\n");
            }
        }
    }

    fn render_table(
        &mut self,
        headers: &[Vec<Inline>],
        alignments: &[Alignment],
        rows: &[Vec<Vec<Inline>>],
    ) {
        self.output.push_str(&format!(
            "<table class=\"{}table\">\n",
            self.config.class_prefix
        ));

        self.output.push_str("<thead>\n<tr>\n");
        for (i, cell) in headers.iter().enumerate() {
            let align = alignments.get(i).copied().unwrap_or_default();
            self.output
                .push_str(&format!("<th{}>", alignment_style(align)));
            self.render_inlines(cell);
            self.output.push_str("</th>\n");
        }
        self.output.push_str("</tr>\n</thead>\n");

        self.output.push_str("<tbody>\n");
        for row in rows {
            self.output.push_str("<tr>\n");
            for (i, cell) in row.iter().enumerate() {
                let align = alignments.get(i).copied().unwrap_or_default();
                self.output
                    .push_str(&format!("<td{}>", alignment_style(align)));
                self.render_inlines(cell);
                self.output.push_str("</td>\n");
            }
            self.output.push_str("</tr>\n");
        }
        self.output.push_str("</tbody>\n</table>\n");
    }

    fn render_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.render_inline(inline);
        }
    }

    fn render_inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => {
                self.output.push_str(&escape_html(text));
            }
            Inline::Emphasis(inlines) => {
                self.output.push_str("<em>");
                self.render_inlines(inlines);
                self.output.push_str("</em>");
            }
            Inline::Strong(inlines) => {
                self.output.push_str("<strong>");
                self.render_inlines(inlines);
                self.output.push_str("</strong>");
            }
            Inline::Code(code) => {
                self.output.push_str("<code>");
                self.output.push_str(&escape_html(code));
                self.output.push_str("</code>");
            }
            Inline::Math(latex) => {
                let rendered = self.math.render_inline(latex);
                self.output.push_str(&rendered);
            }
            Inline::CitationRef(n) => {
                self.render_citation_ref(*n);
            }
            Inline::Link { url, content } => {
                self.output
                    .push_str(&format!(r#"<a href="{}">"#, escape_html(url)));
                self.render_inlines(content);
                self.output.push_str("</a>");
            }
            Inline::SoftBreak => {
                self.output.push('\n');
            }
        }
    }

    fn render_citation_ref(&mut self, n: usize) {
        if n >= 1 && n <= self.sources.len() {
            self.output.push_str(&format!(
                "<a href=\"#citation-{}\" class=\"{}citation\">[{}]</a>",
                n, self.config.class_prefix, n
            ));
        } else {
            // Marker with no matching source renders as plain bracketed text.
            tracing::debug!(marker = n, "source marker out of range");
            self.output.push_str(&format!("[{}]", n));
        }
    }

    fn render_sources(&mut self) {
        self.output.push_str(&format!(
            "<section class=\"{}sources\">\n",
            self.config.class_prefix
        ));
        self.output.push_str("<h2>Sources</h2>\n<ol>\n");

        for (i, source) in self.sources.iter().enumerate() {
            self.output
                .push_str(&format!("<li id=\"citation-{}\">", i + 1));
            self.output.push_str(&format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&source.url),
                escape_html(&source.title)
            ));
            if let Some(ref snippet) = source.snippet {
                self.output.push_str(&format!(
                    "<p class=\"{}source-snippet\">{}</p>",
                    self.config.class_prefix,
                    escape_html(snippet)
                ));
            }
            self.output.push_str("</li>\n");
        }

        self.output.push_str("</ol>\n</section>\n");
    }

    fn default_styles(&self) -> String {
        format!(
            r#"<style>
.{p}document {{ max-width: 800px; margin: 0 auto; padding: 2em; font-family: Georgia, serif; line-height: 1.6; }}
.{p}document pre {{ background: #f6f6f6; padding: 1em; overflow-x: auto; border-radius: 4px; }}
.{p}document code {{ font-family: "SF Mono", Menlo, monospace; font-size: 0.9em; }}
.{p}table {{ border-collapse: collapse; margin: 1em auto; }}
.{p}table th, .{p}table td {{ border: 1px solid #ddd; padding: 0.5em 1em; }}
.{p}table th {{ background: #f0f0f0; }}
.{p}citation {{ color: #0066cc; text-decoration: none; font-size: 0.85em; vertical-align: super; }}
.{p}citation:hover {{ text-decoration: underline; }}
.{p}sources {{ margin-top: 3em; border-top: 1px solid #ddd; font-size: 0.9em; }}
.{p}sources ol {{ padding-left: 2em; }}
.{p}source-snippet {{ color: #666; margin: 0.25em 0 0.75em; }}
.math.display {{ text-align: center; margin: 1em 0; }}
</style>
"#,
            p = self.config.class_prefix
        )
    }
}

/// Script announcing that content is fully rendered.
///
/// Dispatches a `content-ready` event carrying the measured scroll height,
/// either after math typesetting completes or on plain window load, so
/// embedders never size containers off a wall-clock delay.
pub(crate) fn ready_script(wait_for_typeset: bool) -> String {
    let trigger = if wait_for_typeset {
        r#"window.addEventListener("math-typeset", signal, { once: true });"#
    } else {
        r#"window.addEventListener("load", signal, { once: true });"#
    };

    format!(
        r#"<script>
(function () {{
    function signal() {{
        document.body.dataset.contentReady = "true";
        window.dispatchEvent(new CustomEvent("content-ready", {{
            detail: {{ height: document.documentElement.scrollHeight }}
        }}));
    }}
    {trigger}
}})();
</script>
"#
    )
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn alignment_style(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "",
        Alignment::Center => r#" style="text-align: center""#,
        Alignment::Right => r#" style="text-align: right""#,
    }
}
