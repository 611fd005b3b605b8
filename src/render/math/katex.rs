//! KaTeX passthrough renderer.
//!
//! The HTML transform never converts math itself; it escapes the LaTeX and
//! leaves it delimited for the client-side typesetting library.

use super::MathRenderer;

/// Renderer that outputs raw LaTeX for client-side rendering.
pub struct KaTeXRenderer;

impl KaTeXRenderer {
    /// Create a new KaTeX renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for KaTeXRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for KaTeXRenderer {
    fn render_inline(&self, latex: &str) -> String {
        format!(
            r#"<span class="math inline">\({}\)</span>"#,
            escape_html(latex)
        )
    }

    fn render_display(&self, latex: &str) -> String {
        format!(
            r#"<div class="math display">\[{}\]</div>"#,
            escape_html(latex)
        )
    }

    fn head_content(&self) -> Option<String> {
        Some(KATEX_HEAD.to_string())
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// The auto-render onload announces typesetting completion so embedders can
// key height measurement and capture off an explicit signal.
const KATEX_HEAD: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js" crossorigin="anonymous"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/auto-render.min.js" crossorigin="anonymous"
    onload="renderMathInElement(document.body, {
        delimiters: [
            {left: '\\[', right: '\\]', display: true},
            {left: '\\(', right: '\\)', display: false}
        ]
    });
    window.dispatchEvent(new Event('math-typeset'));"></script>"#;
