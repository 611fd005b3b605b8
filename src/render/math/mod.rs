//! Math rendering backends.

mod katex;
mod unicode;

pub use self::katex::KaTeXRenderer;
pub use self::unicode::{latex_to_unicode, UnicodeRenderer};

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathBackend {
    /// Output raw LaTeX for KaTeX to typeset client-side.
    #[default]
    KaTeX,
    /// Best-effort Unicode substitution, no client-side typesetting.
    Unicode,
}

/// Trait for math renderers. Rendering is total: any input produces output.
pub trait MathRenderer {
    /// Render inline math.
    fn render_inline(&self, latex: &str) -> String;

    /// Render display math.
    fn render_display(&self, latex: &str) -> String;

    /// Get any required HTML head content (scripts, styles).
    fn head_content(&self) -> Option<String>;
}

/// Create a math renderer for the given backend.
pub fn create_renderer(backend: MathBackend) -> Box<dyn MathRenderer> {
    match backend {
        MathBackend::KaTeX => Box::new(KaTeXRenderer::new()),
        MathBackend::Unicode => Box::new(UnicodeRenderer::new()),
    }
}
