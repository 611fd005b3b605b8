//! Best-effort Unicode math formatter.
//!
//! Not real typesetting: fractions and roots become parenthesized text, a
//! fixed table of commands maps to Unicode symbols, and digit scripts map to
//! super/subscript characters. Unrecognized commands, nested scripts, and
//! multi-digit exponents pass through literally.

use super::MathRenderer;

/// Renderer that substitutes Unicode symbols for a fixed set of commands.
pub struct UnicodeRenderer;

impl UnicodeRenderer {
    /// Create a new Unicode renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnicodeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for UnicodeRenderer {
    fn render_inline(&self, latex: &str) -> String {
        format!(
            r#"<span class="math inline">{}</span>"#,
            escape_html(&latex_to_unicode(latex))
        )
    }

    fn render_display(&self, latex: &str) -> String {
        format!(
            r#"<div class="math display">{}</div>"#,
            escape_html(&latex_to_unicode(latex))
        )
    }

    fn head_content(&self) -> Option<String> {
        None
    }
}

/// Convert LaTeX-like math content to a best-effort Unicode string.
///
/// Pure and total: any input produces output. Fractions and roots are
/// rewritten with brace matching (`\frac{a}{b}` → `(a)/(b)`, `\sqrt{x}` →
/// `√(x)`), then the substitution table runs in order, then any remaining
/// braces are stripped.
pub fn latex_to_unicode(latex: &str) -> String {
    let mut result = rewrite_groups(latex);

    for (command, symbol) in REPLACEMENTS {
        if result.contains(command) {
            result = result.replace(command, symbol);
        }
    }

    result.chars().filter(|&c| c != '{' && c != '}').collect()
}

/// Rewrite `\frac{a}{b}` and `\sqrt{x}` via brace matching, recursing into
/// group contents. A command with malformed groups is left literal.
fn rewrite_groups(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let frac = rest.find("\\frac{");
        let sqrt = rest.find("\\sqrt{");

        let (pos, is_frac) = match (frac, sqrt) {
            (Some(f), Some(s)) if f <= s => (f, true),
            (Some(f), None) => (f, true),
            (_, Some(s)) => (s, false),
            (None, None) => {
                out.push_str(rest);
                return out;
            }
        };

        out.push_str(&rest[..pos]);
        let after = &rest[pos + 5..]; // past "\frac" or "\sqrt"

        if is_frac {
            match brace_group(after).and_then(|(num, r)| {
                brace_group(r).map(|(den, r2)| (num, den, r2))
            }) {
                Some((num, den, r)) => {
                    out.push('(');
                    out.push_str(&rewrite_groups(num));
                    out.push_str(")/(");
                    out.push_str(&rewrite_groups(den));
                    out.push(')');
                    rest = r;
                }
                None => {
                    out.push_str("\\frac");
                    rest = after;
                }
            }
        } else {
            match brace_group(after) {
                Some((inner, r)) => {
                    out.push('√');
                    out.push('(');
                    out.push_str(&rewrite_groups(inner));
                    out.push(')');
                    rest = r;
                }
                None => {
                    out.push('√');
                    rest = after;
                }
            }
        }
    }
}

/// Split a leading `{...}` group with balanced braces. Returns the inner
/// content and the remainder after the closing brace.
fn brace_group(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with('{') {
        return None;
    }

    let mut depth = 0;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
    }

    None
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// Ordered substitution table. Commands sharing a prefix are listed
// longest-first so the shorter never corrupts the longer.
const REPLACEMENTS: &[(&str, &str)] = &[
    // Operators, relations, set symbols
    ("\\times", "×"),
    ("\\div", "÷"),
    ("\\pm", "±"),
    ("\\cdot", "·"),
    ("\\leq", "≤"),
    ("\\geq", "≥"),
    ("\\neq", "≠"),
    ("\\approx", "≈"),
    ("\\equiv", "≡"),
    ("\\infty", "∞"),
    ("\\int", "∫"),
    ("\\notin", "∉"),
    ("\\in", "∈"),
    ("\\subseteq", "⊆"),
    ("\\subset", "⊂"),
    ("\\supseteq", "⊇"),
    ("\\supset", "⊃"),
    ("\\cup", "∪"),
    ("\\cap", "∩"),
    ("\\emptyset", "∅"),
    ("\\forall", "∀"),
    ("\\exists", "∃"),
    ("\\partial", "∂"),
    ("\\nabla", "∇"),
    ("\\sum", "∑"),
    ("\\prod", "∏"),
    ("\\rightarrow", "→"),
    ("\\Rightarrow", "⇒"),
    ("\\to", "→"),
    // Greek letters
    ("\\alpha", "α"),
    ("\\beta", "β"),
    ("\\Gamma", "Γ"),
    ("\\gamma", "γ"),
    ("\\Delta", "Δ"),
    ("\\delta", "δ"),
    ("\\epsilon", "ε"),
    ("\\zeta", "ζ"),
    ("\\eta", "η"),
    ("\\Theta", "Θ"),
    ("\\theta", "θ"),
    ("\\iota", "ι"),
    ("\\kappa", "κ"),
    ("\\Lambda", "Λ"),
    ("\\lambda", "λ"),
    ("\\mu", "μ"),
    ("\\nu", "ν"),
    ("\\xi", "ξ"),
    ("\\Pi", "Π"),
    ("\\pi", "π"),
    ("\\rho", "ρ"),
    ("\\Sigma", "Σ"),
    ("\\sigma", "σ"),
    ("\\tau", "τ"),
    ("\\upsilon", "υ"),
    ("\\Phi", "Φ"),
    ("\\phi", "φ"),
    ("\\chi", "χ"),
    ("\\Psi", "Ψ"),
    ("\\psi", "ψ"),
    ("\\Omega", "Ω"),
    ("\\omega", "ω"),
    // Digit superscripts
    ("^0", "⁰"),
    ("^1", "¹"),
    ("^2", "²"),
    ("^3", "³"),
    ("^4", "⁴"),
    ("^5", "⁵"),
    ("^6", "⁶"),
    ("^7", "⁷"),
    ("^8", "⁸"),
    ("^9", "⁹"),
    // Digit subscripts
    ("_0", "₀"),
    ("_1", "₁"),
    ("_2", "₂"),
    ("_3", "₃"),
    ("_4", "₄"),
    ("_5", "₅"),
    ("_6", "₆"),
    ("_7", "₇"),
    ("_8", "₈"),
    ("_9", "₉"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_greek_letters() {
        assert_eq!(latex_to_unicode("\\alpha + \\beta"), "α + β");
    }

    #[test]
    fn test_operators() {
        assert_eq!(latex_to_unicode("a \\times b \\leq c"), "a × b ≤ c");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(latex_to_unicode("\\frac{1}{2}"), "(1)/(2)");
    }

    #[test]
    fn test_nested_fraction() {
        assert_eq!(latex_to_unicode("\\frac{\\frac{1}{2}}{3}"), "((1)/(2))/(3)");
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(latex_to_unicode("\\sqrt{x + 1}"), "√(x + 1)");
    }

    #[test]
    fn test_digit_scripts() {
        assert_eq!(latex_to_unicode("x^2 + y_1"), "x² + y₁");
    }

    #[test]
    fn test_prefix_ordering() {
        // \infty and \int must survive the \in replacement
        assert_eq!(latex_to_unicode("\\int_0 \\infty x \\in S"), "∫₀ ∞ x ∈ S");
    }

    #[test]
    fn test_idempotent_without_commands() {
        let plain = "a + b = c";
        assert_eq!(latex_to_unicode(plain), plain);
    }

    #[test]
    fn test_braces_stripped() {
        assert_eq!(latex_to_unicode("x^{2}"), "x^2");
    }

    #[test]
    fn test_malformed_frac_left_literal() {
        assert_eq!(latex_to_unicode("\\frac12"), "\\frac12");
    }

    #[test]
    fn test_unknown_command_passes_through() {
        assert_eq!(latex_to_unicode("\\mathbb{R}"), "\\mathbbR");
    }
}
