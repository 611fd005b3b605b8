//! Inline-level parsing.

use crate::ast::Inline;
use crate::parser::lexer::{
    citation_marker, display_math, emphasis, inline_code, inline_math, strong, Token,
};

/// Parse inline content from a string.
///
/// Total: any input produces a sequence of inlines. Malformed constructs
/// (unterminated `$`, stray markers) degrade to plain text.
pub fn parse_inlines(input: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        if let Some((inline, rest)) = try_parse_inline(remaining) {
            inlines.push(inline);
            remaining = rest;
        } else {
            let (text, rest) = consume_text(remaining);
            if !text.is_empty() {
                push_text(&mut inlines, text);
                remaining = rest;
            } else {
                // No progress made - consume one character to avoid an
                // infinite loop.
                let c = remaining.chars().next().unwrap();
                push_char(&mut inlines, c);
                remaining = &remaining[c.len_utf8()..];
            }
        }
    }

    inlines
}

fn try_parse_inline(input: &str) -> Option<(Inline, &str)> {
    // Order matters - try more specific patterns first.

    // Display math in inline position ($$...$$) - treat as inline math.
    if input.starts_with("$$") {
        if let Ok((rest, Token::DisplayMath(content))) = display_math(input) {
            return Some((Inline::Math(content.to_string()), rest));
        }
    }

    // Inline math ($...$). An unterminated $ falls through to plain text.
    if input.starts_with('$') && !input.starts_with("$$") {
        if let Ok((rest, Token::InlineMath(content))) = inline_math(input) {
            return Some((Inline::Math(content.to_string()), rest));
        }
    }

    // Strong (**...** or __...__), opener flanked by non-whitespace
    if (input.starts_with("**") || input.starts_with("__")) && opens_emphasis(input, 2) {
        if let Ok((rest, Token::Strong(content))) = strong(input) {
            return Some((Inline::Strong(parse_inlines(content)), rest));
        }
    }

    // Emphasis (*...* or _..._), opener flanked by non-whitespace
    if ((input.starts_with('*') && !input.starts_with("**"))
        || (input.starts_with('_') && !input.starts_with("__")))
        && opens_emphasis(input, 1)
    {
        if let Ok((rest, Token::Emphasis(content))) = emphasis(input) {
            return Some((Inline::Emphasis(parse_inlines(content)), rest));
        }
    }

    // Inline code (`...`)
    if input.starts_with('`') && !input.starts_with("```") {
        if let Ok((rest, Token::InlineCode(content))) = inline_code(input) {
            return Some((Inline::Code(content.to_string()), rest));
        }
    }

    // Source marker ([n], digits only, not a link)
    if input.starts_with('[') {
        if let Ok((rest, Token::CitationMarker(digits))) = citation_marker(input) {
            // Absurdly long digit runs overflow; degrade to literal text.
            if let Ok(n) = digits.parse::<usize>() {
                return Some((Inline::CitationRef(n), rest));
            }
        }
        if let Some((inline, rest)) = try_parse_link(input) {
            return Some((inline, rest));
        }
    }

    None
}

/// An emphasis opener must be followed by non-whitespace, so a lone
/// asterisk in prose (`2 * 3`) stays literal.
fn opens_emphasis(input: &str, marker_len: usize) -> bool {
    input[marker_len..]
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace())
}

fn try_parse_link(input: &str) -> Option<(Inline, &str)> {
    // [text](url)
    let mut depth = 0;
    let mut text_end = None;

    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    text_end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let text_end = text_end?;
    let text = &input[1..text_end];
    let after_text = &input[text_end + 1..];

    if !after_text.starts_with('(') {
        return None;
    }

    // Find closing paren, handling nested parens.
    let mut depth = 0;
    let mut url_end = None;

    for (i, c) in after_text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    url_end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let url_end = url_end?;
    let url = strip_title(&after_text[1..url_end]);
    let rest = &after_text[url_end + 1..];

    Some((
        Inline::Link {
            url: url.to_string(),
            content: parse_inlines(text),
        },
        rest,
    ))
}

/// Drop an optional quoted title from a link target, keeping just the URL.
fn strip_title(target: &str) -> &str {
    let target = target.trim();
    match target.find('"') {
        Some(quote) => target[..quote].trim_end(),
        None => target,
    }
}

/// Push a text run, converting embedded newlines to soft breaks.
fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if !text.contains('\n') {
        inlines.push(Inline::Text(text.to_string()));
        return;
    }
    let parts: Vec<&str> = text.split('\n').collect();
    for (i, part) in parts.iter().enumerate() {
        if !part.is_empty() {
            inlines.push(Inline::Text(part.to_string()));
        }
        if i < parts.len() - 1 {
            inlines.push(Inline::SoftBreak);
        }
    }
}

fn push_char(inlines: &mut Vec<Inline>, c: char) {
    if c == '\n' {
        inlines.push(Inline::SoftBreak);
    } else {
        inlines.push(Inline::Text(c.to_string()));
    }
}

fn consume_text(input: &str) -> (&str, &str) {
    // Characters that might start inline elements.
    const SPECIAL: &[char] = &['*', '_', '`', '$', '[', '\n'];

    for (i, c) in input.char_indices() {
        if SPECIAL.contains(&c) {
            if i == 0 {
                return ("", input);
            }
            return (&input[..i], &input[i..]);
        }
    }

    (input, "")
}
