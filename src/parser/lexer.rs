//! Lexer for tokenizing study-content Markdown.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, not_line_ending, space0, space1},
    combinator::{map, not, opt, peek, recognize},
    multi::many0,
    sequence::{delimited, pair, tuple},
    IResult,
};

/// A token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    // Block-level tokens
    Heading(u8, &'a str),     // Level, content
    FencedCodeStart(&'a str), // Language
    ThematicBreak,
    ListItemMarker(ListMarker),

    // Inline tokens
    Emphasis(&'a str),   // * or _
    Strong(&'a str),     // ** or __
    InlineCode(&'a str),
    InlineMath(&'a str),
    DisplayMath(&'a str),
    CitationMarker(&'a str), // digits of [n]
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListMarker {
    Unordered,
    Ordered(u32),
}

/// Parse a heading (ATX style: # Heading).
pub fn heading(input: &str) -> IResult<&str, Token> {
    let (input, hashes) = take_while1(|c| c == '#')(input)?;
    let level = hashes.len().min(6) as u8;
    let (input, _) = space1(input)?;
    let (input, content) = not_line_ending(input)?;
    // Trim trailing # and spaces
    let content = content.trim_end_matches(|c| c == '#' || c == ' ');
    Ok((input, Token::Heading(level, content)))
}

/// Parse a thematic break (---, ***, ___).
pub fn thematic_break(input: &str) -> IResult<&str, Token> {
    let (input, _) = alt((
        recognize(tuple((tag("-"), tag("-"), tag("-"), many0(char('-'))))),
        recognize(tuple((tag("*"), tag("*"), tag("*"), many0(char('*'))))),
        recognize(tuple((tag("_"), tag("_"), tag("_"), many0(char('_'))))),
    ))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Token::ThematicBreak))
}

/// Parse a fenced code block start.
pub fn fenced_code_start(input: &str) -> IResult<&str, Token> {
    let (input, _) = alt((tag("```"), tag("~~~")))(input)?;
    let (input, lang) = opt(take_while1(|c: char| {
        c.is_alphanumeric() || c == '-' || c == '_'
    }))(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, Token::FencedCodeStart(lang.unwrap_or(""))))
}

/// Parse a list item marker.
pub fn list_item_marker(input: &str) -> IResult<&str, Token> {
    alt((
        // Unordered
        map(
            tuple((alt((char('-'), char('*'), char('+'))), space1)),
            |_| Token::ListItemMarker(ListMarker::Unordered),
        ),
        // Ordered
        map(
            tuple((
                take_while1(|c: char| c.is_ascii_digit()),
                alt((char('.'), char(')'))),
                space1,
            )),
            |(num, _, _): (&str, _, _)| {
                Token::ListItemMarker(ListMarker::Ordered(num.parse().unwrap_or(1)))
            },
        ),
    ))(input)
}

/// Parse inline math ($...$).
pub fn inline_math(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    let (input, _) = peek(not(char('$')))(input)?; // Not display math
    let (input, content) = take_until("$")(input)?;
    let (input, _) = char('$')(input)?;
    Ok((input, Token::InlineMath(content)))
}

/// Parse display math ($$...$$).
pub fn display_math(input: &str) -> IResult<&str, Token> {
    let (input, _) = tag("$$")(input)?;
    let (input, content) = take_until("$$")(input)?;
    let (input, _) = tag("$$")(input)?;
    Ok((input, Token::DisplayMath(content)))
}

/// Parse a numbered source marker ([n]). Not a link: must not be followed
/// by an opening paren.
pub fn citation_marker(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('[')(input)?;
    let (input, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let (input, _) = char(']')(input)?;
    let (input, _) = peek(not(char('(')))(input)?;
    Ok((input, Token::CitationMarker(digits)))
}

/// Parse inline code (`code`).
pub fn inline_code(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('`')(input)?;
    let (input, _) = peek(not(char('`')))(input)?; // Not fenced code
    let (input, content) = take_until("`")(input)?;
    let (input, _) = char('`')(input)?;
    Ok((input, Token::InlineCode(content)))
}

/// Parse emphasis (*text* or _text_).
pub fn emphasis(input: &str) -> IResult<&str, Token> {
    alt((
        delimited(
            pair(char('*'), peek(not(char('*')))),
            map(take_until("*"), Token::Emphasis),
            char('*'),
        ),
        delimited(
            pair(char('_'), peek(not(char('_')))),
            map(take_until("_"), Token::Emphasis),
            char('_'),
        ),
    ))(input)
}

/// Parse strong (**text** or __text__).
pub fn strong(input: &str) -> IResult<&str, Token> {
    alt((
        delimited(tag("**"), map(take_until("**"), Token::Strong), tag("**")),
        delimited(tag("__"), map(take_until("__"), Token::Strong), tag("__")),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(
            heading("# Hello World"),
            Ok(("", Token::Heading(1, "Hello World")))
        );
        assert_eq!(
            heading("### Level 3 ###"),
            Ok(("", Token::Heading(3, "Level 3")))
        );
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            inline_math("$E = mc^2$ rest"),
            Ok((" rest", Token::InlineMath("E = mc^2")))
        );
    }

    #[test]
    fn test_display_math() {
        assert_eq!(
            display_math("$$\\int_0^1 x dx$$"),
            Ok(("", Token::DisplayMath("\\int_0^1 x dx")))
        );
    }

    #[test]
    fn test_citation_marker() {
        assert_eq!(
            citation_marker("[1] rest"),
            Ok((" rest", Token::CitationMarker("1")))
        );
        assert_eq!(
            citation_marker("[12]."),
            Ok((".", Token::CitationMarker("12")))
        );
        // A link is not a citation marker
        assert!(citation_marker("[1](http://a)").is_err());
        assert!(citation_marker("[abc]").is_err());
    }

    #[test]
    fn test_list_item_marker() {
        assert_eq!(
            list_item_marker("- item"),
            Ok(("item", Token::ListItemMarker(ListMarker::Unordered)))
        );
        assert_eq!(
            list_item_marker("3. item"),
            Ok(("item", Token::ListItemMarker(ListMarker::Ordered(3))))
        );
    }

    #[test]
    fn test_unterminated_math_fails() {
        assert!(inline_math("$x + y").is_err());
    }
}
