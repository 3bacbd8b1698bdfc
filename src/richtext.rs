//! Inline emphasis markup carried inside block text.
//!
//! Block text is stored verbatim.  When a block is laid out its text is interpreted through a
//! small tag grammar borrowed from the paragraph markup most document-layout libraries accept:
//!
//! - `<b>`/`<strong>` for bold text, `<i>`/`<em>` for italic text and `<u>` for underlines
//! - `<font color="#RRGGBB">...</font>` for colored text
//! - `<br/>` for a hard line break
//! - the entities `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric `&#NNN;`/`&#xHH;`
//!
//! [`parse_markup`] validates strictly.  [`parse_markup_lossy`] never fails: malformed input is
//! rendered literally, since text is author-supplied and never sanitized.

use std::fmt;

use crate::style::Color;

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span should be rendered in italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns whether the span is marked as underlined.
    pub fn is_underlined(&self) -> bool {
        self.underline
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Convenience shorthand that marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Convenience shorthand that marks the span as underlined.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Convenience shorthand that assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// One hard line of a paragraph: the spans between two `<br/>` tags.
pub type MarkupLine = Vec<Span>;

/// Parse errors produced by [`parse_markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    index: usize,
    message: String,
}

impl ParseError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the original input string where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable description of the parsing error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Default)]
struct StyleState {
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<Color>,
}

impl StyleState {
    fn to_span(self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bold(&'static str),
    Italic(&'static str),
    Underline,
    Font,
}

impl Marker {
    fn tag_name(self) -> &'static str {
        match self {
            Marker::Bold(name) | Marker::Italic(name) => name,
            Marker::Underline => "u",
            Marker::Font => "font",
        }
    }

    fn apply(self, mut state: StyleState, color: Option<Color>) -> StyleState {
        match self {
            Marker::Bold(_) => state.bold = true,
            Marker::Italic(_) => state.italic = true,
            Marker::Underline => state.underline = true,
            Marker::Font => state.color = color.or(state.color),
        }
        state
    }
}

enum Piece {
    Text(Span),
    Break,
}

enum Tag {
    Open(Marker, Option<Color>),
    Close(String),
    LineBreak,
}

/// Parses inline markup into hard lines of [`Span`]s, rejecting malformed input.
pub fn parse_markup(input: &str) -> Result<Vec<MarkupLine>, ParseError> {
    let mut pieces = Vec::new();
    let index = parse_inner(input, 0, StyleState::default(), None, &mut pieces)?;
    debug_assert_eq!(index, input.len());
    Ok(split_lines(pieces))
}

/// Parses inline markup, falling back to the literal text when the markup is malformed.
pub fn parse_markup_lossy(input: &str) -> Vec<MarkupLine> {
    match parse_markup(input) {
        Ok(lines) => lines,
        Err(err) => {
            log::warn!("Rendering text literally, inline markup rejected: {}", err);
            vec![vec![Span::new(input)]]
        }
    }
}

fn split_lines(pieces: Vec<Piece>) -> Vec<MarkupLine> {
    let mut lines = vec![Vec::new()];
    for piece in pieces {
        match piece {
            Piece::Text(span) => {
                if let Some(line) = lines.last_mut() {
                    line.push(span);
                }
            }
            Piece::Break => lines.push(Vec::new()),
        }
    }
    lines
}

fn parse_inner(
    input: &str,
    mut index: usize,
    state: StyleState,
    closing: Option<Marker>,
    pieces: &mut Vec<Piece>,
) -> Result<usize, ParseError> {
    let mut buffer = String::new();

    while index < input.len() {
        let rest = &input[index..];

        if rest.starts_with('<') {
            let (tag, after_tag) = parse_tag(input, index)?;
            flush_buffer(&mut buffer, pieces, state);
            match tag {
                Tag::LineBreak => pieces.push(Piece::Break),
                Tag::Open(marker, color) => {
                    let nested = marker.apply(state, color);
                    index = parse_inner(input, after_tag, nested, Some(marker), pieces)?;
                    continue;
                }
                Tag::Close(name) => {
                    return match closing {
                        Some(marker) if marker.tag_name() == name => Ok(after_tag),
                        Some(marker) => Err(ParseError::new(
                            index,
                            format!(
                                "closing tag `</{}>` does not match open `<{}>`",
                                name,
                                marker.tag_name()
                            ),
                        )),
                        None => Err(ParseError::new(
                            index,
                            format!("unexpected closing tag `</{name}>`"),
                        )),
                    };
                }
            }
            index = after_tag;
            continue;
        }

        if rest.starts_with('&') {
            if let Some((ch, consumed)) = parse_entity(rest) {
                buffer.push(ch);
                index += consumed;
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        buffer.push(ch);
        index += ch.len_utf8();
    }

    if let Some(marker) = closing {
        Err(ParseError::new(
            index,
            format!("unterminated `<{}>` tag", marker.tag_name()),
        ))
    } else {
        flush_buffer(&mut buffer, pieces, state);
        Ok(index)
    }
}

fn flush_buffer(buffer: &mut String, pieces: &mut Vec<Piece>, state: StyleState) {
    if buffer.is_empty() {
        return;
    }
    pieces.push(Piece::Text(state.to_span(std::mem::take(buffer))));
}

fn parse_tag(input: &str, index: usize) -> Result<(Tag, usize), ParseError> {
    let end = input[index..]
        .find('>')
        .map(|offset| index + offset)
        .ok_or_else(|| ParseError::new(index, "unterminated tag; expected `>`"))?;
    let body = input[index + 1..end].trim();
    let after = end + 1;

    if let Some(name) = body.strip_prefix('/') {
        return Ok((Tag::Close(name.trim().to_ascii_lowercase()), after));
    }

    let self_closing = body.ends_with('/');
    let body = body.trim_end_matches('/').trim();
    let (name, attributes) = match body.find(char::is_whitespace) {
        Some(split) => (&body[..split], body[split..].trim()),
        None => (body, ""),
    };
    let name = name.to_ascii_lowercase();

    if name == "br" {
        return Ok((Tag::LineBreak, after));
    }
    if self_closing {
        return Err(ParseError::new(
            index,
            format!("unsupported self-closing tag `<{name}/>`"),
        ));
    }

    let tag = match name.as_str() {
        "b" => Tag::Open(Marker::Bold("b"), None),
        "strong" => Tag::Open(Marker::Bold("strong"), None),
        "i" => Tag::Open(Marker::Italic("i"), None),
        "em" => Tag::Open(Marker::Italic("em"), None),
        "u" => Tag::Open(Marker::Underline, None),
        "font" => {
            let color = match attribute(attributes, "color") {
                Some(value) => Some(Color::from_hex(value).ok_or_else(|| {
                    ParseError::new(
                        index,
                        format!("invalid color `{value}`; expected `#RRGGBB`"),
                    )
                })?),
                None => None,
            };
            Tag::Open(Marker::Font, color)
        }
        other => {
            return Err(ParseError::new(
                index,
                format!("unsupported tag `<{other}>`"),
            ))
        }
    };
    Ok((tag, after))
}

fn attribute<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes.split_whitespace().find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if !name.eq_ignore_ascii_case(key) {
            return None;
        }
        Some(value.trim_matches(|c| c == '"' || c == '\''))
    })
}

fn parse_entity(rest: &str) -> Option<(char, usize)> {
    let end = rest.find(';').filter(|&end| end <= 10)?;
    let name = &rest[1..end];
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_line(input: &str) -> Vec<Span> {
        let mut lines = parse_markup(input).expect("parse succeeds");
        assert_eq!(lines.len(), 1);
        lines.remove(0)
    }

    #[test]
    fn parse_plain_text() {
        let spans = single_line("Hello world");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Hello world");
        assert!(!spans[0].is_bold());
    }

    #[test]
    fn parse_nested_styles() {
        let spans = single_line("This is <b>very <i>cool</i></b>!");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].text(), "This is ");
        assert!(!spans[0].is_bold());
        assert!(spans[1].is_bold());
        assert_eq!(spans[1].text(), "very ");
        assert!(spans[2].is_bold());
        assert!(spans[2].is_italic());
        assert_eq!(spans[2].text(), "cool");
        assert_eq!(spans[3].text(), "!");
        assert!(!spans[3].is_bold());
    }

    #[test]
    fn parse_font_color() {
        let spans = single_line("<font color=\"#ff0000\">Red</font> text");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "Red");
        assert_eq!(spans[0].color(), Some(Color::rgb(0xff, 0x00, 0x00)));
        assert_eq!(spans[1].color(), None);
    }

    #[test]
    fn line_breaks_split_lines_inside_tags() {
        let lines = parse_markup("<b>User</b> one<br/><b>Backend<br />Server</b>").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0][0].text(), "User");
        assert_eq!(lines[1][0].text(), "Backend");
        assert!(lines[2][0].is_bold());
        assert_eq!(lines[2][0].text(), "Server");
    }

    #[test]
    fn entities_are_decoded() {
        let spans = single_line("R&amp;D &lt;tag&gt; &#8594; Q&A");
        assert_eq!(spans[0].text(), "R&D <tag> \u{2192} Q&A");
    }

    #[test]
    fn error_on_unterminated_bold() {
        let err = parse_markup("<b>oops").unwrap_err();
        assert!(err.message().contains("unterminated `<b>`"));
    }

    #[test]
    fn error_on_mismatched_close() {
        let err = parse_markup("<b>one</i>").unwrap_err();
        assert!(err.message().contains("does not match"));
        assert_eq!(err.index(), 6);
    }

    #[test]
    fn error_on_invalid_color() {
        let err = parse_markup("<font color=\"#12FG34\">x</font>").unwrap_err();
        assert!(err.message().contains("invalid color"));
    }

    #[test]
    fn lossy_parse_falls_back_to_literal_text() {
        let lines = parse_markup_lossy("a < b and <blink>c");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0].text(), "a < b and <blink>c");
        assert!(!lines[0][0].is_bold());
    }
}
