//! Line breaking for styled text.
//!
//! Text is split into hard lines at `<br/>`, each hard line into words at whitespace, and words
//! are packed greedily into lines no wider than the available width.  A word that is wider than
//! a whole line is broken between characters.

use crate::model::Stroke;
use crate::richtext::{self, Span};
use crate::style::{Alignment, Color, ParagraphStyle};

use super::{DrawOp, Face, Strip, TextMetrics, TextRun};

#[derive(Clone, Debug)]
struct Fragment {
    text: String,
    face: Face,
    color: Color,
    underline: bool,
    width: f64,
}

#[derive(Clone, Debug, Default)]
struct Word {
    fragments: Vec<Fragment>,
    width: f64,
}

impl Word {
    fn push(&mut self, fragment: Fragment) {
        self.width += fragment.width;
        self.fragments.push(fragment);
    }
}

#[derive(Debug, Default)]
struct Line {
    words: Vec<Word>,
    spaces: Vec<f64>,
    width: f64,
}

/// Lays out `text` for `style` within `width` points, optionally prefixing the first line
/// with `bullet` drawn at the style's bullet indent.
pub(crate) fn layout_text<M>(
    metrics: &M,
    text: &str,
    style: &ParagraphStyle,
    width: f64,
    bullet: Option<&str>,
) -> Vec<Strip>
where
    M: TextMetrics + ?Sized,
{
    let hard_lines: Vec<Vec<Word>> = richtext::parse_markup_lossy(text)
        .iter()
        .map(|spans| split_words(metrics, spans, style))
        .collect();

    let leading = style.line_height();
    let body_width = (width - style.left_indent - style.right_indent).max(1.0);
    let mut boxes = Vec::new();

    if hard_lines.iter().any(|words| !words.is_empty()) {
        let mut first = true;
        for words in hard_lines {
            if words.is_empty() {
                boxes.push(Strip {
                    height: leading,
                    ops: Vec::new(),
                });
                continue;
            }
            let lines = wrap(metrics, words, body_width, style.first_line_indent, first);
            let count = lines.len();
            for (index, line) in lines.into_iter().enumerate() {
                let indent = style.left_indent
                    + if first && index == 0 {
                        style.first_line_indent
                    } else {
                        0.0
                    };
                let available = width - indent - style.right_indent;
                let last = index + 1 == count;
                boxes.push(place_line(line, style, indent, available, last));
            }
            first = false;
        }
    }

    if let Some(bullet) = bullet {
        let face = Face::from_style(style);
        let glyph = TextRun {
            x: style.bullet_indent,
            y: text_top(leading, face.size),
            width: metrics.text_width(bullet, &face),
            text: bullet.to_owned(),
            face,
            color: style.color,
        };
        match boxes.first_mut() {
            Some(line) => line.ops.insert(0, DrawOp::Text(glyph)),
            None => boxes.push(Strip {
                height: leading,
                ops: vec![DrawOp::Text(glyph)],
            }),
        }
    }

    boxes
}

/// Offset from a line's top edge to the top of its text, centering the font size in the leading.
pub(crate) fn text_top(leading: f64, size: f64) -> f64 {
    ((leading - size) / 2.0).max(0.0)
}

fn underline_offset(leading: f64, size: f64) -> f64 {
    text_top(leading, size) + size * 0.95
}

fn split_words<M>(metrics: &M, spans: &[Span], style: &ParagraphStyle) -> Vec<Word>
where
    M: TextMetrics + ?Sized,
{
    let mut words = Vec::new();
    let mut current = Word::default();
    for span in spans {
        let face = Face::from_style(style).with_span(span);
        let color = span.color().unwrap_or(style.color);
        let mut buffer = String::new();
        for ch in span.text().chars() {
            if ch.is_whitespace() && ch != '\u{a0}' {
                if !buffer.is_empty() {
                    let text = std::mem::take(&mut buffer);
                    current.push(fragment(metrics, text, &face, color, span));
                }
                if !current.fragments.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                buffer.push(ch);
            }
        }
        if !buffer.is_empty() {
            current.push(fragment(metrics, buffer, &face, color, span));
        }
    }
    if !current.fragments.is_empty() {
        words.push(current);
    }
    words
}

fn fragment<M>(metrics: &M, text: String, face: &Face, color: Color, span: &Span) -> Fragment
where
    M: TextMetrics + ?Sized,
{
    Fragment {
        width: metrics.text_width(&text, face),
        text,
        face: face.clone(),
        color,
        underline: span.is_underlined(),
    }
}

fn wrap<M>(
    metrics: &M,
    words: Vec<Word>,
    body_width: f64,
    first_line_indent: f64,
    first_paragraph_line: bool,
) -> Vec<Line>
where
    M: TextMetrics + ?Sized,
{
    let limit = |lines: &[Line]| {
        if first_paragraph_line && lines.is_empty() {
            (body_width - first_line_indent).max(1.0)
        } else {
            body_width
        }
    };
    let mut lines: Vec<Line> = Vec::new();
    let mut line = Line::default();

    for word in words {
        if !line.words.is_empty() {
            let space = word
                .fragments
                .first()
                .map(|fragment| metrics.text_width(" ", &fragment.face))
                .unwrap_or(0.0);
            if line.width + space + word.width <= limit(&lines) {
                line.width += space + word.width;
                line.spaces.push(space);
                line.words.push(word);
                continue;
            }
            lines.push(std::mem::take(&mut line));
        }

        let available = limit(&lines);
        if word.width <= available {
            line.width = word.width;
            line.words.push(word);
            continue;
        }
        let mut pieces = break_word(metrics, word, available, body_width);
        let tail = pieces.pop();
        lines.extend(pieces.into_iter().map(|piece| Line {
            width: piece.width,
            words: vec![piece],
            spaces: Vec::new(),
        }));
        if let Some(tail) = tail {
            line.width = tail.width;
            line.words.push(tail);
        }
    }
    if !line.words.is_empty() {
        lines.push(line);
    }
    lines
}

/// Splits an over-long word between characters; the first piece fits `first_width`, the rest
/// fit `width`.
fn break_word<M>(metrics: &M, word: Word, first_width: f64, width: f64) -> Vec<Word>
where
    M: TextMetrics + ?Sized,
{
    let mut pieces = Vec::new();
    let mut current = Word::default();
    let mut available = first_width;

    for fragment in word.fragments {
        let mut buffer = String::new();
        for ch in fragment.text.chars() {
            let mut candidate = buffer.clone();
            candidate.push(ch);
            let candidate_width = metrics.text_width(&candidate, &fragment.face);
            if current.width + candidate_width > available
                && (!buffer.is_empty() || !current.fragments.is_empty())
            {
                if !buffer.is_empty() {
                    let text = std::mem::take(&mut buffer);
                    let width = metrics.text_width(&text, &fragment.face);
                    current.push(Fragment {
                        text,
                        width,
                        ..fragment.clone()
                    });
                }
                pieces.push(std::mem::take(&mut current));
                available = width;
            }
            buffer.push(ch);
        }
        if !buffer.is_empty() {
            let width = metrics.text_width(&buffer, &fragment.face);
            current.push(Fragment {
                text: buffer,
                width,
                ..fragment
            });
        }
    }
    if !current.fragments.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn place_line(
    line: Line,
    style: &ParagraphStyle,
    indent: f64,
    available: f64,
    last: bool,
) -> Strip {
    let leading = style.line_height();
    let slack = (available - line.width).max(0.0);
    let gaps = line.spaces.len();
    let justify = style.alignment == Alignment::Justify && !last && gaps > 0;
    let (mut x, extra) = match style.alignment {
        Alignment::Left => (indent, 0.0),
        Alignment::Center => (indent + slack / 2.0, 0.0),
        Alignment::Right => (indent + slack, 0.0),
        Alignment::Justify if justify => (indent, slack / gaps as f64),
        Alignment::Justify => (indent, 0.0),
    };

    let mut runs: Vec<TextRun> = Vec::new();
    let mut ops = Vec::new();
    for (index, word) in line.words.into_iter().enumerate() {
        let gap = if index == 0 {
            0.0
        } else {
            line.spaces[index - 1] + extra
        };
        x += gap;
        for (position, fragment) in word.fragments.into_iter().enumerate() {
            if fragment.underline {
                let y = underline_offset(leading, fragment.face.size);
                ops.push(DrawOp::Line {
                    from: (x, y),
                    to: (x + fragment.width, y),
                    stroke: Stroke::new((fragment.face.size / 16.0).max(0.5), fragment.color),
                });
            }

            let joins_word = position > 0;
            let joins_line = !justify && position == 0 && index > 0;
            if let Some(previous) = runs.last_mut() {
                if (joins_word || joins_line) && same_look(previous, &fragment) {
                    if !joins_word {
                        previous.text.push(' ');
                        previous.width += gap;
                    }
                    previous.text.push_str(&fragment.text);
                    previous.width += fragment.width;
                    x += fragment.width;
                    continue;
                }
            }

            x += fragment.width;
            runs.push(TextRun {
                x: x - fragment.width,
                y: text_top(leading, fragment.face.size),
                width: fragment.width,
                text: fragment.text,
                face: fragment.face,
                color: fragment.color,
            });
        }
    }

    let mut all: Vec<DrawOp> = runs.into_iter().map(DrawOp::Text).collect();
    all.extend(ops);
    Strip {
        height: leading,
        ops: all,
    }
}

fn same_look(run: &TextRun, fragment: &Fragment) -> bool {
    run.face == fragment.face && run.color == fragment.color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedWidthMetrics;

    fn style(alignment: Alignment) -> ParagraphStyle {
        let mut style = ParagraphStyle::new("Test");
        style.alignment = alignment;
        style
    }

    fn runs(line: &Strip) -> Vec<&TextRun> {
        line.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn words_wrap_greedily() {
        // 10pt at half-em advance: every character is 5pt wide.
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(&metrics, "aaaa bbbb cccc", &style(Alignment::Left), 50.0, None);
        assert_eq!(lines.len(), 2);
        assert_eq!(runs(&lines[0])[0].text, "aaaa bbbb");
        assert_eq!(runs(&lines[1])[0].text, "cccc");
    }

    #[test]
    fn whitespace_collapses_between_words() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(
            &metrics,
            "\n    one \n\t two   ",
            &style(Alignment::Left),
            500.0,
            None,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(runs(&lines[0])[0].text, "one two");
    }

    #[test]
    fn centered_lines_share_the_slack() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(&metrics, "abcd", &style(Alignment::Center), 100.0, None);
        assert!((runs(&lines[0])[0].x - 40.0).abs() < 1e-9);
    }

    #[test]
    fn justified_lines_fill_the_width_except_the_last() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(
            &metrics,
            "aa bb cc dd ee",
            &style(Alignment::Justify),
            60.0,
            None,
        );
        assert_eq!(lines.len(), 2);
        let first = runs(&lines[0]);
        let last_run = first.last().unwrap();
        assert!((last_run.x + last_run.width - 60.0).abs() < 1e-9);
        let second = runs(&lines[1]);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].x, 0.0);
    }

    #[test]
    fn overlong_words_break_between_characters() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(&metrics, "abcdefghij", &style(Alignment::Left), 20.0, None);
        let texts: Vec<_> = lines.iter().map(|line| runs(line)[0].text.clone()).collect();
        assert_eq!(texts, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn bold_spans_keep_their_own_runs() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(
            &metrics,
            "plain <b>bold</b> tail",
            &style(Alignment::Left),
            500.0,
            None,
        );
        let texts: Vec<_> = runs(&lines[0]).iter().map(|run| run.text.clone()).collect();
        assert_eq!(texts, ["plain", "bold", "tail"]);
        assert!(runs(&lines[0])[1].face.bold);
    }

    #[test]
    fn bullets_are_drawn_at_the_bullet_indent() {
        let metrics = FixedWidthMetrics::default();
        let mut bullet_style = style(Alignment::Left);
        bullet_style.left_indent = 20.0;
        bullet_style.bullet_indent = 10.0;
        let lines = layout_text(&metrics, "item", &bullet_style, 200.0, Some("\u{2022}"));
        let first = runs(&lines[0]);
        assert_eq!(first[0].text, "\u{2022}");
        assert_eq!(first[0].x, 10.0);
        assert_eq!(first[1].x, 20.0);
    }

    #[test]
    fn line_breaks_force_new_lines_and_empty_text_has_none() {
        let metrics = FixedWidthMetrics::default();
        let lines = layout_text(&metrics, "a<br/>b", &style(Alignment::Left), 500.0, None);
        assert_eq!(lines.len(), 2);
        assert!(layout_text(&metrics, "   ", &style(Alignment::Left), 500.0, None).is_empty());
    }
}
