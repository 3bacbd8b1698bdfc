//! Table layout: column widths, per-cell style resolution and row strips.

use crate::model::{Stroke, TableCommand, TableData};
use crate::style::{Alignment, Color, ParagraphStyle};

use super::text::layout_text;
use super::{DrawOp, Rect, Strip, TextMetrics, EPSILON};

const DEFAULT_PADDING: [f64; 4] = [3.0, 6.0, 3.0, 6.0];

/// A laid out table row.
///
/// `breaks` holds the offsets from the top of the row at which it can be cut without cutting
/// through a line of text in any cell, in increasing order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TableRow {
    pub strip: Strip,
    pub breaks: Vec<f64>,
}

impl TableRow {
    /// Height of the whole row in points.
    pub fn height(&self) -> f64 {
        self.strip.height
    }

    /// Cuts the row at the lowest break that leaves at most `limit` points above it.
    ///
    /// Returns the part above the cut and the remaining row, or `None` when no break fits.
    pub fn split(&self, limit: f64) -> Option<(Strip, TableRow)> {
        let cut = self
            .breaks
            .iter()
            .copied()
            .filter(|&offset| offset > EPSILON && offset < self.height() - EPSILON)
            .take_while(|&offset| offset <= limit + EPSILON)
            .last()?;

        let mut head = Vec::new();
        let mut tail = Vec::new();
        for op in &self.strip.ops {
            match op {
                DrawOp::Text(run) => {
                    if run.y < cut {
                        head.push(op.clone());
                    } else {
                        tail.push(op.clone().translated(0.0, -cut));
                    }
                }
                DrawOp::Fill { rect, color } => {
                    let bottom = rect.y + rect.height;
                    if rect.y < cut {
                        head.push(DrawOp::Fill {
                            rect: Rect::new(rect.x, rect.y, rect.width, bottom.min(cut) - rect.y),
                            color: *color,
                        });
                    }
                    if bottom > cut {
                        let top = rect.y.max(cut);
                        tail.push(DrawOp::Fill {
                            rect: Rect::new(rect.x, top - cut, rect.width, bottom - top),
                            color: *color,
                        });
                    }
                }
                DrawOp::Line { from, to, stroke } if (from.1 - to.1).abs() <= EPSILON => {
                    if from.1 < cut {
                        head.push(op.clone());
                    } else {
                        tail.push(DrawOp::Line {
                            from: (from.0, from.1 - cut),
                            to: (to.0, to.1 - cut),
                            stroke: *stroke,
                        });
                    }
                }
                DrawOp::Line { from, to, stroke } => {
                    let (top, bottom) = (from.1.min(to.1), from.1.max(to.1));
                    if top < cut {
                        head.push(DrawOp::Line {
                            from: (from.0, top),
                            to: (to.0, bottom.min(cut)),
                            stroke: *stroke,
                        });
                    }
                    if bottom > cut {
                        tail.push(DrawOp::Line {
                            from: (from.0, top.max(cut) - cut),
                            to: (to.0, bottom - cut),
                            stroke: *stroke,
                        });
                    }
                }
            }
        }

        let rest = TableRow {
            strip: Strip {
                height: self.height() - cut,
                ops: tail,
            },
            breaks: self
                .breaks
                .iter()
                .filter(|&&offset| offset > cut + EPSILON)
                .map(|offset| offset - cut)
                .collect(),
        };
        Some((Strip { height: cut, ops: head }, rest))
    }
}

/// Formatting of a single cell after every rule has been applied.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellStyle {
    pub background: Option<Color>,
    pub text_color: Color,
    pub bold: bool,
    pub font_size: f64,
    pub alignment: Alignment,
    /// Top, right, bottom, left.
    pub padding: [f64; 4],
    /// Top, right, bottom, left.
    pub edges: [Option<Stroke>; 4],
}

impl CellStyle {
    fn base(text_style: &ParagraphStyle) -> Self {
        Self {
            background: None,
            text_color: text_style.color,
            bold: text_style.bold,
            font_size: text_style.font_size,
            alignment: Alignment::Left,
            padding: DEFAULT_PADDING,
            edges: [None; 4],
        }
    }

    fn paragraph_style(&self, text_style: &ParagraphStyle) -> ParagraphStyle {
        let mut style = text_style.clone();
        if (style.font_size - self.font_size).abs() > f64::EPSILON {
            style.leading = None;
        }
        style.font_size = self.font_size;
        style.bold = self.bold;
        style.color = self.text_color;
        style.alignment = self.alignment;
        style.left_indent = 0.0;
        style.right_indent = 0.0;
        style.first_line_indent = 0.0;
        style
    }
}

/// Resolves the width of every column in points.
///
/// Explicit widths are used as given; missing trailing widths share the space left in the frame.
pub(crate) fn column_widths(table: &TableData, columns: usize, frame_width: f64) -> Vec<f64> {
    if columns == 0 {
        return Vec::new();
    }
    match table.column_widths() {
        Some(given) => {
            let mut widths: Vec<f64> = given.iter().take(columns).map(|w| w.max(0.0)).collect();
            if widths.len() < columns {
                let used: f64 = widths.iter().sum();
                let missing = columns - widths.len();
                let each = ((frame_width - used) / missing as f64).max(0.0);
                widths.resize(columns, each);
            }
            widths
        }
        None => vec![frame_width / columns as f64; columns],
    }
}

/// Applies the table's rules in order and returns the style of every cell, row by row.
pub(crate) fn resolve_cell_styles(
    table: &TableData,
    text_style: &ParagraphStyle,
) -> Vec<Vec<CellStyle>> {
    let columns = table.column_count();
    let rows = table.row_count();
    let mut cells = vec![vec![CellStyle::base(text_style); columns]; rows];

    for rule in table.rules() {
        let Some(((c0, c1), (r0, r1))) = rule.region.resolve(columns, rows) else {
            continue;
        };
        for (r, row) in cells.iter_mut().enumerate().take(r1 + 1).skip(r0) {
            for (c, cell) in row.iter_mut().enumerate().take(c1 + 1).skip(c0) {
                match &rule.command {
                    TableCommand::Background(color) => cell.background = Some(*color),
                    TableCommand::RowBackgrounds(colors) => {
                        if !colors.is_empty() {
                            cell.background = Some(colors[(r - r0) % colors.len()]);
                        }
                    }
                    TableCommand::TextColor(color) => cell.text_color = *color,
                    TableCommand::Bold(bold) => cell.bold = *bold,
                    TableCommand::FontSize(size) => cell.font_size = *size,
                    TableCommand::Align(alignment) => cell.alignment = *alignment,
                    TableCommand::TopPadding(value) => cell.padding[0] = *value,
                    TableCommand::RightPadding(value) => cell.padding[1] = *value,
                    TableCommand::BottomPadding(value) => cell.padding[2] = *value,
                    TableCommand::LeftPadding(value) => cell.padding[3] = *value,
                    TableCommand::Grid(stroke) => cell.edges = [Some(*stroke); 4],
                    TableCommand::Box(stroke) => {
                        if r == r0 {
                            cell.edges[0] = Some(*stroke);
                        }
                        if c == c1 {
                            cell.edges[1] = Some(*stroke);
                        }
                        if r == r1 {
                            cell.edges[2] = Some(*stroke);
                        }
                        if c == c0 {
                            cell.edges[3] = Some(*stroke);
                        }
                    }
                }
            }
        }
    }
    cells
}

/// Lays out every row of `table` (header first), positioned within `frame_width`.
pub(crate) fn layout_table<M>(
    metrics: &M,
    table: &TableData,
    text_style: &ParagraphStyle,
    frame_width: f64,
) -> Vec<TableRow>
where
    M: TextMetrics + ?Sized,
{
    let columns = table.column_count();
    if columns == 0 {
        log::warn!("Skipping table without columns");
        return Vec::new();
    }
    for (index, row) in table.rows().iter().enumerate() {
        if row.len() > columns {
            log::warn!(
                "Table row {} has {} cells but only {} columns; extra cells are dropped",
                index + 1,
                row.len(),
                columns
            );
        }
    }

    let widths = column_widths(table, columns, frame_width);
    let table_width: f64 = widths.iter().sum();
    let origin = match table.alignment() {
        Alignment::Left | Alignment::Justify => 0.0,
        Alignment::Center => ((frame_width - table_width) / 2.0).max(0.0),
        Alignment::Right => (frame_width - table_width).max(0.0),
    };
    let styles = resolve_cell_styles(table, text_style);

    styles
        .iter()
        .enumerate()
        .map(|(row, row_styles)| {
            layout_row(metrics, table, text_style, row, row_styles, &widths, origin)
        })
        .collect()
}

fn layout_row<M>(
    metrics: &M,
    table: &TableData,
    text_style: &ParagraphStyle,
    row: usize,
    row_styles: &[CellStyle],
    widths: &[f64],
    origin: f64,
) -> TableRow
where
    M: TextMetrics + ?Sized,
{
    let mut cells = Vec::with_capacity(widths.len());
    let mut height: f64 = 0.0;
    for (column, (cell, &width)) in row_styles.iter().zip(widths).enumerate() {
        let style = cell.paragraph_style(text_style);
        let [top, right, bottom, left] = cell.padding;
        let lines = layout_text(
            metrics,
            table.cell(column, row),
            &style,
            (width - left - right).max(1.0),
            None,
        );
        let content: f64 = lines.iter().map(|line| line.height).sum();
        height = height.max(top + content.max(style.line_height()) + bottom);
        cells.push(lines);
    }

    let mut fills = Vec::new();
    let mut texts = Vec::new();
    let mut strokes = Vec::new();
    let mut spans: Vec<(f64, f64)> = Vec::new();
    let mut x = origin;
    for ((cell, &width), lines) in row_styles.iter().zip(widths).zip(cells) {
        if let Some(color) = cell.background {
            fills.push(DrawOp::Fill {
                rect: Rect::new(x, 0.0, width, height),
                color,
            });
        }

        let mut y = cell.padding[0];
        for line in lines {
            let line_height = line.height;
            texts.extend(
                line.ops
                    .into_iter()
                    .map(|op| op.translated(x + cell.padding[3], y)),
            );
            spans.push((y, y + line_height));
            y += line_height;
        }

        let corners = [
            ((x, 0.0), (x + width, 0.0)),
            ((x + width, 0.0), (x + width, height)),
            ((x, height), (x + width, height)),
            ((x, 0.0), (x, height)),
        ];
        for (edge, (from, to)) in cell.edges.iter().zip(corners) {
            if let Some(stroke) = edge {
                strokes.push(DrawOp::Line {
                    from,
                    to,
                    stroke: *stroke,
                });
            }
        }
        x += width;
    }

    let mut ops = fills;
    ops.extend(texts);
    ops.extend(strokes);
    TableRow {
        strip: Strip { height, ops },
        breaks: safe_breaks(&spans),
    }
}

/// Line bottoms that do not fall strictly inside another cell's line.
fn safe_breaks(spans: &[(f64, f64)]) -> Vec<f64> {
    let mut breaks: Vec<f64> = spans
        .iter()
        .map(|&(_, bottom)| bottom)
        .filter(|&offset| {
            spans
                .iter()
                .all(|&(top, bottom)| offset <= top + EPSILON || offset >= bottom - EPSILON)
        })
        .collect();
    breaks.sort_by(f64::total_cmp);
    breaks.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);
    breaks
}
