//! Greedy, forward-only pagination of a document flow.
//!
//! [`paginate`] walks the flow once, in append order, and turns every block into draw
//! operations positioned on pages of a fixed [`Frame`].  Nothing is ever moved back: when a
//! block does not fit in the space left on the current page it is carried to the next page,
//! and only paragraphs, bullet items and tables are split (by line and by row respectively;
//! a table row taller than a whole page is cut between its lines of text).
//! The engine never touches a PDF; text widths come from a [`TextMetrics`] implementation so
//! the same plan can be computed from real font metrics or from a fixed-width approximation.

mod table;
mod text;

use crate::builder::FlowItem;
use crate::model::{Block, BlockKind, Stroke, TableData};
use crate::page::Frame;
use crate::richtext::{self, Span};
use crate::style::{Color, ParagraphStyle};

use self::table::TableRow;

const EPSILON: f64 = 1e-6;

/// Font selection for a run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Named font family, `None` for the document default.
    pub family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points.
    pub size: f64,
}

impl Face {
    pub(crate) fn from_style(style: &ParagraphStyle) -> Self {
        Self {
            family: style.font_family.clone(),
            bold: style.bold,
            italic: style.italic,
            size: style.font_size,
        }
    }

    pub(crate) fn with_span(mut self, span: &Span) -> Self {
        self.bold |= span.is_bold();
        self.italic |= span.is_italic();
        self
    }
}

/// Supplies text widths to the layout engine.
pub trait TextMetrics {
    /// Returns the advance width of `text` set in `face`, in points.
    fn text_width(&self, text: &str, face: &Face) -> f64;
}

/// Approximate metrics giving every character the same advance, a fraction of the font size.
///
/// Useful for previews and for exercising the paginator without loading any font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedWidthMetrics {
    /// Character advance as a fraction of the font size.
    pub advance: f64,
}

impl Default for FixedWidthMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMetrics for FixedWidthMetrics {
    fn text_width(&self, text: &str, face: &Face) -> f64 {
        text.chars().count() as f64 * face.size * self.advance
    }
}

/// A positioned run of text; `y` is the top of the text, both in points from the frame origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub text: String,
    pub face: Face,
    pub color: Color,
}

/// Axis-aligned rectangle in points, origin at the top left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Fill { rect: Rect, color: Color },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
}

impl DrawOp {
    pub(crate) fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            DrawOp::Text(mut run) => {
                run.x += dx;
                run.y += dy;
                DrawOp::Text(run)
            }
            DrawOp::Fill { rect, color } => DrawOp::Fill {
                rect: Rect::new(rect.x + dx, rect.y + dy, rect.width, rect.height),
                color,
            },
            DrawOp::Line { from, to, stroke } => DrawOp::Line {
                from: (from.0 + dx, from.1 + dy),
                to: (to.0 + dx, to.1 + dy),
                stroke,
            },
        }
    }
}

/// A horizontal band of operations (a text line or a table row) placed as a unit.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Strip {
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// A draw operation tagged with the index of the block it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOp {
    pub block: usize,
    pub op: DrawOp,
}

/// Everything drawn on one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    ops: Vec<PlacedOp>,
}

impl PageLayout {
    /// Operations in placement order.
    pub fn ops(&self) -> &[PlacedOp] {
        &self.ops
    }

    /// Operations in paint order: fills first so that no background covers text or rules.
    pub fn paint_order(&self) -> impl Iterator<Item = &DrawOp> {
        let fills = self
            .ops
            .iter()
            .filter(|placed| matches!(placed.op, DrawOp::Fill { .. }));
        let rest = self
            .ops
            .iter()
            .filter(|placed| !matches!(placed.op, DrawOp::Fill { .. }));
        fills.chain(rest).map(|placed| &placed.op)
    }

    /// Returns whether nothing is drawn on the page.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text runs on the page in placement order.
    pub fn text_runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.ops.iter().filter_map(|placed| match &placed.op {
            DrawOp::Text(run) => Some((placed.block, run)),
            _ => None,
        })
    }
}

/// Where a block ended up. Pages are numbered from 1.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPlacement {
    /// Position of the block in the flow.
    pub index: usize,
    pub kind: BlockKind,
    pub first_page: usize,
    pub last_page: usize,
    /// Distance from the top of the frame on the first page, in points.
    pub top: f64,
}

/// A title or top-level heading and the page it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineEntry {
    pub title: String,
    pub page: usize,
}

/// The complete result of paginating a flow.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    frame: Frame,
    pages: Vec<PageLayout>,
    placements: Vec<BlockPlacement>,
    outline: Vec<OutlineEntry>,
}

impl LayoutPlan {
    /// The frame every page was laid out in.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Pages in order; at least one.
    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    /// Number of pages; at least one, even for an empty flow.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// One placement per block, in flow order.
    pub fn placements(&self) -> &[BlockPlacement] {
        &self.placements
    }

    /// Outline entries in flow order.
    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    pub(crate) fn into_parts(self) -> (Vec<PageLayout>, Vec<BlockPlacement>, Vec<OutlineEntry>) {
        (self.pages, self.placements, self.outline)
    }
}

/// Paginates `items` onto pages of `frame`, in order, in a single forward pass.
pub fn paginate<M>(items: &[FlowItem], metrics: &M, frame: Frame) -> LayoutPlan
where
    M: TextMetrics + ?Sized,
{
    let mut paginator = Paginator::new(metrics, frame);
    for (index, item) in items.iter().enumerate() {
        paginator.place_block(index, item);
    }
    log::debug!(
        "Paginated {} blocks onto {} pages",
        items.len(),
        paginator.pages.len()
    );
    LayoutPlan {
        frame,
        pages: paginator.pages,
        placements: paginator.placements,
        outline: paginator.outline,
    }
}

struct Paginator<'m, M: ?Sized> {
    metrics: &'m M,
    frame: Frame,
    pages: Vec<PageLayout>,
    placements: Vec<BlockPlacement>,
    outline: Vec<OutlineEntry>,
    y: f64,
    pending_break: bool,
    current: Option<BlockPlacement>,
}

impl<'m, M> Paginator<'m, M>
where
    M: TextMetrics + ?Sized,
{
    fn new(metrics: &'m M, frame: Frame) -> Self {
        Self {
            metrics,
            frame,
            pages: vec![PageLayout::default()],
            placements: Vec::new(),
            outline: Vec::new(),
            y: 0.0,
            pending_break: false,
            current: None,
        }
    }

    fn page_number(&self) -> usize {
        self.pages.len()
    }

    fn at_top(&self) -> bool {
        self.y <= EPSILON
    }

    fn fits(&self, height: f64) -> bool {
        self.y + height <= self.frame.height + EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = 0.0;
    }

    fn advance(&mut self, space: f64) {
        self.y = (self.y + space).min(self.frame.height);
    }

    fn place_block(&mut self, index: usize, item: &FlowItem) {
        let block = item.block();
        if matches!(block, Block::PageBreak) {
            if self.pending_break {
                self.new_page();
            }
            self.pending_break = true;
            self.record_empty(index, block.kind());
            return;
        }
        if std::mem::take(&mut self.pending_break) {
            self.new_page();
        }

        match (block, item.style()) {
            (Block::Title { text, .. }, Some(style)) => {
                self.place_text(index, block.kind(), text, style, None, true);
                self.push_outline(index, text);
            }
            (Block::Heading { text, level, .. }, Some(style)) => {
                self.place_text(index, block.kind(), text, style, None, true);
                if *level == 1 {
                    self.push_outline(index, text);
                }
            }
            (Block::Paragraph { text, .. }, Some(style)) => {
                self.place_text(index, block.kind(), text, style, None, false);
            }
            (Block::BulletItem { text, bullet, .. }, Some(style)) => {
                self.place_text(index, block.kind(), text, style, Some(bullet.as_str()), false);
            }
            (Block::Table(table), Some(style)) => self.place_table(index, table, style),
            (Block::Spacer { height }, _) => self.place_spacer(index, *height),
            (other, _) => {
                log::warn!("Block {} ({:?}) has no resolved style; skipped", index, other.kind());
                self.record_empty(index, other.kind());
            }
        }
    }

    fn place_text(
        &mut self,
        index: usize,
        kind: BlockKind,
        text: &str,
        style: &ParagraphStyle,
        bullet: Option<&str>,
        keep_together: bool,
    ) {
        let lines = text::layout_text(self.metrics, text, style, self.frame.width, bullet);
        let Some(first_height) = lines.first().map(|line| line.height) else {
            self.record_empty(index, kind);
            return;
        };

        let mut space_before = if self.at_top() { 0.0 } else { style.space_before };
        let needed = if keep_together {
            lines.iter().map(|line| line.height).sum::<f64>()
        } else {
            first_height
        };
        if !self.at_top() && !self.fits(space_before + needed) {
            self.new_page();
            space_before = 0.0;
        }
        self.advance(space_before);

        for line in lines {
            if !self.at_top() && !self.fits(line.height) {
                self.new_page();
            }
            self.place_strip(index, kind, line);
        }
        self.finish_block();
        self.advance(style.space_after);
    }

    fn place_table(&mut self, index: usize, table: &TableData, style: &ParagraphStyle) {
        let rows = table::layout_table(self.metrics, table, style, self.frame.width);
        let Some(header) = rows.first().map(|row| row.strip.clone()) else {
            self.record_empty(index, BlockKind::Table);
            return;
        };
        let repeat = table.repeat_header().then_some(&header);
        let first_body_height = rows.get(1).map(TableRow::height).unwrap_or(0.0);

        for (row_index, row) in rows.into_iter().enumerate() {
            let needed = if row_index == 0 {
                row.height() + first_body_height
            } else {
                row.height()
            };
            // Rows taller than a whole page are split from where they start instead.
            let oversized = row.height() > self.frame.height;
            let mut fresh_page = self.at_top();
            if !fresh_page && !self.fits(needed) && !oversized {
                self.new_page();
                if row_index > 0 {
                    self.repeat_header(index, repeat);
                }
                fresh_page = true;
            }
            let header = if row_index > 0 { repeat } else { None };
            self.place_row(index, row, header, fresh_page);
        }
        self.finish_block();
    }

    /// Places a row, cutting it between text lines while it is taller than the room left.
    fn place_row(
        &mut self,
        index: usize,
        mut row: TableRow,
        header: Option<&Strip>,
        mut fresh_page: bool,
    ) {
        while !self.fits(row.height()) {
            match row.split(self.frame.height - self.y) {
                Some((head, rest)) => {
                    self.place_strip(index, BlockKind::Table, head);
                    row = rest;
                }
                None if fresh_page => break,
                None => {}
            }
            self.new_page();
            self.repeat_header(index, header);
            fresh_page = true;
        }
        self.place_strip(index, BlockKind::Table, row.strip);
    }

    fn repeat_header(&mut self, index: usize, header: Option<&Strip>) {
        if let Some(header) = header {
            self.place_strip(index, BlockKind::Table, header.clone());
        }
    }

    /// A spacer that does not fit fills the rest of the page; whatever comes next opens the
    /// following page, so a page break right after it does not leave a blank page.
    fn place_spacer(&mut self, index: usize, height: f64) {
        self.record_empty(index, BlockKind::Spacer);
        if self.at_top() || self.fits(height) {
            self.advance(height);
        } else {
            self.y = self.frame.height;
        }
    }

    fn place_strip(&mut self, index: usize, kind: BlockKind, strip: Strip) {
        if !self.fits(strip.height) {
            log::warn!(
                "Block {} is taller than the room left ({:.1}pt > {:.1}pt); it will be clipped",
                index,
                strip.height,
                self.frame.height - self.y
            );
        }
        let page = self.page_number();
        let top = self.y;
        let placement = self.current.get_or_insert(BlockPlacement {
            index,
            kind,
            first_page: page,
            last_page: page,
            top,
        });
        placement.last_page = page;

        let y = self.y;
        if let Some(layout) = self.pages.last_mut() {
            layout.ops.extend(strip.ops.into_iter().map(|op| PlacedOp {
                block: index,
                op: op.translated(0.0, y),
            }));
        }
        self.y += strip.height;
    }

    fn finish_block(&mut self) {
        if let Some(placement) = self.current.take() {
            self.placements.push(placement);
        }
    }

    fn record_empty(&mut self, index: usize, kind: BlockKind) {
        let page = self.page_number();
        self.placements.push(BlockPlacement {
            index,
            kind,
            first_page: page,
            last_page: page,
            top: self.y,
        });
    }

    fn push_outline(&mut self, index: usize, text: &str) {
        let title = plain_text(text);
        if title.is_empty() {
            return;
        }
        let page = self
            .placements
            .iter()
            .rev()
            .find(|placement| placement.index == index)
            .map(|placement| placement.first_page)
            .unwrap_or_else(|| self.page_number());
        self.outline.push(OutlineEntry { title, page });
    }
}

/// Strips inline markup and collapses whitespace.
fn plain_text(text: &str) -> String {
    richtext::parse_markup_lossy(text)
        .iter()
        .flatten()
        .map(Span::text)
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::TableData;

    fn frame() -> Frame {
        Frame::new(400.0, 300.0)
    }

    fn plan(blocks: Vec<Block>) -> LayoutPlan {
        let mut builder = DocumentBuilder::new();
        for block in blocks {
            builder.append(block).expect("known style");
        }
        paginate(builder.items(), &FixedWidthMetrics::default(), frame())
    }

    fn long_text(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    fn page_of(plan: &LayoutPlan, index: usize) -> (usize, usize) {
        let placement = &plan.placements()[index];
        assert_eq!(placement.index, index);
        (placement.first_page, placement.last_page)
    }

    #[test]
    fn empty_flow_is_a_single_blank_page() {
        let plan = plan(Vec::new());
        assert_eq!(plan.page_count(), 1);
        assert!(plan.pages()[0].is_blank());
        assert!(plan.placements().is_empty());
    }

    #[test]
    fn blocks_are_placed_in_append_order() {
        let plan = plan(vec![
            Block::title("T"),
            Block::heading(1, "H1"),
            Block::paragraph("body"),
            Block::bullet("x1"),
            Block::bullet("x2"),
        ]);
        let order: Vec<usize> = plan.pages()[0]
            .text_runs()
            .map(|(block, _)| block)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 3, 4, 4]);
        let tops: Vec<f64> = plan.placements().iter().map(|p| p.top).collect();
        assert!(tops.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn page_break_starts_next_block_on_new_page() {
        let plan = plan(vec![
            Block::title("T"),
            Block::page_break(),
            Block::heading(1, "H1"),
        ]);
        assert_eq!(plan.page_count(), 2);
        assert_eq!(page_of(&plan, 0), (1, 1));
        assert_eq!(page_of(&plan, 2), (2, 2));
        assert_eq!(plan.placements()[2].top, 0.0);
    }

    #[test]
    fn trailing_page_break_adds_no_blank_page() {
        let plan = plan(vec![Block::paragraph("only"), Block::page_break()]);
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn consecutive_and_leading_breaks_produce_blank_pages() {
        let plan = plan(vec![
            Block::page_break(),
            Block::page_break(),
            Block::paragraph("after"),
        ]);
        assert_eq!(plan.page_count(), 3);
        assert!(plan.pages()[0].is_blank());
        assert!(plan.pages()[1].is_blank());
        assert_eq!(page_of(&plan, 2), (3, 3));
    }

    #[test]
    fn long_paragraphs_split_by_line() {
        let plan = plan(vec![Block::paragraph(long_text(600))]);
        let (first, last) = page_of(&plan, 0);
        assert_eq!(first, 1);
        assert!(last > 1, "paragraph should continue on later pages");
        assert_eq!(plan.page_count(), last);
    }

    #[test]
    fn headings_that_do_not_fit_move_to_the_next_page() {
        // 24 lines of 12pt fill 288pt of the 300pt frame.
        let filler = (0..24).map(|_| "line").collect::<Vec<_>>().join("<br/>");
        let plan = plan(vec![Block::paragraph(filler), Block::heading(1, "Next section")]);
        assert_eq!(page_of(&plan, 0), (1, 1));
        assert_eq!(page_of(&plan, 1), (2, 2));
        assert_eq!(plan.placements()[1].top, 0.0);
    }

    #[test]
    fn space_before_is_dropped_at_the_top_of_a_page() {
        let plan = plan(vec![Block::heading(2, "First")]);
        assert_eq!(plan.placements()[0].top, 0.0);
        let (_, run) = plan.pages()[0].text_runs().next().unwrap();
        assert!(run.y < 12.0);
    }

    #[test]
    fn spacers_that_do_not_fit_end_the_page() {
        let filler = (0..24).map(|_| "line").collect::<Vec<_>>().join("<br/>");
        let plan = plan(vec![
            Block::paragraph(filler),
            Block::spacer(50.0),
            Block::paragraph("after"),
        ]);
        assert_eq!(page_of(&plan, 2), (2, 2));
        assert_eq!(plan.placements()[2].top, 0.0);
    }

    #[test]
    fn page_break_after_a_spacer_that_filled_the_page_adds_no_blank_page() {
        let filler = (0..24).map(|_| "line").collect::<Vec<_>>().join("<br/>");
        let plan = plan(vec![
            Block::paragraph(filler),
            Block::spacer(50.0),
            Block::page_break(),
            Block::paragraph("after"),
        ]);
        assert_eq!(plan.page_count(), 2);
        assert!(plan.pages().iter().all(|page| !page.is_blank()));
        assert_eq!(page_of(&plan, 3), (2, 2));
    }

    #[test]
    fn rows_taller_than_a_page_are_split_between_lines() {
        let words = vec!["word"; 2000].join(" ");
        let plan = plan(vec![
            Block::table(TableData::new(["A"], [[words]])),
            Block::paragraph("after"),
        ]);
        let height = frame().height;

        assert!(plan.page_count() > 2);
        let (first, last) = page_of(&plan, 0);
        assert_eq!(first, 1);
        assert!(last > 2);

        let first_page: Vec<&str> = plan.pages()[0]
            .text_runs()
            .map(|(_, run)| run.text.as_str())
            .collect();
        assert_eq!(first_page[0], "A");
        assert!(first_page.len() > 1, "the tall row starts under the header");

        let mut count = 0;
        for page in plan.pages() {
            for placed in page.ops() {
                match &placed.op {
                    DrawOp::Text(run) => {
                        assert!(run.y + run.face.size <= height + EPSILON, "{:?}", run.text);
                        count += run.text.split_whitespace().filter(|w| *w == "word").count();
                    }
                    DrawOp::Fill { rect, .. } => assert!(rect.y + rect.height <= height + EPSILON),
                    DrawOp::Line { from, to, .. } => {
                        assert!(from.1.max(to.1) <= height + EPSILON);
                    }
                }
            }
        }
        assert_eq!(count, 2000);
    }

    #[test]
    fn table_renders_every_row_and_column() {
        let table = TableData::new(
            ["A", "B", "C"],
            vec![vec!["1", "2", "3"], vec!["4", "5", "6"]],
        )
        .with_column_widths(vec![100.0, 100.0, 100.0]);
        let plan = plan(vec![Block::bullet("x"), Block::table(table)]);
        let page = &plan.pages()[0];

        let cells: Vec<&str> = page
            .text_runs()
            .filter(|(block, _)| *block == 1)
            .map(|(_, run)| run.text.as_str())
            .collect();
        assert_eq!(cells, ["A", "B", "C", "1", "2", "3", "4", "5", "6"]);

        let fills: Vec<(f64, Color)> = page
            .ops()
            .iter()
            .filter_map(|placed| match placed.op {
                DrawOp::Fill { rect, color } if placed.block == 1 => Some((rect.y, color)),
                _ => None,
            })
            .collect();
        let mut row_tops: Vec<f64> = fills.iter().map(|(y, _)| *y).collect();
        row_tops.dedup();
        assert_eq!(row_tops.len(), 3, "header plus two body rows");
        assert_ne!(fills[0].1, fills[3].1, "header differs from body");
        assert_ne!(fills[3].1, fills[6].1, "body rows alternate");

        let mut verticals: Vec<i64> = page
            .ops()
            .iter()
            .filter_map(|placed| match placed.op {
                DrawOp::Line { from, to, .. } if placed.block == 1 && from.0 == to.0 => {
                    Some(from.0.round() as i64)
                }
                _ => None,
            })
            .collect();
        verticals.sort_unstable();
        verticals.dedup();
        assert_eq!(verticals, vec![50, 150, 250, 350], "centered 3-column grid");
    }

    #[test]
    fn tables_split_between_rows_and_can_repeat_the_header() {
        let rows: Vec<Vec<String>> = (0..40).map(|i| vec![i.to_string()]).collect();
        let table = TableData::new(["N"], rows).with_repeat_header(true);
        let plan = plan(vec![Block::table(table)]);
        assert!(plan.page_count() >= 2);
        let second_page_first = plan.pages()[1].text_runs().next().map(|(_, run)| run.text.clone());
        assert_eq!(second_page_first.as_deref(), Some("N"));
    }

    #[test]
    fn paint_order_puts_fills_first() {
        let table = TableData::new(["A"], vec![vec!["1"]]);
        let plan = plan(vec![Block::table(table)]);
        let ops: Vec<&DrawOp> = plan.pages()[0].paint_order().collect();
        let first_non_fill = ops
            .iter()
            .position(|op| !matches!(op, DrawOp::Fill { .. }))
            .unwrap();
        assert!(ops[first_non_fill..]
            .iter()
            .all(|op| !matches!(op, DrawOp::Fill { .. })));
    }

    #[test]
    fn layout_is_deterministic() {
        let blocks = vec![
            Block::title("T"),
            Block::page_break(),
            Block::paragraph(long_text(300)),
            Block::table(TableData::new(["A", "B"], vec![vec!["1", "2"]])),
        ];
        assert_eq!(plan(blocks.clone()), plan(blocks));
    }

    #[test]
    fn outline_lists_titles_and_top_level_headings() {
        let plan = plan(vec![
            Block::title("Report"),
            Block::page_break(),
            Block::heading(1, "1. <b>Overview</b>"),
            Block::heading(2, "Detail"),
        ]);
        assert_eq!(
            plan.outline(),
            &[
                OutlineEntry {
                    title: "Report".into(),
                    page: 1
                },
                OutlineEntry {
                    title: "1. Overview".into(),
                    page: 2
                },
            ]
        );
    }
}
