//! Content blocks that make up a document flow.
//!
//! The types in this module describe *what* goes into a document, not how it is drawn.  Every
//! block is immutable once appended to a [`DocumentBuilder`](crate::builder::DocumentBuilder);
//! text variants carry an optional reference to a named style in the
//! [`StyleSheet`](crate::style::StyleSheet) and fall back to a conventional default otherwise.

use crate::style::{Alignment, Color};

/// Default bullet glyph for [`Block::BulletItem`].
pub const DEFAULT_BULLET: &str = "\u{2022}";

/// The closed set of content blocks a flow can contain.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Document or title-page title.
    Title {
        text: String,
        style: Option<String>,
    },
    /// Section heading; `level` selects the default `Heading{level}` style.
    Heading {
        text: String,
        level: u8,
        style: Option<String>,
    },
    /// Body paragraph; may wrap and split across pages.
    Paragraph {
        text: String,
        style: Option<String>,
    },
    /// Paragraph prefixed by a bullet glyph (or a number or check mark).
    BulletItem {
        text: String,
        bullet: String,
        style: Option<String>,
    },
    /// Fixed vertical gap, in points.
    Spacer { height: f64 },
    /// Forces the next block onto a new page.
    PageBreak,
    /// A grid of cells with region style rules.
    Table(TableData),
}

impl Block {
    /// Creates a title block.
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title {
            text: text.into(),
            style: None,
        }
    }

    /// Creates a heading block for the given level (1-based).
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            text: text.into(),
            level: level.max(1),
            style: None,
        }
    }

    /// Creates a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            style: None,
        }
    }

    /// Creates a bullet item using [`DEFAULT_BULLET`].
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::bullet_with(DEFAULT_BULLET, text)
    }

    /// Creates a bullet item with a custom glyph such as `"3."` or a check mark.
    pub fn bullet_with(bullet: impl Into<String>, text: impl Into<String>) -> Self {
        Self::BulletItem {
            text: text.into(),
            bullet: bullet.into(),
            style: None,
        }
    }

    /// Creates a spacer of `height` points.
    pub fn spacer(height: f64) -> Self {
        Self::Spacer {
            height: height.max(0.0),
        }
    }

    /// Convenience helper that yields an explicit page break block.
    pub fn page_break() -> Self {
        Self::PageBreak
    }

    /// Creates a table block.
    pub fn table(table: TableData) -> Self {
        Self::Table(table)
    }

    /// Attaches a style reference to text blocks; other variants are returned unchanged.
    pub fn styled(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Self::Title { style, .. }
            | Self::Heading { style, .. }
            | Self::Paragraph { style, .. }
            | Self::BulletItem { style, .. } => *style = Some(name.into()),
            Self::Spacer { .. } | Self::PageBreak => {}
            Self::Table(table) => table.text_style = Some(name.into()),
        }
        self
    }

    /// Returns the discriminant of the block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Title { .. } => BlockKind::Title,
            Self::Heading { .. } => BlockKind::Heading,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::BulletItem { .. } => BlockKind::BulletItem,
            Self::Spacer { .. } => BlockKind::Spacer,
            Self::PageBreak => BlockKind::PageBreak,
            Self::Table(_) => BlockKind::Table,
        }
    }

    /// Returns the style name the block resolves to, if it is styled at all.
    pub fn style_name(&self) -> Option<String> {
        match self {
            Self::Title { style, .. } => Some(style.clone().unwrap_or_else(|| "Title".into())),
            Self::Heading { style, level, .. } => {
                Some(style.clone().unwrap_or_else(|| format!("Heading{level}")))
            }
            Self::Paragraph { style, .. } => Some(style.clone().unwrap_or_else(|| "Normal".into())),
            Self::BulletItem { style, .. } => {
                Some(style.clone().unwrap_or_else(|| "Bullet".into()))
            }
            Self::Table(table) => Some(
                table
                    .text_style
                    .clone()
                    .unwrap_or_else(|| "Normal".into()),
            ),
            Self::Spacer { .. } | Self::PageBreak => None,
        }
    }
}

/// Discriminant of a [`Block`], used in placement reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    Heading,
    Paragraph,
    BulletItem,
    Spacer,
    PageBreak,
    Table,
}

/// Inclusive rectangular region of a table addressed by `(column, row)` pairs.
///
/// Negative coordinates count from the end, so `(-1, -1)` is the last cell of the last row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellRange {
    /// Creates a range from its two corners.
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    /// The whole table.
    pub fn all() -> Self {
        Self::new((0, 0), (-1, -1))
    }

    /// The header row.
    pub fn header() -> Self {
        Self::new((0, 0), (-1, 0))
    }

    /// Every row below the header.
    pub fn body() -> Self {
        Self::new((0, 1), (-1, -1))
    }

    /// Resolves the range against a table of `columns` × `rows` cells.
    ///
    /// Returns inclusive `(columns, rows)` bounds, or `None` when the region is empty.
    pub fn resolve(
        &self,
        columns: usize,
        rows: usize,
    ) -> Option<((usize, usize), (usize, usize))> {
        fn axis(start: i32, end: i32, len: usize) -> Option<(usize, usize)> {
            let len = len as i64;
            let normalize = |value: i32| {
                let value = i64::from(value);
                if value < 0 {
                    len + value
                } else {
                    value
                }
            };
            let first = normalize(start).max(0);
            let last = normalize(end).min(len - 1);
            (first <= last).then_some((first as usize, last as usize))
        }

        let columns = axis(self.start.0, self.end.0, columns)?;
        let rows = axis(self.start.1, self.end.1, rows)?;
        Some((columns, rows))
    }
}

/// A line stroke, width in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    /// Creates a stroke `width` points wide.
    pub fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }
}

/// Formatting command applied to a table region.
#[derive(Clone, Debug, PartialEq)]
pub enum TableCommand {
    /// Fills every cell in the region.
    Background(Color),
    /// Cycles through the colors row by row, starting at the first row of the region.
    RowBackgrounds(Vec<Color>),
    TextColor(Color),
    Bold(bool),
    /// Font size in points.
    FontSize(f64),
    Align(Alignment),
    TopPadding(f64),
    BottomPadding(f64),
    LeftPadding(f64),
    RightPadding(f64),
    /// Strokes every cell edge in the region.
    Grid(Stroke),
    /// Strokes the outline of the region.
    Box(Stroke),
}

/// A command bound to the region it applies to.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyleRule {
    pub region: CellRange,
    pub command: TableCommand,
}

impl TableStyleRule {
    /// Applies `command` to every cell in `region`.
    pub fn new(region: CellRange, command: TableCommand) -> Self {
        Self { region, command }
    }

    /// Rules every table starts with: a bold header on a dark band, alternating body rows and a
    /// uniform one-point grid.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                CellRange::header(),
                TableCommand::Background(Color::rgb(0x39, 0x49, 0xab)),
            ),
            Self::new(CellRange::header(), TableCommand::TextColor(Color::WHITESMOKE)),
            Self::new(CellRange::header(), TableCommand::Bold(true)),
            Self::new(
                CellRange::body(),
                TableCommand::RowBackgrounds(vec![Color::WHITE, Color::LIGHTGREY]),
            ),
            Self::new(
                CellRange::all(),
                TableCommand::Grid(Stroke::new(1.0, Color::BLACK)),
            ),
        ]
    }
}

/// Two-dimensional grid of cell strings plus region style rules.
#[derive(Clone, Debug, PartialEq)]
pub struct TableData {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Option<Vec<f64>>,
    alignment: Alignment,
    repeat_header: bool,
    rules: Vec<TableStyleRule>,
    text_style: Option<String>,
}

impl TableData {
    /// Creates a table from its header and body rows, seeded with [`TableStyleRule::defaults`].
    pub fn new<H, R, C>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            column_widths: None,
            alignment: Alignment::Center,
            repeat_header: false,
            rules: TableStyleRule::defaults(),
            text_style: None,
        }
    }

    /// Fixes the column widths in points.
    pub fn with_column_widths(mut self, widths: impl Into<Vec<f64>>) -> Self {
        self.column_widths = Some(widths.into());
        self
    }

    /// Sets the horizontal placement of the table within the frame.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Repeats the header row at the top of continuation pages.
    pub fn with_repeat_header(mut self, repeat: bool) -> Self {
        self.repeat_header = repeat;
        self
    }

    /// Appends a style rule; later rules take precedence.
    pub fn with_rule(mut self, region: CellRange, command: TableCommand) -> Self {
        self.rules.push(TableStyleRule::new(region, command));
        self
    }

    /// Replaces all style rules, including the defaults.
    pub fn with_rules(mut self, rules: impl Into<Vec<TableStyleRule>>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Header cells, one per column.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Body rows, without the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Explicit column widths in points, if any were set.
    pub fn column_widths(&self) -> Option<&[f64]> {
        self.column_widths.as_deref()
    }

    /// Horizontal placement of the table within the frame.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Whether the header is drawn again at the top of every continuation page.
    pub fn repeat_header(&self) -> bool {
        self.repeat_header
    }

    /// Style rules in the order they are applied.
    pub fn rules(&self) -> &[TableStyleRule] {
        &self.rules
    }

    /// Number of columns, taken from the header (or the widest row for header-less tables).
    pub fn column_count(&self) -> usize {
        if self.header.is_empty() {
            self.rows.iter().map(Vec::len).max().unwrap_or(0)
        } else {
            self.header.len()
        }
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Returns the text of cell `(column, row)`, where row 0 is the header.
    pub fn cell(&self, column: usize, row: usize) -> &str {
        let cells = if row == 0 {
            Some(&self.header)
        } else {
            self.rows.get(row - 1)
        };
        cells
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_the_end() {
        let range = CellRange::new((0, 1), (-1, -2));
        assert_eq!(range.resolve(4, 6), Some(((0, 3), (1, 4))));
    }

    #[test]
    fn empty_regions_resolve_to_none() {
        assert_eq!(CellRange::body().resolve(3, 1), None);
        assert_eq!(CellRange::all().resolve(0, 2), None);
    }

    #[test]
    fn styled_only_touches_text_blocks() {
        let block = Block::paragraph("x").styled("CustomNormal");
        assert_eq!(block.style_name().as_deref(), Some("CustomNormal"));
        assert_eq!(Block::page_break().styled("Ignored"), Block::PageBreak);
        assert_eq!(Block::heading(2, "h").style_name().as_deref(), Some("Heading2"));
    }

    #[test]
    fn table_dimensions_include_header() {
        let table = TableData::new(["A", "B"], vec![vec!["1", "2"], vec!["3"]]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(0, 0), "A");
        assert_eq!(table.rules(), TableStyleRule::defaults().as_slice());
    }
}
