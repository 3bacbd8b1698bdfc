//! PDF backend built on `genpdf`.
//!
//! genpdf renders a document by repeatedly asking its root element to fill one page.  The flow
//! is pushed as a single [`FlowElement`]: on its first call it paginates the whole flow with
//! metrics taken from the document's font cache, then it paints one planned page per call until
//! the plan is exhausted.  Only text goes through genpdf; backgrounds and rules are added
//! afterwards by [`graphics`](super::graphics).

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::rc::Rc;

use genpdf::elements::Paragraph;
use genpdf::error::{Error as PdfError, ErrorKind};
use genpdf::fonts::{Font, FontCache, FontFamily};
use genpdf::render::Area;
use genpdf::style::{self as pdf_style, Style, StyledString};
use genpdf::{Context, Element, Margins, Mm, PageDecorator, Position, RenderResult, Size};

use super::graphics::{self, FrameOrigin};
use super::{RenderedDocument, Renderer};
use crate::builder::{FlowDocument, FlowItem, PageFooter};
use crate::error::Result;
use crate::fonts;
use crate::layout::{self, DrawOp, Face, LayoutPlan, PageLayout, TextMetrics, TextRun};
use crate::page::{mm_to_pt, pt_to_mm, Frame, PageMargins};
use crate::style::{Alignment, Color};

type Families = BTreeMap<String, FontFamily<Font>>;

fn mm_from_pt(points: f64) -> Mm {
    Mm::from(printpdf::Mm(pt_to_mm(points)))
}

fn pt_from_mm(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm_to_pt(mm.0)
}

fn font_size(size: f64) -> u8 {
    size.round().clamp(1.0, f64::from(u8::MAX)) as u8
}

fn pdf_color(color: Color) -> pdf_style::Color {
    pdf_style::Color::Rgb(color.r, color.g, color.b)
}

fn face_style(families: &Families, face: &Face) -> Style {
    let mut style = Style::new().with_font_size(font_size(face.size));
    if let Some(family) = face.family.as_ref().and_then(|name| families.get(name)) {
        style = style.with_font_family(*family);
    }
    if face.bold {
        style.set_bold();
    }
    if face.italic {
        style.set_italic();
    }
    style
}

/// Renders flows to PDF bytes with genpdf.
#[derive(Clone, Debug, Default)]
pub struct PdfRenderer {
    fonts_dir: Option<PathBuf>,
    families: Vec<(String, PathBuf)>,
    #[cfg(feature = "bookmarks")]
    outline: bool,
}

impl PdfRenderer {
    /// Creates a renderer that uses the default font search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `directory` for the default font family before any other location.
    pub fn with_fonts_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(directory.into());
        self
    }

    /// Registers the family `name`, loaded from `<directory>/<name>-Regular.ttf` and siblings,
    /// for styles whose `font_family` names it.
    pub fn with_font_family(
        mut self,
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        self.families.push((name.into(), directory.into()));
        self
    }

    /// Adds a PDF outline entry for every title and top-level heading.
    #[cfg(feature = "bookmarks")]
    pub fn with_outline(mut self, enabled: bool) -> Self {
        self.outline = enabled;
        self
    }
}

impl Renderer for PdfRenderer {
    fn render(&mut self, document: &FlowDocument) -> Result<RenderedDocument> {
        let mut pdf = genpdf::Document::new(fonts::default_font_family(self.fonts_dir.as_deref())?);
        if let Some(title) = document.title() {
            pdf.set_title(title);
        }
        let (width, height) = document.geometry().paper.dimensions();
        pdf.set_paper_size(Size::new(mm_from_pt(width), mm_from_pt(height)));

        let mut families = Families::new();
        for (name, directory) in &self.families {
            let data = fonts::font_family_from_dir(directory, name)?;
            families.insert(name.clone(), pdf.add_font_family(data));
        }
        warn_unknown_families(document.items(), &families);

        pdf.set_page_decorator(FlowPageDecorator::new(
            document.geometry().margins,
            document.footer().cloned(),
        ));

        let slot = Rc::new(RefCell::new(None));
        pdf.push(FlowElement::new(
            document.items().to_vec(),
            document.frame(),
            families,
            Rc::clone(&slot),
        ));

        let mut bytes = Vec::new();
        pdf.render(&mut bytes)?;

        let plan = slot.borrow_mut().take().ok_or_else(|| {
            PdfError::new("document flow was never laid out", ErrorKind::InvalidData)
        })?;
        let page_count = plan.page_count();
        let (pages, placements, outline) = plan.into_parts();

        if pages.iter().any(graphics::has_graphics) {
            let geometry = document.geometry();
            let origin = FrameOrigin {
                left: geometry.margins.left,
                top: geometry.margins.top,
                page_height: geometry.paper.dimensions().1,
            };
            bytes = graphics::paint_underlay(&bytes, &pages, origin)?;
        }

        #[cfg(feature = "bookmarks")]
        if self.outline {
            bytes = crate::bookmarks::apply_outline(&bytes, &outline)?;
        }

        log::debug!("Rendered {} pages ({} bytes)", page_count, bytes.len());
        Ok(RenderedDocument {
            bytes,
            page_count,
            placements,
            outline,
        })
    }
}

fn warn_unknown_families(items: &[FlowItem], families: &Families) {
    let unknown: BTreeSet<&str> = items
        .iter()
        .filter_map(|item| item.style()?.font_family.as_deref())
        .filter(|name| !families.contains_key(*name))
        .collect();
    for name in unknown {
        log::warn!("Font family '{}' is not registered; using the default family", name);
    }
}

/// Widths from the font cache of the document being rendered.
struct CacheMetrics<'a> {
    cache: &'a FontCache,
    families: &'a Families,
}

impl TextMetrics for CacheMetrics<'_> {
    fn text_width(&self, text: &str, face: &Face) -> f64 {
        let string = StyledString::new(text, face_style(self.families, face));
        pt_from_mm(string.width(self.cache))
    }
}

/// Adds the page margins and the optional page-number footer.
struct FlowPageDecorator {
    page: usize,
    margins: Margins,
    footer: Option<PageFooter>,
}

impl FlowPageDecorator {
    fn new(margins: PageMargins, footer: Option<PageFooter>) -> Self {
        Self {
            page: 0,
            margins: Margins::trbl(
                mm_from_pt(margins.top),
                mm_from_pt(margins.right),
                mm_from_pt(margins.bottom),
                mm_from_pt(margins.left),
            ),
            footer,
        }
    }
}

impl PageDecorator for FlowPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        style: Style,
    ) -> std::result::Result<Area<'a>, PdfError> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            let height = mm_from_pt(footer.height);
            if height > available {
                return Err(PdfError::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - height));
            footer_area.set_height(height);
            let alignment = match footer.alignment {
                Alignment::Left | Alignment::Justify => genpdf::Alignment::Left,
                Alignment::Center => genpdf::Alignment::Center,
                Alignment::Right => genpdf::Alignment::Right,
            };
            let mut element = Paragraph::new(footer.text(self.page))
                .aligned(alignment)
                .styled(Style::new().with_font_size(font_size(footer.font_size)));
            element.render(context, footer_area, style)?;

            area.set_height(available - height);
        }

        Ok(area)
    }
}

/// The whole flow as one genpdf element that paints a planned page per call.
struct FlowElement {
    items: Vec<FlowItem>,
    frame: Frame,
    families: Families,
    slot: Rc<RefCell<Option<LayoutPlan>>>,
    pages: Option<Vec<PageLayout>>,
    next_page: usize,
}

impl FlowElement {
    fn new(
        items: Vec<FlowItem>,
        frame: Frame,
        families: Families,
        slot: Rc<RefCell<Option<LayoutPlan>>>,
    ) -> Self {
        Self {
            items,
            frame,
            families,
            slot,
            pages: None,
            next_page: 0,
        }
    }

    fn plan_pages(&mut self, cache: &FontCache) -> &[PageLayout] {
        if self.pages.is_none() {
            let metrics = CacheMetrics {
                cache,
                families: &self.families,
            };
            let plan = layout::paginate(&self.items, &metrics, self.frame);
            self.pages = Some(plan.pages().to_vec());
            *self.slot.borrow_mut() = Some(plan);
        }
        self.pages.as_deref().unwrap_or_default()
    }

    fn print_run(
        &self,
        context: &Context,
        area: &Area<'_>,
        run: &TextRun,
    ) -> std::result::Result<(), PdfError> {
        let style = face_style(&self.families, &run.face).with_color(pdf_color(run.color));
        let available = area.size().height;
        let mut position = Position::new(mm_from_pt(run.x), mm_from_pt(run.y));
        if position.y >= available {
            log::warn!("Text run {:?} starts below the page frame; skipped", run.text);
            return Ok(());
        }
        // Font ascent can exceed the leading reserved for the last line of a full page.
        let glyph_height = style
            .font(&context.font_cache)
            .glyph_height(style.font_size());
        if position.y + glyph_height > available {
            position.y = (available - glyph_height).max(Mm::default());
        }

        match area.text_section(&context.font_cache, position, style) {
            Some(mut section) => section.print_str(&run.text, style),
            None => {
                log::debug!("Text run {:?} does not fit on its page", run.text);
                Ok(())
            }
        }
    }
}

impl Element for FlowElement {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> std::result::Result<RenderResult, PdfError> {
        let page_count = self.plan_pages(&context.font_cache).len();
        let mut result = RenderResult::default();
        result.size = area.size();

        let Some(page) = self
            .pages
            .as_ref()
            .and_then(|pages| pages.get(self.next_page))
        else {
            return Ok(result);
        };
        log::debug!("Painting page {} of {}", self.next_page + 1, page_count);

        for op in page.paint_order() {
            if let DrawOp::Text(run) = op {
                self.print_run(context, &area, run)?;
            }
        }

        self.next_page += 1;
        result.has_more = self.next_page < page_count;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversion_round_trips_through_genpdf_units() {
        assert!((pt_from_mm(mm_from_pt(72.0)) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn font_sizes_are_rounded_into_range() {
        assert_eq!(font_size(10.4), 10);
        assert_eq!(font_size(0.2), 1);
        assert_eq!(font_size(400.0), 255);
    }
}
