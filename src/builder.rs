//! Document flow construction.
//!
//! A [`DocumentBuilder`] owns everything a document needs before it is rendered: the style
//! sheet, the page geometry, document metadata and the append-only sequence of blocks.
//! Rendering consumes the builder, so a flow can never be appended to once it has been
//! turned into an artifact.

use crate::error::{Error, Result};
use crate::layout::{self, LayoutPlan, TextMetrics};
use crate::model::Block;
use crate::output::{self, Artifact, OutputTarget};
use crate::page::{Frame, PageGeometry, PageMargins, PaperSize};
use crate::render::{PdfRenderer, Renderer};
use crate::style::{Alignment, ParagraphStyle, StyleOverrides, StyleSheet};

/// A block together with the style it resolved to when it was appended.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowItem {
    block: Block,
    style: Option<ParagraphStyle>,
}

impl FlowItem {
    /// The appended block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Resolved style; `None` for spacers and page breaks.
    pub fn style(&self) -> Option<&ParagraphStyle> {
        self.style.as_ref()
    }
}

/// Page-number footer drawn inside the bottom of every page's frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PageFooter {
    /// Height reserved at the bottom of the frame, in points.
    pub height: f64,
    pub font_size: f64,
    pub alignment: Alignment,
}

impl Default for PageFooter {
    fn default() -> Self {
        Self {
            height: 18.0,
            font_size: 9.0,
            alignment: Alignment::Center,
        }
    }
}

impl PageFooter {
    /// Text printed on page `page` (1-based).
    pub fn text(&self, page: usize) -> String {
        format!("Page {page}")
    }
}

/// Builder that accumulates styles and blocks for a single document.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    styles: StyleSheet,
    geometry: PageGeometry,
    title: Option<String>,
    footer: Option<PageFooter>,
    items: Vec<FlowItem>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a builder seeded with [`StyleSheet::sample`] and the default page geometry.
    pub fn new() -> Self {
        Self::with_styles(StyleSheet::sample())
    }

    /// Creates a builder using the given style sheet.
    pub fn with_styles(styles: StyleSheet) -> Self {
        Self {
            styles,
            geometry: PageGeometry::default(),
            title: None,
            footer: None,
            items: Vec::new(),
        }
    }

    /// Sets the paper size used for every page.
    pub fn with_paper_size(mut self, paper: PaperSize) -> Self {
        self.geometry.paper = paper;
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.geometry.margins = margins;
        self
    }

    /// Replaces paper size and margins at once.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Sets the title stored in the document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables or disables the page-number footer.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.footer = enabled.then(PageFooter::default);
        self
    }

    /// Uses a custom footer configuration.
    pub fn with_footer(mut self, footer: PageFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Derives a new named style from `base`; see [`StyleSheet::define_style`].
    pub fn define_style(
        &mut self,
        name: impl Into<String>,
        base: &str,
        overrides: StyleOverrides,
    ) -> Result<&ParagraphStyle> {
        self.styles.define_style(name, base, overrides)
    }

    /// Appends a block to the end of the flow.
    ///
    /// The block's style reference is resolved against the style sheet immediately; an unknown
    /// style name fails with [`Error::Configuration`] and leaves the flow unchanged.
    pub fn append(&mut self, block: Block) -> Result<&mut Self> {
        let style = match block.style_name() {
            Some(name) => Some(self.styles.resolve(&name).cloned().map_err(|_| {
                Error::configuration(format!(
                    "{:?} block #{} references unknown style '{}'",
                    block.kind(),
                    self.items.len(),
                    name
                ))
            })?),
            None => None,
        };
        log::trace!("Appending {:?} block #{}", block.kind(), self.items.len());
        self.items.push(FlowItem { block, style });
        Ok(self)
    }

    /// Appends every block in order, stopping at the first failure.
    pub fn extend<I>(&mut self, blocks: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Block>,
    {
        for block in blocks {
            self.append(block)?;
        }
        Ok(self)
    }

    /// Styles available to blocks appended from now on.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Paper size and margins.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Blocks appended so far, each with its resolved style.
    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    /// Number of blocks appended so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no block has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Closes the flow.
    pub fn finish(self) -> FlowDocument {
        FlowDocument {
            geometry: self.geometry,
            title: self.title,
            footer: self.footer,
            items: self.items,
        }
    }

    /// Renders the flow to `target` with the default PDF renderer.
    pub fn render(self, target: impl Into<OutputTarget>) -> Result<Artifact> {
        let mut renderer = PdfRenderer::new();
        self.render_with(&mut renderer, target)
    }

    /// Renders the flow to `target` with the given renderer.
    ///
    /// The collision policy is checked before any rendering work happens and again when the
    /// finished document is committed.
    pub fn render_with<R>(
        self,
        renderer: &mut R,
        target: impl Into<OutputTarget>,
    ) -> Result<Artifact>
    where
        R: Renderer + ?Sized,
    {
        let target = target.into();
        target.check_collision()?;
        let document = self.finish();
        log::debug!(
            "Rendering {} blocks to {}",
            document.items.len(),
            target.path().display()
        );
        let rendered = renderer.render(&document)?;
        output::commit(&target, rendered)
    }
}

/// A closed flow, ready to be handed to a [`Renderer`].
#[derive(Clone, Debug)]
pub struct FlowDocument {
    geometry: PageGeometry,
    title: Option<String>,
    footer: Option<PageFooter>,
    items: Vec<FlowItem>,
}

impl FlowDocument {
    /// Blocks in flow order, each with its resolved style.
    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    /// Paper size and margins.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Document title written to the PDF metadata.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Footer drawn at the bottom of every page, if enabled.
    pub fn footer(&self) -> Option<&PageFooter> {
        self.footer.as_ref()
    }

    /// Area available to the flow on every page: the page inside its margins, less the footer.
    pub fn frame(&self) -> Frame {
        let frame = self.geometry.frame();
        let reserved = self.footer.as_ref().map_or(0.0, |footer| footer.height);
        Frame::new(frame.width, (frame.height - reserved).max(0.0))
    }

    /// Paginates the flow with the given metrics.
    pub fn paginate<M>(&self, metrics: &M) -> LayoutPlan
    where
        M: TextMetrics + ?Sized,
    {
        layout::paginate(&self.items, metrics, self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_resolves_default_and_custom_styles() {
        let mut builder = DocumentBuilder::new();
        builder
            .define_style("Custom", "Normal", StyleOverrides::new().font_size(11.0))
            .unwrap();
        builder
            .append(Block::heading(2, "Heading"))
            .unwrap()
            .append(Block::paragraph("body").styled("Custom"))
            .unwrap()
            .append(Block::page_break())
            .unwrap();

        let items = builder.items();
        assert_eq!(items[0].style().map(ParagraphStyle::name), Some("Heading2"));
        assert_eq!(items[1].style().map(|style| style.font_size), Some(11.0));
        assert!(items[2].style().is_none());
    }

    #[test]
    fn unknown_style_is_rejected_without_changing_the_flow() {
        let mut builder = DocumentBuilder::new();
        let err = builder
            .append(Block::paragraph("x").styled("Missing"))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(builder.is_empty());
    }

    #[test]
    fn resolved_styles_are_frozen_at_append_time() {
        let mut builder = DocumentBuilder::with_styles(StyleSheet::sample());
        builder.append(Block::paragraph("first")).unwrap();
        let before = builder.items()[0].clone();
        builder
            .define_style("Later", "Normal", StyleOverrides::new().font_size(20.0))
            .unwrap();
        assert_eq!(builder.items()[0], before);
    }

    #[test]
    fn footer_reduces_the_frame() {
        let plain = DocumentBuilder::new().finish();
        let numbered = DocumentBuilder::new().with_page_numbers(true).finish();
        assert_eq!(plain.frame().height - numbered.frame().height, 18.0);
        assert_eq!(numbered.footer().map(|footer| footer.text(3)), Some("Page 3".into()));
    }
}
