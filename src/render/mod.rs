//! Rendering backends.
//!
//! The builder only knows the [`Renderer`] trait; [`PdfRenderer`] is the genpdf-backed
//! implementation used in production.

mod graphics;
mod pdf;

pub use pdf::PdfRenderer;

use crate::builder::FlowDocument;
use crate::error::Result;
use crate::layout::{BlockPlacement, OutlineEntry};

/// A fully rendered document held in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Where every block of the flow was placed, in flow order.
    pub placements: Vec<BlockPlacement>,
    pub outline: Vec<OutlineEntry>,
}

/// Turns a closed flow into document bytes.
pub trait Renderer {
    fn render(&mut self, document: &FlowDocument) -> Result<RenderedDocument>;
}
