//! Declarative document flows rendered to paginated PDF reports.
//!
//! A [`DocumentBuilder`] collects named styles and an ordered flow of [`Block`]s; rendering
//! consumes the builder, paginates the flow greedily in a single pass and commits one PDF
//! artifact. The [`summary`] module uses it to produce the Unity Game Builder project summary.

pub mod builder;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod output;
pub mod page;
pub mod render;
pub mod richtext;
pub mod style;
pub mod summary;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{DocumentBuilder, FlowDocument, FlowItem, PageFooter};
pub use error::{Error, Result};
pub use model::{Block, BlockKind, CellRange, Stroke, TableCommand, TableData, TableStyleRule};
pub use output::{Artifact, CollisionPolicy, OutputTarget};
pub use page::{PageGeometry, PageMargins, PaperSize};
pub use render::{PdfRenderer, RenderedDocument, Renderer};
pub use style::{Alignment, Color, ParagraphStyle, StyleOverrides, StyleSheet};
