//! Error types shared by the document builder, the layout engine and the PDF backend.

use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported while declaring styles, assembling a flow or rendering it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style was declared against an unknown base, declared twice, or referenced before
    /// being declared.
    #[error("Invalid document configuration: {0}")]
    Configuration(String),

    /// A runtime resource required by the renderer (font files) could not be located.
    #[error("Missing rendering dependency: {message}")]
    MissingDependency {
        /// Human-readable description including the locations that were searched.
        message: String,
        /// Installation guidance printed alongside the message.
        guidance: String,
    },

    /// The output target could not be opened, written or finalized.
    #[error("Failed to render {path}: {message}")]
    Render {
        /// Destination that was being produced.
        path: PathBuf,
        /// Short description of the failing step.
        message: String,
        /// Underlying I/O failure, if any.
        #[source]
        source: Option<io::Error>,
    },

    /// The destination already exists and the collision policy forbids overwriting it.
    #[error("Artifact already exists at {0}")]
    ArtifactExists(PathBuf),

    /// The PDF backend rejected the document.
    #[error("PDF backend error: {0}")]
    Pdf(#[from] genpdf::error::Error),

    /// Backgrounds and rules could not be added to the rendered pages.
    #[error("Failed to paint page graphics: {0}")]
    Graphics(#[from] lopdf::Error),

    /// Outline injection failed after the document was rendered.
    #[cfg(feature = "bookmarks")]
    #[error(transparent)]
    Outline(#[from] crate::bookmarks::BookmarkError),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn render(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Into<Option<io::Error>>,
    ) -> Self {
        Self::Render {
            path: path.into(),
            message: message.into(),
            source: source.into(),
        }
    }

    /// Returns installation guidance when the error stems from a missing dependency.
    pub fn guidance(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { guidance, .. } => Some(guidance),
            _ => None,
        }
    }
}
