//! Output artifacts: file naming, collision handling and the atomic commit of a rendered
//! document.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::layout::{BlockPlacement, OutlineEntry};
use crate::render::RenderedDocument;

/// Builds the conventional `<prefix>_<YYYYMMDD>.pdf` file name.
pub fn default_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", prefix, date.format("%Y%m%d"))
}

/// What to do when the destination file already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Fail with [`Error::ArtifactExists`].
    Fail,
}

/// Destination of a render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
    policy: CollisionPolicy,
}

impl OutputTarget {
    /// Targets `path`, overwriting an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: CollisionPolicy::default(),
        }
    }

    /// Sets what happens when `path` already exists.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Destination of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the collision policy.
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub(crate) fn check_collision(&self) -> Result<()> {
        if self.policy == CollisionPolicy::Fail && self.path.exists() {
            return Err(Error::ArtifactExists(self.path.clone()));
        }
        Ok(())
    }

    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl From<PathBuf> for OutputTarget {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for OutputTarget {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for OutputTarget {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for OutputTarget {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Handle to a committed document.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    path: PathBuf,
    page_count: usize,
    byte_len: usize,
    placements: Vec<BlockPlacement>,
    outline: Vec<OutlineEntry>,
}

impl Artifact {
    /// Location of the written file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages in the committed document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Size of the written file in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Where every block of the flow was placed, in flow order.
    pub fn placements(&self) -> &[BlockPlacement] {
        &self.placements
    }

    /// Titles and top-level headings with their page numbers.
    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }
}

/// Writes `rendered` to a temporary file beside the destination and moves it into place.
///
/// The destination is either the complete document or left untouched.
pub(crate) fn commit(target: &OutputTarget, rendered: RenderedDocument) -> Result<Artifact> {
    let path = target.path();
    let fail = |message: &str| {
        let path = path.to_path_buf();
        let message = message.to_owned();
        move |err: io::Error| Error::render(path, message, err)
    };

    let mut file = tempfile::Builder::new()
        .prefix(".flowdoc-")
        .suffix(".tmp")
        .tempfile_in(target.directory())
        .map_err(fail("cannot create a temporary file in the destination directory"))?;
    file.write_all(&rendered.bytes)
        .map_err(fail("cannot write the rendered document"))?;
    file.as_file()
        .sync_all()
        .map_err(fail("cannot flush the rendered document to disk"))?;

    match target.policy() {
        CollisionPolicy::Overwrite => {
            file.persist(path).map_err(|err| {
                Error::render(path, "cannot move the document into place", err.error)
            })?;
        }
        CollisionPolicy::Fail => {
            file.persist_noclobber(path).map_err(|err| {
                if err.error.kind() == io::ErrorKind::AlreadyExists {
                    Error::ArtifactExists(path.to_path_buf())
                } else {
                    Error::render(path, "cannot move the document into place", err.error)
                }
            })?;
        }
    }

    log::debug!(
        "Wrote {} ({} pages, {} bytes)",
        path.display(),
        rendered.page_count,
        rendered.bytes.len()
    );
    Ok(Artifact {
        path: path.to_path_buf(),
        page_count: rendered.page_count,
        byte_len: rendered.bytes.len(),
        placements: rendered.placements,
        outline: rendered.outline,
    })
}
