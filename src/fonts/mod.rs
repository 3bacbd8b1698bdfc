//! Font discovery for the PDF backend.
//!
//! The renderer needs one TrueType family with regular, bold, italic and bold-italic faces.
//! Directories are searched in order: an explicitly configured directory, the
//! `FLOWDOC_FONTS_DIR` environment variable, `assets/fonts` next to the executable and in the
//! crate, and finally well-known system locations of Liberation Sans, DejaVu Sans and Arial.

use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};

use crate::error::{Error, Result};

/// Environment variable naming a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "FLOWDOC_FONTS_DIR";

/// Family name expected in bundled font directories.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

const INSTALL_GUIDANCE: &str = "Install the Liberation Sans or DejaVu Sans fonts \
(for example `apt install fonts-liberation`), or point FLOWDOC_FONTS_DIR at a directory \
containing LiberationSans-Regular.ttf, LiberationSans-Bold.ttf, LiberationSans-Italic.ttf \
and LiberationSans-BoldItalic.ttf.";

/// Paths of the four faces of one family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

impl FontFiles {
    /// Files named `<family>-Regular.ttf`, `<family>-Bold.ttf` and so on inside `directory`.
    pub fn in_directory(directory: &Path, family: &str) -> Self {
        let file = |suffix: &str| directory.join(format!("{family}-{suffix}.ttf"));
        Self {
            regular: file("Regular"),
            bold: file("Bold"),
            italic: file("Italic"),
            bold_italic: file("BoldItalic"),
        }
    }

    fn explicit(directory: &Path, names: [&str; 4]) -> Self {
        let [regular, bold, italic, bold_italic] = names;
        Self {
            regular: directory.join(regular),
            bold: directory.join(bold),
            italic: directory.join(italic),
            bold_italic: directory.join(bold_italic),
        }
    }

    fn all(&self) -> [&Path; 4] {
        [&self.regular, &self.bold, &self.italic, &self.bold_italic]
    }

    fn missing(&self) -> Vec<&Path> {
        self.all().into_iter().filter(|path| !path.is_file()).collect()
    }

    /// Loads all four faces.
    pub fn load(&self) -> Result<FontFamily<FontData>> {
        Ok(FontFamily {
            regular: FontData::load(&self.regular, None)?,
            bold: FontData::load(&self.bold, None)?,
            italic: FontData::load(&self.italic, None)?,
            bold_italic: FontData::load(&self.bold_italic, None)?,
        })
    }
}

struct Candidate {
    label: &'static str,
    files: FontFiles,
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn candidates(explicit: Option<&Path>) -> Vec<Candidate> {
    let bundled = |label, directory: &Path| Candidate {
        label,
        files: FontFiles::in_directory(directory, DEFAULT_FONT_FAMILY_NAME),
    };
    let mut candidates = Vec::new();

    if let Some(directory) = explicit {
        candidates.push(bundled("configured directory", directory));
    }
    if let Some(directory) = env_path(FONTS_DIR_ENV) {
        candidates.push(bundled(FONTS_DIR_ENV, &directory));
    }
    if let Some(bin_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(bundled("executable assets", &bin_dir.join("assets/fonts")));
    }
    candidates.push(bundled(
        "crate assets",
        &Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    ));

    for directory in [
        "/usr/share/fonts/truetype/liberation",
        "/usr/share/fonts/truetype/liberation2",
        "/usr/share/fonts/liberation-sans",
        "/usr/share/fonts/TTF",
    ] {
        candidates.push(bundled("Liberation Sans", Path::new(directory)));
    }
    for directory in ["/usr/share/fonts/truetype/dejavu", "/usr/share/fonts/TTF"] {
        candidates.push(Candidate {
            label: "DejaVu Sans",
            files: FontFiles::explicit(
                Path::new(directory),
                [
                    "DejaVuSans.ttf",
                    "DejaVuSans-Bold.ttf",
                    "DejaVuSans-Oblique.ttf",
                    "DejaVuSans-BoldOblique.ttf",
                ],
            ),
        });
    }
    if let Some(directory) = windows_font_directory() {
        candidates.push(Candidate {
            label: "Windows Arial",
            files: FontFiles::explicit(
                &directory,
                ["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"],
            ),
        });
    }
    candidates
}

fn windows_font_directory() -> Option<PathBuf> {
    ["WINDIR", "SystemRoot"]
        .into_iter()
        .filter_map(env_path)
        .map(|root| root.join("Fonts"))
        .find(|candidate| candidate.is_dir())
}

/// Locates the first complete font family, preferring `explicit` when given.
pub fn locate_font_files(explicit: Option<&Path>) -> Result<FontFiles> {
    let mut attempts = Vec::new();
    for (position, candidate) in candidates(explicit).into_iter().enumerate() {
        let missing = candidate.files.missing();
        if missing.is_empty() {
            if position > 0 {
                log::debug!(
                    "Using {} fonts from {}",
                    candidate.label,
                    candidate.files.regular.display()
                );
            }
            return Ok(candidate.files);
        }
        let names = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        attempts.push(format!("{} (missing {})", candidate.label, names));
    }

    Err(Error::MissingDependency {
        message: format!(
            "no usable font family found; checked: {}",
            attempts.join("; ")
        ),
        guidance: INSTALL_GUIDANCE.to_owned(),
    })
}

/// Loads the default font family, warning when a system fallback is used.
pub fn default_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>> {
    let files = locate_font_files(explicit)?;
    let bundled = files
        .regular
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(DEFAULT_FONT_FAMILY_NAME));
    if !bundled {
        log::warn!(
            "Bundled fonts unavailable; falling back to {}",
            files.regular.display()
        );
    }
    files.load()
}

/// Loads the family `name` from `<directory>/<name>-{Regular,Bold,Italic,BoldItalic}.ttf`.
pub fn font_family_from_dir(directory: &Path, name: &str) -> Result<FontFamily<FontData>> {
    let files = FontFiles::in_directory(directory, name);
    let missing = files.missing();
    if !missing.is_empty() {
        return Err(Error::MissingDependency {
            message: format!(
                "font family '{}' is incomplete in {}: missing {}",
                name,
                directory.display(),
                missing
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            guidance: format!(
                "Provide {name}-Regular.ttf, {name}-Bold.ttf, {name}-Italic.ttf and \
                 {name}-BoldItalic.ttf in {}.",
                directory.display()
            ),
        });
    }
    files.load()
}

/// Indicates whether any usable font family can be located.
pub fn default_fonts_available() -> bool {
    locate_font_files(None).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_names_follow_the_family_convention() {
        let files = FontFiles::in_directory(Path::new("/fonts"), "Custom");
        assert_eq!(files.bold_italic, PathBuf::from("/fonts/Custom-BoldItalic.ttf"));
        assert_eq!(files.regular, PathBuf::from("/fonts/Custom-Regular.ttf"));
    }

    #[test]
    fn incomplete_family_reports_missing_files_with_guidance() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Custom-Regular.ttf"), b"").unwrap();
        let err = font_family_from_dir(dir.path(), "Custom").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Custom-Bold.ttf"));
        assert!(!message.contains("Custom-Regular.ttf"));
        assert!(err.guidance().is_some());
    }
}
