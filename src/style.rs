//! Named paragraph styles and the registry that derives them from one another.
//!
//! Styles are plain data measured in PDF points.  They deliberately avoid referencing the
//! rendering crate so that flows can be assembled, inspected and laid out without loading any
//! fonts; the PDF backend maps them onto [`genpdf::style::Style`] at paint time.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Pure white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// CSS `whitesmoke`.
    pub const WHITESMOKE: Color = Color::rgb(245, 245, 245);
    /// CSS `beige`.
    pub const BEIGE: Color = Color::rgb(245, 245, 220);
    /// CSS `lightgrey`.
    pub const LIGHTGREY: Color = Color::rgb(211, 211, 211);

    /// Creates a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` (or `rrggbb`) hexadecimal color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Horizontal alignment of text lines and tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Fully justified paragraphs; the last line of each paragraph stays left aligned.
    Justify,
}

/// A named set of formatting attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    name: String,
    /// Font family registered with the renderer; `None` selects the document default.
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size: f64,
    /// Baseline-to-baseline distance in points; `None` uses 1.2 × the font size.
    pub leading: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub alignment: Alignment,
    /// Vertical space inserted before the block, dropped at the top of a page.
    pub space_before: f64,
    pub space_after: f64,
    pub left_indent: f64,
    pub right_indent: f64,
    /// Additional indentation applied to the first line only.
    pub first_line_indent: f64,
    /// Horizontal position of the bullet glyph for bullet items.
    pub bullet_indent: f64,
}

impl ParagraphStyle {
    /// Creates a 10pt left-aligned style with no spacing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font_family: None,
            font_size: 10.0,
            leading: None,
            bold: false,
            italic: false,
            color: Color::BLACK,
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            first_line_indent: 0.0,
            bullet_indent: 0.0,
        }
    }

    /// Returns the name the style is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the effective line height in points.
    pub fn line_height(&self) -> f64 {
        self.leading.unwrap_or(self.font_size * 1.2)
    }

    fn derive(&self, name: &str, overrides: &StyleOverrides) -> Self {
        let mut style = self.clone();
        style.name = name.to_owned();
        if let Some(family) = &overrides.font_family {
            style.font_family = family.clone();
        }
        if let Some(size) = overrides.font_size {
            style.font_size = size;
        }
        if let Some(leading) = overrides.leading {
            style.leading = Some(leading);
        }
        if let Some(bold) = overrides.bold {
            style.bold = bold;
        }
        if let Some(italic) = overrides.italic {
            style.italic = italic;
        }
        if let Some(color) = overrides.color {
            style.color = color;
        }
        if let Some(alignment) = overrides.alignment {
            style.alignment = alignment;
        }
        if let Some(space) = overrides.space_before {
            style.space_before = space;
        }
        if let Some(space) = overrides.space_after {
            style.space_after = space;
        }
        if let Some(indent) = overrides.left_indent {
            style.left_indent = indent;
        }
        if let Some(indent) = overrides.right_indent {
            style.right_indent = indent;
        }
        if let Some(indent) = overrides.first_line_indent {
            style.first_line_indent = indent;
        }
        if let Some(indent) = overrides.bullet_indent {
            style.bullet_indent = indent;
        }
        style
    }
}

/// Attribute overrides applied on top of a base style by [`StyleSheet::define_style`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleOverrides {
    font_family: Option<Option<String>>,
    font_size: Option<f64>,
    leading: Option<f64>,
    bold: Option<bool>,
    italic: Option<bool>,
    color: Option<Color>,
    alignment: Option<Alignment>,
    space_before: Option<f64>,
    space_after: Option<f64>,
    left_indent: Option<f64>,
    right_indent: Option<f64>,
    first_line_indent: Option<f64>,
    bullet_indent: Option<f64>,
}

impl StyleOverrides {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a named font family, or the document default with `None`.
    pub fn font_family(mut self, family: impl Into<Option<String>>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Font size in points.
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Distance between baselines in points.
    pub fn leading(mut self, leading: f64) -> Self {
        self.leading = Some(leading);
        self
    }

    /// Bold weight.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Italic slant.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Horizontal alignment of every line.
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Space above the block, dropped at the top of a page.
    pub fn space_before(mut self, space: f64) -> Self {
        self.space_before = Some(space);
        self
    }

    /// Space below the block.
    pub fn space_after(mut self, space: f64) -> Self {
        self.space_after = Some(space);
        self
    }

    /// Indent from the left edge of the frame.
    pub fn left_indent(mut self, indent: f64) -> Self {
        self.left_indent = Some(indent);
        self
    }

    /// Indent from the right edge of the frame.
    pub fn right_indent(mut self, indent: f64) -> Self {
        self.right_indent = Some(indent);
        self
    }

    /// Extra indent of the first line.
    pub fn first_line_indent(mut self, indent: f64) -> Self {
        self.first_line_indent = Some(indent);
        self
    }

    /// Position of the bullet glyph from the left edge.
    pub fn bullet_indent(mut self, indent: f64) -> Self {
        self.bullet_indent = Some(indent);
        self
    }
}

/// Registry of named styles.
///
/// Styles are immutable once registered: a name can be defined exactly once and later
/// definitions only ever derive new names from existing ones.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    styles: BTreeMap<String, ParagraphStyle>,
}

impl StyleSheet {
    /// Creates an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style sheet seeded with the conventional base styles
    /// (`Normal`, `BodyText`, `Title`, `Heading1`-`Heading3` and `Bullet`).
    pub fn sample() -> Self {
        let mut normal = ParagraphStyle::new("Normal");
        normal.leading = Some(12.0);

        let mut sheet = Self::new();
        sheet.insert(normal);

        let derived = [
            ("BodyText", "Normal", StyleOverrides::new().space_before(6.0)),
            (
                "Title",
                "Normal",
                StyleOverrides::new()
                    .font_size(18.0)
                    .leading(22.0)
                    .bold(true)
                    .alignment(Alignment::Center)
                    .space_after(6.0),
            ),
            (
                "Heading1",
                "Normal",
                StyleOverrides::new()
                    .font_size(18.0)
                    .leading(22.0)
                    .bold(true)
                    .space_after(6.0),
            ),
            (
                "Heading2",
                "Normal",
                StyleOverrides::new()
                    .font_size(14.0)
                    .leading(18.0)
                    .bold(true)
                    .space_before(12.0)
                    .space_after(6.0),
            ),
            (
                "Heading3",
                "Normal",
                StyleOverrides::new()
                    .font_size(12.0)
                    .leading(14.0)
                    .bold(true)
                    .italic(true)
                    .space_before(12.0)
                    .space_after(6.0),
            ),
            (
                "Bullet",
                "Normal",
                StyleOverrides::new()
                    .space_before(3.0)
                    .left_indent(18.0)
                    .bullet_indent(6.0),
            ),
        ];

        for (name, base, overrides) in derived {
            let style = sheet.styles[base].derive(name, &overrides);
            sheet.insert(style);
        }
        sheet
    }

    fn insert(&mut self, style: ParagraphStyle) {
        self.styles.insert(style.name.clone(), style);
    }

    /// Derives and registers a new style named `name` from `base` plus `overrides`.
    pub fn define_style(
        &mut self,
        name: impl Into<String>,
        base: &str,
        overrides: StyleOverrides,
    ) -> Result<&ParagraphStyle> {
        let name = name.into();
        if self.styles.contains_key(&name) {
            return Err(Error::configuration(format!(
                "style '{name}' is already defined"
            )));
        }
        let base_style = self.styles.get(base).ok_or_else(|| {
            Error::configuration(format!(
                "cannot derive style '{name}' from unknown base style '{base}'"
            ))
        })?;
        let style = base_style.derive(&name, &overrides);
        log::debug!("Defined style '{}' from base '{}'", name, base);
        Ok(self.styles.entry(name).or_insert(style))
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&ParagraphStyle> {
        self.styles.get(name)
    }

    /// Looks up a style by name, failing with [`Error::Configuration`] when it is unknown.
    pub fn resolve(&self, name: &str) -> Result<&ParagraphStyle> {
        self.get(name)
            .ok_or_else(|| Error::configuration(format!("unknown style '{name}'")))
    }

    /// Returns whether a style with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Iterates over the registered style names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_and_without_hash() {
        assert_eq!(Color::from_hex("#1a237e"), Some(Color::rgb(0x1a, 0x23, 0x7e)));
        assert_eq!(Color::from_hex("3949AB"), Some(Color::rgb(0x39, 0x49, 0xab)));
        assert_eq!(Color::from_hex("#12FG34"), None);
        assert_eq!(Color::from_hex("#123"), None);
    }

    #[test]
    fn sample_sheet_contains_base_styles() {
        let sheet = StyleSheet::sample();
        for name in ["Normal", "BodyText", "Title", "Heading1", "Heading2", "Heading3", "Bullet"] {
            assert!(sheet.contains(name), "missing {name}");
        }
        let title = sheet.get("Title").unwrap();
        assert!(title.bold);
        assert_eq!(title.alignment, Alignment::Center);
    }

    #[test]
    fn derived_style_inherits_unset_attributes() {
        let mut sheet = StyleSheet::sample();
        let style = sheet
            .define_style(
                "CustomHeading1",
                "Heading1",
                StyleOverrides::new().font_size(16.0).space_before(12.0),
            )
            .unwrap();

        assert_eq!(style.name(), "CustomHeading1");
        assert_eq!(style.font_size, 16.0);
        assert_eq!(style.space_before, 12.0);
        assert!(style.bold);
        assert_eq!(style.space_after, 6.0);
        assert_eq!(style.line_height(), 22.0);
    }

    #[test]
    fn unknown_base_is_a_configuration_error() {
        let mut sheet = StyleSheet::sample();
        let err = sheet
            .define_style("Broken", "Heading9", StyleOverrides::new())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("Heading9")));
        assert!(!sheet.contains("Broken"));
    }

    #[test]
    fn styles_cannot_be_redefined() {
        let mut sheet = StyleSheet::sample();
        let err = sheet
            .define_style("Normal", "BodyText", StyleOverrides::new().font_size(30.0))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(sheet.get("Normal").unwrap().font_size, 10.0);
    }

    #[test]
    fn default_leading_scales_with_font_size() {
        let style = ParagraphStyle::new("Plain");
        assert!((style.line_height() - 12.0).abs() < 1e-9);
    }
}
