//! Page geometry shared by the layout engine and the PDF backend.

/// Millimetres per PDF point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Converts points to millimetres.
pub fn pt_to_mm(points: f64) -> f64 {
    points * MM_PER_PT
}

/// Converts millimetres to points.
pub fn mm_to_pt(millimetres: f64) -> f64 {
    millimetres / MM_PER_PT
}

/// Paper formats, measured in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PaperSize {
    /// US Letter, 8.5 × 11 in.
    #[default]
    Letter,
    /// ISO A4, 210 × 297 mm.
    A4,
    /// Arbitrary width × height in points.
    Custom { width: f64, height: f64 },
}

impl PaperSize {
    /// Returns `(width, height)` in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::A4 => (mm_to_pt(210.0), mm_to_pt(297.0)),
            PaperSize::Custom { width, height } => (width, height),
        }
    }
}

/// Four page margins in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PageMargins {
    /// Creates margins in top, right, bottom, left order.
    pub fn trbl(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Uses the same margin on every side.
    pub fn all(margin: f64) -> Self {
        Self::trbl(margin, margin, margin, margin)
    }
}

impl Default for PageMargins {
    /// One inch on every side except a quarter inch at the bottom.
    fn default() -> Self {
        Self::trbl(72.0, 72.0, 18.0, 72.0)
    }
}

/// Paper size plus margins, configured once per document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub margins: PageMargins,
}

impl PageGeometry {
    /// Combines a paper size with page margins.
    pub fn new(paper: PaperSize, margins: PageMargins) -> Self {
        Self { paper, margins }
    }

    /// Width and height of the area inside the margins, in points.
    pub fn frame(&self) -> Frame {
        let (width, height) = self.paper.dimensions();
        Frame {
            width: (width - self.margins.left - self.margins.right).max(0.0),
            height: (height - self.margins.top - self.margins.bottom).max(0.0),
        }
    }
}

/// The rectangle content is laid out in, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Creates a frame of `width` by `height` points.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame_is_letter_inside_report_margins() {
        let frame = PageGeometry::default().frame();
        assert_eq!(frame, Frame::new(468.0, 702.0));
    }

    #[test]
    fn unit_conversion_round_trips_an_inch() {
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-9);
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
    }
}
