//! Cell backgrounds and rules painted beneath the text of every page.
//!
//! genpdf only strokes 1pt lines and cannot fill shapes, so fills and strokes from the layout
//! plan are written with `lopdf` as an extra content stream placed before the page's own
//! content.  Text drawn by genpdf therefore always ends up on top.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::layout::{DrawOp, PageLayout};
use crate::style::Color;

/// Where the layout frame sits on the physical page, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FrameOrigin {
    pub left: f64,
    pub top: f64,
    pub page_height: f64,
}

impl FrameOrigin {
    fn x(&self, x: f64) -> f64 {
        self.left + x
    }

    /// Converts a top-down frame offset to PDF user space, which grows upwards.
    fn y(&self, y: f64) -> f64 {
        self.page_height - (self.top + y)
    }
}

/// Returns whether the page has anything besides text.
pub(crate) fn has_graphics(page: &PageLayout) -> bool {
    page.ops()
        .iter()
        .any(|placed| !matches!(placed.op, DrawOp::Text(_)))
}

/// Adds the fills and lines of `pages` underneath the existing content of `pdf`.
///
/// Pages are matched by position; the PDF must have been produced from the same plan.
pub(crate) fn paint_underlay(
    pdf: &[u8],
    pages: &[PageLayout],
    origin: FrameOrigin,
) -> lopdf::Result<Vec<u8>> {
    let mut document = Document::load_mem(pdf)?;
    for (page_id, page) in document.get_pages().into_values().zip(pages) {
        let operations = graphics_operations(page, origin);
        if operations.is_empty() {
            continue;
        }
        let mut content = Content { operations }.encode()?;
        content.push(b'\n');
        prepend_contents(&mut document, page_id, content)?;
    }

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn graphics_operations(page: &PageLayout, origin: FrameOrigin) -> Vec<Operation> {
    let mut operations = Vec::new();
    for op in page.paint_order() {
        match op {
            DrawOp::Fill { rect, color } => {
                if rect.width <= 0.0 || rect.height <= 0.0 {
                    continue;
                }
                operations.push(Operation::new("rg", rgb(*color)));
                operations.push(Operation::new(
                    "re",
                    reals([
                        origin.x(rect.x),
                        origin.y(rect.y + rect.height),
                        rect.width,
                        rect.height,
                    ]),
                ));
                operations.push(Operation::new("f", Vec::new()));
            }
            DrawOp::Line { from, to, stroke } => {
                if stroke.width <= 0.0 {
                    continue;
                }
                operations.push(Operation::new("w", reals([stroke.width])));
                operations.push(Operation::new("RG", rgb(stroke.color)));
                operations.push(Operation::new(
                    "m",
                    reals([origin.x(from.0), origin.y(from.1)]),
                ));
                operations.push(Operation::new("l", reals([origin.x(to.0), origin.y(to.1)])));
                operations.push(Operation::new("S", Vec::new()));
            }
            DrawOp::Text(_) => {}
        }
    }

    if operations.is_empty() {
        return operations;
    }
    operations.insert(0, Operation::new("q", Vec::new()));
    operations.push(Operation::new("Q", Vec::new()));
    operations
}

fn reals<const N: usize>(values: [f64; N]) -> Vec<Object> {
    values.into_iter().map(Object::from).collect()
}

fn rgb(color: Color) -> Vec<Object> {
    reals([color.r, color.g, color.b].map(|channel| f64::from(channel) / 255.0))
}

fn prepend_contents(
    document: &mut Document,
    page_id: ObjectId,
    content: Vec<u8>,
) -> lopdf::Result<()> {
    let stream_id = document.add_object(Stream::new(Dictionary::new(), content));
    let page = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)?;

    let mut contents = vec![Object::Reference(stream_id)];
    match page.get(b"Contents") {
        Ok(Object::Reference(id)) => contents.push(Object::Reference(*id)),
        Ok(Object::Array(existing)) => contents.extend(existing.iter().cloned()),
        _ => {}
    }
    page.set("Contents", contents);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::layout::{paginate, FixedWidthMetrics};
    use crate::model::{Block, TableData};
    use crate::page::Frame;

    const ORIGIN: FrameOrigin = FrameOrigin {
        left: 72.0,
        top: 72.0,
        page_height: 792.0,
    };

    fn table_page() -> PageLayout {
        let mut builder = DocumentBuilder::new();
        builder
            .append(Block::table(TableData::new(["A", "B"], [["1", "2"], ["3", "4"]])))
            .expect("default table style");
        let plan = paginate(
            builder.items(),
            &FixedWidthMetrics::default(),
            Frame::new(468.0, 648.0),
        );
        plan.pages()[0].clone()
    }

    #[test]
    fn table_backgrounds_become_filled_rectangles() {
        let operations = graphics_operations(&table_page(), ORIGIN);
        let operators: Vec<&str> = operations.iter().map(|op| op.operator.as_str()).collect();

        assert_eq!(operators.first(), Some(&"q"));
        assert_eq!(operators.last(), Some(&"Q"));
        assert_eq!(operators.iter().filter(|op| **op == "f").count(), 6);
        assert_eq!(operators.iter().filter(|op| **op == "re").count(), 6);
        assert!(operators.contains(&"w"));
        let last_fill = operators.iter().rposition(|op| *op == "f").unwrap();
        let first_stroke = operators.iter().position(|op| *op == "S").unwrap();
        assert!(last_fill < first_stroke, "backgrounds are painted before rules");
    }

    #[test]
    fn rectangles_are_flipped_into_pdf_space() {
        let operations = graphics_operations(&table_page(), ORIGIN);
        let header = operations
            .iter()
            .find(|op| op.operator == "re")
            .expect("header background");
        let values: Vec<f32> = header
            .operands
            .iter()
            .map(|operand| operand.as_float().unwrap())
            .collect();
        let height = values[3];
        assert!((values[0] - 72.0).abs() < 1e-3);
        assert!((values[1] + height - 720.0).abs() < 1e-3, "top edge sits on the frame top");
    }

    #[test]
    fn text_only_pages_have_no_graphics() {
        let mut builder = DocumentBuilder::new();
        builder.append(Block::paragraph("plain")).unwrap();
        let plan = paginate(
            builder.items(),
            &FixedWidthMetrics::default(),
            Frame::new(468.0, 648.0),
        );
        assert!(!has_graphics(&plan.pages()[0]));
        assert!(graphics_operations(&plan.pages()[0], ORIGIN).is_empty());
    }
}
