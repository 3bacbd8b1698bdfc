use flowdoc::layout::{FixedWidthMetrics, LayoutPlan};
use flowdoc::{
    Block, BlockKind, CollisionPolicy, DocumentBuilder, Error, FlowDocument, OutputTarget,
    RenderedDocument, Renderer, TableData,
};

/// Paginates with fixed-width metrics and records every plan it produced.
#[derive(Default)]
struct RecordingRenderer {
    plans: Vec<LayoutPlan>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, document: &FlowDocument) -> flowdoc::Result<RenderedDocument> {
        let plan = document.paginate(&FixedWidthMetrics::default());
        let rendered = RenderedDocument {
            bytes: format!("%PDF-stub pages={}", plan.page_count()).into_bytes(),
            page_count: plan.page_count(),
            placements: plan.placements().to_vec(),
            outline: plan.outline().to_vec(),
        };
        self.plans.push(plan);
        Ok(rendered)
    }
}

fn long_text() -> String {
    "Pagination is greedy and forward-only, so long paragraphs continue on the next page. "
        .repeat(120)
}

fn scenario() -> DocumentBuilder {
    let mut builder = DocumentBuilder::new();
    builder
        .extend([
            Block::title("T"),
            Block::page_break(),
            Block::heading(1, "H1"),
            Block::paragraph(long_text()),
            Block::bullet("x1"),
            Block::bullet("x2"),
            Block::table(TableData::new(["A", "B"], [["1", "2"]])),
        ])
        .expect("default styles resolve");
    builder
}

#[test]
fn example_flow_spans_at_least_three_pages_in_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::default();
    let artifact = scenario()
        .render_with(&mut renderer, dir.path().join("scenario.pdf"))
        .unwrap();

    assert!(artifact.page_count() >= 3, "got {} pages", artifact.page_count());
    let placements = artifact.placements();
    assert_eq!(placements.len(), 7);
    assert_eq!(placements[0].first_page, 1);
    assert_eq!(placements[2].first_page, 2, "heading follows the page break");
    assert!(placements
        .windows(2)
        .all(|pair| (pair[0].first_page, pair[0].index) <= (pair[1].first_page, pair[1].index)));

    let texts: Vec<String> = renderer.plans[0]
        .pages()
        .iter()
        .flat_map(|page| page.text_runs().map(|(_, run)| run.text.clone()))
        .collect();
    let position = |needle: &str| texts.iter().position(|text| text == needle).unwrap();
    assert!(position("x1") < position("x2"));
    assert!(position("x2") < position("A"));
    assert!(position("A") < position("1"));
    assert_eq!(placements[6].kind, BlockKind::Table);
}

#[test]
fn rendering_the_same_flow_twice_gives_the_same_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::default();
    let first = scenario()
        .render_with(&mut renderer, dir.path().join("a.pdf"))
        .unwrap();
    let second = scenario()
        .render_with(&mut renderer, dir.path().join("b.pdf"))
        .unwrap();

    assert_eq!(first.page_count(), second.page_count());
    assert_eq!(first.placements(), second.placements());
    assert_eq!(renderer.plans[0], renderer.plans[1]);
}

#[test]
fn empty_flow_renders_one_blank_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::default();
    let artifact = DocumentBuilder::new()
        .render_with(&mut renderer, dir.path().join("empty.pdf"))
        .unwrap();

    assert_eq!(artifact.page_count(), 1);
    assert!(artifact.placements().is_empty());
    assert!(renderer.plans[0].pages()[0].is_blank());
    assert!(artifact.path().is_file());
}

#[test]
fn same_day_rerun_overwrites_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Report_20240101.pdf");
    let mut renderer = RecordingRenderer::default();

    DocumentBuilder::new()
        .render_with(&mut renderer, path.clone())
        .unwrap();
    let artifact = scenario().render_with(&mut renderer, path.clone()).unwrap();

    assert_eq!(artifact.path(), path.as_path());
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, format!("%PDF-stub pages={}", artifact.page_count()));
}

#[test]
fn no_clobber_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Report_20240101.pdf");
    std::fs::write(&path, b"existing").unwrap();
    let mut renderer = RecordingRenderer::default();

    let target = OutputTarget::new(&path).with_collision_policy(CollisionPolicy::Fail);
    let err = scenario().render_with(&mut renderer, target).unwrap_err();

    assert!(matches!(err, Error::ArtifactExists(ref existing) if existing == &path));
    assert!(renderer.plans.is_empty());
    assert_eq!(std::fs::read(&path).unwrap(), b"existing");
}

#[test]
fn unwritable_destination_is_a_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.pdf");
    let mut renderer = RecordingRenderer::default();

    let err = scenario().render_with(&mut renderer, path.clone()).unwrap_err();

    assert!(matches!(err, Error::Render { .. }), "unexpected error: {err}");
    assert!(!path.exists());
}

#[test]
fn page_break_always_starts_a_new_page() {
    let mut builder = DocumentBuilder::new();
    builder
        .extend([
            Block::paragraph("short"),
            Block::page_break(),
            Block::paragraph("next"),
            Block::spacer(10.0),
            Block::page_break(),
            Block::heading(2, "last"),
        ])
        .unwrap();
    let plan = builder.finish().paginate(&FixedWidthMetrics::default());

    let pages: Vec<usize> = plan.placements().iter().map(|p| p.first_page).collect();
    assert_eq!(pages, [1, 1, 2, 2, 2, 3]);
    assert_eq!(plan.placements()[5].top, 0.0);
}

#[test]
fn spacer_that_overflows_the_page_is_followed_by_exactly_one_new_page() {
    let mut builder = DocumentBuilder::new();
    builder
        .extend([
            Block::paragraph("before"),
            Block::spacer(5000.0),
            Block::page_break(),
            Block::paragraph("after"),
        ])
        .unwrap();
    let plan = builder.finish().paginate(&FixedWidthMetrics::default());

    assert_eq!(plan.page_count(), 2);
    assert!(plan.pages().iter().all(|page| !page.is_blank()));
    assert_eq!(plan.placements()[3].first_page, 2);
}
