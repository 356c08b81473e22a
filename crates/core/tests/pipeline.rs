//! End-to-end tests: HTML + deck config to shapes.

use gridslide_core::config::DeckConfig;
use gridslide_core::output::{self, ShapeKind};
use gridslide_core::GridslideError;
use pretty_assertions::assert_eq;

const DASHBOARD: &str = r#"
<html>
<body>
    <div class="row">
        <div class="col-md-8 bg-light">
            <div class="row">
                <div class="col-6">Revenue</div>
                <div class="col-6">Costs</div>
            </div>
        </div>
        <div class="col-md-4 offset-0">Notes</div>
    </div>
    <div class="row">
        <div class="col"></div>
        <div class="col"></div>
        <div class="col"></div>
    </div>
</body>
</html>
"#;

#[test]
fn test_dashboard_placeholders() {
    let deck = gridslide_core::parse(DASHBOARD, &DeckConfig::default()).unwrap();
    assert_eq!(deck.page, [13.333, 7.5]);

    let labels: Vec<&str> = deck
        .placeholders()
        .filter_map(|s| s.label.as_deref())
        .collect();
    assert_eq!(
        labels,
        vec![
            "col:8 off:0",
            "col:6 off:0",
            "col:6 off:0",
            "col:4 off:0",
            "col:4 off:0",
            "col:4 off:0",
            "col:4 off:0",
        ]
    );

    let first = deck.shapes.first().unwrap();
    assert_eq!(first.name.as_deref(), Some("Col_span8_off0"));
    assert_eq!(first.classes, vec!["col-md-8".to_string(), "bg-light".to_string()]);
    assert_eq!(first.depth, Some(0));
    assert_eq!(deck.shapes[1].depth, Some(1));

    // Second root row starts one band below the first
    let last = deck.shapes.last().unwrap();
    assert!((last.b[1] - 1.6).abs() < 1e-9);
}

#[test]
fn test_ids_are_sequential() {
    let deck = gridslide_core::parse(DASHBOARD, &DeckConfig::default()).unwrap();
    let ids: Vec<u32> = deck.shapes.iter().map(|s| s.id).collect();
    let expected: Vec<u32> = (1..=deck.shapes.len() as u32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_debug_overlay_order() {
    let mut config = DeckConfig::default();
    config.debug.grid = true;
    config.debug.bbox = true;
    let deck = gridslide_core::parse(DASHBOARD, &config).unwrap();

    let kinds: Vec<ShapeKind> = deck.shapes.iter().map(|s| s.kind).collect();
    assert!(kinds[..12].iter().all(|k| *k == ShapeKind::Guide));
    for pair in kinds[12..].chunks(2) {
        assert_eq!(pair, &[ShapeKind::Placeholder, ShapeKind::Bbox]);
    }
    assert_eq!(deck.shapes.len(), 12 + 7 * 2);

    // Outlines sit exactly on their placeholder
    assert_eq!(deck.shapes[12].b, deck.shapes[13].b);
}

#[test]
fn test_grid_guides_span_content_area() {
    let config = DeckConfig::default();
    let guides = output::grid_guides(&config);
    assert_eq!(guides.len(), 12);
    assert!((guides[0].left - 0.6).abs() < 1e-9);
    assert!((guides[11].right() - (13.333 - 0.6)).abs() < 1e-9);
    assert!((guides[0].height - 6.3).abs() < 1e-9);
}

#[test]
fn test_json_output() {
    let deck = gridslide_core::parse(DASHBOARD, &DeckConfig::default()).unwrap();
    let json = serde_json::to_value(&deck).unwrap();
    assert_eq!(json["shapes"][0]["kind"], "placeholder");
    assert_eq!(json["shapes"][0]["label"], "col:8 off:0");
    assert!(json["shapes"][0]["b"].as_array().unwrap().len() == 4);
}

#[test]
fn test_compact_format() {
    let html = r#"<div class="row"><div class="col-12"></div></div>"#;
    let deck = gridslide_core::parse(html, &DeckConfig::default()).unwrap();
    assert_eq!(
        output::to_compact_string(&deck),
        "[1:placeholder \"col:12 off:0\" @0.60,0.60 12.13x1.00]"
    );
}

#[test]
fn test_config_partial_json_uses_defaults() {
    let config = DeckConfig::from_json_str(
        r#"{"page": {"width_in": 10.0, "margins_in": [0.5, 0.25, 0.5, 0.25]},
            "bands": {"row_top_in": 0.75},
            "theme": "ignored"}"#,
    )
    .unwrap();
    assert_eq!(config.page.width_in, 10.0);
    assert_eq!(config.page.height_in, 7.5);
    assert_eq!(config.page.gutter_in, 0.2);
    assert_eq!(config.bands.row_height_in, 1.0);

    let page = config.page_geometry();
    assert_eq!(page.content_width(), 9.0);
    assert_eq!(page.start_top(), 1.0);
    assert!((config.base_gutter_fraction() - 0.2 / 9.0).abs() < 1e-12);
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        DeckConfig::from_json_str("{not json"),
        Err(GridslideError::Json(_))
    ));
    assert!(matches!(
        DeckConfig::load("/nonexistent/styles.json"),
        Err(GridslideError::Io(_))
    ));

    let mut config = DeckConfig::default();
    config.bands.row_height_in = 0.0;
    assert!(matches!(
        gridslide_core::parse(DASHBOARD, &config),
        Err(GridslideError::Configuration(_))
    ));

    let mut config = DeckConfig::default();
    config.page.height_in = 0.0;
    assert!(matches!(config.validate(), Err(GridslideError::Configuration(_))));

    let mut config = DeckConfig::default();
    config.page.margins_in = [0.6, 5.0, 0.6, 5.0];
    assert!(matches!(config.validate(), Err(GridslideError::Configuration(_))));
}

#[test]
fn test_layout_returns_placements() {
    let tree = gridslide_core::layout_tree(DASHBOARD).unwrap();
    let placements = gridslide_core::layout(&tree, &DeckConfig::default()).unwrap();

    let spans: Vec<u8> = placements.iter().map(|p| p.column.span()).collect();
    assert_eq!(spans, vec![8, 6, 6, 4, 4, 4, 4]);
    let depths: Vec<usize> = placements.iter().map(|p| p.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 0, 0, 0, 0]);

    // Same rectangles as the deck built by parse
    let deck = gridslide_core::parse(DASHBOARD, &DeckConfig::default()).unwrap();
    let deck_b: Vec<[f64; 4]> = deck.placeholders().map(|s| s.b).collect();
    let layout_b: Vec<[f64; 4]> = placements
        .iter()
        .map(|p| [p.rect.left, p.rect.top, p.rect.width, p.rect.height])
        .collect();
    assert_eq!(layout_b, deck_b);

    let mut config = DeckConfig::default();
    config.page.margins_in = [0.6, 5.0, 0.6, 5.0];
    assert!(matches!(
        gridslide_core::layout(&tree, &config),
        Err(GridslideError::Configuration(_))
    ));
}

#[test]
fn test_page_without_grid_yields_empty_deck() {
    let deck = gridslide_core::parse("<h1>Title only</h1>", &DeckConfig::default()).unwrap();
    assert!(deck.shapes.is_empty());
}
