use crate::config::DeckConfig;
use crate::grid::GRID_COLUMNS;
use crate::solver::{Placement, Rect};
use serde::Serialize;

/// A renderer-neutral slide: every shape a deck writer needs to emit,
/// in the order it should be drawn.
#[derive(Debug, Serialize)]
pub struct SlideDeck {
    /// Page size: [width, height].
    pub page: [f64; 2],
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Shape {
    pub id: u32,
    pub kind: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Original column classes, for downstream styling.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    /// Bounds: [left, top, width, height]
    pub b: [f64; 4],
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// One of the 12 column guides of the debug overlay.
    Guide,
    /// The box standing in for a column's content.
    Placeholder,
    /// Debug outline around a placement.
    Bbox,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Guide => "guide",
            ShapeKind::Placeholder => "placeholder",
            ShapeKind::Bbox => "bbox",
        }
    }
}

impl SlideDeck {
    pub fn placeholders(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.kind == ShapeKind::Placeholder)
    }
}

/// Generate the slide from solved placements.
pub fn generate_deck(placements: &[Placement<'_>], config: &DeckConfig) -> SlideDeck {
    let mut shapes = Vec::new();
    let mut id_counter = 1u32;

    if config.debug.grid {
        for rect in grid_guides(config) {
            push_shape(&mut shapes, &mut id_counter, ShapeKind::Guide, rect, |s| s);
        }
    }

    for p in placements {
        let span = p.column.span();
        let offset = p.column.offset();
        push_shape(&mut shapes, &mut id_counter, ShapeKind::Placeholder, p.rect, |mut s| {
            s.name = Some(format!("Col_span{span}_off{offset}"));
            s.label = Some(format!("col:{span} off:{offset}"));
            s.classes = p.column.classes().to_vec();
            s.depth = Some(p.depth);
            s
        });
        if config.debug.bbox {
            push_shape(&mut shapes, &mut id_counter, ShapeKind::Bbox, p.rect, |mut s| {
                s.depth = Some(p.depth);
                s
            });
        }
    }

    SlideDeck {
        page: [config.page.width_in, config.page.height_in],
        shapes,
    }
}

fn push_shape(
    shapes: &mut Vec<Shape>,
    id_counter: &mut u32,
    kind: ShapeKind,
    rect: Rect,
    decorate: impl FnOnce(Shape) -> Shape,
) {
    let shape = Shape {
        id: *id_counter,
        kind,
        name: None,
        label: None,
        classes: Vec::new(),
        depth: None,
        b: [rect.left, rect.top, rect.width, rect.height],
    };
    shapes.push(decorate(shape));
    *id_counter += 1;
}

/// The 12 root column guides, spanning the content height.
/// Uses the literal root gutter, which equals the proportional gutter at
/// the root container.
pub fn grid_guides(config: &DeckConfig) -> Vec<Rect> {
    let page = config.page_geometry();
    let gutter = config.page.gutter_in;
    let cols = f64::from(GRID_COLUMNS);
    let colw = (page.content_width() - (cols - 1.0) * gutter) / cols;

    (0..GRID_COLUMNS)
        .map(|i| {
            Rect::new(
                page.content_left() + f64::from(i) * (colw + gutter),
                page.margins.top,
                colw,
                page.content_height(),
            )
        })
        .collect()
}

/// Generate the compact string format, one shape per line.
pub fn to_compact_string(deck: &SlideDeck) -> String {
    let mut lines = Vec::new();
    for shape in &deck.shapes {
        let mut parts = Vec::new();
        parts.push(format!("{}:{}", shape.id, shape.kind.as_str()));

        if let Some(ref label) = shape.label {
            parts.push(format!("\"{}\"", label));
        }

        parts.push(format!(
            "@{:.2},{:.2} {:.2}x{:.2}",
            shape.b[0], shape.b[1], shape.b[2], shape.b[3]
        ));

        lines.push(format!("[{}]", parts.join(" ")));
    }
    lines.join("\n")
}
