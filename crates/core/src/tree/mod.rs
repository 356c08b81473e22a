//! Layout tree construction: rows of columns, columns of nested rows.
//!
//! Only *direct* children take part at each level. A column inside a
//! column's grandchild row belongs to that nested row, never to the outer one.

use crate::dom::DomNode;
use crate::grid::{ColumnSpec, GRID_COLUMNS};
use serde::Serialize;

/// What the tree builder needs from a document element.
pub trait GridElement: Sized {
    /// Direct child elements, in document order.
    fn child_elements(&self) -> &[Self];

    /// Class tokens attached to this element.
    fn class_names(&self) -> &[String];

    fn is_row(&self) -> bool {
        self.class_names().iter().any(|c| c == "row")
    }

    fn is_column(&self) -> bool {
        self.class_names()
            .iter()
            .any(|c| c == "col" || c.starts_with("col-"))
    }
}

impl GridElement for DomNode {
    fn child_elements(&self) -> &[DomNode] {
        &self.children
    }

    fn class_names(&self) -> &[String] {
        &self.classes
    }
}

/// A grid column. Leaf when `rows` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub spec: ColumnSpec,
    pub rows: Vec<Row>,
}

impl Column {
    pub fn new(span: u8, offset: u8) -> Self {
        Self {
            spec: ColumnSpec {
                span: span.clamp(1, GRID_COLUMNS),
                offset: offset.min(GRID_COLUMNS - 1),
                breakpoint: None,
                auto: false,
                classes: Vec::new(),
            },
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn span(&self) -> u8 {
        self.spec.span
    }

    pub fn offset(&self) -> u8 {
        self.spec.offset
    }

    pub fn classes(&self) -> &[String] {
        &self.spec.classes
    }

    pub fn is_leaf(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A grid row; column order is left-to-right before wrapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutTree {
    pub rows: Vec<Row>,
}

impl LayoutTree {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Total number of column nodes at every depth.
    pub fn column_count(&self) -> usize {
        fn count(rows: &[Row]) -> usize {
            rows.iter()
                .flat_map(|r| &r.columns)
                .map(|c| 1 + count(&c.rows))
                .sum()
        }
        count(&self.rows)
    }
}

/// Build the layout tree for a parsed HTML document.
///
/// Root rows are the direct row children of `<body>` (or of the document
/// when there is no body).
pub fn build_tree(document: &DomNode) -> LayoutTree {
    build_tree_from(document.body().unwrap_or(document))
}

/// Build the layout tree rooted at an arbitrary element.
///
/// Falls back to the first row found anywhere below `root` when `root` has
/// no direct row children, so degenerate markup still yields one row.
pub fn build_tree_from<E: GridElement>(root: &E) -> LayoutTree {
    let mut rows: Vec<Row> = direct_rows(root).map(build_row).collect();

    if rows.is_empty() {
        if let Some(first) = first_row_descendant(root) {
            log::debug!("no top-level rows, falling back to first nested .row");
            rows.push(build_row(first));
        }
    }

    LayoutTree { rows }
}

fn direct_rows<E: GridElement>(parent: &E) -> impl Iterator<Item = &E> {
    parent.child_elements().iter().filter(|c| c.is_row())
}

fn first_row_descendant<E: GridElement>(node: &E) -> Option<&E> {
    for child in node.child_elements() {
        if child.is_row() {
            return Some(child);
        }
        if let Some(found) = first_row_descendant(child) {
            return Some(found);
        }
    }
    None
}

fn build_row<E: GridElement>(row_el: &E) -> Row {
    let col_els: Vec<&E> = row_el
        .child_elements()
        .iter()
        .filter(|c| c.is_column())
        .collect();

    let specs: Vec<ColumnSpec> = col_els
        .iter()
        .map(|el| ColumnSpec::from_classes(el.class_names()))
        .collect();

    let auto_idx: Vec<usize> = specs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.span == 0 && s.auto)
        .map(|(i, _)| i)
        .collect();
    let mut spans: Vec<u8> = specs.iter().map(|s| s.span).collect();
    distribute_auto_spans(&mut spans, &auto_idx);

    let columns = col_els
        .into_iter()
        .zip(specs)
        .zip(spans)
        .map(|((el, mut spec), span)| {
            if span == 0 {
                log::debug!("column {:?} has no span, using 1", spec.classes);
            }
            spec.span = span.clamp(1, GRID_COLUMNS);
            Column {
                spec,
                rows: direct_rows(el).map(build_row).collect(),
            }
        })
        .collect();

    Row { columns }
}

/// Share the grid columns left over by explicit spans among the auto
/// columns at `auto_idx`. Earlier auto columns receive the remainder.
///
/// Each auto column gets at least 1 even when nothing is left; the
/// resulting overflow is handled by wrapping at placement time.
pub fn distribute_auto_spans(spans: &mut [u8], auto_idx: &[usize]) {
    let k = auto_idx.len() as u32;
    if k == 0 {
        return;
    }

    let specified: u32 = spans.iter().map(|&s| u32::from(s)).sum();
    let remaining = u32::from(GRID_COLUMNS).saturating_sub(specified);
    let base = if remaining > 0 { (remaining / k).max(1) } else { 1 };
    let leftover = remaining.saturating_sub(base * k);

    for (j, &i) in auto_idx.iter().enumerate() {
        let extra = u32::from((j as u32) < leftover);
        spans[i] = (base + extra).min(u32::from(GRID_COLUMNS)) as u8;
    }
}
