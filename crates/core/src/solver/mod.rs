//! Top-down grid placement.
//!
//! Rows stack inside their container, lines stack inside their row, and
//! columns sit side by side inside their line. A column's nested rows are
//! placed inside the column's own rectangle right after the column itself,
//! so the output is a pre-order walk of the tree.

use crate::error::{GridslideError, Result};
use crate::grid::GRID_COLUMNS;
use crate::measure::{measure_row_tree, MeasuredRow};
use crate::tree::{Column, LayoutTree};
use serde::Serialize;

/// An axis-aligned box in page units (inches for decks).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True if `other` lies inside `self`, allowing `eps` of float slack.
    pub fn contains(&self, other: &Rect, eps: f64) -> bool {
        other.left >= self.left - eps
            && other.top >= self.top - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Strict horizontal overlap; touching edges do not count.
    pub fn overlaps_x(&self, other: &Rect, eps: f64) -> bool {
        self.left < other.right() - eps && other.left < self.right() - eps
    }

    /// Strict vertical overlap; touching edges do not count.
    pub fn overlaps_y(&self, other: &Rect, eps: f64) -> bool {
        self.top < other.bottom() - eps && other.top < self.bottom() - eps
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub const fn uniform(v: f64) -> Self {
        Self { left: v, top: v, right: v, bottom: v }
    }
}

/// Page size and the fixed origin of the outermost grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Extra vertical offset below the top margin before the first root row.
    pub row_top: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self { width, height, margins, row_top: 0.0 }
    }

    pub fn content_left(&self) -> f64 {
        self.margins.left
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Top edge of the first root row.
    pub fn start_top(&self) -> f64 {
        self.margins.top + self.row_top
    }

    /// Gutter expressed as a fraction of the root content width.
    pub fn gutter_fraction(&self, gutter: f64) -> f64 {
        gutter / self.content_width().max(1e-6)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(GridslideError::Configuration(format!(
                "page width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(GridslideError::Configuration(format!(
                "page height must be positive, got {}",
                self.height
            )));
        }
        if !(self.content_width() > 0.0) {
            return Err(GridslideError::Configuration(format!(
                "margins leave no content width on a {} wide page",
                self.width
            )));
        }
        if !(self.content_height() > 0.0) {
            return Err(GridslideError::Configuration(format!(
                "margins leave no content height on a {} tall page",
                self.height
            )));
        }
        Ok(())
    }
}

/// A solved rectangle for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement<'t> {
    pub rect: Rect,
    /// 0 for columns of root rows.
    pub depth: usize,
    pub column: &'t Column,
}

/// Trace hooks called while the solver walks the tree.
pub trait LayoutObserver {
    fn row_placed(&mut self, _depth: usize, _index: usize, _units: u32, _rect: &Rect) {}

    fn line_placed(&mut self, _depth: usize, _index: usize, _units: u32, _rect: &Rect) {}

    fn column_placed(&mut self, _placement: &Placement<'_>) {}

    /// An empty row was left out of the layout.
    fn row_skipped(&mut self, _depth: usize, _index: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LayoutObserver for NoopObserver {}

/// Observer that forwards every event to `log::trace!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LayoutObserver for LogObserver {
    fn row_placed(&mut self, depth: usize, index: usize, units: u32, rect: &Rect) {
        log::trace!("{:indent$}row {index}: {units}u {rect:?}", "", indent = depth * 2);
    }

    fn line_placed(&mut self, depth: usize, index: usize, units: u32, rect: &Rect) {
        log::trace!(
            "{:indent$} line {index}: {units}u top={:.3} h={:.3}",
            "",
            rect.top,
            rect.height,
            indent = depth * 2
        );
    }

    fn column_placed(&mut self, p: &Placement<'_>) {
        log::trace!(
            "{:indent$}  col span={} off={} {:?}",
            "",
            p.column.span(),
            p.column.offset(),
            p.rect,
            indent = p.depth * 2
        );
    }

    fn row_skipped(&mut self, depth: usize, index: usize) {
        log::trace!("{:indent$}row {index}: empty, skipped", "", indent = depth * 2);
    }
}

/// Solve the whole tree.
///
/// `band_unit_height` is the height of one measurement unit and
/// `base_gutter_fraction` the gutter as a fraction of a container's width.
/// Only invalid geometry is rejected; any structurally valid tree places.
pub fn solve<'t>(
    tree: &'t LayoutTree,
    page: &PageGeometry,
    band_unit_height: f64,
    base_gutter_fraction: f64,
) -> Result<Vec<Placement<'t>>> {
    solve_with(tree, page, band_unit_height, base_gutter_fraction, &mut NoopObserver)
}

/// [`solve`] with trace hooks.
pub fn solve_with<'t, O: LayoutObserver>(
    tree: &'t LayoutTree,
    page: &PageGeometry,
    band_unit_height: f64,
    base_gutter_fraction: f64,
    observer: &mut O,
) -> Result<Vec<Placement<'t>>> {
    page.validate()?;
    if !(band_unit_height.is_finite() && band_unit_height > 0.0) {
        return Err(GridslideError::Configuration(format!(
            "band unit height must be positive, got {band_unit_height}"
        )));
    }

    let gutter_fraction = if base_gutter_fraction.is_finite() {
        base_gutter_fraction.max(0.0)
    } else {
        0.0
    };

    let mut solver = Solver {
        unit: band_unit_height,
        gutter_fraction,
        observer,
        placements: Vec::with_capacity(tree.column_count()),
    };
    let measured: Vec<MeasuredRow<'t>> = tree.rows.iter().map(measure_row_tree).collect();
    solver.place_rows(
        &measured,
        page.content_left(),
        page.start_top(),
        page.content_width(),
        0,
    );
    Ok(solver.placements)
}

struct Solver<'t, 'o, O> {
    unit: f64,
    gutter_fraction: f64,
    observer: &'o mut O,
    placements: Vec<Placement<'t>>,
}

impl<'t, O: LayoutObserver> Solver<'t, '_, O> {
    /// Stack `rows` from `top` inside a container; returns the bottom edge.
    fn place_rows(
        &mut self,
        rows: &[MeasuredRow<'t>],
        left: f64,
        top: f64,
        width: f64,
        depth: usize,
    ) -> f64 {
        let mut cur_top = top;
        for (index, row) in rows.iter().enumerate() {
            if row.row.is_empty() {
                self.observer.row_skipped(depth, index);
                continue;
            }
            let row_rect = Rect::new(left, cur_top, width, f64::from(row.units) * self.unit);
            self.observer.row_placed(depth, index, row.units, &row_rect);

            self.place_row(row, &row_rect, depth);
            cur_top = row_rect.bottom();
        }
        cur_top
    }

    fn place_row(&mut self, row: &MeasuredRow<'t>, container: &Rect, depth: usize) {
        let cols = f64::from(GRID_COLUMNS);
        let gutter = self.gutter_fraction * container.width;
        let colw = (container.width - (cols - 1.0) * gutter) / cols;

        let mut line_top = container.top;
        for (index, line) in row.lines.iter().enumerate() {
            let height = f64::from(line.units) * self.unit;
            let line_rect = Rect::new(container.left, line_top, container.width, height);
            self.observer.line_placed(depth, index, line.units, &line_rect);

            for slot in &line.slots {
                let span = f64::from(slot.column.span());
                let rect = Rect::new(
                    container.left + f64::from(slot.col_start) * (colw + gutter),
                    line_rect.top,
                    span * colw + (span - 1.0) * gutter,
                    line_rect.height,
                );
                let placement = Placement { rect, depth, column: slot.column };
                self.observer.column_placed(&placement);
                self.placements.push(placement);

                if !slot.rows.is_empty() {
                    self.place_rows(&slot.rows, rect.left, rect.top, rect.width, depth + 1);
                }
            }
            line_top = line_rect.bottom();
        }
    }
}
