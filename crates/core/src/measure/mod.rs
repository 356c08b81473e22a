//! Bottom-up height measurement in abstract band units.
//!
//! A leaf column needs one band. A column with nested rows needs the sum of
//! its rows. A row needs the sum of its wrapped lines, each line being as
//! tall as its tallest column.

use crate::grid::GRID_COLUMNS;
use crate::tree::{Column, Row};

/// A column positioned on a wrapped line.
#[derive(Debug, Clone, Copy)]
pub struct LineSlot<'a> {
    pub column: &'a Column,
    /// First grid column occupied, offset already applied.
    pub col_start: u32,
}

/// One horizontal slice of a row after wrapping.
#[derive(Debug, Clone, Default)]
pub struct Line<'a> {
    pub slots: Vec<LineSlot<'a>>,
}

impl<'a> Line<'a> {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A row with every line and nested row measured once.
#[derive(Debug, Clone)]
pub struct MeasuredRow<'a> {
    pub row: &'a Row,
    /// Band units; never less than 1.
    pub units: u32,
    pub lines: Vec<MeasuredLine<'a>>,
}

#[derive(Debug, Clone)]
pub struct MeasuredLine<'a> {
    /// Units of the tallest column on the line.
    pub units: u32,
    pub slots: Vec<MeasuredSlot<'a>>,
}

#[derive(Debug, Clone)]
pub struct MeasuredSlot<'a> {
    pub column: &'a Column,
    pub col_start: u32,
    pub units: u32,
    pub rows: Vec<MeasuredRow<'a>>,
}

/// Split a row into lines with the 12-column wrap rule.
///
/// A new line starts when the next column's offset + span would push the
/// running total past 12 and the current line is not empty. A column too
/// wide to fit alone still becomes the sole occupant of its own line.
pub fn split_lines(row: &Row) -> Vec<Line<'_>> {
    let cols = u32::from(GRID_COLUMNS);
    let mut lines: Vec<Line<'_>> = Vec::new();
    let mut current = Line::default();
    let mut used = 0u32;

    for column in &row.columns {
        let offset = u32::from(column.offset());
        let span = u32::from(column.span());
        if used + offset + span > cols && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        let col_start = used + offset;
        current.slots.push(LineSlot { column, col_start });
        used = col_start + span;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Measure a row and everything below it in one bottom-up pass.
pub fn measure_row_tree(row: &Row) -> MeasuredRow<'_> {
    let lines: Vec<MeasuredLine<'_>> = split_lines(row)
        .into_iter()
        .map(|line| {
            let slots: Vec<MeasuredSlot<'_>> =
                line.slots.into_iter().map(measure_slot).collect();
            let units = slots.iter().map(|s| s.units).max().unwrap_or(1).max(1);
            MeasuredLine { units, slots }
        })
        .collect();
    let units = lines.iter().map(|l| l.units).sum::<u32>().max(1);
    MeasuredRow { row, units, lines }
}

fn measure_slot(slot: LineSlot<'_>) -> MeasuredSlot<'_> {
    let rows: Vec<MeasuredRow<'_>> = slot.column.rows.iter().map(measure_row_tree).collect();
    MeasuredSlot {
        column: slot.column,
        col_start: slot.col_start,
        units: column_units(&rows),
        rows,
    }
}

// Empty nested rows are skipped by the solver, so they take no space.
fn column_units(rows: &[MeasuredRow<'_>]) -> u32 {
    rows.iter()
        .filter(|r| !r.row.is_empty())
        .map(|r| r.units)
        .sum::<u32>()
        .max(1)
}

/// Band units needed by a column.
pub fn measure_column(column: &Column) -> u32 {
    let rows: Vec<MeasuredRow<'_>> = column.rows.iter().map(measure_row_tree).collect();
    column_units(&rows)
}

/// Band units needed by a row; never less than 1.
pub fn measure_row(row: &Row) -> u32 {
    measure_row_tree(row).units
}
