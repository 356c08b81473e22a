//! Tests for line wrapping and band-unit measurement.

use gridslide_core::measure::{measure_column, measure_row, measure_row_tree, split_lines};
use gridslide_core::tree::{Column, Row};

fn leaf(span: u8) -> Column {
    Column::new(span, 0)
}

fn line_spans(row: &Row) -> Vec<Vec<u8>> {
    split_lines(row)
        .iter()
        .map(|l| l.slots.iter().map(|s| s.column.span()).collect())
        .collect()
}

#[test]
fn test_wrap_three_fives() {
    let row = Row::new(vec![leaf(5); 3]);
    assert_eq!(line_spans(&row), vec![vec![5, 5], vec![5]]);

    let lines = split_lines(&row);
    let starts: Vec<u32> = lines[0].slots.iter().map(|s| s.col_start).collect();
    assert_eq!(starts, vec![0, 5]);
    assert_eq!(lines[1].slots[0].col_start, 0);
}

#[test]
fn test_exact_fit_does_not_wrap() {
    let row = Row::new(vec![leaf(4), leaf(4), leaf(4)]);
    assert_eq!(line_spans(&row), vec![vec![4, 4, 4]]);
}

#[test]
fn test_offsets_count_toward_wrap() {
    let row = Row::new(vec![Column::new(4, 2), Column::new(4, 3), leaf(2)]);
    let lines = split_lines(&row);
    assert_eq!(line_spans(&row), vec![vec![4], vec![4, 2]]);
    assert_eq!(lines[0].slots[0].col_start, 2);
    assert_eq!(lines[1].slots[0].col_start, 3);
    assert_eq!(lines[1].slots[1].col_start, 7);
}

#[test]
fn test_over_wide_column_gets_its_own_line() {
    let row = Row::new(vec![leaf(6), Column::new(12, 6), leaf(3)]);
    let lines = split_lines(&row);
    assert_eq!(line_spans(&row), vec![vec![6], vec![12], vec![3]]);
    assert_eq!(lines[1].slots[0].col_start, 6);
}

#[test]
fn test_empty_row_has_no_lines() {
    let row = Row::default();
    assert!(split_lines(&row).is_empty());
    assert_eq!(measure_row(&row), 1);
}

#[test]
fn test_leaf_column_is_one_unit() {
    assert_eq!(measure_column(&leaf(6)), 1);
}

#[test]
fn test_row_units_sum_wrapped_lines() {
    let row = Row::new(vec![leaf(5); 5]);
    assert_eq!(measure_row(&row), 3);
}

#[test]
fn test_nested_rows_stack_inside_column() {
    let inner_a = Row::new(vec![leaf(6), leaf(6)]);
    let inner_b = Row::new(vec![leaf(4), leaf(4), leaf(4), leaf(12)]);
    let col = leaf(8).with_rows(vec![inner_a, inner_b]);
    assert_eq!(measure_column(&col), 3);

    // The line is as tall as its tallest column
    let row = Row::new(vec![col, leaf(4)]);
    assert_eq!(measure_row(&row), 3);
}

#[test]
fn test_deep_nesting() {
    let deepest = Row::new(vec![leaf(12), leaf(12)]);
    let middle = Row::new(vec![leaf(6).with_rows(vec![deepest]), leaf(6)]);
    let top = Row::new(vec![leaf(12).with_rows(vec![middle.clone(), middle])]);
    assert_eq!(measure_row(&top), 4);
}

#[test]
fn test_empty_nested_rows_take_no_space() {
    let col = leaf(6).with_rows(vec![Row::default(), Row::new(vec![leaf(12), leaf(12)])]);
    assert_eq!(measure_column(&col), 2);

    let only_empty = leaf(6).with_rows(vec![Row::default()]);
    assert_eq!(measure_column(&only_empty), 1);
}

#[test]
fn test_measured_tree_matches_per_node_measurement() {
    let inner_a = Row::new(vec![leaf(6), leaf(6)]);
    let inner_b = Row::new(vec![leaf(4), leaf(4), leaf(4), leaf(12)]);
    let col = leaf(8).with_rows(vec![inner_a, Row::default(), inner_b]);
    let row = Row::new(vec![col, leaf(4), leaf(6)]);

    let measured = measure_row_tree(&row);
    assert_eq!(measured.units, measure_row(&row));
    assert_eq!(measured.units, 4);

    let line_units: Vec<u32> = measured.lines.iter().map(|l| l.units).collect();
    assert_eq!(line_units, vec![3, 1]);

    let first = &measured.lines[0].slots;
    let starts: Vec<u32> = first.iter().map(|s| s.col_start).collect();
    assert_eq!(starts, vec![0, 8]);
    assert_eq!(first[0].units, measure_column(first[0].column));
    assert_eq!(first[1].units, 1);

    // Nested rows are measured in the same pass, empty ones included
    let nested: Vec<u32> = first[0].rows.iter().map(|r| r.units).collect();
    let expected: Vec<u32> = row.columns[0].rows.iter().map(measure_row).collect();
    assert_eq!(nested, expected);
    assert_eq!(nested, vec![1, 1, 2]);
    assert!(first[0].rows[1].lines.is_empty());
}
