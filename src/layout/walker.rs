//! Attribute walking and the "Tiempo" sub-block.

use super::header::HeaderLocation;
use crate::grid::{CellValue, Grid};
use crate::model::{Record, Value};
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

/// Key under which the sub-block is nested.
pub const TIME_BLOCK_KEY: &str = "Tiempo";

/// Attribute labels that close a sub-block.
const BLOCK_TERMINATORS: [&str; 4] = ["", "nan", "máquina", "machine"];

/// Trimmed, lower-cased, NFC text of a cell for label comparisons.
fn folded_label(cell: &CellValue) -> String {
    cell.text().trim().nfc().collect::<String>().to_lowercase()
}

/// Visit every `(row, label, value)` contributed by one machine column.
///
/// Rows run from the header row to the bottom of the grid. A row counts
/// only when both its attribute cell and its machine cell are non-blank.
pub fn walk_attributes(
    grid: &Grid,
    location: &HeaderLocation,
    column: usize,
    mut visit: impl FnMut(usize, String, Value),
) {
    for row in location.header_row..grid.height() {
        let attribute = grid.get(row, location.attribute_column);
        if attribute.is_blank() {
            continue;
        }
        let Some(value) = Value::from_cell(grid.get(row, column)) else {
            continue;
        };
        visit(row, attribute.text().trim().to_string(), value);
    }
}

/// Build the flat record for one machine column into `record`.
///
/// Duplicate labels overwrite earlier values.
pub fn fill_record(grid: &Grid, location: &HeaderLocation, column: usize, record: &mut Record) {
    walk_attributes(grid, location, column, |_, label, value| {
        record.insert(label, value);
    });
}

/// Locate the rows of the "Tiempo" sub-block, if the sheet has one.
///
/// The block starts at the first attribute cell reading "tiempo" at or
/// below the header row, and ends before the next blank or header-labelled
/// attribute cell (or at the end of the grid).
pub fn find_time_block(grid: &Grid, location: &HeaderLocation) -> Option<Range<usize>> {
    let column = location.attribute_column;
    let start = (location.header_row..grid.height())
        .find(|&row| folded_label(grid.get(row, column)) == "tiempo")?;

    let end = (start + 1..grid.height())
        .find(|&row| BLOCK_TERMINATORS.contains(&folded_label(grid.get(row, column)).as_str()))
        .unwrap_or(grid.height());

    Some(start..end)
}

/// Build a record whose rows inside `block` are nested under "Tiempo".
///
/// The nested record is attached last, and only when it is non-empty.
pub fn record_with_time_block(
    grid: &Grid,
    location: &HeaderLocation,
    column: usize,
    block: Option<&Range<usize>>,
) -> Record {
    let mut record = Record::new();
    let mut nested = Record::new();

    walk_attributes(grid, location, column, |row, label, value| {
        match block {
            Some(range) if range.contains(&row) => nested.insert(label, value),
            _ => record.insert(label, value),
        }
    });

    if !nested.is_empty() {
        record.insert(TIME_BLOCK_KEY, nested);
    }
    record
}
