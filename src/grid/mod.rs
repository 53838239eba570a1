//! In-memory cell grid for one worksheet.
//!
//! A [`Grid`] is the unheadered, rectangular view of a sheet that the
//! layout parser works on. Rows and columns are zero-based.

mod reference;

pub use reference::{column_index, parse_reference, to_reference};

use std::fmt;

/// A single cell value as stored in the workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// No value at all
    #[default]
    Empty,
    /// Text, kept exactly as stored (no trimming)
    Text(String),
    /// Any numeric value
    Number(f64),
    /// Boolean cell
    Bool(bool),
}

impl CellValue {
    /// True for empty cells and text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) => false,
        }
    }

    /// Text form of the cell, used for labels and marker matching.
    ///
    /// Empty cells render as `"nan"`, which is why the layout heuristics
    /// treat that literal as blank.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => f.write_str("nan"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Rectangular matrix of cell values.
///
/// Rows are stored ragged: each row only holds cells up to its last value,
/// and everything past that reads as empty. A stray value far to the right
/// therefore costs one long row, not a padded block.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from rows; short rows read as empty past their end.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Build a grid from sparse `(row, column, value)` entries.
    ///
    /// Later entries for the same position replace earlier ones.
    pub fn from_cells(cells: impl IntoIterator<Item = (usize, usize, CellValue)>) -> Self {
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        for (row, column, value) in cells {
            if rows.len() <= row {
                rows.resize_with(row + 1, Vec::new);
            }
            let cells = &mut rows[row];
            if cells.len() <= column {
                cells.resize(column + 1, CellValue::Empty);
            }
            cells[column] = value;
        }
        Self::from_rows(rows)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    /// Cell at `(row, column)`; out-of-range positions read as empty.
    pub fn get(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Iterate over one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.width).map(move |c| self.get(row, c))
    }

    /// Iterate over one column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.rows.len()).map(move |r| self.get(r, column))
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.height() == other.height()
            && self.width == other.width
            && (0..self.height()).all(|r| self.row(r).eq(other.row(r)))
    }
}
