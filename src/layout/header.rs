//! Header marker and machine column detection.

use crate::error::{Error, Result};
use crate::grid::{to_reference, Grid};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HEADER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:máquina|machine)\b").expect("hardcoded header marker pattern")
});

/// Where the attribute labels and the header marker sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    /// Column holding the attribute labels
    pub attribute_column: usize,
    /// Row holding the "Máquina"/"Machine" marker
    pub header_row: usize,
}

impl HeaderLocation {
    /// Row above the header, which carries the machine names.
    ///
    /// `None` when the marker sits on the first row.
    pub fn name_row(&self) -> Option<usize> {
        self.header_row.checked_sub(1)
    }

    /// A1-style reference of the marker cell.
    pub fn reference(&self) -> String {
        to_reference(self.header_row, self.attribute_column)
    }
}

/// A column holding one machine's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineColumn {
    /// Zero-based column index
    pub column: usize,
    /// Trimmed machine name from the row above the header
    pub name: String,
}

/// Check whether text contains the header marker as a whole word.
pub fn is_header_marker(text: &str) -> bool {
    let normalized: String = text.nfc().collect();
    HEADER_MARKER.is_match(&normalized)
}

/// Find the attribute column and header row of a sheet.
///
/// Columns are scanned left to right and each column top to bottom; the
/// first column containing the marker wins, at its first matching row.
pub fn locate_header(grid: &Grid, sheet_name: &str) -> Result<HeaderLocation> {
    let found = (0..grid.width()).find_map(|column| {
        grid.column(column)
            .position(|cell| is_header_marker(&cell.text()))
            .map(|row| (column, row))
    });

    let Some((attribute_column, header_row)) = found else {
        return Err(Error::layout(
            sheet_name,
            "no \"Máquina/Machine\" column found",
        ));
    };
    if header_row == 0 {
        return Err(Error::layout(
            sheet_name,
            format!(
                "header marker at {} has no machine-name row above it",
                to_reference(header_row, attribute_column)
            ),
        ));
    }

    Ok(HeaderLocation {
        attribute_column,
        header_row,
    })
}

/// Machine columns to the right of the attribute column, left to right.
///
/// Names come from the row directly above the header. Cells that are
/// empty, trim to nothing, or read "nan" do not start a machine column.
/// A location on the first row has no name row and yields no columns.
pub fn machine_columns(grid: &Grid, location: &HeaderLocation) -> Vec<MachineColumn> {
    let Some(name_row) = location.name_row() else {
        return Vec::new();
    };
    (location.attribute_column + 1..grid.width())
        .filter_map(|column| {
            let cell = grid.get(name_row, column);
            if cell.is_blank() {
                return None;
            }
            let name = cell.text().trim().to_string();
            if name.is_empty() || name.eq_ignore_ascii_case("nan") {
                return None;
            }
            Some(MachineColumn { column, name })
        })
        .collect()
}
