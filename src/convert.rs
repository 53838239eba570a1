//! Whole-workbook conversion.

use crate::error::{Error, Result};
use crate::layout;
use crate::model::Workbook;
use crate::options::{ConvertOptions, FailurePolicy};
use crate::xlsx::WorkbookReader;
use std::path::Path;

/// A sheet left out of the output under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct SkippedSheet {
    /// Sheet name
    pub name: String,
    /// Why the sheet could not be converted
    pub error: Error,
}

/// Result of converting a workbook.
#[derive(Debug, Default)]
pub struct Conversion {
    /// Converted sheets, in workbook order
    pub workbook: Workbook,
    /// Sheets that failed and were skipped
    pub skipped: Vec<SkippedSheet>,
}

impl Conversion {
    /// Check if every sheet converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Convert every sheet of an opened workbook, in sheet order.
///
/// Under [`FailurePolicy::Abort`] the first failing sheet ends the run and
/// its error names the sheet. Under [`FailurePolicy::Skip`] the sheet is
/// recorded in [`Conversion::skipped`] instead.
pub fn convert_workbook(reader: &WorkbookReader, options: &ConvertOptions) -> Result<Conversion> {
    let mut conversion = Conversion::default();

    for name in reader.sheet_names() {
        let outcome = reader
            .read_grid(name)
            .and_then(|grid| layout::parse_sheet(&grid, name, options))
            .map_err(|e| e.in_sheet(name));

        match outcome {
            Ok(sheet) => {
                tracing::info!(
                    sheet = name,
                    entries = sheet.len(),
                    records = sheet.record_count(),
                    "converted sheet"
                );
                conversion.workbook.insert(name, sheet);
            }
            Err(error) => match options.failure_policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Skip => {
                    tracing::warn!(sheet = name, %error, "skipping sheet");
                    conversion.skipped.push(SkippedSheet {
                        name: name.to_string(),
                        error,
                    });
                }
            },
        }
    }

    Ok(conversion)
}

/// Open a workbook file and convert it.
///
/// # Example
///
/// ```no_run
/// use sheetjson::{convert_file, ConvertOptions};
///
/// let conversion = convert_file("Bomag-comparison.xlsx", &ConvertOptions::default())?;
/// for (name, sheet) in conversion.workbook.iter() {
///     println!("{}: {} machines", name, sheet.record_count());
/// }
/// # Ok::<(), sheetjson::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Conversion> {
    let path = path.as_ref();
    let reader = WorkbookReader::open(path).map_err(|e| e.in_workbook(path))?;
    convert_workbook(&reader, options)
}

/// Convert workbook bytes already held in memory.
pub fn convert_bytes(data: Vec<u8>, options: &ConvertOptions) -> Result<Conversion> {
    let reader = WorkbookReader::from_bytes(data)?;
    convert_workbook(&reader, options)
}
