//! XLSX workbook reading.
//!
//! Turns the worksheets of an Office Open XML workbook into [`Grid`]s of
//! typed cell values, without assuming any header row.
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::xlsx::WorkbookReader;
//!
//! let reader = WorkbookReader::open("comparison.xlsx")?;
//! for name in reader.sheet_names() {
//!     let grid = reader.read_grid(name)?;
//!     println!("{}: {} x {}", name, grid.height(), grid.width());
//! }
//! # Ok::<(), sheetjson::Error>(())
//! ```
//!
//! [`Grid`]: crate::grid::Grid

mod parser;
mod shared_strings;

pub use parser::WorkbookReader;
pub use shared_strings::SharedStrings;
