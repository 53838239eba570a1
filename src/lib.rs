//! # sheetjson
//!
//! Convert machine comparison workbooks (`.xlsx`) into nested JSON.
//!
//! Each sheet holds a column of attribute labels, a header row marked
//! "Máquina" or "Machine", machine names in the row above it, and one column
//! of values per machine. The converter finds that layout and produces
//! `sheet → machine → attribute → value`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetjson::{convert_file, ConvertOptions};
//! use sheetjson::render::{to_json, JsonFormat};
//!
//! let conversion = convert_file("Bomag-comparison.xlsx", &ConvertOptions::default())?;
//! let json = to_json(&conversion.workbook, JsonFormat::Pretty)?;
//! std::fs::write("comparison.json", json)?;
//! # Ok::<(), sheetjson::Error>(())
//! ```
//!
//! ## Working with single sheets
//!
//! ```no_run
//! use sheetjson::xlsx::WorkbookReader;
//! use sheetjson::{layout, ConvertOptions};
//!
//! let reader = WorkbookReader::open("Bomag-comparison.xlsx")?;
//! let grid = reader.read_grid("LTR")?;
//! let sheet = layout::parse_sheet(&grid, "LTR", &ConvertOptions::default())?;
//! println!("{} machines", sheet.record_count());
//! # Ok::<(), sheetjson::Error>(())
//! ```

pub mod container;
pub mod convert;
pub mod detect;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;
pub mod xlsx;

// Re-exports
pub use convert::{convert_bytes, convert_file, convert_workbook, Conversion, SkippedSheet};
pub use error::{Error, Result};
pub use grid::{CellValue, Grid};
pub use layout::{HeaderLocation, MachineColumn, SheetStrategy};
pub use model::{Record, SheetResult, Value, Workbook};
pub use options::{ConvertOptions, FailurePolicy};
pub use xlsx::WorkbookReader;
