//! JSON output for converted workbooks.
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::render::{write_output, JsonFormat, OutputMode};
//! use sheetjson::{convert_file, ConvertOptions};
//!
//! let conversion = convert_file("Bomag-comparison.xlsx", &ConvertOptions::default())?;
//! let mode = OutputMode::Split("data".into());
//! for path in write_output(&conversion.workbook, &mode, JsonFormat::Pretty)? {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), sheetjson::Error>(())
//! ```

mod json;
mod output;

pub use json::{to_json, JsonFormat};
pub use output::{write_output, OutputMode};
