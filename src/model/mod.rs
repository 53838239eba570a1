//! Output model for converted workbooks.
//!
//! These structures mirror the JSON that the converter emits:
//! sheet name → machine (or brand) → attribute label → value. Every map
//! keeps insertion order so the output follows the sheet layout.

mod sheet;
mod value;

pub use sheet::*;
pub use value::*;
