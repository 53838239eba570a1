//! Sheet layout parsing.
//!
//! A comparison sheet has one column of attribute labels, a header row
//! marked "Máquina" or "Machine", machine names in the row above it, and one
//! column of values per machine:
//!
//! ```text
//!            |  BW 120 AD-5 | CC 1200
//! Máquina    |  Tándem      | Tándem
//! Peso (kg)  |  2700        | 2600
//! ```
//!
//! Two sheets get special treatment, selected through [`SheetStrategy`]:
//! `LTR` nests its "Tiempo" rows under a sub-record, and `SDR` groups
//! machines by brand.
//!
//! # Example
//!
//! ```
//! use sheetjson::grid::{CellValue, Grid};
//! use sheetjson::layout::parse_flat;
//!
//! let grid = Grid::from_rows(vec![
//!     vec![CellValue::Empty, "BW 120".into()],
//!     vec!["Máquina".into(), "Tándem".into()],
//!     vec!["Peso".into(), CellValue::Number(2700.0)],
//! ]);
//! let sheet = parse_flat(&grid, "Tándem")?;
//! let record = sheet.machine("BW 120").unwrap();
//! assert_eq!(record.len(), 2);
//! # Ok::<(), sheetjson::Error>(())
//! ```

mod header;
mod walker;

pub use header::{is_header_marker, locate_header, machine_columns, HeaderLocation, MachineColumn};
pub use walker::{fill_record, find_time_block, record_with_time_block, walk_attributes, TIME_BLOCK_KEY};

use crate::error::Result;
use crate::grid::Grid;
use crate::model::{Record, SheetResult};
use crate::options::ConvertOptions;
use indexmap::IndexMap;

/// Sheet name that nests its "Tiempo" rows.
pub const TIME_BLOCK_SHEET: &str = "LTR";

/// Sheet name whose machines are grouped by brand.
pub const BRAND_SHEET: &str = "SDR";

/// How a sheet's machine columns are turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStrategy {
    /// machine → flat record
    Flat,
    /// machine → record with the "Tiempo" rows nested
    TimeBlock,
    /// brand → list of records
    BrandGrouped,
}

impl SheetStrategy {
    /// Pick the strategy for a sheet name.
    ///
    /// `LTR` matches case-insensitively; `SDR` must match exactly.
    pub fn for_sheet(name: &str) -> Self {
        if name == BRAND_SHEET {
            SheetStrategy::BrandGrouped
        } else if name.to_uppercase() == TIME_BLOCK_SHEET {
            SheetStrategy::TimeBlock
        } else {
            SheetStrategy::Flat
        }
    }
}

/// Parse a sheet with the strategy its name selects.
pub fn parse_sheet(grid: &Grid, sheet_name: &str, options: &ConvertOptions) -> Result<SheetResult> {
    parse_with_strategy(grid, sheet_name, SheetStrategy::for_sheet(sheet_name), options)
}

/// Parse a sheet with an explicit strategy.
pub fn parse_with_strategy(
    grid: &Grid,
    sheet_name: &str,
    strategy: SheetStrategy,
    options: &ConvertOptions,
) -> Result<SheetResult> {
    let location = locate_header(grid, sheet_name)?;
    let columns = machine_columns(grid, &location);

    tracing::debug!(
        sheet = sheet_name,
        header = %location.reference(),
        machines = columns.len(),
        ?strategy,
        "located sheet layout"
    );

    let result = match strategy {
        SheetStrategy::Flat => flat_records(grid, &location, &columns),
        SheetStrategy::TimeBlock => time_block_records(grid, &location, &columns),
        SheetStrategy::BrandGrouped => brand_records(grid, &location, &columns, options),
    };
    Ok(result)
}

/// Parse a sheet as plain machine → record, ignoring its name.
pub fn parse_flat(grid: &Grid, sheet_name: &str) -> Result<SheetResult> {
    parse_with_strategy(grid, sheet_name, SheetStrategy::Flat, &ConvertOptions::default())
}

/// Split a machine name on its first space into `(brand, model)`.
///
/// A name without a space is both brand and model.
pub fn split_brand(name: &str) -> (&str, &str) {
    name.split_once(' ').unwrap_or((name, name))
}

fn flat_records(grid: &Grid, location: &HeaderLocation, columns: &[MachineColumn]) -> SheetResult {
    let mut machines = IndexMap::new();
    for machine in columns {
        let mut record = Record::new();
        fill_record(grid, location, machine.column, &mut record);
        machines.insert(machine.name.clone(), record);
    }
    SheetResult::Machines(machines)
}

fn time_block_records(
    grid: &Grid,
    location: &HeaderLocation,
    columns: &[MachineColumn],
) -> SheetResult {
    let block = find_time_block(grid, location);
    if let Some(range) = &block {
        tracing::debug!(start = range.start, end = range.end, "found Tiempo block");
    }

    let machines = columns
        .iter()
        .map(|machine| {
            let record = record_with_time_block(grid, location, machine.column, block.as_ref());
            (machine.name.clone(), record)
        })
        .collect();
    SheetResult::Machines(machines)
}

fn brand_records(
    grid: &Grid,
    location: &HeaderLocation,
    columns: &[MachineColumn],
    options: &ConvertOptions,
) -> SheetResult {
    let mut brands: IndexMap<String, Vec<Record>> = IndexMap::new();
    for machine in columns {
        let (brand, model) = split_brand(&machine.name);

        let mut record = Record::new();
        if options.brand_fields {
            record.insert("brand", brand);
            record.insert("model", model);
        }
        fill_record(grid, location, machine.column, &mut record);

        brands.entry(brand.to_string()).or_default().push(record);
    }
    SheetResult::Brands(brands)
}
