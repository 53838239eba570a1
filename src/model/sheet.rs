//! Per-sheet and per-workbook results.

use super::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The converted content of one sheet.
///
/// Serialized without a tag, so both variants share the JSON object shape.
/// Deserialization tries `Machines` first: an empty sheet (`{}`) always reads
/// back as an empty `Machines`, whichever variant produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetResult {
    /// Machine name → record (the common layout)
    Machines(IndexMap<String, Record>),
    /// Brand → records of that brand's machines, in column order
    Brands(IndexMap<String, Vec<Record>>),
}

impl SheetResult {
    /// Number of top-level keys (machines or brands).
    pub fn len(&self) -> usize {
        match self {
            SheetResult::Machines(m) => m.len(),
            SheetResult::Brands(b) => b.len(),
        }
    }

    /// Check if the sheet produced no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of machine records.
    pub fn record_count(&self) -> usize {
        match self {
            SheetResult::Machines(m) => m.len(),
            SheetResult::Brands(b) => b.values().map(Vec::len).sum(),
        }
    }

    /// Top-level keys in output order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            SheetResult::Machines(m) => m.keys().map(String::as_str).collect(),
            SheetResult::Brands(b) => b.keys().map(String::as_str).collect(),
        }
    }

    /// Record for a machine, for machine-keyed sheets.
    pub fn machine(&self, name: &str) -> Option<&Record> {
        match self {
            SheetResult::Machines(m) => m.get(name),
            SheetResult::Brands(_) => None,
        }
    }

    /// Records for a brand, for brand-grouped sheets.
    pub fn brand(&self, brand: &str) -> Option<&[Record]> {
        match self {
            SheetResult::Brands(b) => b.get(brand).map(Vec::as_slice),
            SheetResult::Machines(_) => None,
        }
    }
}

/// Sheet name → converted sheet, in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workbook {
    /// Converted sheets
    pub sheets: IndexMap<String, SheetResult>,
}

impl Workbook {
    /// Create an empty workbook result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a converted sheet.
    pub fn insert(&mut self, name: impl Into<String>, sheet: SheetResult) {
        self.sheets.insert(name.into(), sheet);
    }

    /// Look up a sheet by name.
    pub fn get(&self, name: &str) -> Option<&SheetResult> {
        self.sheets.get(name)
    }

    /// Number of converted sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if no sheet was converted.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Iterate over sheets in workbook order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SheetResult)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }
}
