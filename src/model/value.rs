//! Attribute values and records.

use crate::grid::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 2^63: whole `f64`s in `[-2^63, 2^63)` convert to `i64` exactly.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A value stored under an attribute label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Whole number (including whole floats from the sheet)
    Integer(i64),
    /// Number with a fractional part
    Float(f64),
    /// Boolean cell
    Bool(bool),
    /// Text, as stored in the cell
    Text(String),
    /// Nested record (the LTR "Tiempo" block)
    Record(Record),
}

impl Value {
    /// Normalize a cell into an output value.
    ///
    /// Blank cells yield `None`. Whole numbers become [`Value::Integer`];
    /// everything else passes through unchanged.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        if cell.is_blank() {
            return None;
        }
        Some(match cell {
            CellValue::Number(n) => Self::from_number(*n),
            CellValue::Text(s) => Value::Text(s.clone()),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Empty => return None,
        })
    }

    /// `5.0` → `Integer(5)`, `5.5` → `Float(5.5)`.
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n >= -I64_UPPER_BOUND && n < I64_UPPER_BOUND {
            Value::Integer(n as i64)
        } else {
            Value::Float(n)
        }
    }

    /// Borrow the nested record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::from_number(n)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

/// Attribute label → value for one machine.
///
/// Labels are not deduplicated: inserting an existing label replaces its
/// value and keeps the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    entries: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`, overwriting any earlier value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(label.into(), value.into());
    }

    /// Look up a label.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries.get(label)
    }

    /// Check if a label is present.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the record has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
