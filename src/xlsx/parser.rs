//! XLSX workbook reader implementation.

use crate::container::XlsxContainer;
use crate::error::{Error, Result};
use crate::grid::{parse_reference, CellValue, Grid};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

use super::shared_strings::SharedStrings;

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Reader that turns the worksheets of an XLSX workbook into [`Grid`]s.
pub struct WorkbookReader {
    container: XlsxContainer,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl WorkbookReader {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = XlsxContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a reader from the bytes of an XLSX file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = XlsxContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    fn from_container(container: XlsxContainer) -> Result<Self> {
        crate::detect::ensure_workbook(&container)?;

        let shared_strings = match container.read_optional_xml("xl/sharedStrings.xml")? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };
        let relationships = match container.read_optional_xml("xl/_rels/workbook.xml.rels")? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };
        let sheets = parse_sheet_list(&container.read_xml("xl/workbook.xml")?)?;

        tracing::debug!(
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            "opened workbook"
        );

        Ok(Self {
            container,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Number of worksheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Read one worksheet as a grid.
    pub fn read_grid(&self, sheet_name: &str) -> Result<Grid> {
        let sheet = self
            .sheets
            .iter()
            .find(|s| s.name == sheet_name)
            .ok_or_else(|| Error::SheetNotFound(sheet_name.to_string()))?;

        let target = self
            .relationships
            .get(&sheet.rel_id)
            .ok_or_else(|| Error::MissingComponent(format!("relationship {}", sheet.rel_id)))?;
        let sheet_path = match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{}", target),
        };

        let xml = self.container.read_xml(&sheet_path)?;
        self.parse_sheet(&xml)
    }

    /// Parse worksheet XML into a grid of typed cells.
    fn parse_sheet(&self, xml: &str) -> Result<Grid> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut cells = Vec::new();
        let mut next_row = 0usize;
        let mut current_row = 0usize;
        let mut next_col = 0usize;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_phonetic = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = row_index(e)?.unwrap_or(next_row);
                        next_col = 0;
                    }
                    b"c" => {
                        let pending = PendingCell::start(e, current_row, next_col)?;
                        next_col = pending.column + 1;
                        cell = Some(pending);
                    }
                    b"rPh" => in_phonetic = true,
                    b"v" | b"t" if !in_phonetic => {
                        if let Some(pending) = cell.as_mut() {
                            pending.has_value = true;
                            in_value = true;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        next_row = row_index(e)?.unwrap_or(next_row) + 1;
                    }
                    b"c" => {
                        let pending = PendingCell::start(e, current_row, next_col)?;
                        next_col = pending.column + 1;
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_value => {
                    let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    if let Some(pending) = cell.as_mut() {
                        pending.raw.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => next_row = current_row + 1,
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let value = self.resolve_cell_value(&pending);
                            if value != CellValue::Empty {
                                cells.push((pending.row, pending.column, value));
                            }
                        }
                    }
                    b"rPh" => in_phonetic = false,
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Grid::from_cells(cells))
    }

    /// Resolve a raw cell value according to its `t` attribute.
    fn resolve_cell_value(&self, cell: &PendingCell) -> CellValue {
        let raw = cell.raw.as_str();
        match cell.cell_type.as_deref() {
            Some("s") => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| self.shared_strings.get(idx))
                .map(CellValue::from)
                .unwrap_or_default(),
            Some("b") if cell.has_value => CellValue::Bool(raw.trim() == "1"),
            Some("b") => CellValue::Empty,
            // Errors (#N/A, #DIV/0!), formula strings, inline strings, ISO dates
            Some("e") | Some("str") | Some("inlineStr") | Some("d") => {
                if cell.has_value {
                    CellValue::Text(cell.raw.clone())
                } else {
                    CellValue::Empty
                }
            }
            _ => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    trimmed
                        .parse::<f64>()
                        .map(CellValue::Number)
                        .unwrap_or_else(|_| CellValue::Text(raw.to_string()))
                }
            }
        }
    }
}

/// A `<c>` element whose value is still being read.
#[derive(Debug)]
struct PendingCell {
    row: usize,
    column: usize,
    cell_type: Option<String>,
    raw: String,
    has_value: bool,
}

impl PendingCell {
    fn start(e: &BytesStart<'_>, row: usize, next_col: usize) -> Result<Self> {
        let mut position = None;
        let mut cell_type = None;
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    let reference = String::from_utf8_lossy(&attr.value).to_string();
                    position = Some(parse_reference(&reference)?);
                }
                b"t" => cell_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
                _ => {}
            }
        }

        let (row, column) = position.unwrap_or((row, next_col));
        Ok(Self {
            row,
            column,
            cell_type,
            raw: String::new(),
            has_value: false,
        })
    }
}

/// Zero-based index from a `<row r="…">` attribute, if present.
fn row_index(e: &BytesStart<'_>) -> Result<Option<usize>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"r" {
            let text = String::from_utf8_lossy(&attr.value).to_string();
            return match text.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(Some(n - 1)),
                _ => Err(Error::InvalidCellReference(format!("row {}", text))),
            };
        }
    }
    Ok(None)
}

/// Parse `xl/_rels/workbook.xml.rels` into relationship id → target.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut rels = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).to_string()
                            }
                            _ => {}
                        }
                    }
                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Parse `xl/workbook.xml` for the sheet list in workbook order.
fn parse_sheet_list(xml: &str) -> Result<Vec<SheetInfo>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut rel_id = String::new();
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            name = attr
                                .unescape_value()
                                .map(|v| v.into_owned())
                                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
                        } else if attr.key.local_name().as_ref() == b"id"
                            && attr.key.prefix().is_some()
                        {
                            rel_id = String::from_utf8_lossy(&attr.value).to_string();
                        }
                    }
                    if !name.is_empty() {
                        sheets.push(SheetInfo { name, rel_id });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
