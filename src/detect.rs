//! Package format checks for workbook input.

use crate::container::XlsxContainer;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for macro-enabled workbooks, which share the XLSX layout.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Other OOXML main parts, named in the error when someone passes the wrong file.
const FOREIGN_CONTENT_TYPES: [(&str, &str); 2] = [
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        "Word document",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "PowerPoint presentation",
    ),
];

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Verify that an opened package is a spreadsheet workbook.
///
/// Inspects `[Content_Types].xml` first and falls back to looking for
/// the `xl/` folder when the content types are absent or unusual.
pub fn ensure_workbook(container: &XlsxContainer) -> Result<()> {
    if let Some(content_types) = container.read_optional_xml("[Content_Types].xml")? {
        if content_types.contains(XLSX_CONTENT_TYPE) || content_types.contains(XLSM_CONTENT_TYPE)
        {
            return Ok(());
        }
        if let Some((_, name)) = FOREIGN_CONTENT_TYPES
            .iter()
            .find(|(ct, _)| content_types.contains(ct))
        {
            return Err(Error::UnsupportedFormat(name.to_string()));
        }
    }

    if container.list_files().iter().any(|n| n.starts_with("xl/")) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}
