//! Error types for the sheetjson library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetjson operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a workbook or parsing its layout.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a ZIP package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The package is an Office document, but not a spreadsheet.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A cell carried an `r` attribute that is not an A1-style reference.
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// The requested sheet does not exist in the workbook.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The sheet does not follow the expected comparison layout.
    #[error("Layout error in sheet \"{sheet}\": {reason}")]
    Layout {
        /// Name of the offending sheet
        sheet: String,
        /// What was missing
        reason: String,
    },

    /// An error raised while processing a specific sheet.
    #[error("sheet \"{sheet}\": {source}")]
    Sheet {
        /// Name of the sheet being processed
        sheet: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// An error raised while opening a workbook file.
    #[error("workbook {path}: {source}")]
    Workbook {
        /// Path of the workbook
        path: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a layout error for `sheet`.
    pub fn layout(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Layout {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }

    /// Attach sheet context, leaving errors that already name a sheet untouched.
    pub fn in_sheet(self, sheet: &str) -> Self {
        match self {
            Error::Layout { .. } | Error::Sheet { .. } => self,
            other => Error::Sheet {
                sheet: sheet.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Attach the path of the workbook being opened.
    pub fn in_workbook(self, path: &std::path::Path) -> Self {
        Error::Workbook {
            path: path.display().to_string(),
            source: Box::new(self),
        }
    }

    /// Name of the sheet this error is attributed to, if any.
    pub fn sheet_name(&self) -> Option<&str> {
        match self {
            Error::Layout { sheet, .. } | Error::Sheet { sheet, .. } => Some(sheet),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
