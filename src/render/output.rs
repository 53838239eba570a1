//! Writing converted workbooks to disk.

use super::json::{to_json, JsonFormat};
use crate::error::Result;
use crate::model::Workbook;
use std::fs;
use std::path::{Path, PathBuf};

/// Where converted JSON goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// One document mapping sheet name → sheet, at this path
    Combined(PathBuf),
    /// One `<sheet>.json` per sheet inside this directory
    Split(PathBuf),
}

impl OutputMode {
    /// Target path (file or directory).
    pub fn path(&self) -> &Path {
        match self {
            OutputMode::Combined(p) | OutputMode::Split(p) => p,
        }
    }
}

/// Write a workbook and return the files written, in sheet order.
///
/// In split mode the directory is created if needed.
pub fn write_output(workbook: &Workbook, mode: &OutputMode, format: JsonFormat) -> Result<Vec<PathBuf>> {
    match mode {
        OutputMode::Combined(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, to_json(workbook, format)?)?;
            tracing::debug!(path = %path.display(), "wrote workbook");
            Ok(vec![path.clone()])
        }
        OutputMode::Split(dir) => {
            fs::create_dir_all(dir)?;
            let mut written = Vec::with_capacity(workbook.len());
            for (name, sheet) in workbook.iter() {
                let path = dir.join(format!("{}.json", name));
                fs::write(&path, to_json(sheet, format)?)?;
                tracing::debug!(path = %path.display(), "wrote sheet");
                written.push(path);
            }
            Ok(written)
        }
    }
}
