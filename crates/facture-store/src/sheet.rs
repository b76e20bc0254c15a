//! # Sheet Files
//!
//! Whole-sheet reads and writes of one workbook file.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rewriting a Sheet                                  │
//! │                                                                         │
//! │  rows (header + records)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rust_xlsxwriter::Workbook ──save──► clients.xlsx.tmp                  │
//! │       │                                   │                             │
//! │       │ error? remove .tmp, keep original │                             │
//! │       ▼                                   ▼                             │
//! │                    fs::rename(.tmp → clients.xlsx)                      │
//! │                                                                         │
//! │  A crash mid-write never leaves a truncated clients.xlsx.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads go through calamine and always use the first worksheet, so files
//! produced by other spreadsheet tools (default sheet name "Sheet") load too.

use calamine::{open_workbook_auto, DataType, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// A value written to one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One workbook file holding a single table (header row + data rows).
#[derive(Debug, Clone)]
pub struct SheetFile {
    path: PathBuf,
    sheet_name: &'static str,
    headers: &'static [&'static str],
}

impl SheetFile {
    pub fn new(
        path: impl Into<PathBuf>,
        sheet_name: &'static str,
        headers: &'static [&'static str],
    ) -> Self {
        SheetFile {
            path: path.into(),
            sheet_name,
            headers,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.headers
    }

    /// Creates a header-only workbook if the file is missing.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_exists(&self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.write_rows(&[])?;
        info!(path = %self.path.display(), "Created empty workbook");
        Ok(true)
    }

    /// Reads every data row (header skipped) as trimmed strings.
    ///
    /// A missing file reads as an empty table.
    pub fn read_rows(&self) -> StoreResult<Vec<Vec<String>>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Workbook missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| StoreError::read(&self.path, e))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| StoreError::read(&self.path, e))?,
            None => return Ok(Vec::new()),
        };

        let rows: Vec<Vec<String>> = range
            .rows()
            .skip(1)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
                    .collect()
            })
            .collect();

        debug!(path = %self.path.display(), rows = rows.len(), "Read workbook");
        Ok(rows)
    }

    /// Replaces the whole sheet with `rows`, through a temp file.
    pub fn write_rows(&self, rows: &[Vec<CellValue>]) -> StoreResult<()> {
        let tmp_path = self.path.with_extension("xlsx.tmp");

        let result = self
            .build_workbook(rows)
            .and_then(|mut workbook| workbook.save(&tmp_path))
            .map_err(|e| StoreError::write(&self.path, e));

        if let Err(err) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), rows = rows.len(), "Wrote workbook");
        Ok(())
    }

    fn build_workbook(&self, rows: &[Vec<CellValue>]) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name)?;

        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Text(text) if text.is_empty() => {}
                    CellValue::Text(text) => {
                        worksheet.write_string(row_num, col, text)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(row_num, col, *value)?;
                    }
                }
            }
        }

        Ok(workbook)
    }
}
