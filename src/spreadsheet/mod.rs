//! # Spreadsheet Reading Module
//!
//! Reads Excel (.xls, .xlsx, .xlsm, .xlsb, .xla, .xlam) and OpenDocument (.ods)
//! workbooks into [`Sheet`]s of physical rows. Formula cells are read as their
//! cached results, so every cell arrives as a concrete [`CellValue`].
use crate::spreadsheet::SpreadsheetError::{InvalidFileFormat, SheetNotFound};
use calamine::{open_workbook_auto, Reader, Sheets};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub(crate) mod cell;
pub(crate) mod criteria;
pub(crate) mod sheet;

pub use cell::{cell_position, CellKind, CellValue};
pub use criteria::{SheetFilter, SheetPathFilter};
pub use sheet::{Row, Sheet};

/// Errors raised while opening or reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Error reported by the underlying reader
    #[error("Invalid spreadsheet file: {0}")]
    ReaderError(#[from] calamine::Error),

    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    /// Requested sheet not found
    #[error("Sheet '{name}' not found")]
    SheetNotFound { name: String },
}

/// Source of sheets, in workbook order.
pub trait Workbook {
    /// Returns the names of all sheets.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the named sheet.
    fn read_sheet(&mut self, name: &str) -> Result<Sheet, SpreadsheetError>;

    fn sheet_count(&self) -> usize {
        self.sheet_names().len()
    }
}

/// A workbook file opened through calamine.
pub struct Spreadsheet {
    name: String,
    sheets: Sheets<BufReader<File>>,
}

impl Spreadsheet {
    /// Opens a spreadsheet file, detecting the format from its extension.
    pub fn open<P>(path: P) -> Result<Spreadsheet, SpreadsheetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        match path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase).as_deref() {
            Some("xlsx" | "xlsm" | "xlam" | "xlsb" | "xls" | "xla" | "ods") => Ok(Spreadsheet {
                sheets: open_workbook_auto(path)?,
                name,
            }),
            _ => Err(InvalidFileFormat { name }),
        }
    }

    /// Returns the file name the workbook was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Workbook for Spreadsheet {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet, SpreadsheetError> {
        if !self.sheet_names().iter().any(|it| it == name) {
            return Err(SheetNotFound { name: name.to_owned() });
        }
        let range = self.sheets.worksheet_range(name)?;
        Ok(Sheet::from_range(name, &range))
    }
}

/// In-memory workbook, mostly useful to feed already-parsed data.
impl Workbook for Vec<Sheet> {
    fn sheet_names(&self) -> Vec<String> {
        self.iter().map(|sheet| sheet.name.to_owned()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet, SpreadsheetError> {
        self.iter()
            .find(|sheet| sheet.name == name)
            .cloned()
            .ok_or_else(|| SheetNotFound { name: name.to_owned() })
    }
}
