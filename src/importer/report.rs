use crate::database::SchemaInferenceError;
use crate::database::StatementError;

/// Why an accepted sheet produced no statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Rejected by the sheet filter
    Filtered,
    /// No physical rows
    EmptySheet,
    /// Sheet name normalizes to an empty table name
    InvalidTableName,
}

/// Outcome of importing one sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetReport {
    pub sheet_name: String,
    pub table_name: String,
    /// Header cell slots, absent ones included
    pub column_slots: usize,
    /// Columns present in the create statement
    pub usable_columns: usize,
    /// Statements handed to the executor
    pub statements: usize,
    pub inserted_rows: usize,
    /// Data rows that reduced to no value at all
    pub empty_rows: usize,
    /// Cells left out in lenient mode
    pub conversion_failures: Vec<StatementError>,
    pub untyped_columns: Vec<SchemaInferenceError>,
}

/// Outcome of importing a workbook.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    pub sheets: Vec<SheetReport>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl ImportReport {
    /// Total statements executed across all sheets.
    pub fn statements(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.statements).sum()
    }

    /// Total rows inserted across all sheets.
    pub fn inserted_rows(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.inserted_rows).sum()
    }

    /// Total cells left out in lenient mode.
    pub fn conversion_failures(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.conversion_failures.len()).sum()
    }
}
