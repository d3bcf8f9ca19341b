//! # Spreadsheet to MySQL Importer
//!
//! Turns the sheets of an Excel or OpenDocument workbook into MySQL tables.
//! Each sheet's first row names the columns, its second row decides their
//! types, and every row after the header becomes an `INSERT`.
//!
//! ## Features
//!
//! - **Multi-format support**: `.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.xla`, `.xlam`
//!   and `.ods` files, read through calamine
//! - **Schema inference**: Date, Numeric, Boolean and String columns inferred
//!   from the sample row
//! - **Unique column names**: duplicate headers get numeric suffixes
//! - **Sheet and column filtering**: glob paths such as `Patents*` or `People/Name`
//! - **Error policy**: strict mode aborts on the first value that does not fit
//!   its column, lenient mode leaves it out and keeps going
//!
//! ## Example
//!
//! ```no_run
//! use sheet2sql::{Importer, ImportOptions, ScriptWriter, Spreadsheet};
//!
//! let mut spreadsheet = Spreadsheet::open("patents.xlsx")?;
//! let mut script = ScriptWriter::new(std::io::stdout());
//! let report = Importer::new(&ImportOptions::default())?
//!     .import_workbook(&mut spreadsheet, &mut script)?;
//! eprintln!("{} rows inserted", report.inserted_rows());
//! # Ok::<(), sheet2sql::SheetSqlError>(())
//! ```
pub mod database;
mod error;
mod helpers;
pub mod importer;
pub mod spreadsheet;

pub use database::{ErrorMode, ExecutionError, ScriptWriter, Statement, StatementExecutor};
pub use error::SheetSqlError;
pub use helpers::identifier::{CleanIdentifier, IdentifierNormalizer};
pub use importer::{ImportOptions, ImportReport, Importer, SheetReport, SkipReason};
pub use spreadsheet::{Sheet, SheetFilter, SheetPathFilter, Spreadsheet, SpreadsheetError, Workbook};
