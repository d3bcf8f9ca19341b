//! # Importer Module
//!
//! Drives the import of a workbook: every sheet accepted by the filter becomes
//! a table. Statements are executed as soon as they are generated, so a
//! failure leaves earlier statements applied.
use crate::database::{ErrorMode, StatementExecutor, StatementSynthesizer, Table};
use crate::error::{ResultMessage, SheetSqlError};
use crate::helpers::identifier::{CleanIdentifier, IdentifierNormalizer};
use crate::spreadsheet::{Sheet, SheetFilter, SheetPathFilter, Workbook};

pub(crate) mod report;

pub use report::{ImportReport, SheetReport, SkipReason};

/// Caller-facing import configuration.
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    /// Conversion error policy (default: strict)
    pub mode: ErrorMode,
    /// Allowed `sheet` or `sheet/column` glob paths; empty accepts everything
    pub include: Vec<String>,
}

/// Imports sheets as tables through a statement executor.
pub struct Importer<F = SheetPathFilter, N = CleanIdentifier> {
    mode: ErrorMode,
    filter: F,
    normalizer: N,
}

impl Importer {
    /// Creates an importer with the path filter and default identifier cleanup.
    pub fn new(options: &ImportOptions) -> Result<Self, SheetSqlError> {
        Ok(Self::with_parts(
            options.mode,
            SheetPathFilter::new(options.include.as_slice())?,
            CleanIdentifier,
        ))
    }
}

impl<F: SheetFilter, N: IdentifierNormalizer> Importer<F, N> {
    /// Creates an importer from a custom filter and identifier normalizer.
    pub fn with_parts(mode: ErrorMode, filter: F, normalizer: N) -> Self {
        Self { mode, filter, normalizer }
    }

    /// Imports every accepted sheet of the workbook, in workbook order.
    pub fn import_workbook<W, E>(&self, workbook: &mut W, executor: &mut E) -> Result<ImportReport, SheetSqlError>
    where
        W: Workbook + ?Sized,
        E: StatementExecutor + ?Sized,
    {
        let mut report = ImportReport::default();
        for sheet_name in workbook.sheet_names() {
            if !self.filter.accept_sheet(&sheet_name) {
                tracing::debug!(sheet = %sheet_name, "sheet filtered out");
                report.skipped.push((sheet_name, SkipReason::Filtered));
                continue;
            }
            let sheet = workbook
                .read_sheet(&sheet_name)
                .map_err(SheetSqlError::from)
                .with_prefix(&sheet_name)?;
            match self.import_sheet(&sheet, executor)? {
                Ok(sheet_report) => report.sheets.push(sheet_report),
                Err(reason) => report.skipped.push((sheet_name, reason)),
            }
        }
        Ok(report)
    }

    /// Imports one sheet: drop and create its table, then insert every row
    /// after the header. The sample row is inserted as well.
    ///
    /// The inner `Err` tells why the sheet produced no statements.
    pub fn import_sheet<E>(&self, sheet: &Sheet, executor: &mut E) -> Result<Result<SheetReport, SkipReason>, SheetSqlError>
    where
        E: StatementExecutor + ?Sized,
    {
        if sheet.is_empty() {
            tracing::warn!(sheet = %sheet.name, "empty sheet skipped");
            return Ok(Err(SkipReason::EmptySheet));
        }
        let table_name = self.normalizer.normalize(&sheet.name);
        if table_name.is_empty() {
            tracing::warn!(sheet = %sheet.name, "sheet name is not usable as a table name, skipped");
            return Ok(Err(SkipReason::InvalidTableName));
        }

        let (table, untyped_columns) = Table::from_sheet(&table_name, sheet, &self.filter, &self.normalizer);
        for error in &untyped_columns {
            tracing::warn!(table = %table.name, "{error}");
        }
        tracing::info!(
            sheet = %sheet.name,
            table = %table.name,
            columns = table.usable_columns().count(),
            rows = sheet.rows.len() - 1,
            "importing sheet"
        );

        let mut report = SheetReport {
            sheet_name: sheet.name.to_owned(),
            table_name: table.name.to_owned(),
            column_slots: table.columns.len(),
            usable_columns: table.usable_columns().count(),
            untyped_columns,
            ..SheetReport::default()
        };
        let synthesizer = StatementSynthesizer::new(&table, self.mode);
        for statement in [synthesizer.drop_table(), synthesizer.create_table()] {
            tracing::debug!(statement = %statement, "executing statement");
            executor.execute(&statement)?;
            report.statements += 1;
        }
        for row in sheet.data_rows() {
            match synthesizer.insert_row(row, &mut report.conversion_failures)? {
                Some(statement) => {
                    tracing::debug!(statement = %statement, "executing statement");
                    executor.execute(&statement)?;
                    report.statements += 1;
                    report.inserted_rows += 1;
                }
                None => report.empty_rows += 1,
            }
        }
        Ok(Ok(report))
    }
}
