use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::helpers::identifier::IdentifierNormalizer;
use crate::spreadsheet::Row;
use crate::spreadsheet::Sheet;
use crate::spreadsheet::SheetFilter;
use std::collections::HashSet;
use thiserror::Error;

/// A column whose sample cell is missing, so no type could be inferred.
///
/// Not fatal: the column is left out of the table.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("No sample value for column '{column}' at ordinal {ordinal}, column skipped")]
pub struct SchemaInferenceError {
    pub column: String,
    pub ordinal: usize,
}

/// Table definition derived from a sheet's header and sample rows.
///
/// `columns` holds one slot per header cell, indexed by cell ordinal. Slots of
/// cells excluded from the schema are `None` and are never removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Column slots in ordinal order
    pub columns: Vec<Option<Column>>,
}

impl Table {
    /// Builds the table from the first two physical rows of a sheet.
    pub fn from_sheet<F, N>(
        name: &str,
        sheet: &Sheet,
        filter: &F,
        normalizer: &N,
    ) -> (Self, Vec<SchemaInferenceError>)
    where
        F: SheetFilter + ?Sized,
        N: IdentifierNormalizer + ?Sized,
    {
        let names = match sheet.header() {
            Some(header) => {
                resolve_column_names(&sheet.name, header, &primary_key(name), filter, normalizer)
            }
            None => Vec::new(),
        };
        let (columns, errors) = infer_column_types(names, sheet.sample());
        (Self { name: name.to_owned(), columns }, errors)
    }

    /// Name of the implicit auto-increment primary key.
    pub fn primary_key(&self) -> String {
        primary_key(&self.name)
    }

    /// Columns that take part in DDL and DML, in ordinal order.
    pub fn usable_columns(&self) -> impl Iterator<Item = (&Column, ColumnType)> {
        self.columns
            .iter()
            .flatten()
            .filter_map(|column| column.usable().map(|kind| (column, kind)))
    }
}

fn primary_key(table_name: &str) -> String {
    format!("{table_name}ID")
}

/// Turns header cells into unique optional column names, index-aligned with
/// the header.
///
/// A cell whose normalized text is empty or rejected by the filter yields
/// `None`. Duplicates get the first unused numeric suffix (1, 2, 3, ...).
/// Names are compared case-insensitively, as MySQL does, and keep their
/// header casing. The primary key name is reserved up front.
pub fn resolve_column_names<F, N>(
    sheet_name: &str,
    header: &Row,
    primary_key: &str,
    filter: &F,
    normalizer: &N,
) -> Vec<Option<String>>
where
    F: SheetFilter + ?Sized,
    N: IdentifierNormalizer + ?Sized,
{
    let mut used: HashSet<String> = HashSet::from([primary_key.to_lowercase()]);
    (0..header.width())
        .map(|ordinal| {
            let name = normalizer.normalize(header.get(ordinal)?.to_string().as_str());
            if name.is_empty() || !filter.accept_column(sheet_name, &name) {
                return None;
            }
            let mut candidate = name.to_owned();
            let mut suffix = 1usize;
            while used.contains(&candidate.to_lowercase()) {
                candidate = format!("{name}{suffix}");
                suffix += 1;
            }
            used.insert(candidate.to_lowercase());
            Some(candidate)
        })
        .collect()
}

/// Assigns each named slot its type from the sample cell at the same ordinal.
fn infer_column_types(
    names: Vec<Option<String>>,
    sample: Option<&Row>,
) -> (Vec<Option<Column>>, Vec<SchemaInferenceError>) {
    let mut errors = Vec::new();
    let columns = names
        .into_iter()
        .enumerate()
        .map(|(ordinal, name)| {
            let name = name?;
            let kind = sample.and_then(|row| row.get(ordinal)).map(ColumnType::infer);
            if kind.is_none() {
                errors.push(SchemaInferenceError { column: name.to_owned(), ordinal });
            }
            Some(Column { name, ordinal, kind })
        })
        .collect();
    (columns, errors)
}
