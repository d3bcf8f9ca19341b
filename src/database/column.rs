use crate::spreadsheet::CellKind;
use crate::spreadsheet::CellValue;
use crate::spreadsheet::cell::DATE_FORMAT;
use std::fmt::Display;
use thiserror::Error;

/// A cell whose kind does not fit the column type inferred from the sample row.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("cannot convert {found} value '{value}' to {expected}")]
pub struct ConversionError {
    pub expected: ColumnType,
    pub found: CellKind,
    pub value: String,
}

/// Relational type of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Date and time, minute precision
    Date,
    /// Double-precision numbers
    Numeric,
    /// Boolean values (true/false)
    Boolean,
    /// Text
    String,
}

impl ColumnType {
    /// Returns the MySQL type used in `CREATE TABLE`.
    pub const fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Date => "DATETIME",
            ColumnType::Numeric => "DOUBLE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::String => "TEXT",
        }
    }

    /// Returns the type name used in messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Date => "Date",
            ColumnType::Numeric => "Numeric",
            ColumnType::Boolean => "Boolean",
            ColumnType::String => "String",
        }
    }

    /// Infers the column type from the sample cell.
    pub fn infer(sample: &CellValue) -> Self {
        match sample.kind() {
            CellKind::Boolean => ColumnType::Boolean,
            CellKind::Date => ColumnType::Date,
            CellKind::Number => ColumnType::Numeric,
            CellKind::Text => ColumnType::String,
        }
    }

    /// Renders a cell as an SQL literal of this type.
    ///
    /// `Ok(None)` means the cell carries no value and the column is left out
    /// of the statement. Only text values can reduce to nothing.
    pub fn to_literal(&self, cell: &CellValue) -> Result<Option<String>, ConversionError> {
        match (self, cell) {
            (ColumnType::Date, CellValue::Date(value)) => {
                Ok(Some(format!("'{}'", value.format(DATE_FORMAT))))
            }
            (ColumnType::Numeric, CellValue::Number(value)) => Ok(Some(value.to_string())),
            (ColumnType::Boolean, CellValue::Boolean(value)) => Ok(Some(value.to_string())),
            (ColumnType::String, CellValue::Text(value)) => Ok(quote_string(value.trim())),
            (ColumnType::String, value) => Ok(quote_string(value.to_string().as_str())),
            (_, value) => Err(ConversionError {
                expected: *self,
                found: value.kind(),
                value: value.to_string(),
            }),
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quotes a string literal, backslash-escaping backslashes and single quotes.
/// Empty text has no literal.
fn quote_string(value: &str) -> Option<String> {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    if escaped.is_empty() {
        None
    } else {
        Some(format!("'{escaped}'"))
    }
}

/// A column of a table built from a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Resolved, unique column name
    pub name: String,
    /// Cell index in the sheet rows
    pub ordinal: usize,
    /// Type inferred from the sample row; `None` when the sample cell is missing
    pub kind: Option<ColumnType>,
}

impl Column {
    /// Returns the column type if the column takes part in DDL and DML.
    pub fn usable(&self) -> Option<ColumnType> {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> CellValue {
        CellValue::Date(
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|it| it.and_hms_opt(h, min, 0))
                .unwrap(),
        )
    }

    #[test]
    fn infer_from_sample_kind() {
        assert_eq!(ColumnType::infer(&CellValue::Boolean(true)), ColumnType::Boolean);
        assert_eq!(ColumnType::infer(&CellValue::Number(5.0)), ColumnType::Numeric);
        assert_eq!(ColumnType::infer(&date(2021, 3, 5, 14, 30)), ColumnType::Date);
        assert_eq!(ColumnType::infer(&CellValue::Text("x".to_owned())), ColumnType::String);
    }

    #[test]
    fn date_literal() {
        let literal = ColumnType::Date.to_literal(&date(2021, 3, 5, 14, 30));
        assert_eq!(literal, Ok(Some("'2021-03-05 14:30'".to_owned())));
    }

    #[test]
    fn numeric_and_boolean_literals_are_unquoted() {
        assert_eq!(ColumnType::Numeric.to_literal(&CellValue::Number(6.0)), Ok(Some("6".to_owned())));
        assert_eq!(ColumnType::Numeric.to_literal(&CellValue::Number(-0.25)), Ok(Some("-0.25".to_owned())));
        assert_eq!(ColumnType::Boolean.to_literal(&CellValue::Boolean(false)), Ok(Some("false".to_owned())));
    }

    #[test]
    fn string_literal_escapes_quotes() {
        let literal = ColumnType::String.to_literal(&CellValue::Text("O'Brien".to_owned()));
        assert_eq!(literal, Ok(Some("'O\\'Brien'".to_owned())));
    }

    #[test]
    fn string_literal_escapes_backslashes() {
        let path = ColumnType::String.to_literal(&CellValue::Text("C:\\temp\\".to_owned()));
        assert_eq!(path, Ok(Some("'C:\\\\temp\\\\'".to_owned())));
        let quoted = ColumnType::String.to_literal(&CellValue::Text("x\\'); DROP TABLE t; --".to_owned()));
        assert_eq!(quoted, Ok(Some("'x\\\\\\'); DROP TABLE t; --'".to_owned())));
    }

    #[test]
    fn string_literal_is_trimmed_and_empty_is_omitted() {
        let literal = ColumnType::String.to_literal(&CellValue::Text("  Ada ".to_owned()));
        assert_eq!(literal, Ok(Some("'Ada'".to_owned())));
        assert_eq!(ColumnType::String.to_literal(&CellValue::Text("   ".to_owned())), Ok(None));
    }

    #[test]
    fn string_column_accepts_other_kinds_as_text() {
        assert_eq!(ColumnType::String.to_literal(&CellValue::Number(12.0)), Ok(Some("'12'".to_owned())));
        assert_eq!(ColumnType::String.to_literal(&CellValue::Boolean(true)), Ok(Some("'true'".to_owned())));
    }

    #[test]
    fn mismatched_kind_is_a_conversion_error() {
        let error = ColumnType::Numeric.to_literal(&CellValue::Text("n/a".to_owned()));
        assert_eq!(error, Err(ConversionError {
            expected: ColumnType::Numeric,
            found: CellKind::Text,
            value: "n/a".to_owned(),
        }));
        assert!(ColumnType::Boolean.to_literal(&CellValue::Number(1.0)).is_err());
        assert!(ColumnType::Date.to_literal(&CellValue::Number(44260.0)).is_err());
        assert!(ColumnType::Numeric.to_literal(&date(2021, 3, 5, 0, 0)).is_err());
    }
}
