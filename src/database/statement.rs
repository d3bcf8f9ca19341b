//! MySQL statement synthesis for tables built from sheets.
//!
//! One table yields a `DROP TABLE IF EXISTS`, a `CREATE TABLE IF NOT EXISTS`
//! and one `INSERT` per data row. Identifiers are delimited with backticks and
//! are not escaped: names must not contain a backtick themselves.
use crate::database::column::ConversionError;
use crate::database::table::Table;
use crate::spreadsheet::cell_position;
use crate::spreadsheet::Row;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised while generating statements.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum StatementError {
    #[error("Failed to convert cell at {position} of table '{table}' (column '{column}', ordinal {ordinal}, row {row}): {source}")]
    ValueConversion {
        table: String,
        column: String,
        ordinal: usize,
        /// 1-based row number
        row: usize,
        position: String,
        source: ConversionError,
    },
}

/// Policy applied when a cell does not fit its column type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Abort with an error on the first failing cell
    #[default]
    Strict,
    /// Leave the failing cell out of the statement and continue
    Lenient,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Drop,
    Create,
    Insert,
}

/// A generated SQL statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
}

impl Statement {
    /// Returns what the statement does.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Returns the SQL text.
    pub fn as_str(&self) -> &str {
        &self.sql
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Delimits an identifier with backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{name}`")
}

/// Renders the statements of one table.
pub struct StatementSynthesizer<'a> {
    table: &'a Table,
    mode: ErrorMode,
}

impl<'a> StatementSynthesizer<'a> {
    /// Creates a synthesizer for the table with the given error policy.
    pub fn new(table: &'a Table, mode: ErrorMode) -> Self {
        Self { table, mode }
    }

    /// Returns the statement dropping the table if it exists.
    pub fn drop_table(&self) -> Statement {
        Statement {
            kind: StatementKind::Drop,
            sql: format!("DROP TABLE IF EXISTS {};", quote_identifier(&self.table.name)),
        }
    }

    /// Renders the create statement with the implicit auto-increment key
    /// followed by every usable column.
    pub fn create_table(&self) -> Statement {
        let primary_key = quote_identifier(&self.table.primary_key());
        let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", quote_identifier(&self.table.name));
        sql.push_str(&format!("\t{primary_key} int(11) NOT NULL AUTO_INCREMENT, \n"));
        for (column, kind) in self.table.usable_columns() {
            sql.push_str(&format!(
                "\t{} {} DEFAULT NULL, \n",
                quote_identifier(&column.name),
                kind.sql_type()
            ));
        }
        sql.push_str(&format!("\tPRIMARY KEY ({primary_key})\n"));
        sql.push_str(");\n");
        Statement { kind: StatementKind::Create, sql }
    }

    /// Renders the insert statement of one data row.
    ///
    /// Missing cells and empty text contribute nothing; a row that contributes
    /// nothing yields `Ok(None)`. In lenient mode failing cells are skipped and
    /// pushed to `failures`; in strict mode the first one is returned as error.
    pub fn insert_row(
        &self,
        row: &Row,
        failures: &mut Vec<StatementError>,
    ) -> Result<Option<Statement>, StatementError> {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (column, kind) in self.table.usable_columns() {
            let Some(cell) = row.get(column.ordinal) else {
                continue;
            };
            match kind.to_literal(cell) {
                Ok(Some(literal)) => {
                    columns.push(quote_identifier(&column.name));
                    values.push(literal);
                }
                Ok(None) => (),
                Err(source) => {
                    let error = StatementError::ValueConversion {
                        table: self.table.name.to_owned(),
                        column: column.name.to_owned(),
                        ordinal: column.ordinal,
                        row: row.index + 1,
                        position: cell_position(row.index, row.offset + column.ordinal),
                        source,
                    };
                    match self.mode {
                        ErrorMode::Strict => return Err(error),
                        ErrorMode::Lenient => {
                            tracing::warn!("{error}");
                            failures.push(error);
                        }
                    }
                }
            }
        }

        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(Statement {
            kind: StatementKind::Insert,
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({});",
                quote_identifier(&self.table.name),
                columns.join(","),
                values.join(",")
            ),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::column::Column;
    use crate::database::column::ColumnType;
    use crate::spreadsheet::CellKind;
    use crate::spreadsheet::CellValue;

    fn column(name: &str, ordinal: usize, kind: Option<ColumnType>) -> Option<Column> {
        Some(Column { name: name.to_owned(), ordinal, kind })
    }

    fn people() -> Table {
        Table {
            name: "People".to_owned(),
            columns: vec![
                column("Name", 0, Some(ColumnType::String)),
                None,
                column("Age", 2, Some(ColumnType::Numeric)),
                column("Note", 3, None),
                column("Active", 4, Some(ColumnType::Boolean)),
            ],
        }
    }

    fn text(value: &str) -> Option<CellValue> {
        Some(CellValue::Text(value.to_owned()))
    }

    #[test]
    fn drop_statement() {
        let table = people();
        let statement = StatementSynthesizer::new(&table, ErrorMode::Strict).drop_table();
        assert_eq!(statement.kind(), StatementKind::Drop);
        assert_eq!(statement.as_str(), "DROP TABLE IF EXISTS `People`;");
    }

    #[test]
    fn create_statement_lists_usable_columns() {
        let table = people();
        let statement = StatementSynthesizer::new(&table, ErrorMode::Strict).create_table();
        assert_eq!(statement.kind(), StatementKind::Create);
        assert_eq!(
            statement.as_str(),
            "CREATE TABLE IF NOT EXISTS `People` (\n\
             \t`PeopleID` int(11) NOT NULL AUTO_INCREMENT, \n\
             \t`Name` TEXT DEFAULT NULL, \n\
             \t`Age` DOUBLE DEFAULT NULL, \n\
             \t`Active` BOOLEAN DEFAULT NULL, \n\
             \tPRIMARY KEY (`PeopleID`)\n\
             );\n"
        );
    }

    #[test]
    fn identifiers_round_trip_through_quoting() {
        let table = people();
        let create = StatementSynthesizer::new(&table, ErrorMode::Strict).create_table();
        for (column, _) in table.usable_columns() {
            let quoted = quote_identifier(&column.name);
            assert!(create.as_str().contains(&quoted));
            assert_eq!(quoted.trim_matches('`'), column.name);
        }
    }

    #[test]
    fn insert_follows_ordinal_order() {
        let table = people();
        let row = Row::new(3, vec![
            text("O'Brien"),
            text("ignored"),
            Some(CellValue::Number(41.0)),
            text("untyped"),
            Some(CellValue::Boolean(false)),
        ]);
        let mut failures = Vec::new();
        let statement = StatementSynthesizer::new(&table, ErrorMode::Strict)
            .insert_row(&row, &mut failures)
            .unwrap()
            .unwrap();
        assert_eq!(statement.kind(), StatementKind::Insert);
        assert_eq!(
            statement.as_str(),
            "INSERT INTO `People` (`Name`,`Age`,`Active`) VALUES ('O\\'Brien',41,false);"
        );
        assert!(failures.is_empty());
    }

    #[test]
    fn missing_and_empty_cells_are_omitted() {
        let table = people();
        let row = Row::new(1, vec![text("  "), None, Some(CellValue::Number(7.5))]);
        let statement = StatementSynthesizer::new(&table, ErrorMode::Strict)
            .insert_row(&row, &mut Vec::new())
            .unwrap();
        assert_eq!(
            statement.map(|it| it.to_string()).as_deref(),
            Some("INSERT INTO `People` (`Age`) VALUES (7.5);")
        );
    }

    #[test]
    fn row_without_values_yields_nothing() {
        let table = people();
        let row = Row::new(1, vec![text(""), text("x"), None, text("untyped")]);
        let statement = StatementSynthesizer::new(&table, ErrorMode::Strict).insert_row(&row, &mut Vec::new());
        assert_eq!(statement, Ok(None));
    }

    #[test]
    fn strict_mode_aborts_on_conversion_error() {
        let table = people();
        let row = Row::new(4, vec![text("Ada"), None, text("unknown")]);
        let error = StatementSynthesizer::new(&table, ErrorMode::Strict)
            .insert_row(&row, &mut Vec::new())
            .unwrap_err();
        assert_eq!(error, StatementError::ValueConversion {
            table: "People".to_owned(),
            column: "Age".to_owned(),
            ordinal: 2,
            row: 5,
            position: "C5".to_owned(),
            source: ConversionError {
                expected: ColumnType::Numeric,
                found: CellKind::Text,
                value: "unknown".to_owned(),
            },
        });
        let message = error.to_string();
        assert!(message.contains("'Age'"));
        assert!(message.contains("ordinal 2"));
        assert!(message.contains("row 5"));
        assert!(message.contains("Numeric"));
    }

    #[test]
    fn lenient_mode_skips_failing_cells() {
        let table = people();
        let row = Row::new(4, vec![text("Ada"), None, text("unknown"), None, Some(CellValue::Number(1.0))]);
        let mut failures = Vec::new();
        let statement = StatementSynthesizer::new(&table, ErrorMode::Lenient)
            .insert_row(&row, &mut failures)
            .unwrap();
        assert_eq!(
            statement.map(|it| it.to_string()).as_deref(),
            Some("INSERT INTO `People` (`Name`) VALUES ('Ada');")
        );
        assert_eq!(failures.len(), 2);
        assert!(matches!(&failures[1], StatementError::ValueConversion { column, .. } if column == "Active"));
    }
}
