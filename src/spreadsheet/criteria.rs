use glob::Pattern;
use glob::PatternError;

/// Decides which sheets, and which columns of a sheet, are imported.
pub trait SheetFilter {
    /// Returns true if the sheet should become a table.
    fn accept_sheet(&self, sheet_name: &str) -> bool;

    /// Returns true if the (normalized) column should become a table column.
    fn accept_column(&self, sheet_name: &str, column_name: &str) -> bool;
}

/// Filter built from allowed paths of the form `sheet` or `sheet/column`.
///
/// Both parts are glob patterns. An empty path list accepts everything.
#[derive(Clone, Debug, Default)]
pub struct SheetPathFilter {
    paths: Vec<(Pattern, Option<Pattern>)>,
}

impl SheetPathFilter {
    /// Parses `sheet` or `sheet/column` glob paths.
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Result<Self, PatternError> {
        let paths = paths
            .iter()
            .map(|path| match path.as_ref().split_once('/') {
                Some((sheet, column)) => Ok((Pattern::new(sheet)?, Some(Pattern::new(column)?))),
                None => Ok((Pattern::new(path.as_ref())?, None)),
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { paths })
    }
}

impl SheetFilter for SheetPathFilter {
    fn accept_sheet(&self, sheet_name: &str) -> bool {
        self.paths.is_empty() || self.paths.iter().any(|(sheet, _)| sheet.matches(sheet_name))
    }

    fn accept_column(&self, sheet_name: &str, column_name: &str) -> bool {
        self.paths.is_empty()
            || self
                .paths
                .iter()
                .filter(|(sheet, _)| sheet.matches(sheet_name))
                .any(|(_, column)| column.as_ref().map(|it| it.matches(column_name)).unwrap_or(true))
    }
}
