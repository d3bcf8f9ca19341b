use thiserror::Error;

/// Main error type for sheet imports.
/// Aggregates errors from dependencies and internal modules.
#[derive(Error, Debug)]
pub enum SheetSqlError {
    #[error("{0}")]
    WithContextError(String),

    // Third-party library errors
    #[error("Invalid sheet path pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Database module errors
    #[error("{0}")]
    StatementError(#[from] crate::database::StatementError),

    #[error("{0}")]
    ExecutionError(#[from] crate::database::ExecutionError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SheetSqlError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SheetSqlError::WithContextError(format!("{}: {}", message, e)))
    }
}
