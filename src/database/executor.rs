use crate::database::statement::Statement;
use std::io::Write;
use thiserror::Error;

/// Errors raised by a statement executor. They are never downgraded.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Failed to write statement: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Statement rejected: {message}")]
    Rejected { message: String },
}

/// Channel that runs generated statements one at a time.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &Statement) -> Result<(), ExecutionError>;
}

/// Collects statements in memory.
impl StatementExecutor for Vec<Statement> {
    fn execute(&mut self, statement: &Statement) -> Result<(), ExecutionError> {
        self.push(statement.to_owned());
        Ok(())
    }
}

/// Writes statements as an SQL script, one per line.
pub struct ScriptWriter<W: Write> {
    writer: W,
}

impl<W: Write> ScriptWriter<W> {
    /// Wraps a writer; each statement is written followed by a newline.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, ExecutionError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> StatementExecutor for ScriptWriter<W> {
    fn execute(&mut self, statement: &Statement) -> Result<(), ExecutionError> {
        writeln!(self.writer, "{statement}")?;
        Ok(())
    }
}
