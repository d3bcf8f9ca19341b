//! # Database Module
//!
//! Table definitions inferred from sheets, MySQL statement synthesis and the
//! executor seam generated statements are sent through.
pub(crate) mod column;
pub(crate) mod executor;
pub(crate) mod statement;
pub(crate) mod table;

pub use column::{Column, ColumnType, ConversionError};
pub use executor::{ExecutionError, ScriptWriter, StatementExecutor};
pub use statement::{quote_identifier, ErrorMode, Statement, StatementError, StatementKind, StatementSynthesizer};
pub use table::{resolve_column_names, SchemaInferenceError, Table};
