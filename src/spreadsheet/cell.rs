use calamine::Data;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use std::fmt::Display;

/// Native kind of a spreadsheet cell, as reported by the reader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values without date formatting
    Number,
    /// Numeric values carrying a date/time number format
    Date,
    /// Text values
    Text,
}

impl CellKind {
    /// Returns the kind name used in messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CellKind::Boolean => "boolean",
            CellKind::Number => "numeric",
            CellKind::Date => "date-formatted numeric",
            CellKind::Text => "text",
        }
    }
}

impl Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value extracted from one sheet cell.
///
/// Formula cells are represented by their evaluated value. Empty cells are
/// never represented: readers store `None` in their place.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Boolean(bool),
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Returns the kind of the value.
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Date(_) => CellKind::Date,
            CellValue::Text(_) => CellKind::Text,
        }
    }

    /// Converts a calamine cell into a value, returning `None` for empty cells.
    pub(crate) fn from_data(data: &Data) -> Option<Self> {
        match data {
            Data::Empty => None,
            Data::Bool(value) => Some(CellValue::Boolean(*value)),
            Data::Int(value) => Some(CellValue::Number(*value as f64)),
            Data::Float(value) => Some(CellValue::Number(*value)),
            Data::String(value) => Some(CellValue::Text(value.to_owned())),
            Data::DateTime(value) if value.is_datetime() => match value.as_datetime() {
                // Excel stores times as fractions of a day; drop float noise
                Some(datetime) => Some(CellValue::Date(datetime.round_subsecs(0))),
                None => Some(CellValue::Number(value.as_f64())),
            },
            Data::DateTime(value) => Some(CellValue::Number(value.as_f64())),
            Data::DateTimeIso(value) => Some(
                parse_iso_datetime(value)
                    .map(CellValue::Date)
                    .unwrap_or_else(|| CellValue::Text(value.to_owned())),
            ),
            Data::DurationIso(value) => Some(CellValue::Text(value.to_owned())),
            Data::Error(error) => Some(CellValue::Text(error.to_string())),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Boolean(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Text layout of date literals, e.g. `2021-03-05 14:30`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses ISO 8601 date or date-time strings as written by OpenDocument files.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// Convert 0-based row & column indexes to an Excel-style cell position.
pub fn cell_position(row: usize, column: usize) -> String {
    let mut column = column + 1;
    let mut position = String::new();
    while column > 0 {
        column -= 1;
        position.insert(0, char::from(b'A' + (column % 26) as u8));
        column /= 26;
    }
    position.push_str((row + 1).to_string().as_str());
    position
}
