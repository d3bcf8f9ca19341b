use crate::spreadsheet::cell::CellValue;
use calamine::Data;
use calamine::Range;

/// One physical row of a sheet.
///
/// Cells are aligned by ordinal: `cells[i]` is the i-th column of the sheet's
/// used range, `None` where the cell is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Row index in the sheet (0-based)
    pub index: usize,
    /// Column offset of the first cell in the sheet (0-based)
    pub offset: usize,
    pub cells: Vec<Option<CellValue>>,
}

impl Row {
    /// Creates a row at the given sheet index with ordinal-aligned cells.
    pub fn new(index: usize, cells: Vec<Option<CellValue>>) -> Self {
        Self { index, offset: 0, cells }
    }

    /// Returns the cell at the given ordinal, if present.
    pub fn get(&self, ordinal: usize) -> Option<&CellValue> {
        self.cells.get(ordinal).and_then(Option::as_ref)
    }

    /// Returns true if the row has no non-empty cell.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of cells up to and including the last non-empty one.
    pub fn width(&self) -> usize {
        self.cells
            .iter()
            .rposition(Option::is_some)
            .map(|index| index + 1)
            .unwrap_or(0)
    }
}

/// A sheet made of its physical rows, in ascending row order.
///
/// Rows without any non-empty cell do not exist physically and are not kept,
/// so `rows[0]` is the header and `rows[1]` the sample row.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Creates a sheet, dropping rows that have no non-empty cell.
    pub fn new(name: &str, rows: Vec<Row>) -> Self {
        Self {
            name: name.to_owned(),
            rows: rows.into_iter().filter(|row| !row.is_empty()).collect(),
        }
    }

    /// Builds a sheet from a calamine range, keeping absolute row indexes.
    pub(crate) fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (row_lower_bound, col_lower_bound) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));
        let rows = range
            .rows()
            .enumerate()
            .map(|(index, cells)| Row {
                index: row_lower_bound + index,
                offset: col_lower_bound,
                cells: cells.iter().map(CellValue::from_data).collect(),
            })
            .collect();
        Self::new(name, rows)
    }

    /// Returns true if the sheet has no physical rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first physical row, holding column names.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// The second physical row, used to infer column types.
    pub fn sample(&self) -> Option<&Row> {
        self.rows.get(1)
    }

    /// Every physical row after the header, the sample row included.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<CellValue> {
        Some(CellValue::Text(value.to_owned()))
    }

    #[test]
    fn sheet_drops_empty_rows() {
        let sheet = Sheet::new("", vec![
            Row::new(0, vec![text("a"), text("b")]),
            Row::new(1, vec![None, None]),
            Row::new(2, vec![None, text("x")]),
        ]);

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.header().map(|row| row.index), Some(0));
        assert_eq!(sheet.sample().map(|row| row.index), Some(2));
    }

    #[test]
    fn data_rows_include_sample() {
        let sheet = Sheet::new("", vec![
            Row::new(0, vec![text("a")]),
            Row::new(1, vec![text("1")]),
            Row::new(2, vec![text("2")]),
        ]);

        let indexes: Vec<usize> = sheet.data_rows().map(|row| row.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn row_width_ignores_trailing_empty_cells() {
        let row = Row::new(0, vec![text("a"), None, text("c"), None, None]);
        assert_eq!(row.width(), 3);
        assert_eq!(row.get(1), None);
        assert_eq!(row.get(2), Some(&CellValue::Text("c".to_owned())));
        assert_eq!(row.get(10), None);
    }

    #[test]
    fn sheet_from_range_keeps_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (4, 2));
        range.set_value((2, 1), Data::String("Name".to_owned()));
        range.set_value((2, 2), Data::String("Age".to_owned()));
        range.set_value((4, 1), Data::String("Ada".to_owned()));
        range.set_value((4, 2), Data::Int(36));

        let sheet = Sheet::from_range("People", &range);

        assert_eq!(sheet.name, "People");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].index, 2);
        assert_eq!(sheet.rows[0].offset, 1);
        assert_eq!(sheet.rows[1].index, 4);
        assert_eq!(sheet.rows[1].get(1), Some(&CellValue::Number(36.0)));
    }
}
