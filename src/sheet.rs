//! Cell-grid access over an opened workbook.
//!
//! Wraps calamine's first-worksheet range behind the 1-indexed, read-only
//! addressing the report walks are written against: `cell(row, column)` and
//! the used-range bounding box. No formulas are evaluated; only computed
//! cell values are read.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::{ReportError, ReportResult};
use crate::types::CellValue;

/// Read-only view over the first worksheet of an `.xlsx` workbook.
pub struct SheetGrid {
    range: Range<Data>,
}

impl SheetGrid {
    /// Open a workbook and take its first worksheet. Later worksheets are
    /// ignored. An unreadable file or an empty workbook aborts the report.
    pub fn open<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let sheet_names = workbook.sheet_names().to_vec();
        let first_sheet = sheet_names.first().ok_or(ReportError::MissingWorksheet)?;
        let range = workbook.worksheet_range(first_sheet)?;
        Ok(Self { range })
    }

    pub(crate) fn from_range(range: Range<Data>) -> Self {
        Self { range }
    }

    /// Value at the given 1-indexed position, `None` for empty cells and
    /// positions outside the used range.
    pub fn cell(&self, row: u32, column: u32) -> Option<CellValue> {
        if row == 0 || column == 0 {
            return None;
        }
        self.range
            .get_value((row - 1, column - 1))
            .and_then(convert_cell)
    }

    /// `(max_row, max_column)` of the used range, 1-indexed; `(0, 0)` for an
    /// empty sheet.
    pub fn used_range(&self) -> (u32, u32) {
        match self.range.end() {
            Some((row, column)) => (row + 1, column + 1),
            None => (0, 0),
        }
    }
}

fn convert_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Number(f64::from(*b))),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> SheetGrid {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("label".to_string()));
        range.set_value((1, 1), Data::Float(12.5));
        range.set_value((2, 2), Data::Int(-3));
        SheetGrid::from_range(range)
    }

    #[test]
    fn cell_is_one_indexed() {
        let grid = grid_3x3();
        assert_eq!(grid.cell(1, 1), Some(CellValue::Text("label".to_string())));
        assert_eq!(grid.cell(2, 2), Some(CellValue::Number(12.5)));
        assert_eq!(grid.cell(3, 3), Some(CellValue::Number(-3.0)));
    }

    #[test]
    fn empty_and_out_of_range_cells_are_absent() {
        let grid = grid_3x3();
        assert_eq!(grid.cell(1, 2), None);
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(9, 9), None);
    }

    #[test]
    fn used_range_is_one_indexed_bounds() {
        assert_eq!(grid_3x3().used_range(), (3, 3));
    }

    #[test]
    fn empty_sheet_has_zero_bounds() {
        let grid = SheetGrid::from_range(Range::empty());
        assert_eq!(grid.used_range(), (0, 0));
        assert_eq!(grid.cell(1, 1), None);
    }

    #[test]
    fn open_missing_file_is_an_error() {
        assert!(SheetGrid::open("does-not-exist.xlsx").is_err());
    }
}
