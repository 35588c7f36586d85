//! Label-keyed extraction walks.
//!
//! Every report reads the same way: a designated label column (or row)
//! names the fields, and each subject column (or row) contributes one raw
//! record mapping those labels to its own cells. The walks below carry the
//! whole layout as explicit parameters so each report module states its
//! template geometry as named constants instead of loop literals.

use std::ops::RangeInclusive;

use crate::error::ReportResult;
use crate::numeric::{to_month_label, to_number};
use crate::sheet::SheetGrid;
use crate::types::{CellValue, RawRecord};

/// Column-major walk: subjects are columns, labels live in a fixed column.
pub struct ColumnWalk {
    /// Column whose cells name each data row.
    pub label_column: u32,
    /// Columns extracted as distinct subjects, in output order.
    pub subject_columns: RangeInclusive<u32>,
    /// Rows read within each subject.
    pub data_rows: RangeInclusive<u32>,
    /// Label whose cells hold a strict `"<year>年<month>月"` period.
    pub period_label: Option<&'static str>,
    /// Store raw cells instead of normalized numbers, skipping empties.
    pub keep_raw: bool,
}

/// Row-major walk: subjects are rows, labels live in a fixed header row.
pub struct RowWalk {
    /// Row whose cells name each data column.
    pub label_row: u32,
    /// Rows extracted as distinct subjects, in output order.
    pub subject_rows: RangeInclusive<u32>,
    /// Columns read within each subject.
    pub data_columns: RangeInclusive<u32>,
}

/// Build one raw record per subject column. Rows with an empty label cell
/// are skipped; period cells go through the strict month normalization and
/// abort the walk when malformed.
pub fn walk_columns(grid: &SheetGrid, walk: &ColumnWalk) -> ReportResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    for column in walk.subject_columns.clone() {
        let mut record = RawRecord::new();
        for row in walk.data_rows.clone() {
            let Some(label_cell) = grid.cell(row, walk.label_column) else {
                continue;
            };
            let label = label_cell.to_text();
            let value = grid.cell(row, column);
            if walk.period_label == Some(label.as_str()) {
                let month = to_month_label(value.as_ref())?;
                record.insert(label, CellValue::Text(month));
                continue;
            }
            if walk.keep_raw {
                if let Some(value) = value {
                    record.insert(label, value);
                }
            } else {
                record.insert(label, CellValue::Number(to_number(value.as_ref())));
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Build one raw record per subject row. Columns with an empty label cell
/// in the header row are skipped; all values are normalized numbers.
pub fn walk_rows(grid: &SheetGrid, walk: &RowWalk) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for row in walk.subject_rows.clone() {
        let mut record = RawRecord::new();
        for column in walk.data_columns.clone() {
            let Some(label_cell) = grid.cell(walk.label_row, column) else {
                continue;
            };
            let value = grid.cell(row, column);
            record.insert(
                label_cell.to_text(),
                CellValue::Number(to_number(value.as_ref())),
            );
        }
        records.push(record);
    }
    records
}
