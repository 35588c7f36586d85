//! BusinessDepartment report: one sales section per column, projected into
//! nested fee / gross-profit / unit / inquiry figures.
//!
//! This template is the odd one out: the subject-column count is derived
//! from the header's section markers rather than the used range, the data
//! window is a fixed row band, and the walk keeps raw cells because the
//! first band row maps the sheet title to the branch *name* and the
//! passthrough figures ship un-normalized.

use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::branches::BranchDirectory;
use crate::error::{ReportError, ReportResult};
use crate::numeric::cell_ratio;
use crate::report::extract::{walk_columns, ColumnWalk};
use crate::sheet::SheetGrid;
use crate::types::{CellValue, RawRecord};

/// Column naming each data row.
const LABEL_COLUMN: u32 = 1;
/// First section column.
const SUBJECT_START_COLUMN: u32 = 3;
/// Fixed data band of this template.
const FIRST_DATA_ROW: u32 = 1;
const LAST_DATA_ROW: u32 = 32;
/// The subject window is the marker count widened by this pad, which pulls
/// in the template's trailer columns.
const SUBJECT_WINDOW_PAD: u32 = 5;
/// Trailing subjects that are summary/total columns, never departments.
const SUMMARY_TRAILER_COLUMNS: usize = 2;
/// Header cells counted when sizing the subject window.
const SECTION_MARKERS: [&str; 2] = ["営業１課", "営業２課"];
/// Digit run before the month glyph in the sheet title.
const MONTH_MARKER_PATTERN: &str = r"(\d+)月";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRecord {
    pub month: String,
    pub branch: u32,
    pub data: DepartmentFigures,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentFigures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_budget: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_record: Option<CellValue>,
    pub commission_achievement_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_management_gross_profit_budget: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profit_performance_of_direct_management: Option<CellValue>,
    pub gross_profit_achievement_rate_of_direct_management: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_units_under_direct_management_budget: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_number_of_directly_managed_units: Option<CellValue>,
    pub achievement_rate_of_directly_managed_units: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_inquiries: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_deals_closed: Option<CellValue>,
    pub closing_rate: f64,
}

pub fn extract<P: AsRef<Path>>(
    path: P,
    branches: &dyn BranchDirectory,
) -> ReportResult<Vec<DepartmentRecord>> {
    let grid = SheetGrid::open(path)?;
    extract_from_grid(&grid, branches)
}

fn extract_from_grid(
    grid: &SheetGrid,
    branches: &dyn BranchDirectory,
) -> ReportResult<Vec<DepartmentRecord>> {
    let header = first_populated_row(grid).ok_or(ReportError::EmptySheet)?;
    let title = header[0].to_text();
    let month = month_marker(&title)?;

    let marker_count = header
        .iter()
        .filter(|cell| SECTION_MARKERS.contains(&cell.to_text().as_str()))
        .count() as u32;

    let walk = ColumnWalk {
        label_column: LABEL_COLUMN,
        subject_columns: SUBJECT_START_COLUMN..=marker_count + SUBJECT_WINDOW_PAD - 1,
        data_rows: FIRST_DATA_ROW..=LAST_DATA_ROW,
        period_label: None,
        keep_raw: true,
    };
    let mut records = walk_columns(grid, &walk)?;
    // The window's final subjects are the template's summary and total
    // columns; they must never surface as departments.
    records.truncate(records.len().saturating_sub(SUMMARY_TRAILER_COLUMNS));

    records
        .into_iter()
        .map(|record| project(&record, &title, &month, branches))
        .collect()
}

/// Non-empty cells of the first populated row, in column order. Mirrors
/// the template contract that the title and section markers share the
/// top-most used row.
fn first_populated_row(grid: &SheetGrid) -> Option<Vec<CellValue>> {
    let (max_row, max_column) = grid.used_range();
    for row in 1..=max_row {
        let cells: Vec<CellValue> = (1..=max_column)
            .filter_map(|column| grid.cell(row, column))
            .collect();
        if !cells.is_empty() {
            return Some(cells);
        }
    }
    None
}

fn month_marker(title: &str) -> ReportResult<String> {
    let pattern = Regex::new(MONTH_MARKER_PATTERN)?;
    pattern
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().to_string())
        .ok_or_else(|| ReportError::MissingMonthMarker(title.to_string()))
}

fn project(
    record: &RawRecord,
    title: &str,
    month: &str,
    branches: &dyn BranchDirectory,
) -> ReportResult<DepartmentRecord> {
    // The title row maps the sheet title to this subject's branch label.
    let label = record
        .get(title)
        .map(|cell| cell.to_text())
        .unwrap_or_default();
    let branch = branches
        .branch_number(&label)
        .ok_or_else(|| ReportError::UnknownBranch(label))?;

    let figure = |name: &str| record.get(name).cloned();
    let rate = |numerator: &str, denominator: &str| {
        cell_ratio(record.get(numerator), record.get(denominator))
    };

    Ok(DepartmentRecord {
        month: month.to_string(),
        branch,
        data: DepartmentFigures {
            fee_budget: figure("feeBudget"),
            fee_record: figure("feeRecord"),
            commission_achievement_rate: rate("feeRecord", "feeBudget"),
            direct_management_gross_profit_budget: figure("grossProfitBudget"),
            gross_profit_performance_of_direct_management: figure("grossProfitResults"),
            gross_profit_achievement_rate_of_direct_management: rate(
                "grossProfitResults",
                "grossProfitBudget",
            ),
            number_of_units_under_direct_management_budget: figure("unitBudget"),
            actual_number_of_directly_managed_units: figure("numberOfUnits"),
            achievement_rate_of_directly_managed_units: rate("numberOfUnits", "unitBudget"),
            number_of_inquiries: figure("numberOfInquiries"),
            number_of_deals_closed: figure("numberOfContractsClosed"),
            closing_rate: rate("numberOfContractsClosed", "numberOfInquiries"),
        },
    })
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::branches::BranchTable;

    const TITLE: &str = "営業部 8月度実績";

    /// Two section columns plus the summary and total trailer columns.
    fn department_grid() -> SheetGrid {
        let mut range = Range::new((0, 0), (32, 6));
        range.set_value((0, 0), Data::String(TITLE.to_string()));
        range.set_value((0, 2), Data::String("営業１課".to_string()));
        range.set_value((0, 3), Data::String("営業２課".to_string()));
        range.set_value((0, 4), Data::String("合計".to_string()));
        range.set_value((0, 5), Data::String("全社".to_string()));

        range.set_value((2, 0), Data::String("feeBudget".to_string()));
        range.set_value((3, 0), Data::String("feeRecord".to_string()));
        range.set_value((4, 0), Data::String("numberOfInquiries".to_string()));
        range.set_value((5, 0), Data::String("numberOfContractsClosed".to_string()));
        for column in 2..6 {
            range.set_value((2, column), Data::Float(200.0));
            range.set_value((3, column), Data::Float(150.0));
            range.set_value((4, column), Data::String("8件".to_string()));
            range.set_value((5, column), Data::String("2件".to_string()));
        }
        SheetGrid::from_range(range)
    }

    fn directory() -> BranchTable {
        BranchTable::from_entries(&[("営業１課", 101), ("営業２課", 102)])
    }

    #[test]
    fn trailer_columns_never_become_departments() {
        let records = extract_from_grid(&department_grid(), &directory()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].branch, 101);
        assert_eq!(records[1].branch, 102);
    }

    #[test]
    fn month_comes_from_the_title_marker() {
        let records = extract_from_grid(&department_grid(), &directory()).unwrap();
        assert_eq!(records[0].month, "8");
    }

    #[test]
    fn figures_pass_through_raw_and_rates_strip_units() {
        let records = extract_from_grid(&department_grid(), &directory()).unwrap();
        let data = &records[0].data;
        assert_eq!(data.fee_budget, Some(CellValue::Number(200.0)));
        assert_eq!(data.fee_record, Some(CellValue::Number(150.0)));
        assert_eq!(data.commission_achievement_rate, 0.75);
        assert_eq!(
            data.number_of_inquiries,
            Some(CellValue::Text("8件".to_string()))
        );
        assert_eq!(data.closing_rate, 0.25);
        // No gross-profit rows in this fixture: raw passthroughs stay
        // absent and the rate degrades to zero.
        assert_eq!(data.direct_management_gross_profit_budget, None);
        assert_eq!(data.gross_profit_achievement_rate_of_direct_management, 0.0);
    }

    #[test]
    fn unknown_branch_label_aborts_the_run() {
        let table = BranchTable::from_entries(&[("営業１課", 101)]);
        let result = extract_from_grid(&department_grid(), &table);
        assert!(matches!(result, Err(ReportError::UnknownBranch(label)) if label == "営業２課"));
    }

    #[test]
    fn title_without_month_marker_is_an_error() {
        let mut range = Range::new((0, 0), (32, 4));
        range.set_value((0, 0), Data::String("営業部 年間実績".to_string()));
        range.set_value((0, 2), Data::String("営業１課".to_string()));
        let grid = SheetGrid::from_range(range);
        assert!(matches!(
            extract_from_grid(&grid, &directory()),
            Err(ReportError::MissingMonthMarker(_))
        ));
    }

    #[test]
    fn empty_sheet_is_an_error() {
        let grid = SheetGrid::from_range(Range::empty());
        assert!(matches!(
            extract_from_grid(&grid, &directory()),
            Err(ReportError::EmptySheet)
        ));
    }

    #[test]
    fn absent_figures_are_omitted_from_the_wire() {
        let records = extract_from_grid(&department_grid(), &directory()).unwrap();
        let json = serde_json::to_string(&records[0]).unwrap();
        assert!(json.contains("\"month\":\"8\""));
        assert!(json.contains("\"branch\":101"));
        assert!(json.contains("\"feeBudget\":200.0"));
        assert!(json.contains("\"commissionAchievementRate\":0.75"));
        assert!(!json.contains("\"directManagementGrossProfitBudget\""));
    }
}
