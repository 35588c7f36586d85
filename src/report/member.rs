//! MemberSol report: per-member consignment results, one person per column.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportResult;
use crate::numeric::ratio;
use crate::report::extract::{walk_columns, ColumnWalk};
use crate::report::{record_number, record_text};
use crate::sheet::SheetGrid;
use crate::types::RawRecord;

/// Column naming each data row.
const LABEL_COLUMN: u32 = 1;
/// First person column; everything from here to the used-range end is a
/// subject.
const SUBJECT_START_COLUMN: u32 = 3;
/// First data row below the header.
const FIRST_DATA_ROW: u32 = 2;
/// Shared team name, read once per run.
const HEADER_NAME_CELL: (u32, u32) = (1, 2);
/// Label whose cells hold the reporting period.
const PERIOD_LABEL: &str = "part";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSolRecord {
    pub name: String,
    pub part: String,
    pub consignment_unit_budget: f64,
    pub number_of_units_entrusted: f64,
    /// Carries the subdivisions achievement rate: the legacy wire format
    /// emitted two ratios under this one key and the last write won.
    pub achievement_rate_of_units: f64,
    pub budget_for_the_number_of_subdivisions_entrusted: f64,
    pub number_of_units_entrusted_for_sale: f64,
    pub entrusted_simple_gross_profit_budget: f64,
    pub consignment_simple_gross_profit_results: f64,
    pub contracted_simple_gross_profit_average: f64,
    pub gross_profit_rate: f64,
}

pub fn extract<P: AsRef<Path>>(path: P) -> ReportResult<Vec<MemberSolRecord>> {
    let grid = SheetGrid::open(path)?;
    let (max_row, max_column) = grid.used_range();
    let name = grid
        .cell(HEADER_NAME_CELL.0, HEADER_NAME_CELL.1)
        .map(|cell| cell.to_text())
        .unwrap_or_default();

    let walk = ColumnWalk {
        label_column: LABEL_COLUMN,
        subject_columns: SUBJECT_START_COLUMN..=max_column,
        data_rows: FIRST_DATA_ROW..=max_row,
        period_label: Some(PERIOD_LABEL),
        keep_raw: false,
    };
    let records = walk_columns(&grid, &walk)?;
    Ok(records
        .into_iter()
        .map(|record| project(&record, &name))
        .collect())
}

fn project(record: &RawRecord, name: &str) -> MemberSolRecord {
    let budget_unit = record_number(record, "budgetUnit");
    let actual_units = record_number(record, "actualUnits");
    let budget_minutes = record_number(record, "budgetMinutes");
    let achievements_minutes = record_number(record, "achievementsMinutes");
    let gross_profit_total_budget = record_number(record, "grossProfitTotalBudget");
    let total_gross_profit = record_number(record, "totalGrossProfit");

    MemberSolRecord {
        name: name.to_string(),
        part: record_text(record, PERIOD_LABEL),
        consignment_unit_budget: budget_unit,
        number_of_units_entrusted: actual_units,
        achievement_rate_of_units: ratio(achievements_minutes, budget_minutes),
        budget_for_the_number_of_subdivisions_entrusted: budget_minutes,
        number_of_units_entrusted_for_sale: achievements_minutes,
        entrusted_simple_gross_profit_budget: gross_profit_total_budget,
        consignment_simple_gross_profit_results: total_gross_profit,
        contracted_simple_gross_profit_average: ratio(total_gross_profit, actual_units),
        gross_profit_rate: ratio(total_gross_profit, gross_profit_total_budget),
    }
}
