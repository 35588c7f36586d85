//! LeaderSol report: per-leader vehicle and gross-profit results, one
//! person per column. Same sheet geometry as MemberSol with a wider field
//! set and a budget-derived gross-profit baseline.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportResult;
use crate::numeric::ratio;
use crate::report::extract::{walk_columns, ColumnWalk};
use crate::report::{record_number, record_text};
use crate::sheet::SheetGrid;
use crate::types::RawRecord;

const LABEL_COLUMN: u32 = 1;
const SUBJECT_START_COLUMN: u32 = 3;
const FIRST_DATA_ROW: u32 = 2;
const HEADER_NAME_CELL: (u32, u32) = (1, 2);
const PERIOD_LABEL: &str = "part";

/// Fixed per-unit gross-profit assumption behind the budget baseline.
const GROSS_PROFIT_PER_UNIT: f64 = 8000.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderSolRecord {
    pub name: String,
    pub part: String,
    pub budget_for_net_increase_in_vehicles: f64,
    pub number_of_units_entrusted: f64,
    pub achievement_rate_of_units: f64,
    pub reduced_number_of_vehicles: f64,
    pub net_increase: f64,
    pub achievement_rate_of_net_increase_in_vehicles: f64,
    pub budget_for_the_number_of_subdivisions_entrusted: f64,
    pub number_of_units_entrusted_for_sale: f64,
    pub achievement_rate_of_number_of_units_sold: f64,
    pub entrusted_simple_gross_profit_budget: f64,
    pub consignment_simple_gross_profit_results: f64,
    pub contracted_simple_gross_profit_average: f64,
    pub car_reduction_gross_profit: f64,
    pub net_increase_in_gross_profit: f64,
    pub pull_full_car_total: f64,
    pub pull_average_full_occupancy: f64,
    pub gross_profit_rate: f64,
}

pub fn extract<P: AsRef<Path>>(path: P) -> ReportResult<Vec<LeaderSolRecord>> {
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

fn project(record: &RawRecord, name: &str) -> LeaderSolRecord {
    let budget_unit = record_number(record, "budgetUnit");
    let actual_units = record_number(record, "actualUnits");
    let reduced_vehicles = record_number(record, "reducedNumberOfVehicles");
    let net_increase = record_number(record, "netIncrease");
    let budget_minutes = record_number(record, "budgetMinutes");
    let achievements_minutes = record_number(record, "achievementsMinutes");
    let total_gross_profit = record_number(record, "totalGrossProfit");
    let pull_full_car_total = record_number(record, "pullFullCarTotal");

    // Gross-profit budget is derived from the unit budget, not read from
    // the sheet.
    let baseline = budget_unit * GROSS_PROFIT_PER_UNIT;

    LeaderSolRecord {
        name: name.to_string(),
        part: record_text(record, PERIOD_LABEL),
        budget_for_net_increase_in_vehicles: budget_unit,
        number_of_units_entrusted: actual_units,
        achievement_rate_of_units: ratio(actual_units, budget_unit),
        reduced_number_of_vehicles: reduced_vehicles,
        net_increase,
        achievement_rate_of_net_increase_in_vehicles: ratio(net_increase, budget_unit),
        budget_for_the_number_of_subdivisions_entrusted: budget_minutes,
        number_of_units_entrusted_for_sale: achievements_minutes,
        achievement_rate_of_number_of_units_sold: ratio(achievements_minutes, budget_minutes),
        entrusted_simple_gross_profit_budget: baseline,
        consignment_simple_gross_profit_results: total_gross_profit,
        contracted_simple_gross_profit_average: ratio(total_gross_profit, actual_units),
        car_reduction_gross_profit: baseline,
        net_increase_in_gross_profit: total_gross_profit - baseline,
        pull_full_car_total,
        pull_average_full_occupancy: ratio(pull_full_car_total, actual_units),
        gross_profit_rate: ratio(total_gross_profit - baseline, baseline),
    }
}
