//! KpiSol report: proposal and visit KPIs, one month per row.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportResult;
use crate::numeric::{ratio, to_number};
use crate::report::extract::{walk_rows, RowWalk};
use crate::report::record_number;
use crate::sheet::SheetGrid;
use crate::types::RawRecord;

/// Row whose cells name each data column.
const LABEL_ROW: u32 = 2;
/// First data column; the month column sits to its left.
const SUBJECT_START_COLUMN: u32 = 2;
/// First month row below the two header rows and the separator.
const FIRST_DATA_ROW: u32 = 4;
/// Person name, read once per run.
const HEADER_NAME_CELL: (u32, u32) = (1, 1);
/// Column holding each row's month number.
const MONTH_COLUMN: u32 = 1;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSolRecord {
    pub name: String,
    pub month: f64,
    pub target_number_of_proposals: f64,
    pub actual_number_of_proposals: f64,
    pub proposal_number_achievement_rate: f64,
    pub visit_target: f64,
    pub actual_number_of_visits: f64,
    pub achievement_rate_of_visits: f64,
}

pub fn extract<P: AsRef<Path>>(path: P) -> ReportResult<Vec<KpiSolRecord>> {
    let grid = SheetGrid::open(path)?;
    let (max_row, max_column) = grid.used_range();

    // Without the identifying name header every row would be a header or
    // separator mistaken for data, so the whole run yields nothing.
    let Some(name) = grid.cell(HEADER_NAME_CELL.0, HEADER_NAME_CELL.1) else {
        return Ok(Vec::new());
    };
    let name = name.to_text();

    let walk = RowWalk {
        label_row: LABEL_ROW,
        subject_rows: FIRST_DATA_ROW..=max_row,
        data_columns: SUBJECT_START_COLUMN..=max_column,
    };

    let mut output = Vec::new();
    for (index, record) in walk_rows(&grid, &walk).into_iter().enumerate() {
        // A row that picked up no labeled values never receives its name
        // context; skip it rather than emitting an all-zero record.
        if record.is_empty() {
            continue;
        }
        let row = FIRST_DATA_ROW + index as u32;
        let month = to_number(grid.cell(row, MONTH_COLUMN).as_ref());
        output.push(project(&record, &name, month));
    }
    Ok(output)
}

fn project(record: &RawRecord, name: &str, month: f64) -> KpiSolRecord {
    let goal_kpi = record_number(record, "goalKpi");
    let total = record_number(record, "total");
    let goal_kdi = record_number(record, "goalKdi");
    let appointments = record_number(record, "numberOfAppointments");

    KpiSolRecord {
        name: name.to_string(),
        month,
        target_number_of_proposals: goal_kpi,
        actual_number_of_proposals: total,
        proposal_number_achievement_rate: ratio(total, goal_kpi),
        visit_target: goal_kdi,
        actual_number_of_visits: appointments,
        achievement_rate_of_visits: ratio(appointments, goal_kdi),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::CellValue;

    fn raw(entries: &[(&str, f64)]) -> RawRecord {
        entries
            .iter()
            .map(|(label, value)| (label.to_string(), CellValue::Number(*value)))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn projection_computes_both_rates() {
        let record = raw(&[
            ("goalKpi", 8.0),
            ("total", 6.0),
            ("goalKdi", 10.0),
            ("numberOfAppointments", 7.0),
        ]);
        let projected = project(&record, "佐藤", 4.0);

        assert_eq!(projected.name, "佐藤");
        assert_eq!(projected.month, 4.0);
        assert_eq!(projected.target_number_of_proposals, 8.0);
        assert_eq!(projected.actual_number_of_proposals, 6.0);
        assert_eq!(projected.proposal_number_achievement_rate, 0.75);
        assert_eq!(projected.visit_target, 10.0);
        assert_eq!(projected.actual_number_of_visits, 7.0);
        assert_eq!(projected.achievement_rate_of_visits, 0.7);
    }

    #[test]
    fn zero_targets_yield_zero_rates() {
        let record = raw(&[("total", 6.0), ("numberOfAppointments", 7.0)]);
        let projected = project(&record, "佐藤", 4.0);

        assert_eq!(projected.proposal_number_achievement_rate, 0.0);
        assert_eq!(projected.achievement_rate_of_visits, 0.0);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_string(&project(&raw(&[]), "t", 1.0)).unwrap();
        assert!(json.contains("\"targetNumberOfProposals\""));
        assert!(json.contains("\"proposalNumberAchievementRate\""));
        assert!(json.contains("\"visitTarget\""));
        assert!(json.contains("\"actualNumberOfVisits\""));
        assert!(json.contains("\"achievementRateOfVisits\""));
    }
}
