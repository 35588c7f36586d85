//! Report extraction: the label-keyed walks and the four transforms.

pub mod department;
pub mod extract;
pub mod kpi;
pub mod leader;
pub mod member;

use std::path::Path;

use serde::Serialize;

use crate::branches::BranchDirectory;
use crate::error::ReportResult;
use crate::numeric::to_number;
use crate::types::{CellValue, RawRecord, ReportType};

pub use department::DepartmentRecord;
pub use kpi::KpiSolRecord;
pub use leader::LeaderSolRecord;
pub use member::MemberSolRecord;

/// The records produced by one report run, in original subject order.
/// Untagged, so the wire body is the bare JSON array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    MemberSol(Vec<MemberSolRecord>),
    LeaderSol(Vec<LeaderSolRecord>),
    KpiSol(Vec<KpiSolRecord>),
    BusinessDepartment(Vec<DepartmentRecord>),
}

impl Report {
    pub fn len(&self) -> usize {
        match self {
            Report::MemberSol(records) => records.len(),
            Report::LeaderSol(records) => records.len(),
            Report::KpiSol(records) => records.len(),
            Report::BusinessDepartment(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the transform matching `report_type` against the workbook at `path`.
/// Single pass, no retries; any failure aborts the whole report with no
/// partial output.
pub fn extract<P: AsRef<Path>>(
    report_type: ReportType,
    path: P,
    branches: &dyn BranchDirectory,
) -> ReportResult<Report> {
    match report_type {
        ReportType::MemberSol => Ok(Report::MemberSol(member::extract(path)?)),
        ReportType::LeaderSol => Ok(Report::LeaderSol(leader::extract(path)?)),
        ReportType::KpiSol => Ok(Report::KpiSol(kpi::extract(path)?)),
        ReportType::BusinessDepartment => {
            Ok(Report::BusinessDepartment(department::extract(path, branches)?))
        }
    }
}

/// Numeric view of a raw-record field; absent labels read as `0`.
fn record_number(record: &RawRecord, label: &str) -> f64 {
    to_number(record.get(label))
}

/// Text view of a raw-record field; absent labels read as empty.
fn record_text(record: &RawRecord, label: &str) -> String {
    record
        .get(label)
        .map(CellValue::to_text)
        .unwrap_or_default()
}
