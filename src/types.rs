use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

//==============================================================================
// Report type discriminator
//==============================================================================

/// The four report layouts this service understands.
///
/// The string forms are the wire discriminators sent by callers in the
/// upload form's `type` field and accepted by the CLI `--type` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportType {
    /// Per-member consignment report, one person per column
    MemberSol,
    /// Per-leader vehicle/gross-profit report, one person per column
    LeaderSol,
    /// Proposal/visit KPI report, one month per row
    KpiSol,
    /// Department summary report, one sales section per column
    #[value(name = "business")]
    BusinessDepartment,
}

impl ReportType {
    /// Parse a wire discriminator. `None` for anything outside the four
    /// known literals; the caller decides what an unknown type means.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "member-sol" => Some(ReportType::MemberSol),
            "leader-sol" => Some(ReportType::LeaderSol),
            "kpi-sol" => Some(ReportType::KpiSol),
            "business" => Some(ReportType::BusinessDepartment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::MemberSol => "member-sol",
            ReportType::LeaderSol => "leader-sol",
            ReportType::KpiSol => "kpi-sol",
            ReportType::BusinessDepartment => "business",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//==============================================================================
// Cell values
//==============================================================================

/// A non-empty cell value as read from the grid.
///
/// Serializes untagged, so raw passthrough fields ship as plain JSON
/// numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text form of the value, used for labels and header names.
    /// Integral numbers render without a trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            CellValue::Number(n) => format!("{n}"),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

//==============================================================================
// Raw records
//==============================================================================

/// One extracted subject before projection: raw label → value, built fresh
/// per subject by the label-keyed walks. Within one record a label is set
/// at most once; a later same-label cell overwrites the earlier one.
pub type RawRecord = HashMap<String, CellValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_discriminators() {
        assert_eq!(ReportType::parse("member-sol"), Some(ReportType::MemberSol));
        assert_eq!(ReportType::parse("leader-sol"), Some(ReportType::LeaderSol));
        assert_eq!(ReportType::parse("kpi-sol"), Some(ReportType::KpiSol));
        assert_eq!(
            ReportType::parse("business"),
            Some(ReportType::BusinessDepartment)
        );
    }

    #[test]
    fn parse_rejects_unknown_discriminators() {
        assert_eq!(ReportType::parse(""), None);
        assert_eq!(ReportType::parse("member"), None);
        assert_eq!(ReportType::parse("Member-Sol"), None);
        assert_eq!(ReportType::parse("business-department"), None);
    }

    #[test]
    fn discriminators_round_trip() {
        for ty in [
            ReportType::MemberSol,
            ReportType::LeaderSol,
            ReportType::KpiSol,
            ReportType::BusinessDepartment,
        ] {
            assert_eq!(ReportType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn cell_value_text_form() {
        assert_eq!(CellValue::Number(42.0).to_text(), "42");
        assert_eq!(CellValue::Number(4.25).to_text(), "4.25");
        assert_eq!(CellValue::Text("営業１課".to_string()).to_text(), "営業１課");
    }

    #[test]
    fn cell_value_serializes_untagged() {
        let number = serde_json::to_string(&CellValue::Number(12.0)).unwrap();
        assert_eq!(number, "12.0");
        let text = serde_json::to_string(&CellValue::Text("a".to_string())).unwrap();
        assert_eq!(text, "\"a\"");
    }
}
