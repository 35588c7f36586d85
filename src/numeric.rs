//! Numeric normalization and ratio policy shared by every report.
//!
//! The sheets mix plain numbers with decorated text (`"¥12,300"`, `"25台"`,
//! `"2023年4月度"`), so all four transforms funnel through the same three
//! helpers. The rounding and zero-guard policy in [`ratio`] must stay
//! identical across reports; output rates are only comparable because of it.

use crate::error::{ReportError, ReportResult};
use crate::types::CellValue;

/// Unit glyphs ("units" / "items") stripped from ratio operands.
const UNIT_GLYPHS: [char; 2] = ['台', '件'];

/// Coerce a cell to a number. Numbers pass through unchanged; text keeps
/// only ASCII digits and `-` and is parsed as a signed integer, which
/// tolerates currency symbols, thousands separators, and unit suffixes.
/// Anything unparsable, including an absent cell, is `0`.
pub fn to_number(value: Option<&CellValue>) -> f64 {
    match value {
        None => 0.0,
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => {
            let stripped: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            stripped.parse::<i64>().map(|n| n as f64).unwrap_or(0.0)
        }
    }
}

/// Normalize a period cell of the form `"<year>年<month>月…"` into
/// `"<year>/<MM>"`, zero-padding single-digit months.
///
/// This is a strict-format field: a non-text cell or missing delimiters
/// abort the whole transform rather than degrading to a best-effort value.
pub fn to_month_label(value: Option<&CellValue>) -> ReportResult<String> {
    let text = match value {
        Some(CellValue::Text(s)) => s,
        Some(other) => return Err(ReportError::MalformedPeriodLabel(other.to_text())),
        None => return Err(ReportError::MalformedPeriodLabel(String::new())),
    };
    let (year, rest) = text
        .split_once('年')
        .ok_or_else(|| ReportError::MalformedPeriodLabel(text.clone()))?;
    let (month, _) = rest
        .split_once('月')
        .ok_or_else(|| ReportError::MalformedPeriodLabel(text.clone()))?;
    if month.len() == 1 {
        Ok(format!("{year}/0{month}"))
    } else {
        Ok(format!("{year}/{month}"))
    }
}

/// Safe quotient: a zero numerator or denominator yields `0` instead of an
/// error or a non-finite value; otherwise the quotient rounded to two
/// decimal places, half-up.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if numerator == 0.0 || denominator == 0.0 {
        return 0.0;
    }
    round_2dp(numerator / denominator)
}

/// [`ratio`] over raw cells: unit glyphs are stripped from text operands
/// before coercion, so `"25台" / "50台"` divides as `25 / 50`.
pub fn cell_ratio(numerator: Option<&CellValue>, denominator: Option<&CellValue>) -> f64 {
    ratio(coerce_operand(numerator), coerce_operand(denominator))
}

fn coerce_operand(value: Option<&CellValue>) -> f64 {
    match value {
        Some(CellValue::Text(s)) => {
            let stripped: String = s.chars().filter(|c| !UNIT_GLYPHS.contains(c)).collect();
            to_number(Some(&CellValue::Text(stripped)))
        }
        other => to_number(other),
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
