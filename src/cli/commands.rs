use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::branches::BranchTable;
use crate::error::ReportResult;
use crate::report;
use crate::types::ReportType;

/// Execute the extract command: run one report transform against a local
/// workbook and emit the records as JSON.
pub fn extract(
    file: PathBuf,
    report_type: ReportType,
    branches: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> ReportResult<()> {
    println!("{}", "📊 Solreport - Extracting records".bold().green());
    println!("   File: {}", file.display());
    println!(
        "   Report: {}\n",
        report_type.as_str().bright_blue().bold()
    );

    let table = match branches {
        Some(path) => BranchTable::load(path)?,
        None => BranchTable::default(),
    };

    let records = report::extract(report_type, &file, &table)?;
    let json = if pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{}",
                format!(
                    "✅ Wrote {} record(s) to {}",
                    records.len(),
                    path.display()
                )
                .green()
            );
        }
        None => {
            println!("{json}");
            println!();
            println!(
                "{}",
                format!("✅ Extracted {} record(s)", records.len()).green()
            );
        }
    }

    Ok(())
}
