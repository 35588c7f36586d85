use clap::{Parser, Subcommand};
use solreport::cli;
use solreport::error::ReportResult;
use solreport::types::ReportType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solreport")]
#[command(about = "Extract sales-performance records from report workbooks")]
#[command(long_about = "Solreport - Label-driven spreadsheet extraction

Reads one of the four known report workbook layouts and emits a flat JSON
record list with derived achievement rates, gross-profit margins, and
closing rates.

REPORT TYPES:
  member-sol  - Per-member consignment report (one person per column)
  leader-sol  - Per-leader vehicle/gross-profit report (one person per column)
  kpi-sol     - Proposal/visit KPI report (one month per row)
  business    - Department summary report (one sales section per column)

EXAMPLES:
  solreport extract results.xlsx --type member-sol
  solreport extract kpi.xlsx --type kpi-sol --pretty
  solreport extract summary.xlsx --type business --branches branches.yaml

The department report resolves branch labels through the --branches YAML
table; every label on the sheet must have an entry.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from a report workbook
    Extract {
        /// Path to the workbook (.xlsx); only the first worksheet is read
        file: PathBuf,

        /// Report layout to extract
        #[arg(short = 't', long = "type", value_enum)]
        report_type: ReportType,

        /// Branch-table YAML (department report lookups)
        #[arg(short, long)]
        branches: Option<PathBuf>,

        /// Write the JSON records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON records
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ReportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            report_type,
            branches,
            output,
            pretty,
        } => cli::extract(file, report_type, branches, output, pretty),
    }
}
