//! Solreport - sales-performance spreadsheet extraction
//!
//! This library reads one of four known report workbook layouts, extracts
//! labeled cell values via a label-keyed grid walk, and projects them into
//! flat record lists with derived performance ratios (achievement rates,
//! gross-profit margins, closing rates).
//!
//! # Example
//!
//! ```no_run
//! use solreport::branches::BranchTable;
//! use solreport::report;
//! use solreport::types::ReportType;
//!
//! let branches = BranchTable::default();
//! let records = report::extract(ReportType::MemberSol, "results.xlsx", &branches)?;
//!
//! println!("{} record(s)", records.len());
//! # Ok::<(), solreport::error::ReportError>(())
//! ```

pub mod api;
pub mod branches;
pub mod cli;
pub mod error;
pub mod numeric;
pub mod report;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use report::Report;
pub use types::{CellValue, RawRecord, ReportType};
