use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("workbook has no worksheets")]
    MissingWorksheet,

    #[error("sheet has no populated rows")]
    EmptySheet,

    #[error("malformed period label: {0:?}")]
    MalformedPeriodLabel(String),

    #[error("no month marker in sheet title: {0:?}")]
    MissingMonthMarker(String),

    #[error("unknown branch label: {0:?}")]
    UnknownBranch(String),

    #[error("branch table error: {0}")]
    BranchTable(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
