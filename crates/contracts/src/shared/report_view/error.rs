use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportViewError {
    #[error("column `{key}` is not part of report `{report}`")]
    UnknownColumn { report: String, key: String },

    #[error("report `{0}` has no list table")]
    MissingList(String),

    #[error("unknown report `{0}`")]
    UnknownReport(String),

    #[error("csv export failed: {0}")]
    Csv(String),
}

impl From<csv::Error> for ReportViewError {
    fn from(err: csv::Error) -> Self {
        ReportViewError::Csv(err.to_string())
    }
}
