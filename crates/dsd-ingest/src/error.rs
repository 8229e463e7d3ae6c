use thiserror::Error;

/// Structural problems with the extract. All of these are fatal: the run
/// aborts rather than validating a misparsed grid.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("extract must have at least {required} columns, found {found}")]
    TooFewColumns { required: usize, found: usize },
    #[error("extract has no year header row (expected at row {row})")]
    MissingHeaderRow { row: usize },
    #[error("extract has no account rows in the data range")]
    NoAccountRows,
    #[error("no year column yielded any parseable amount")]
    NoYearData,
}

pub type Result<T> = std::result::Result<T, IngestError>;
