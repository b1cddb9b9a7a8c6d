use thiserror::Error;

/// The reason a single input row was rejected by the CSV loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid field count: expected 6, got {0}")]
    InvalidFieldCount(usize),

    #[error("empty customer name")]
    EmptyCustomerName,

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid start time: {0}")]
    InvalidStartTime(String),

    #[error("invalid end time: {0}")]
    InvalidEndTime(String),

    #[error("invalid number of calls: {0}")]
    InvalidNumberOfCalls(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read or write JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read or write CSV data: {0}")]
    CsvError(#[from] csv::Error),

    #[error("parse error at line {line}: {kind} (record: {record:?})")]
    ParseError { line: u64, record: Vec<String>, kind: ParseErrorKind },

    #[error("utilization must be within (0, 1], got {0}")]
    InvalidUtilization(f64),

    #[error("unknown time zone: '{0}'")]
    UnknownTimeZone(String),

    #[error("format must be one of: text, json, csv (got: {0})")]
    InvalidFormat(String),

    #[error("invalid reference date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
