use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC codec and value errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrenceRule(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidUtcOffset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
