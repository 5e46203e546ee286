use almanac_model::error::ModelError;
use almanac_rfc::error::RfcError;
use almanac_rfc::rfc::ical::parse::ParseError;
use thiserror::Error;

/// Calendar mapping errors
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Malformed iCalendar text.
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// A required property is missing, or properties conflict.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed input in a dialect this mapper does not speak.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("RFC error: {0}")]
    Rfc(#[from] RfcError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl CalendarError {
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    pub(crate) fn missing(property: &str) -> Self {
        Self::Validation(format!("{property} is required"))
    }

    pub(crate) fn invalid(property: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{property}: {reason}"))
    }
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
