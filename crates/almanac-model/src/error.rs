use thiserror::Error;

/// Calendar model errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Time zone not found: {0}")]
    TimeZoneNotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
