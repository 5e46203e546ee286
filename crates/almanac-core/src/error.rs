use thiserror::Error;

/// Errors raised while assembling settings
#[derive(Error, Debug)]
pub enum CoreError {
    /// A setting deserialized but holds an unusable value; names the key.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
