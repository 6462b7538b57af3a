//! Error types for kalends operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KalendsError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid field: {field} = {value}")]
    InvalidField { field: &'static str, value: i64 },

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Invalid serialized state: {0}")]
    InvalidSerializedState(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, KalendsError>;
